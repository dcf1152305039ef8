//! REST API endpoint implementations.
//!
//! One async function per service route. Each takes the shared transport and
//! the base URL, and returns the raw envelope (or its absence) without
//! interpreting `code` or `data`.

mod advertising;
mod orders;
mod request;
mod terminal;

pub use advertising::{get_ad, get_brightness_config, get_qr_code, get_version};
pub use orders::{get_charge_rule, get_order_info_by_power_bank_id};
pub use request::send_envelope_request;
pub(crate) use request::{endpoint_url, root_url};
pub use terminal::{
    create_connection_token, create_payment_intent, get_location_id, get_pre_amount,
    lend_power_nayax, lend_power_stripe_terminal,
};
