//! Purpose: Integration tests for the cabinet advertising routes.
//! Responsibilities: Verify QR lookup by device id, version/brightness narrowing and the raw
//! advertisement envelope.
//! Non-scope: Does not render or schedule advertisements.
//! Invariants/Assumptions: Mocked responses follow the `{code, message, data}` envelope contract.

mod common;

use common::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};

#[tokio::test]
async fn test_get_qr_code_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cabinet/advertising/cabinet_advertising"))
        .and(query_param("fno", "DEV-42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("advertising/qr_code.json")),
        )
        .mount(&mock_server)
        .await;

    let qr_code = client_for(&mock_server).get_qr_code("DEV-42").await.unwrap();
    assert_eq!(qr_code.as_deref(), Some("ABC123"));
}

#[tokio::test]
async fn test_get_qr_code_failure_code_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cabinet/advertising/cabinet_advertising"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 404})))
        .mount(&mock_server)
        .await;

    let qr_code = client_for(&mock_server).get_qr_code("DEV-42").await.unwrap();
    assert!(qr_code.is_none());
}

#[tokio::test]
async fn test_get_qr_code_missing_field_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cabinet/advertising/cabinet_advertising"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"fno": "DEV-42"}
        })))
        .mount(&mock_server)
        .await;

    let qr_code = client_for(&mock_server).get_qr_code("DEV-42").await.unwrap();
    assert!(qr_code.is_none());
}

#[tokio::test]
async fn test_get_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cabinet/advertising/getVersion"))
        .and(query_param("qrCode", "ABC123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("advertising/version.json")),
        )
        .mount(&mock_server)
        .await;

    let version = client_for(&mock_server)
        .get_version("ABC123")
        .await
        .unwrap()
        .expect("version payload");

    assert_eq!(version.get("version"), Some(&json!(17)));
}

#[tokio::test]
async fn test_get_version_failure_code_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cabinet/advertising/getVersion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("error_500.json")))
        .mount(&mock_server)
        .await;

    let version = client_for(&mock_server).get_version("ABC123").await.unwrap();
    assert!(version.is_none());
}

#[tokio::test]
async fn test_get_brightness_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cabinet/advertising/getBrightnessConfig"))
        .and(query_param("qrCode", "ABC123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("advertising/brightness.json")),
        )
        .mount(&mock_server)
        .await;

    let config = client_for(&mock_server)
        .get_brightness_config("ABC123")
        .await
        .unwrap()
        .expect("brightness payload");

    assert_eq!(config.get("dayBrightness"), Some(&json!(80)));
    assert_eq!(config.get("nightStart"), Some(&json!("20:00")));
}

#[tokio::test]
async fn test_get_brightness_config_failure_code_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cabinet/advertising/getBrightnessConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 403,
            "message": "cabinet disabled",
            "data": { "dayBrightness": 80 }
        })))
        .mount(&mock_server)
        .await;

    let config = client_for(&mock_server)
        .get_brightness_config("ABC123")
        .await
        .unwrap();
    assert!(config.is_none());
}

#[tokio::test]
async fn test_get_ad_sends_signed_query_and_returns_raw_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cabinet/advertising/get"))
        .and(query_param("qrCode", "ABC123"))
        .and(query_param("timestamp", "1767225600000"))
        .and(query_param("ip", "10.0.0.7"))
        .and(query_param("sign", "9f86d081884c7d65"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("advertising/ad.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let envelope = client_for(&mock_server)
        .get_ad("ABC123", 1_767_225_600_000, "10.0.0.7", "9f86d081884c7d65")
        .await
        .unwrap()
        .expect("ad envelope");

    assert!(envelope.is_success());
    let list = envelope.data.expect_map().unwrap().get("list").cloned();
    assert_eq!(list.and_then(|l| l.as_array().map(Vec::len)), Some(2));
}

#[tokio::test]
async fn test_get_ad_failure_code_is_still_returned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cabinet/advertising/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 403,
            "message": "signature mismatch"
        })))
        .mount(&mock_server)
        .await;

    let envelope = client_for(&mock_server)
        .get_ad("ABC123", 0, "10.0.0.7", "bad")
        .await
        .unwrap()
        .expect("raw envelope");

    assert_eq!(envelope.code, 403);
    assert_eq!(envelope.message, "signature mismatch");
}
