//! Purpose: Integration tests for the transport's TLS trust policy.
//! Responsibilities: Verify that a self-signed certificate issued for the wrong host is
//! rejected under the strict policy and accepted under the permissive policy, and that
//! a strict client trusting the issuing CA still rejects a certificate for another host.
//! Non-scope: Does not test certificate pinning or client certificates.
//! Invariants/Assumptions: The test server speaks HTTP/1.1 over rustls and answers every
//! request with the same envelope.

mod common;

use common::*;
use rcgen::{BasicConstraints, CertificateParams, IsCa, KeyPair, SanType};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use secrecy::SecretString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

const QR_CODE_BODY: &str = r#"{"code":200,"message":"success","data":{"qrCode":"ABC123"}}"#;

/// A throwaway certificate authority for issuing server certificates.
struct TestCa {
    cert: rcgen::Certificate,
    key: KeyPair,
}

impl TestCa {
    fn new() -> Self {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        let cert = params.self_signed(&key).unwrap();
        Self { cert, key }
    }

    fn root(&self) -> reqwest::Certificate {
        reqwest::Certificate::from_der(self.cert.der()).unwrap()
    }

    /// Issue a leaf certificate for `names`.
    fn issue(&self, names: Vec<SanType>) -> (CertificateDer<'static>, PrivateKeyDer<'static>) {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        params.subject_alt_names = names;
        let cert = params.signed_by(&key, &self.cert, &self.key).unwrap();
        (
            cert.der().clone(),
            PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der())),
        )
    }
}

/// Start a TLS server whose certificate is self-signed for `wrong.host`.
async fn spawn_self_signed_server() -> SocketAddr {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["wrong.host".to_string()]).unwrap();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));
    spawn_tls_server(cert.der().clone(), key).await
}

/// Start a TLS server presenting `cert` that answers every request with [`QR_CODE_BODY`].
async fn spawn_tls_server(
    cert: CertificateDer<'static>,
    key: PrivateKeyDer<'static>,
) -> SocketAddr {
    let config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .unwrap()
    .with_no_client_auth()
    .with_single_cert(vec![cert], key)
    .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                // Strict clients abort the handshake; that is expected.
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };

                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match tls.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    QR_CODE_BODY.len(),
                    QR_CODE_BODY
                );
                let _ = tls.write_all(response.as_bytes()).await;
                let _ = tls.shutdown().await;
            });
        }
    });

    addr
}

fn client_with_policy(addr: SocketAddr, policy: TrustPolicy) -> PowerTapClient {
    PowerTapClient::builder()
        .base_url(format!("https://{addr}"))
        .secret_key(SecretString::new(TEST_SECRET_KEY.to_string().into()))
        .trust_policy(policy)
        .build()
        .unwrap()
}

fn strict_client_trusting(addr: SocketAddr, root: reqwest::Certificate) -> PowerTapClient {
    PowerTapClient::builder()
        .base_url(format!("https://{addr}"))
        .secret_key(SecretString::new(TEST_SECRET_KEY.to_string().into()))
        .trust_policy(TrustPolicy::Strict)
        .add_root_certificate(root)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_permissive_policy_accepts_self_signed_wrong_host() {
    init_test_logging();
    let addr = spawn_self_signed_server().await;

    let qr_code = client_with_policy(addr, TrustPolicy::Permissive)
        .get_qr_code("DEV-42")
        .await
        .unwrap();

    assert_eq!(qr_code.as_deref(), Some("ABC123"));
}

#[tokio::test]
async fn test_strict_policy_rejects_self_signed_wrong_host() {
    let addr = spawn_self_signed_server().await;

    let err = client_with_policy(addr, TrustPolicy::Strict)
        .get_qr_code("DEV-42")
        .await
        .unwrap_err();

    assert!(err.is_transport(), "expected transport failure, got {err:?}");
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_strict_policy_fails_connection_token() {
    let addr = spawn_self_signed_server().await;

    let err = client_with_policy(addr, TrustPolicy::Strict)
        .create_connection_token()
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Creating connection token failed");
    assert!(err.client_error().is_some());
}

#[tokio::test]
async fn test_strict_policy_with_trusted_root_still_checks_hostname() {
    init_test_logging();
    let ca = TestCa::new();

    // Same CA, same client setup; only the name on the certificate differs.
    let localhost = SanType::IpAddress(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let (cert, key) = ca.issue(vec![localhost]);
    let matching = spawn_tls_server(cert, key).await;
    let qr_code = strict_client_trusting(matching, ca.root())
        .get_qr_code("DEV-42")
        .await
        .unwrap();
    assert_eq!(qr_code.as_deref(), Some("ABC123"));

    let wrong_host = SanType::DnsName("wrong.host".try_into().unwrap());
    let (cert, key) = ca.issue(vec![wrong_host]);
    let mismatched = spawn_tls_server(cert, key).await;
    let err = strict_client_trusting(mismatched, ca.root())
        .get_qr_code("DEV-42")
        .await
        .unwrap_err();

    assert!(err.is_transport(), "expected transport failure, got {err:?}");
    assert!(!err.is_timeout());
}
