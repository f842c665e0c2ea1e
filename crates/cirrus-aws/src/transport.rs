//! HTTP transport overrides
//!
//! Only used when `insecure = true`: endpoints with self-signed certificates
//! (private clouds, local object storage) are reached through a client that
//! skips certificate verification entirely.

use aws_smithy_runtime::client::http::hyper_014::HyperClientBuilder;
use aws_smithy_runtime_api::client::http::SharedHttpClient;
use rustls::client::{ServerCertVerified, ServerCertVerifier};
use rustls::{Certificate, ClientConfig, ServerName};
use std::sync::Arc;
use std::time::SystemTime;

/// Certificate verifier that accepts every server certificate
#[derive(Debug)]
struct AcceptAnyServerCert;

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }
}

fn insecure_tls_config() -> ClientConfig {
    ClientConfig::builder()
        .with_safe_defaults()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert))
        .with_no_client_auth()
}

/// HTTP client that does not verify TLS certificates
pub fn insecure_http_client() -> SharedHttpClient {
    tracing::warn!("TLS certificate verification is disabled (insecure = true)");

    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_tls_config(insecure_tls_config())
        .https_or_http()
        .enable_http1()
        .build();

    HyperClientBuilder::new().build(connector)
}
