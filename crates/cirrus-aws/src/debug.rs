//! Extra diagnostics for authentication failures
//!
//! Clock skew is the usual cause of a 401/403 with valid keys. When
//! `CIRRUS_AUTHFAILURE_DEBUG` is set, every service client logs the local UTC
//! time and the response status of such failures.

use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::interceptors::Intercept;
use aws_smithy_runtime_api::client::interceptors::context::BeforeDeserializationInterceptorContextRef;
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_types::config_bag::ConfigBag;

pub const AUTHFAILURE_DEBUG_ENV: &str = "CIRRUS_AUTHFAILURE_DEBUG";

/// Whether the auth failure interceptor should be installed
pub fn auth_failure_debug_enabled() -> bool {
    std::env::var(AUTHFAILURE_DEBUG_ENV).is_ok_and(|v| !v.is_empty())
}

fn is_auth_failure(status: u16) -> bool {
    status == 401 || status == 403
}

#[derive(Debug, Clone, Default)]
pub struct AuthFailureDebug;

impl Intercept for AuthFailureDebug {
    fn name(&self) -> &'static str {
        "AuthFailureDebug"
    }

    fn read_before_deserialization(
        &self,
        context: &BeforeDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        let status = context.response().status().as_u16();
        if is_auth_failure(status) {
            tracing::info!("Additional AuthFailure debugging context");
            tracing::info!("Current system UTC time: {}", chrono::Utc::now());
            tracing::info!("Response status: {}", status);
        }
        Ok(())
    }
}
