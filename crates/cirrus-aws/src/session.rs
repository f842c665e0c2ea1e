//! Session builder
//!
//! Turns a [`ProviderConfig`] into a [`ResolvedSession`]: validated region,
//! resolved credentials, one shared SDK configuration, one client per service
//! and the caller's account identity.
//!
//! ```text
//! ProviderConfig
//!   │ validate, region check
//!   ▼
//! credential chain ──▶ SdkConfig (region, retries, app name, transport)
//!                        │
//!                        ├─▶ identity client ──▶ AccountIdentity ──▶ allow/deny check
//!                        ├─▶ compute client
//!                        ├─▶ load balancer client
//!                        └─▶ object storage client
//! ```

use crate::account::{AccountIdentity, validate_account_id};
use crate::config::{ProviderConfig, Service};
use crate::credentials;
use crate::debug::{AuthFailureDebug, auth_failure_debug_enabled};
use crate::error::{ConfigError, Result};
use crate::identity::{IamIdentityResolver, IdentityResolver};
use crate::region::validate_region;
use crate::transport;
use aws_config::retry::RetryConfig;
use aws_config::{AppName, BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;

/// User-agent application name sent with every request
pub const APP_NAME: &str = "cirrus";

/// Authenticated, endpoint-bound clients for one provider configuration
///
/// Read-only once built; clone it freely, clones share connections.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    region: String,
    partition: String,
    account_id: String,
    sdk_config: SdkConfig,
    compute: aws_sdk_ec2::Client,
    load_balancer: aws_sdk_elasticloadbalancing::Client,
    identity: aws_sdk_iam::Client,
    object_storage: aws_sdk_s3::Client,
    #[cfg(feature = "api-gateway")]
    api_gateway: aws_sdk_apigateway::Client,
}

impl ResolvedSession {
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Partition of the account (empty when the identity could not be resolved)
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Account id (empty when the identity could not be resolved)
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.sdk_config
    }

    /// Compute (FCU/EC2) client
    pub fn compute(&self) -> &aws_sdk_ec2::Client {
        &self.compute
    }

    /// Load balancer (LBU/ELB) client
    pub fn load_balancer(&self) -> &aws_sdk_elasticloadbalancing::Client {
        &self.load_balancer
    }

    /// Identity (EIM/IAM) client
    pub fn identity(&self) -> &aws_sdk_iam::Client {
        &self.identity
    }

    /// Object storage (OSU/S3) client
    pub fn object_storage(&self) -> &aws_sdk_s3::Client {
        &self.object_storage
    }

    #[cfg(feature = "api-gateway")]
    pub fn api_gateway(&self) -> &aws_sdk_apigateway::Client {
        &self.api_gateway
    }
}

/// Builds a [`ResolvedSession`]
///
/// The identity resolver can be replaced, e.g. for endpoints without an
/// identity service.
pub struct SessionBuilder {
    config: ProviderConfig,
    identity_resolver: Option<Arc<dyn IdentityResolver>>,
}

impl SessionBuilder {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            identity_resolver: None,
        }
    }

    pub fn identity_resolver(mut self, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.identity_resolver = Some(resolver);
        self
    }

    pub async fn build(self) -> Result<ResolvedSession> {
        let config = &self.config;
        config.validate()?;

        if config.skip_region_validation {
            tracing::info!("Skipping region validation");
        } else {
            tracing::info!("Validating region {}", config.region);
            validate_region(&config.region)?;
        }

        let base_config = base_config(config).await?;

        tracing::info!("Resolving credentials");
        let credentials_provider =
            credentials::credentials_provider(config, &base_config).await?;
        credentials::check_credentials(&credentials_provider).await?;

        let sdk_config = base_config
            .to_builder()
            .credentials_provider(credentials_provider)
            .build();
        let debug = auth_failure_debug_enabled();
        if debug {
            tracing::info!("AuthFailure debugging enabled");
        }

        // The identity client comes first: the account check gates everything else.
        let identity = {
            let mut builder = aws_sdk_iam::config::Builder::from(&sdk_config);
            builder.set_endpoint_url(endpoint(config, Service::Identity));
            if debug {
                builder = builder.interceptor(AuthFailureDebug);
            }
            aws_sdk_iam::Client::from_conf(builder.build())
        };

        let resolver = self
            .identity_resolver
            .clone()
            .unwrap_or_else(|| -> Arc<dyn IdentityResolver> {
                Arc::new(IamIdentityResolver::new(identity.clone()))
            });
        let account = match resolver.resolve().await {
            Ok(account) => {
                tracing::info!(
                    "Resolved account {} in partition {}",
                    account.account_id,
                    account.partition
                );
                account
            }
            Err(e) => {
                tracing::warn!("Unable to resolve account identity: {}", e);
                AccountIdentity::default()
            }
        };

        validate_account_id(
            &config.allowed_account_ids,
            &config.forbidden_account_ids,
            &account.account_id,
        )?;

        let compute = {
            let mut builder = aws_sdk_ec2::config::Builder::from(&sdk_config);
            builder.set_endpoint_url(endpoint(config, Service::Compute));
            if debug {
                builder = builder.interceptor(AuthFailureDebug);
            }
            aws_sdk_ec2::Client::from_conf(builder.build())
        };

        let load_balancer = {
            let mut builder = aws_sdk_elasticloadbalancing::config::Builder::from(&sdk_config);
            builder.set_endpoint_url(endpoint(config, Service::LoadBalancer));
            if debug {
                builder = builder.interceptor(AuthFailureDebug);
            }
            aws_sdk_elasticloadbalancing::Client::from_conf(builder.build())
        };

        let object_storage = {
            let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config)
                .force_path_style(config.s3_force_path_style);
            builder.set_endpoint_url(endpoint(config, Service::ObjectStorage));
            if debug {
                builder = builder.interceptor(AuthFailureDebug);
            }
            aws_sdk_s3::Client::from_conf(builder.build())
        };

        #[cfg(feature = "api-gateway")]
        let api_gateway = {
            let mut builder = aws_sdk_apigateway::config::Builder::from(&sdk_config);
            builder.set_endpoint_url(endpoint(config, Service::ApiGateway));
            if debug {
                builder = builder.interceptor(AuthFailureDebug);
            }
            aws_sdk_apigateway::Client::from_conf(builder.build())
        };

        Ok(ResolvedSession {
            region: config.region.clone(),
            partition: account.partition,
            account_id: account.account_id,
            sdk_config,
            compute,
            load_balancer,
            identity,
            object_storage,
            #[cfg(feature = "api-gateway")]
            api_gateway,
        })
    }
}

/// Build a session with the default identity lookup
pub async fn build_session(config: &ProviderConfig) -> Result<ResolvedSession> {
    SessionBuilder::new(config.clone()).build().await
}

fn endpoint(config: &ProviderConfig, service: Service) -> Option<String> {
    let url = config.endpoints.get(service)?;
    tracing::debug!("Using {} endpoint {}", service, url);
    Some(url.to_string())
}

/// Retry policy for `max_retries` retries on top of the first attempt
fn retry_config(config: &ProviderConfig) -> RetryConfig {
    RetryConfig::standard().with_max_attempts(config.max_retries.saturating_add(1))
}

/// Everything but credentials: region, retries, app name, transport
///
/// The assume-role exchange reuses it, so STS calls see the same transport
/// and retry policy as the service clients.
async fn base_config(config: &ProviderConfig) -> Result<SdkConfig> {
    let app_name = AppName::new(APP_NAME)
        .map_err(|e| ConfigError::InvalidConfig(format!("app name: {}", e)))?;

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .no_credentials()
        .retry_config(retry_config(config))
        .app_name(app_name);

    if config.insecure {
        loader = loader.http_client(transport::insecure_http_client());
    }

    Ok(loader.load().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AuthorizationError;
    use crate::identity::{IdentityError, StaticIdentityResolver};
    use async_trait::async_trait;

    struct FailingResolver;

    #[async_trait]
    impl IdentityResolver for FailingResolver {
        async fn resolve(&self) -> std::result::Result<AccountIdentity, IdentityError> {
            Err(IdentityError::NoIdentity)
        }
    }

    fn static_config() -> ProviderConfig {
        ProviderConfig {
            access_key: Some("AKIDEXAMPLE".into()),
            secret_key: Some("SECRET".into()),
            region: "eu-west-2".into(),
            skip_metadata_api_check: true,
            ..Default::default()
        }
    }

    fn identity() -> Arc<dyn IdentityResolver> {
        Arc::new(StaticIdentityResolver(AccountIdentity {
            partition: "aws".into(),
            account_id: "123456789012".into(),
        }))
    }

    #[tokio::test]
    async fn test_build_session() {
        let config = ProviderConfig {
            max_retries: 4,
            ..static_config()
        };
        let session = SessionBuilder::new(config)
            .identity_resolver(identity())
            .build()
            .await
            .unwrap();

        assert_eq!(session.region(), "eu-west-2");
        assert_eq!(session.partition(), "aws");
        assert_eq!(session.account_id(), "123456789012");
        assert_eq!(
            session.sdk_config().region().map(|r| r.as_ref()),
            Some("eu-west-2")
        );
        assert_eq!(
            session
                .sdk_config()
                .retry_config()
                .map(|r| r.max_attempts()),
            Some(5)
        );
        assert_eq!(
            session.compute().config().region().map(|r| r.as_ref()),
            Some("eu-west-2")
        );
    }

    #[test]
    fn test_retry_attempts_saturate() {
        let config = ProviderConfig {
            max_retries: u32::MAX,
            ..static_config()
        };
        assert_eq!(retry_config(&config).max_attempts(), u32::MAX);
        assert_eq!(retry_config(&static_config()).max_attempts(), 12);
    }

    #[tokio::test]
    async fn test_build_session_with_max_retries_at_limit() {
        let config = ProviderConfig {
            max_retries: u32::MAX,
            ..static_config()
        };
        let session = SessionBuilder::new(config)
            .identity_resolver(identity())
            .build()
            .await
            .unwrap();

        assert_eq!(
            session
                .sdk_config()
                .retry_config()
                .map(|r| r.max_attempts()),
            Some(u32::MAX)
        );
    }

    #[tokio::test]
    async fn test_invalid_region_fails_first() {
        let config = ProviderConfig {
            region: "mars-north-1".into(),
            ..static_config()
        };
        let result = SessionBuilder::new(config)
            .identity_resolver(identity())
            .build()
            .await;

        match result {
            Err(ConfigError::InvalidRegion(region)) => assert_eq!(region, "mars-north-1"),
            other => panic!("expected InvalidRegion, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_skip_region_validation() {
        let config = ProviderConfig {
            region: "private-zone-1".into(),
            skip_region_validation: true,
            ..static_config()
        };
        let session = SessionBuilder::new(config)
            .identity_resolver(identity())
            .build()
            .await
            .unwrap();
        assert_eq!(session.region(), "private-zone-1");
    }

    #[tokio::test]
    async fn test_forbidden_account_aborts() {
        let config = ProviderConfig {
            forbidden_account_ids: vec!["123456789012".into()],
            ..static_config()
        };
        let result = SessionBuilder::new(config)
            .identity_resolver(identity())
            .build()
            .await;

        assert!(matches!(
            result,
            Err(ConfigError::Authorization(AuthorizationError::ForbiddenAccount(_)))
        ));
    }

    #[tokio::test]
    async fn test_allowed_account_passes() {
        let config = ProviderConfig {
            allowed_account_ids: vec!["123456789012".into()],
            ..static_config()
        };
        assert!(
            SessionBuilder::new(config)
                .identity_resolver(identity())
                .build()
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_identity_failure_is_not_fatal() {
        let session = SessionBuilder::new(static_config())
            .identity_resolver(Arc::new(FailingResolver))
            .build()
            .await
            .unwrap();

        assert_eq!(session.partition(), "");
        assert_eq!(session.account_id(), "");
    }

    #[tokio::test]
    async fn test_identity_failure_with_allow_list_is_rejected() {
        let config = ProviderConfig {
            allowed_account_ids: vec!["123456789012".into()],
            ..static_config()
        };
        let result = SessionBuilder::new(config)
            .identity_resolver(Arc::new(FailingResolver))
            .build()
            .await;

        assert!(matches!(
            result,
            Err(ConfigError::Authorization(AuthorizationError::AccountNotAllowed(_)))
        ));
    }

    #[tokio::test]
    async fn test_insecure_session_builds() {
        let config = ProviderConfig {
            insecure: true,
            s3_force_path_style: true,
            ..static_config()
        };
        let session = SessionBuilder::new(config)
            .identity_resolver(identity())
            .build()
            .await
            .unwrap();
        assert_eq!(
            session.object_storage().config().region().map(|r| r.as_ref()),
            Some("eu-west-2")
        );
    }

    #[tokio::test]
    async fn test_missing_region_is_reported() {
        let config = ProviderConfig {
            region: String::new(),
            ..static_config()
        };
        let result = SessionBuilder::new(config).build().await;
        assert!(matches!(result, Err(ConfigError::MissingRegion)));
    }
}
