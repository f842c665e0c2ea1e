//! Cirrus AWS
//!
//! Session builder for the Outscale / AWS-compatible API dialect, and the
//! resource handlers that run on the resulting session.
//!
//! # Services
//!
//! - **Compute** (FCU / EC2)
//! - **Identity** (EIM / IAM)
//! - **Load balancer** (LBU / ELB)
//! - **Object storage** (OSU / S3)
//! - **API gateway** (feature `api-gateway`)
//!
//! # Example
//!
//! ```no_run
//! use cirrus_aws::{ProviderConfig, build_session};
//!
//! # async fn run() -> cirrus_aws::Result<()> {
//! let config = ProviderConfig::from_yaml_str("region: eu-west-2\nprofile: ops\n")?;
//! let session = build_session(&config).await?;
//! println!("{} / {}", session.partition(), session.account_id());
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod config;
pub mod credentials;
pub mod debug;
pub mod discovery;
pub mod error;
pub mod identity;
pub mod region;
pub mod resources;
pub mod session;
pub mod shapes;
pub mod transport;

// Re-exports
pub use account::{AccountIdentity, AuthorizationError, validate_account_id};
pub use config::{AssumeRoleConfig, EndpointsConfig, ProviderConfig, Service};
pub use discovery::find_provider_file;
pub use error::{ConfigError, Result};
pub use identity::{IamIdentityResolver, IdentityError, IdentityResolver, StaticIdentityResolver};
pub use region::{KNOWN_REGIONS, validate_region};
pub use session::{ResolvedSession, SessionBuilder, build_session};
