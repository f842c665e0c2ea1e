//! Credential resolution
//!
//! Sources are tried in order: static keys from the configuration, the shared
//! credentials file (optionally a named profile), the standard environment
//! variables, then the instance metadata service. When an `assume_role` block
//! names a role, whatever the chain resolves is exchanged for role credentials.

use crate::config::ProviderConfig;
use crate::error::{ConfigError, Result};
use aws_config::{Region, SdkConfig};
use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::imds::credentials::ImdsCredentialsProvider;
use aws_config::meta::credentials::CredentialsProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::sts::AssumeRoleProvider;
use aws_credential_types::Credentials;
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};

const STATIC_PROVIDER_NAME: &str = "StaticProvider";

/// One link of the credential chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Static,
    SharedFile {
        profile: Option<String>,
        file: Option<String>,
    },
    Environment,
    InstanceMetadata,
}

impl CredentialSource {
    pub fn name(&self) -> &'static str {
        match self {
            CredentialSource::Static => "Static",
            CredentialSource::SharedFile { .. } => "SharedCredentialsFile",
            CredentialSource::Environment => "Environment",
            CredentialSource::InstanceMetadata => "InstanceMetadata",
        }
    }
}

/// The credential sources tried for `config`, in order
pub fn credential_sources(config: &ProviderConfig) -> Vec<CredentialSource> {
    let mut sources = Vec::with_capacity(4);

    if config.static_access_key().is_some() && config.static_secret_key().is_some() {
        sources.push(CredentialSource::Static);
    }

    sources.push(CredentialSource::SharedFile {
        profile: config.profile_name().map(str::to_string),
        file: config.credentials_file().map(str::to_string),
    });
    sources.push(CredentialSource::Environment);

    if !config.skip_metadata_api_check {
        sources.push(CredentialSource::InstanceMetadata);
    }

    sources
}

fn source_provider(config: &ProviderConfig, source: &CredentialSource) -> SharedCredentialsProvider {
    match source {
        CredentialSource::Static => SharedCredentialsProvider::new(Credentials::new(
            config.static_access_key().unwrap_or_default(),
            config.static_secret_key().unwrap_or_default(),
            config.session_token().map(str::to_string),
            None,
            STATIC_PROVIDER_NAME,
        )),
        CredentialSource::SharedFile { profile, file } => {
            let mut builder = ProfileFileCredentialsProvider::builder();
            if let Some(profile) = profile {
                builder = builder.profile_name(profile);
            }
            if let Some(file) = file {
                builder = builder.profile_files(
                    ProfileFiles::builder()
                        .with_file(ProfileFileKind::Credentials, file)
                        .build(),
                );
            }
            SharedCredentialsProvider::new(builder.build())
        }
        CredentialSource::Environment => {
            SharedCredentialsProvider::new(EnvironmentVariableCredentialsProvider::new())
        }
        CredentialSource::InstanceMetadata => {
            SharedCredentialsProvider::new(ImdsCredentialsProvider::builder().build())
        }
    }
}

/// Build the credential chain for `config`, wrapped in assume-role if configured
///
/// `base` carries the transport and retry policy used for the STS exchange.
pub async fn credentials_provider(
    config: &ProviderConfig,
    base: &SdkConfig,
) -> Result<SharedCredentialsProvider> {
    let sources = credential_sources(config);
    tracing::debug!(
        "Credential chain: {}",
        sources
            .iter()
            .map(CredentialSource::name)
            .collect::<Vec<_>>()
            .join(" -> ")
    );

    let mut links = sources.iter();
    let first = links
        .next()
        .ok_or(ConfigError::NoCredentialSource)?;
    let mut chain =
        CredentialsProviderChain::first_try(first.name(), source_provider(config, first));
    for source in links {
        chain = chain.or_else(source.name(), source_provider(config, source));
    }

    let Some(role) = config.role_to_assume() else {
        return Ok(SharedCredentialsProvider::new(chain));
    };

    tracing::info!("Assuming role {}", role.role_arn);

    let mut builder = AssumeRoleProvider::builder(role.role_arn.clone())
        .configure(base)
        .region(Region::new(config.region.clone()));
    if let Some(session_name) = role.session_name.as_deref().filter(|s| !s.is_empty()) {
        builder = builder.session_name(session_name);
    }
    if let Some(external_id) = role.external_id.as_deref().filter(|s| !s.is_empty()) {
        builder = builder.external_id(external_id);
    }
    if let Some(policy) = role.policy.as_deref().filter(|s| !s.is_empty()) {
        builder = builder.policy(policy);
    }

    Ok(SharedCredentialsProvider::new(
        builder.build_from_provider(chain).await,
    ))
}

/// Resolve credentials once so a missing source fails configuration early
pub async fn check_credentials(provider: &SharedCredentialsProvider) -> Result<Credentials> {
    provider
        .provide_credentials()
        .await
        .map_err(classify_credentials_error)
}

/// Map a chain failure onto the provider's error taxonomy
///
/// "Nothing in the chain had credentials" gets the guidance message; any other
/// failure keeps its cause.
pub fn classify_credentials_error(err: CredentialsError) -> ConfigError {
    match err {
        CredentialsError::CredentialsNotLoaded(_) => ConfigError::NoCredentialSource,
        other => ConfigError::Credential { source: other },
    }
}
