//! Provider configuration error types

use crate::account::AuthorizationError;
use thiserror::Error;

/// Errors that abort provider configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Not a valid region: {0}")]
    InvalidRegion(String),

    #[error(
        "No region configured. Set `region` in the provider configuration \
         or the AWS_REGION / AWS_DEFAULT_REGION environment variable"
    )]
    MissingRegion,

    #[error(
        "No valid credential sources found for the provider.\n\
         Please see the provider documentation for more information on\n\
         providing credentials: access_key/secret_key, a shared credentials\n\
         file and profile, the AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY\n\
         environment variables, or an instance profile"
    )]
    NoCredentialSource,

    #[error("Error loading credentials: {source}")]
    Credential {
        #[source]
        source: aws_credential_types::provider::error::CredentialsError,
    },

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(
        "Provider configuration file not found. Looked in:\n\
         - $CIRRUS_CONFIG_PATH\n\
         - current directory: cirrus.local.yaml, cirrus.yaml, cirrus.json\n\
         - <config dir>/cirrus/cirrus.yaml"
    )]
    ProviderFileNotFound,

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
