//! Provider configuration
//!
//! The declarative `provider` block, deserialised from YAML or JSON. Unknown
//! keys are rejected and defaults are applied here, so the session builder
//! only ever sees a complete, typed configuration.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Environment variables consulted, in order, when `region` is not set
pub const REGION_ENV_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

pub const DEFAULT_MAX_RETRIES: u32 = 11;

fn default_region() -> String {
    REGION_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_credentials_file: Option<String>,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_role: Option<AssumeRoleConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_account_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden_account_ids: Vec<String>,

    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Accept any TLS certificate
    #[serde(default)]
    pub insecure: bool,
    #[serde(default)]
    pub skip_region_validation: bool,
    /// Do not fall back to the instance metadata service for credentials
    #[serde(default)]
    pub skip_metadata_api_check: bool,
    #[serde(default)]
    pub s3_force_path_style: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            secret_key: None,
            token: None,
            profile: None,
            shared_credentials_file: None,
            region: default_region(),
            max_retries: DEFAULT_MAX_RETRIES,
            assume_role: None,
            allowed_account_ids: Vec::new(),
            forbidden_account_ids: Vec::new(),
            endpoints: EndpointsConfig::default(),
            insecure: false,
            skip_region_validation: false,
            skip_metadata_api_check: false,
            s3_force_path_style: false,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("ProviderConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &redact(&self.secret_key))
            .field("token", &redact(&self.token))
            .field("profile", &self.profile)
            .field("shared_credentials_file", &self.shared_credentials_file)
            .field("region", &self.region)
            .field("max_retries", &self.max_retries)
            .field("assume_role", &self.assume_role)
            .field("allowed_account_ids", &self.allowed_account_ids)
            .field("forbidden_account_ids", &self.forbidden_account_ids)
            .field("endpoints", &self.endpoints)
            .field("insecure", &self.insecure)
            .field("skip_region_validation", &self.skip_region_validation)
            .field("skip_metadata_api_check", &self.skip_metadata_api_check)
            .field("s3_force_path_style", &self.s3_force_path_style)
            .finish()
    }
}

impl ProviderConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a configuration file; `.json` files are JSON, anything else YAML
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loading provider configuration from {}", path.display());

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Check constraints that span several fields
    pub fn validate(&self) -> Result<()> {
        if self.region.is_empty() {
            return Err(ConfigError::MissingRegion);
        }

        if !self.allowed_account_ids.is_empty() && !self.forbidden_account_ids.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "allowed_account_ids and forbidden_account_ids are mutually exclusive".into(),
            ));
        }

        match (self.static_access_key(), self.static_secret_key()) {
            (Some(_), None) => Err(ConfigError::InvalidConfig(
                "access_key is set but secret_key is missing".into(),
            )),
            (None, Some(_)) => Err(ConfigError::InvalidConfig(
                "secret_key is set but access_key is missing".into(),
            )),
            _ => Ok(()),
        }
    }

    pub fn static_access_key(&self) -> Option<&str> {
        non_empty(&self.access_key)
    }

    pub fn static_secret_key(&self) -> Option<&str> {
        non_empty(&self.secret_key)
    }

    pub fn session_token(&self) -> Option<&str> {
        non_empty(&self.token)
    }

    pub fn profile_name(&self) -> Option<&str> {
        non_empty(&self.profile)
    }

    pub fn credentials_file(&self) -> Option<&str> {
        non_empty(&self.shared_credentials_file)
    }

    /// The assume-role block, when it names a role
    pub fn role_to_assume(&self) -> Option<&AssumeRoleConfig> {
        self.assume_role
            .as_ref()
            .filter(|role| !role.role_arn.is_empty())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// `assume_role` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssumeRoleConfig {
    pub role_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Inline policy document further restricting the assumed role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

/// Services with their own endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Compute,
    Identity,
    LoadBalancer,
    ObjectStorage,
    ApiGateway,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Compute => write!(f, "compute"),
            Service::Identity => write!(f, "identity"),
            Service::LoadBalancer => write!(f, "load_balancer"),
            Service::ObjectStorage => write!(f, "object_storage"),
            Service::ApiGateway => write!(f, "api_gateway"),
        }
    }
}

/// `endpoints` block: per-service URL overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointsConfig {
    #[serde(default, alias = "fcu", alias = "ec2", skip_serializing_if = "Option::is_none")]
    pub compute: Option<String>,
    #[serde(default, alias = "eim", alias = "iam", skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(default, alias = "lbu", alias = "elb", skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<String>,
    #[serde(default, alias = "osu", alias = "s3", skip_serializing_if = "Option::is_none")]
    pub object_storage: Option<String>,
    #[serde(default, alias = "apigateway", skip_serializing_if = "Option::is_none")]
    pub api_gateway: Option<String>,
}

impl EndpointsConfig {
    /// Override URL for `service`; empty strings count as unset
    pub fn get(&self, service: Service) -> Option<&str> {
        let value = match service {
            Service::Compute => &self.compute,
            Service::Identity => &self.identity,
            Service::LoadBalancer => &self.load_balancer,
            Service::ObjectStorage => &self.object_storage,
            Service::ApiGateway => &self.api_gateway,
        };
        non_empty(value)
    }
}
