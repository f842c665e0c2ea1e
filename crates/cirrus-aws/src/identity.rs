//! Account identity bootstrap

use crate::account::AccountIdentity;
use async_trait::async_trait;
use aws_sdk_iam::error::DisplayErrorContext;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity lookup failed: {0}")]
    Lookup(String),

    #[error("Cannot parse account from ARN: {0}")]
    UnparsableArn(String),

    #[error("No user or role available to derive the account from")]
    NoIdentity,
}

/// Resolves the partition and account id of the configured credentials
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self) -> Result<AccountIdentity, IdentityError>;
}

/// Identity lookup through the identity (EIM/IAM) service
///
/// The caller's own user ARN is used when available. Role credentials cannot
/// call GetUser; for those the first listed role gives the account.
#[derive(Debug, Clone)]
pub struct IamIdentityResolver {
    client: aws_sdk_iam::Client,
}

impl IamIdentityResolver {
    pub fn new(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }

    async fn user_arn(&self) -> Result<Option<String>, IdentityError> {
        let output = self
            .client
            .get_user()
            .send()
            .await
            .map_err(|e| IdentityError::Lookup(DisplayErrorContext(&e).to_string()))?;
        Ok(output.user().map(|user| user.arn().to_string()))
    }

    async fn first_role_arn(&self) -> Result<Option<String>, IdentityError> {
        let output = self
            .client
            .list_roles()
            .max_items(1)
            .send()
            .await
            .map_err(|e| IdentityError::Lookup(DisplayErrorContext(&e).to_string()))?;
        Ok(output.roles().first().map(|role| role.arn().to_string()))
    }
}

#[async_trait]
impl IdentityResolver for IamIdentityResolver {
    async fn resolve(&self) -> Result<AccountIdentity, IdentityError> {
        let arn = match self.user_arn().await {
            Ok(Some(arn)) => arn,
            Ok(None) => self.first_role_arn().await?.ok_or(IdentityError::NoIdentity)?,
            Err(e) => {
                tracing::debug!("GetUser failed, falling back to ListRoles: {}", e);
                self.first_role_arn().await?.ok_or(IdentityError::NoIdentity)?
            }
        };

        AccountIdentity::from_arn(&arn).ok_or(IdentityError::UnparsableArn(arn))
    }
}

/// Resolver that always returns a fixed identity
#[derive(Debug, Clone)]
pub struct StaticIdentityResolver(pub AccountIdentity);

#[async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve(&self) -> Result<AccountIdentity, IdentityError> {
        Ok(self.0.clone())
    }
}
