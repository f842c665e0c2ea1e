//! Account identity and allow/deny validation

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Forbidden account ID ({0})")]
    ForbiddenAccount(String),

    #[error("Account ID not allowed ({0})")]
    AccountNotAllowed(String),
}

/// Check an account id against the allow and deny lists
///
/// The deny list is checked first. An empty allow list allows everything.
pub fn validate_account_id(
    allowed: &[String],
    forbidden: &[String],
    account_id: &str,
) -> Result<(), AuthorizationError> {
    if allowed.is_empty() && forbidden.is_empty() {
        return Ok(());
    }

    tracing::debug!("Validating account ID {}", account_id);

    if forbidden.iter().any(|id| id == account_id) {
        return Err(AuthorizationError::ForbiddenAccount(account_id.to_string()));
    }

    if !allowed.is_empty() && !allowed.iter().any(|id| id == account_id) {
        return Err(AuthorizationError::AccountNotAllowed(account_id.to_string()));
    }

    Ok(())
}

/// Partition and account id of the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountIdentity {
    pub partition: String,
    pub account_id: String,
}

impl AccountIdentity {
    /// Parse `arn:<partition>:<service>:<region>:<account>:<resource>`
    ///
    /// Returns `None` when the string is not an ARN or lacks an account.
    pub fn from_arn(arn: &str) -> Option<Self> {
        let mut parts = arn.splitn(6, ':');
        if parts.next()? != "arn" {
            return None;
        }
        let partition = parts.next()?;
        let _service = parts.next()?;
        let _region = parts.next()?;
        let account_id = parts.next()?;
        parts.next()?;

        if partition.is_empty() || account_id.is_empty() {
            return None;
        }

        Some(Self {
            partition: partition.to_string(),
            account_id: account_id.to_string(),
        })
    }
}
