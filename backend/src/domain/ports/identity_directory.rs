//! Port resolving session user ids into caller identities.
use async_trait::async_trait;

use crate::domain::{CallerIdentity, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity directory adapters.
    pub enum IdentityDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "identity directory connection failed: {message}",
        /// Lookup query failed.
        Query { message: String } => "identity directory query failed: {message}",
    }
}

/// Lookup of users with their role and entitlement set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolve a user id; `None` when the user does not exist.
    async fn find_identity(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CallerIdentity>, IdentityDirectoryError>;
}

/// Directory that knows nobody.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityDirectory;

#[async_trait]
impl IdentityDirectory for FixtureIdentityDirectory {
    async fn find_identity(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<CallerIdentity>, IdentityDirectoryError> {
        Ok(None)
    }
}
