//! Caller resolution from the session user id.

use tracing::warn;

use crate::domain::ports::IdentityDirectoryError;
use crate::domain::{CallerIdentity, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Resolve the authenticated caller with role and entitlements.
///
/// A session pointing at a user the directory no longer knows is treated as
/// unauthenticated.
pub async fn resolve_caller(
    state: &HttpState,
    session: &SessionContext,
) -> Result<CallerIdentity, Error> {
    let user_id = session.require_user_id()?;
    let identity = state
        .identities
        .find_identity(&user_id)
        .await
        .map_err(map_directory_error)?;
    identity.ok_or_else(|| {
        warn!(%user_id, "session user missing from identity directory");
        Error::unauthenticated("login required")
    })
}

fn map_directory_error(error: IdentityDirectoryError) -> Error {
    Error::upstream_failure(format!("identity lookup failed: {error}"))
}
