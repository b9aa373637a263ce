use actix_session::Session;

use crate::errors::AppError;
use crate::models::identity::Identity;
use crate::store::IdentityStore;

const IDENTITY_KEY: &str = "identity_id";

/// Record a successful login in the session.
pub fn insert_identity(session: &Session, identity: &Identity) -> Result<(), AppError> {
    session
        .insert(IDENTITY_KEY, identity.id.clone())
        .map_err(|_| AppError::Unauthenticated)
}

pub fn clear(session: &Session) {
    session.purge();
}

/// Resolve the session to a live identity, or None when the session is
/// anonymous. Role and department are re-read from the store on every
/// request so a role change takes effect immediately; a stale id or a
/// deactivated identity resolves to None.
pub async fn maybe_identity(
    session: &Session,
    identities: &dyn IdentityStore,
) -> Result<Option<Identity>, AppError> {
    let id = match session.get::<String>(IDENTITY_KEY) {
        Ok(Some(id)) => id,
        _ => return Ok(None),
    };
    let identity = identities.find_by_id(&id).await?.filter(|i| i.is_active);
    Ok(identity)
}

/// Resolve the session to a live identity, failing with `Unauthenticated`
/// when there is none.
pub async fn require_identity(
    session: &Session,
    identities: &dyn IdentityStore,
) -> Result<Identity, AppError> {
    maybe_identity(session, identities)
        .await?
        .ok_or(AppError::Unauthenticated)
}
