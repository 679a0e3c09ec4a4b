use crate::permission::PermissionIdentity;
use crate::store::{DriveStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("no email address given")]
    EmptyEmail,
    #[error("could not resolve permission id for {email}: {source}")]
    Lookup {
        email: String,
        #[source]
        source: StoreError,
    },
}

/// Resolve the permission identity of `email`. Runs once before
/// the walk starts; a failure here means there is nothing to
/// transfer to, so callers must not go on to walk.
pub async fn resolve_identity<S: DriveStore + ?Sized>(
    store: &S,
    email: &str,
) -> Result<PermissionIdentity, IdentityError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(IdentityError::EmptyEmail);
    }

    let identity = store
        .permission_id_for_email(email)
        .await
        .map_err(|source| IdentityError::Lookup {
            email: email.to_string(),
            source,
        })?;

    tracing::info!(email, permission_id = %identity, "resolved target owner");
    Ok(identity)
}
