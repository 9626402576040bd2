//! Keeping the local user mirror in step with the membership directory.

use chrono::{DateTime, Utc};

use crate::directory::Directory;
use crate::error::Error;
use crate::store::{StoredUser, UserFields, UserStore};

/// Page size used when walking the full directory listing.
const SYNC_PAGE_SIZE: u32 = 100;

/// Fetch one user from the directory and mirror it.
///
/// Profile fields and the admin flag land in a single upsert, so a
/// concurrent reader sees either the old record or the new one, never a
/// mixture.
pub async fn sync_user(
    directory: &dyn Directory,
    store: &dyn UserStore,
    id: u64,
    now: DateTime<Utc>,
) -> Result<StoredUser, Error> {
    let user = directory.user_by_id(id).await?;
    let stored = store
        .upsert(&user.id.to_string(), UserFields::from_directory(&user), now)
        .await?;
    tracing::debug!(user_id = id, is_admin = stored.fields.is_admin, "user mirrored");
    Ok(stored)
}

/// Walk the full directory listing and mirror every user. Returns the
/// number of users mirrored.
pub async fn sync_all(
    directory: &dyn Directory,
    store: &dyn UserStore,
    now: DateTime<Utc>,
) -> Result<usize, Error> {
    let mut total = 0;
    let mut page = 1;
    loop {
        let users = directory.list_users(page, SYNC_PAGE_SIZE).await?;
        if users.is_empty() {
            break;
        }
        let exhausted = (users.len() as u32) < SYNC_PAGE_SIZE;
        for user in users {
            store
                .upsert(&user.id.to_string(), UserFields::from_directory(&user), now)
                .await?;
            total += 1;
        }
        if exhausted {
            break;
        }
        page += 1;
    }
    tracing::info!(total, "directory sync complete");
    Ok(total)
}

/// Return the mirrored record for a directory user, syncing it on a miss.
pub async fn get_or_sync(
    directory: &dyn Directory,
    store: &dyn UserStore,
    id: u64,
    now: DateTime<Utc>,
) -> Result<StoredUser, Error> {
    if let Some(stored) = store.get(&id.to_string()).await? {
        return Ok(stored);
    }
    sync_user(directory, store, id, now).await
}

/// Check credentials against the directory and, on success, mirror the user
/// and issue a session token.
#[cfg(feature = "session")]
pub async fn login(
    directory: &dyn Directory,
    store: &dyn UserStore,
    signer: &crate::session::SessionSigner,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<(String, crate::session::SessionClaims), Error> {
    let outcome = directory.authenticate(email, password).await?;
    let user = match outcome.user {
        Some(user) if outcome.success => user,
        _ => return Err(Error::UpstreamAuth),
    };

    store
        .upsert(&user.id.to_string(), UserFields::from_directory(&user), now)
        .await?;

    let claims = crate::session::SessionClaims::for_user(&user, now);
    let token = signer.issue(&claims)?;
    tracing::info!(user_id = user.id, "session issued");
    Ok((token, claims))
}
