//! The external membership directory: user records, role checks, and the
//! HTTP client that talks to the real service.
//!
//! The [`Directory`] trait is the seam: the rendering pipeline and sync
//! logic depend only on it, so tests swap in an in-memory fake and the
//! `directory` feature supplies the [`HttpDirectory`] implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A user record as the membership directory reports it.
///
/// Field names mirror the upstream REST API, which uses snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: u64,
    pub email: String,
    /// Login handle, distinct from the display name.
    #[serde(default)]
    pub login: String,
    pub display_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Result of a credential check against the directory.
///
/// A failed check is a normal outcome, not an error; errors are reserved
/// for the directory being unreachable or misconfigured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub user: Option<DirectoryUser>,
    pub message: Option<String>,
}

impl AuthOutcome {
    pub fn granted(user: DirectoryUser) -> Self {
        Self {
            success: true,
            user: Some(user),
            message: None,
        }
    }

    pub fn denied(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            message: Some(message.into()),
        }
    }
}

/// Whether a directory user holds an administrator role.
///
/// Role names are matched case-insensitively; both the full and the short
/// spelling count.
pub fn is_admin(user: &DirectoryUser) -> bool {
    user.roles.iter().any(|role| {
        let role = role.to_lowercase();
        role == "administrator" || role == "admin"
    })
}

/// Read operations against the membership directory.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Check credentials. Wrong credentials yield a denied outcome; `Err`
    /// means the directory itself could not answer.
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthOutcome, Error>;

    /// Fetch one user by directory id.
    async fn user_by_id(&self, id: u64) -> Result<DirectoryUser, Error>;

    /// Fetch one page of users. Pages are 1-based; an empty page means the
    /// listing is exhausted.
    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<DirectoryUser>, Error>;
}

#[cfg(feature = "directory")]
pub use http::HttpDirectory;

#[cfg(feature = "directory")]
mod http {
    use super::{AuthOutcome, Directory, DirectoryUser};
    use crate::error::Error;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    /// Directory client backed by the service's REST API.
    ///
    /// Service credentials (an application password) are used for lookups
    /// and listings; `authenticate` uses the credentials under test instead.
    pub struct HttpDirectory {
        client: reqwest::Client,
        base_url: String,
        service_user: String,
        service_password: String,
    }

    impl HttpDirectory {
        pub fn new(
            base_url: impl Into<String>,
            service_user: impl Into<String>,
            service_password: impl Into<String>,
        ) -> Self {
            Self {
                client: reqwest::Client::new(),
                base_url: base_url.into().trim_end_matches('/').to_string(),
                service_user: service_user.into(),
                service_password: service_password.into(),
            }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        fn map_status(status: StatusCode, context: String) -> Error {
            match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::UpstreamAuth,
                StatusCode::NOT_FOUND => Error::UserNotFound(context),
                s if s.is_server_error() => {
                    Error::UpstreamUnavailable(format!("directory returned {}", s))
                }
                s => Error::Http(format!("directory returned {} for {}", s, context)),
            }
        }
    }

    #[async_trait]
    impl Directory for HttpDirectory {
        async fn authenticate(
            &self,
            email: &str,
            password: &str,
        ) -> Result<AuthOutcome, Error> {
            let response = self
                .client
                .get(self.url("/users/me"))
                .basic_auth(email, Some(password))
                .send()
                .await?;

            match response.status() {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    tracing::debug!(email, "directory rejected credentials");
                    Ok(AuthOutcome::denied("invalid email or password"))
                }
                status if status.is_success() => {
                    let user: DirectoryUser = response.json().await?;
                    tracing::debug!(user_id = user.id, "directory accepted credentials");
                    Ok(AuthOutcome::granted(user))
                }
                status if status.is_server_error() => Err(Error::UpstreamUnavailable(format!(
                    "directory returned {}",
                    status
                ))),
                status => Err(Error::Http(format!(
                    "directory returned {} during authentication",
                    status
                ))),
            }
        }

        async fn user_by_id(&self, id: u64) -> Result<DirectoryUser, Error> {
            let response = self
                .client
                .get(self.url(&format!("/users/{}", id)))
                .basic_auth(&self.service_user, Some(&self.service_password))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(Self::map_status(status, id.to_string()));
            }
            Ok(response.json().await?)
        }

        async fn list_users(
            &self,
            page: u32,
            per_page: u32,
        ) -> Result<Vec<DirectoryUser>, Error> {
            let response = self
                .client
                .get(self.url("/users"))
                .query(&[("page", page), ("per_page", per_page)])
                .basic_auth(&self.service_user, Some(&self.service_password))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(Self::map_status(status, format!("page {}", page)));
            }
            Ok(response.json().await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> DirectoryUser {
        DirectoryUser {
            id: 1,
            email: "a@b.com".to_string(),
            login: "a".to_string(),
            display_name: "A".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_is_admin_case_insensitive() {
        assert!(is_admin(&user_with_roles(&["Administrator"])));
        assert!(is_admin(&user_with_roles(&["ADMIN"])));
        assert!(is_admin(&user_with_roles(&["subscriber", "admin"])));
        assert!(!is_admin(&user_with_roles(&["subscriber"])));
        assert!(!is_admin(&user_with_roles(&[])));
        // Substrings do not count.
        assert!(!is_admin(&user_with_roles(&["administrative-assistant"])));
    }

    #[test]
    fn test_directory_user_tolerates_missing_optional_fields() {
        let user: DirectoryUser = serde_json::from_str(
            r#"{"id": 9, "email": "x@y.com", "display_name": "X"}"#,
        )
        .unwrap();
        assert_eq!(user.id, 9);
        assert!(user.roles.is_empty());
        assert!(user.first_name.is_empty());
    }
}
