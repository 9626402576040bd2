//! Recipient identity.

use crate::error::Error;
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

/// The person a newsletter is addressed to.
///
/// Immutable input to the rendering pipeline; nothing downstream mutates it.
///
/// # Examples
///
/// ```
/// use bulletin::Recipient;
///
/// let recipient = Recipient::new("ana@example.com", "Ana", "Lee");
/// assert_eq!(recipient.full_name(), "Ana Lee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// Email address (e.g. "ana@example.com").
    pub email: String,
    /// Given name. May be empty; layouts fall back to a generic greeting.
    pub first_name: String,
    /// Family name. May be empty.
    pub last_name: String,
    /// Identifier in the external membership directory, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Recipient {
    /// Create a recipient without validating the email address.
    ///
    /// Use [`Recipient::parse`] when the address comes from untrusted input.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            user_id: None,
        }
    }

    /// Create a recipient, validating the email address.
    ///
    /// Uses RFC 5321/5322 compliant validation.
    ///
    /// ```
    /// use bulletin::Recipient;
    ///
    /// assert!(Recipient::parse("ana@example.com", "Ana", "Lee").is_ok());
    /// assert!(Recipient::parse("not-an-email", "Ana", "Lee").is_err());
    /// ```
    pub fn parse(
        email: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, Error> {
        if !EmailAddress::is_valid(email) {
            return Err(Error::validation(
                "recipient.email",
                format!("'{}' is not a valid email address", email),
            ));
        }
        Ok(Self::new(email, first_name, last_name))
    }

    /// Set the external directory user id.
    pub fn user_id(mut self, id: u64) -> Self {
        self.user_id = Some(id);
        self
    }

    /// First and last name joined with a space, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Validate the email address on an already-constructed recipient.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !EmailAddress::is_valid(&self.email) {
            return Err(Error::validation(
                "recipient.email",
                format!("'{}' is not a valid email address", self.email),
            ));
        }
        Ok(())
    }
}
