//! Outbound link set for a rendered email.

use serde::{Deserialize, Serialize};

/// Fallback when the caller supplies no website URL.
pub const DEFAULT_WEBSITE_URL: &str = "https://example.com";

/// Fallback when the caller supplies no company name.
pub const DEFAULT_COMPANY_NAME: &str = "Newsletter";

/// The outbound links every email carries.
///
/// `unsubscribe` is required; everything else is optional, with `website`
/// falling back to [`DEFAULT_WEBSITE_URL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSet {
    pub unsubscribe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_in_browser: Option<String>,
    pub website: String,
}

impl LinkSet {
    /// Create a link set with the required unsubscribe URL and the default
    /// website fallback.
    pub fn new(unsubscribe: impl Into<String>) -> Self {
        Self {
            unsubscribe: unsubscribe.into(),
            preferences: None,
            view_in_browser: None,
            website: DEFAULT_WEBSITE_URL.to_string(),
        }
    }

    pub fn preferences(mut self, url: impl Into<String>) -> Self {
        self.preferences = Some(url.into());
        self
    }

    pub fn view_in_browser(mut self, url: impl Into<String>) -> Self {
        self.view_in_browser = Some(url.into());
        self
    }

    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.website = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_website_fallback() {
        let links = LinkSet::new("https://example.com/u");
        assert_eq!(links.website, DEFAULT_WEBSITE_URL);
        assert!(links.preferences.is_none());
    }
}
