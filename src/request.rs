//! The render request: wire format, validation, and assembly into a
//! [`Document`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::document::Document;
use crate::engine;
use crate::error::Error;
use crate::links::{LinkSet, DEFAULT_COMPANY_NAME, DEFAULT_WEBSITE_URL};
use crate::palette::PaletteOverrides;
use crate::post::Post;
use crate::recipient::Recipient;
use crate::registry::TemplateKind;
use crate::vars;

fn default_true() -> bool {
    true
}

/// Everything a caller supplies to render one email.
///
/// Text fields (`subject_line`, `preheader`, `custom_content`, `header_text`,
/// `footer_text`) may contain `{{...}}` placeholders; they are expanded
/// against the recipient's variable bag during assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub template_type: TemplateKind,
    pub recipient: Recipient,
    pub subject_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preheader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<Post>,
    /// Render the post region at all. When false the post list is dropped
    /// entirely, regardless of `posts` or `max_posts`.
    #[serde(default = "default_true")]
    pub include_latest_posts: bool,
    /// Cap on rendered posts, 1 to 20. Falls back to the template's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_posts: Option<usize>,
    /// Per-field palette overrides on top of the template default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<PaletteOverrides>,
    pub unsubscribe_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_in_browser_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Extra substitution variables. Merge last, so they override the
    /// derived recipient and date keys.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, Value>,
}

impl RenderRequest {
    pub fn new(
        template_type: TemplateKind,
        recipient: Recipient,
        subject_line: impl Into<String>,
        unsubscribe_url: impl Into<String>,
    ) -> Self {
        Self {
            template_type,
            recipient,
            subject_line: subject_line.into(),
            preheader: None,
            custom_content: None,
            header_text: None,
            footer_text: None,
            posts: Vec::new(),
            include_latest_posts: true,
            max_posts: None,
            colors: None,
            unsubscribe_url: unsubscribe_url.into(),
            preferences_url: None,
            view_in_browser_url: None,
            website_url: None,
            logo_url: None,
            company_name: None,
            context: HashMap::new(),
        }
    }

    pub fn preheader(mut self, text: impl Into<String>) -> Self {
        self.preheader = Some(text.into());
        self
    }

    pub fn custom_content(mut self, text: impl Into<String>) -> Self {
        self.custom_content = Some(text.into());
        self
    }

    pub fn header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = Some(text.into());
        self
    }

    pub fn footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = Some(text.into());
        self
    }

    pub fn posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = posts;
        self
    }

    pub fn include_latest_posts(mut self, include: bool) -> Self {
        self.include_latest_posts = include;
        self
    }

    pub fn max_posts(mut self, max: usize) -> Self {
        self.max_posts = Some(max);
        self
    }

    pub fn colors(mut self, overrides: PaletteOverrides) -> Self {
        self.colors = Some(overrides);
        self
    }

    pub fn preferences_url(mut self, url: impl Into<String>) -> Self {
        self.preferences_url = Some(url.into());
        self
    }

    pub fn view_in_browser_url(mut self, url: impl Into<String>) -> Self {
        self.view_in_browser_url = Some(url.into());
        self
    }

    pub fn website_url(mut self, url: impl Into<String>) -> Self {
        self.website_url = Some(url.into());
        self
    }

    pub fn logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    pub fn company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    pub fn context_var(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Validate the request without rendering it.
    pub fn validate(&self) -> Result<(), Error> {
        if self.subject_line.trim().is_empty() {
            return Err(Error::validation(
                "subjectLine",
                "subject line must not be empty",
            ));
        }
        self.recipient.validate()?;

        if let Some(max) = self.max_posts {
            if !(1..=20).contains(&max) {
                return Err(Error::validation(
                    "maxPosts",
                    format!("maxPosts must be between 1 and 20, got {}", max),
                ));
            }
        }

        check_url("unsubscribeUrl", &self.unsubscribe_url)?;
        if let Some(url) = &self.preferences_url {
            check_url("preferencesUrl", url)?;
        }
        if let Some(url) = &self.view_in_browser_url {
            check_url("viewInBrowserUrl", url)?;
        }
        if let Some(url) = &self.website_url {
            check_url("websiteUrl", url)?;
        }
        if let Some(url) = &self.logo_url {
            check_url("logoUrl", url)?;
        }
        for post in &self.posts {
            check_url("posts.url", &post.url)?;
            if let Some(image) = &post.featured_image {
                check_url("posts.featuredImage", image)?;
            }
        }
        Ok(())
    }

    /// Validate, expand placeholders, merge colors, clamp posts, and
    /// assemble the [`Document`] frozen at `now`.
    pub(crate) fn into_document_at(self, now: DateTime<Utc>) -> Result<Document, Error> {
        self.validate()?;

        let company_name = self
            .company_name
            .clone()
            .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string());
        let website = self
            .website_url
            .clone()
            .unwrap_or_else(|| DEFAULT_WEBSITE_URL.to_string());

        // Links and branding are substitution variables too; caller context
        // merges last so it can override any of them.
        let mut extras: HashMap<String, Value> = HashMap::new();
        extras.insert(
            "unsubscribe_url".to_string(),
            Value::String(self.unsubscribe_url.clone()),
        );
        extras.insert(
            "preferences_url".to_string(),
            Value::String(self.preferences_url.clone().unwrap_or_default()),
        );
        extras.insert("website_url".to_string(), Value::String(website.clone()));
        extras.insert(
            "company_name".to_string(),
            Value::String(company_name.clone()),
        );
        for (key, value) in &self.context {
            extras.insert(key.clone(), value.clone());
        }

        let bag = vars::build_vars_at(&self.recipient, &extras, now);
        let subject = engine::expand(&self.subject_line, &bag)?;
        let preheader = expand_opt(self.preheader.as_deref(), &bag)?;
        let custom_content = expand_opt(self.custom_content.as_deref(), &bag)?;
        let header_text = expand_opt(self.header_text.as_deref(), &bag)?;
        let footer_text = expand_opt(self.footer_text.as_deref(), &bag)?;

        let palette = self
            .template_type
            .default_palette()
            .merged(&self.colors.unwrap_or_default());

        // Clamping happens exactly once, here. Layouts only slice.
        let mut posts = self.posts;
        if self.include_latest_posts {
            let max = self
                .max_posts
                .unwrap_or_else(|| self.template_type.default_max_posts());
            posts.truncate(max);
        } else {
            posts.clear();
        }

        let mut links = LinkSet::new(self.unsubscribe_url);
        if let Some(url) = self.preferences_url {
            links = links.preferences(url);
        }
        if let Some(url) = self.view_in_browser_url {
            links = links.view_in_browser(url);
        }
        links = links.website(website);

        Ok(Document {
            recipient: self.recipient,
            palette,
            header_text,
            footer_text,
            subject,
            preheader,
            custom_content,
            posts,
            links,
            logo_url: self.logo_url,
            company_name,
            now,
        })
    }
}

fn expand_opt(
    text: Option<&str>,
    bag: &HashMap<String, Value>,
) -> Result<Option<String>, Error> {
    text.map(|t| engine::expand(t, bag)).transpose()
}

fn check_url(field: &'static str, value: &str) -> Result<(), Error> {
    let parsed = Url::parse(value)
        .map_err(|e| Error::validation(field, format!("'{}' is not a valid URL: {}", value, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::validation(
            field,
            format!("'{}' must use http or https", value),
        ));
    }
    Ok(())
}

/// The final rendered email: expanded subject plus HTML and plain-text
/// bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEmail {
    pub template_type: TemplateKind,
    /// Recipient address this email was rendered for.
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> RenderRequest {
        RenderRequest::new(
            TemplateKind::Classic,
            Recipient::new("ana@example.com", "Ana", "Lee"),
            "Hello {{first_name}}",
            "https://example.com/unsub",
        )
    }

    fn frozen() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_subject_rejected() {
        let mut req = request();
        req.subject_line = "  ".to_string();
        let err = req.validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field, .. } if field == "subjectLine"));
    }

    #[test]
    fn test_invalid_urls_rejected() {
        let mut req = request();
        req.unsubscribe_url = "not a url".to_string();
        assert!(req.validate().is_err());

        let mut req = request();
        req.logo_url = Some("ftp://example.com/logo.png".to_string());
        let err = req.validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field, .. } if field == "logoUrl"));
    }

    #[test]
    fn test_max_posts_bounds() {
        assert!(request().max_posts(1).validate().is_ok());
        assert!(request().max_posts(20).validate().is_ok());
        assert!(request().max_posts(0).validate().is_err());
        assert!(request().max_posts(21).validate().is_err());
    }

    #[test]
    fn test_document_expands_subject() {
        let doc = request().into_document_at(frozen()).unwrap();
        assert_eq!(doc.subject, "Hello Ana");
    }

    #[test]
    fn test_document_clamps_posts_to_template_default() {
        let posts = (1..=10u64)
            .map(|i| Post::new(i, format!("P{}", i), format!("https://example.com/{}", i)))
            .collect();
        let doc = request().posts(posts).into_document_at(frozen()).unwrap();
        assert_eq!(doc.posts.len(), 6);
    }

    #[test]
    fn test_include_latest_posts_false_drops_all() {
        let posts = vec![Post::new(1, "P1", "https://example.com/1")];
        let doc = request()
            .posts(posts)
            .include_latest_posts(false)
            .into_document_at(frozen())
            .unwrap();
        assert!(doc.posts.is_empty());
    }

    #[test]
    fn test_palette_override_merges() {
        let doc = request()
            .colors(PaletteOverrides::default().primary("#000000"))
            .into_document_at(frozen())
            .unwrap();
        assert_eq!(doc.palette.primary, "#000000");
        assert_eq!(doc.palette.secondary, "#1e40af");
    }

    #[test]
    fn test_wire_format_round_trip() {
        let json = r##"{
            "templateType": "modern",
            "recipient": {"email": "a@b.com", "firstName": "A", "lastName": "B"},
            "subjectLine": "Hi",
            "unsubscribeUrl": "https://example.com/u",
            "maxPosts": 3,
            "includeLatestPosts": false,
            "colors": {"primary": "#111111"}
        }"##;
        let req: RenderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.template_type, TemplateKind::Modern);
        assert_eq!(req.max_posts, Some(3));
        assert!(!req.include_latest_posts);

        let back = serde_json::to_value(&req).unwrap();
        assert_eq!(back["templateType"], "modern");
        assert_eq!(back["unsubscribeUrl"], "https://example.com/u");
    }

    #[test]
    fn test_link_and_company_vars_are_seeded() {
        let mut req = request().company_name("Acme Club");
        req.subject_line =
            "From {{company_name}} - unsubscribe at {{unsubscribe_url}}".to_string();
        let doc = req.into_document_at(frozen()).unwrap();
        assert_eq!(
            doc.subject,
            "From Acme Club - unsubscribe at https://example.com/unsub"
        );

        // Defaults are seeded too.
        let mut req = request().website_url("https://acme.example");
        req.subject_line = "{{company_name}} at {{website_url}}".to_string();
        let doc = req.into_document_at(frozen()).unwrap();
        assert_eq!(doc.subject, "Newsletter at https://acme.example");
    }

    #[test]
    fn test_context_overrides_seeded_vars() {
        let mut req = request()
            .company_name("Acme Club")
            .context_var("company_name", serde_json::json!("Shadow Brand"));
        req.subject_line = "From {{company_name}}".to_string();
        let doc = req.into_document_at(frozen()).unwrap();
        assert_eq!(doc.subject, "From Shadow Brand");
    }

    #[test]
    fn test_company_name_default() {
        let doc = request().into_document_at(frozen()).unwrap();
        assert_eq!(doc.company_name, "Newsletter");
        assert_eq!(doc.links.website, "https://example.com");
    }
}
