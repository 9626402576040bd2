//! Building blocks shared across layout variants.
//!
//! Headers, footers, buttons and post cards differ in styling between
//! variants but share structure; each helper takes the style knobs the
//! variants actually vary.

use chrono::{DateTime, Datelike, Utc};

use crate::document::{Document, Node};
use crate::engine::truncate;
use crate::palette::{with_opacity, Palette};
use crate::post::Post;

pub(crate) const SANS: &str = "Arial, Helvetica, sans-serif";
pub(crate) const SERIF: &str = "Georgia, 'Times New Roman', serif";

/// First name for greetings, with a variant-specific fallback for
/// recipients that have none.
pub(crate) fn greeting_name(doc: &Document, fallback: &str) -> String {
    let first = doc.recipient.first_name.trim();
    if first.is_empty() {
        fallback.to_string()
    } else {
        first.to_string()
    }
}

pub(crate) fn long_date(now: DateTime<Utc>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

pub(crate) fn post_date(published: DateTime<Utc>) -> String {
    published.format("%B %-d, %Y").to_string()
}

pub(crate) fn short_date(published: DateTime<Utc>) -> String {
    published.format("%b %-d").to_string()
}

/// Masthead: logo image when one is configured, company name otherwise,
/// both linking to the website, followed by the optional header title.
pub(crate) fn header(
    doc: &Document,
    header_text: Option<&str>,
    section_style: &str,
    brand_style: &str,
    title_style: &str,
) -> Node {
    let brand = match &doc.logo_url {
        Some(url) => Node::link(
            doc.links.website.clone(),
            String::new(),
            vec![Node::image(url.clone(), doc.company_name.clone(), Some(150))],
        ),
        None => Node::text_link(&doc.links.website, brand_style, &doc.company_name),
    };

    let mut children = vec![brand];
    if let Some(text) = header_text {
        children.push(Node::heading(1, title_style, text));
    }
    Node::section(section_style, children)
}

/// Style knobs the footer varies per layout.
pub(crate) struct FooterTheme {
    pub section_style: String,
    pub text_color: String,
    pub link_color: String,
}

impl FooterTheme {
    /// Light footer on a white container.
    pub(crate) fn light(palette: &Palette) -> Self {
        Self {
            section_style: format!("padding:24px 32px;text-align:center;font-family:{}", SANS),
            text_color: palette.text.clone(),
            link_color: palette.primary.clone(),
        }
    }
}

/// Footer with optional custom text, the outbound link line, copyright and
/// the subscription notice.
pub(crate) fn footer(doc: &Document, theme: &FooterTheme) -> Node {
    let muted = with_opacity(&theme.text_color, 0.7);
    let rule = with_opacity(&theme.text_color, 0.2);

    let link_style = format!(
        "display:inline;font-size:13px;color:{};text-decoration:underline",
        theme.link_color
    );
    let bullet_style = format!("display:inline;font-size:13px;color:{};margin:0 6px", muted);

    let mut children = vec![Node::divider(format!(
        "border:none;border-top:1px solid {};margin:0 0 16px",
        rule
    ))];

    if let Some(text) = &doc.footer_text {
        children.push(Node::paragraph(
            format!("font-size:13px;color:{};margin:0 0 12px", muted),
            text.clone(),
        ));
    }

    children.push(Node::text_link(&doc.links.website, link_style.clone(), "Website"));
    if let Some(preferences) = &doc.links.preferences {
        children.push(Node::paragraph(bullet_style.clone(), "•"));
        children.push(Node::text_link(
            preferences,
            link_style.clone(),
            "Email Preferences",
        ));
    }
    children.push(Node::paragraph(bullet_style.clone(), "•"));
    children.push(Node::text_link(
        &doc.links.unsubscribe,
        link_style.clone(),
        "Unsubscribe",
    ));
    if let Some(view) = &doc.links.view_in_browser {
        children.push(Node::paragraph(bullet_style, "•"));
        children.push(Node::text_link(view, link_style, "View in Browser"));
    }

    children.push(Node::paragraph(
        format!("font-size:12px;color:{};margin:16px 0 4px", muted),
        format!(
            "© {} {}. All rights reserved.",
            doc.now.year(),
            doc.company_name
        ),
    ));
    children.push(Node::paragraph(
        format!("font-size:12px;font-style:italic;color:{};margin:0", muted),
        "You received this email because you subscribed to our newsletter.",
    ));

    Node::section(theme.section_style.clone(), children)
}

pub(crate) fn button_style(background: &str, color: &str) -> String {
    format!(
        "display:inline-block;background-color:{};color:{};padding:12px 24px;border-radius:6px;font-size:14px;font-weight:600;text-decoration:none",
        background, color
    )
}

pub(crate) fn outline_button_style(color: &str) -> String {
    format!(
        "display:inline-block;background-color:transparent;color:{};border:2px solid {};padding:10px 22px;border-radius:6px;font-size:14px;font-weight:600;text-decoration:none",
        color, color
    )
}

/// Compact card for post grids: optional image, linked title, truncated
/// excerpt and a read-more link.
pub(crate) fn post_card(post: &Post, excerpt_limit: usize, palette: &Palette) -> Node {
    let mut children = Vec::new();
    if let Some(image) = &post.featured_image {
        children.push(Node::link(
            post.url.clone(),
            String::new(),
            vec![Node::image(image.clone(), post.title.clone(), None)],
        ));
    }
    children.push(Node::link(
        post.url.clone(),
        "text-decoration:none".to_string(),
        vec![Node::heading(
            3,
            format!(
                "font-size:15px;font-weight:700;color:{};margin:10px 0 6px;font-family:{}",
                palette.text, SANS
            ),
            post.title.clone(),
        )],
    ));
    children.push(Node::paragraph(
        format!(
            "font-size:13px;line-height:1.5;color:{};margin:0 0 8px;font-family:{}",
            with_opacity(&palette.text, 0.8),
            SANS
        ),
        truncate(&post.excerpt, excerpt_limit),
    ));
    children.push(Node::text_link(
        &post.url,
        format!(
            "font-size:13px;font-weight:600;color:{};text-decoration:none",
            palette.accent.as_deref().unwrap_or(&palette.primary)
        ),
        "Read more →",
    ));

    Node::section(
        "background-color:#f9fafb;border-radius:8px;padding:14px",
        children,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkSet;
    use crate::recipient::Recipient;
    use crate::registry::TemplateKind;
    use chrono::TimeZone;

    fn doc() -> Document {
        Document {
            recipient: Recipient::new("ana@example.com", "Ana", "Lee"),
            palette: TemplateKind::Classic.default_palette(),
            header_text: None,
            footer_text: Some("Stay curious.".to_string()),
            subject: "Subject".to_string(),
            preheader: None,
            custom_content: None,
            posts: vec![],
            links: LinkSet::new("https://example.com/u")
                .preferences("https://example.com/p"),
            logo_url: None,
            company_name: "Acme".to_string(),
            now: Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_greeting_fallback() {
        let mut d = doc();
        assert_eq!(greeting_name(&d, "there"), "Ana");
        d.recipient.first_name = "  ".to_string();
        assert_eq!(greeting_name(&d, "there"), "there");
    }

    #[test]
    fn test_footer_carries_links_and_copyright() {
        let d = doc();
        let node = footer(&d, &FooterTheme::light(&d.palette));
        let Node::Section { children, .. } = node else {
            panic!("footer must be a section");
        };
        let flat = format!("{:?}", children);
        assert!(flat.contains("https://example.com/u"));
        assert!(flat.contains("Email Preferences"));
        assert!(flat.contains("© 2025 Acme. All rights reserved."));
        assert!(flat.contains("Stay curious."));
    }

    #[test]
    fn test_header_prefers_logo() {
        let mut d = doc();
        d.logo_url = Some("https://example.com/logo.png".to_string());
        let node = header(&d, Some("Hello"), "", "", "");
        let flat = format!("{:?}", node);
        assert!(flat.contains("logo.png"));
        assert!(flat.contains("Image"));
    }
}
