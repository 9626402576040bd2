//! Dark card-based layout: bold hero, featured-update card, alternating
//! two-column post cards, call to action, footer.

use crate::document::{Column, Document, DocumentTree, Node};
use crate::engine::truncate;
use crate::layout::parts::{self, button_style, FooterTheme, SANS};
use crate::palette::with_opacity;

const CARD_EXCERPT: usize = 100;

pub(crate) fn compose(doc: &Document) -> DocumentTree {
    let palette = &doc.palette;
    let accent = palette.accent.as_deref().unwrap_or("#4a9eff");
    let card_bg = &palette.secondary;
    let ink = "#f5f5f7";
    let muted = with_opacity(ink, 0.6);

    let mut children = Vec::new();

    // Hero replaces the conventional masthead in this variant.
    let mut hero = vec![
        Node::paragraph(
            format!(
                "font-size:12px;font-weight:600;letter-spacing:2px;text-transform:uppercase;color:{};margin:0 0 10px",
                accent
            ),
            format!("Hello, {}", parts::greeting_name(doc, "there")),
        ),
        Node::heading(
            1,
            format!(
                "font-size:30px;font-weight:800;color:{};margin:0 0 8px;font-family:{}",
                ink, SANS
            ),
            doc.header_text
                .as_deref()
                .unwrap_or("Your curated content is ready."),
        ),
        Node::paragraph(
            format!("font-size:14px;color:{};margin:0", muted),
            format!("The latest from {}, hand-picked for you.", doc.company_name),
        ),
    ];
    if let Some(logo) = &doc.logo_url {
        hero.insert(
            0,
            Node::link(
                doc.links.website.clone(),
                String::new(),
                vec![Node::image(logo.clone(), doc.company_name.clone(), Some(150))],
            ),
        );
    }
    children.push(Node::section(
        format!("padding:40px 32px 24px;font-family:{}", SANS),
        hero,
    ));

    if let Some(content) = &doc.custom_content {
        children.push(Node::section(
            format!(
                "margin:0 32px 24px;padding:20px 24px;background-color:{};border-radius:16px",
                card_bg
            ),
            vec![
                Node::paragraph(
                    format!(
                        "font-size:11px;font-weight:700;letter-spacing:2px;text-transform:uppercase;color:{};margin:0 0 8px",
                        accent
                    ),
                    "Featured Update",
                ),
                Node::paragraph(
                    format!(
                        "font-size:14px;line-height:1.6;color:{};margin:0;font-family:{}",
                        ink, SANS
                    ),
                    content.clone(),
                ),
            ],
        ));
    }

    for (index, post) in doc.posts.iter().enumerate() {
        let mut card = Vec::new();
        if let Some(image) = &post.featured_image {
            card.push(Node::link(
                post.url.clone(),
                String::new(),
                vec![Node::image(image.clone(), post.title.clone(), Some(536))],
            ));
        }
        card.push(Node::paragraph(
            format!(
                "font-size:11px;font-weight:700;letter-spacing:1.5px;text-transform:uppercase;color:{};margin:14px 0 6px",
                accent
            ),
            post.primary_category().unwrap_or("Article").to_string(),
        ));
        card.push(Node::link(
            post.url.clone(),
            "text-decoration:none".to_string(),
            vec![Node::heading(
                3,
                format!(
                    "font-size:19px;font-weight:700;color:{};margin:0 0 8px;font-family:{}",
                    ink, SANS
                ),
                post.title.clone(),
            )],
        ));
        card.push(Node::paragraph(
            format!(
                "font-size:13px;line-height:1.6;color:{};margin:0 0 12px;font-family:{}",
                muted, SANS
            ),
            truncate(&post.excerpt, CARD_EXCERPT),
        ));
        card.push(Node::button(
            post.url.clone(),
            format!(
                "{};padding:8px 18px;font-size:13px",
                button_style(accent, "#0d0d0d")
            ),
            "Read More",
        ));

        // Alternate the content column so successive cards mirror each other.
        let pad = if index % 2 == 0 {
            "width:100%;padding-right:8px"
        } else {
            "width:100%;padding-left:8px"
        };
        children.push(Node::section(
            format!(
                "margin:0 32px 16px;padding:20px 24px;background-color:{};border-radius:16px",
                card_bg
            ),
            vec![Node::row("", vec![Column::new(pad, card)])],
        ));
    }

    children.push(Node::section(
        format!("padding:24px 32px 8px;text-align:center;font-family:{}", SANS),
        vec![
            Node::heading(
                2,
                format!("font-size:20px;font-weight:700;color:{};margin:0 0 14px", ink),
                "Explore More",
            ),
            Node::button(
                doc.links.website.clone(),
                button_style(accent, "#0d0d0d"),
                "Visit Website →",
            ),
        ],
    ));

    children.push(parts::footer(
        doc,
        &FooterTheme {
            section_style: format!("padding:24px 32px 32px;text-align:center;font-family:{}", SANS),
            text_color: ink.to_string(),
            link_color: accent.to_string(),
        },
    ));

    DocumentTree {
        body_style: format!(
            "margin:0;padding:0;background-color:{};font-family:{}",
            palette.primary, SANS
        ),
        container_style: format!(
            "max-width:600px;margin:0 auto;background-color:{}",
            palette.primary
        ),
        preheader: doc.preheader.clone(),
        children,
    }
}
