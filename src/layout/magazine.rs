//! Image-heavy magazine layout: masthead, edition bar, full-width hero
//! story, two-column secondary stories, thumbnail list, banner call to
//! action, footer.

use crate::document::{Column, Document, DocumentTree, Node};
use crate::engine::truncate;
use crate::layout::parts::{self, button_style, post_date, FooterTheme, SANS};
use crate::palette::with_opacity;

const HERO_EXCERPT: usize = 200;
const SECONDARY_EXCERPT: usize = 100;

pub(crate) fn compose(doc: &Document) -> DocumentTree {
    let palette = &doc.palette;

    let mut children = Vec::new();

    let default_title = format!("{} MAGAZINE", doc.company_name.to_uppercase());
    children.push(parts::header(
        doc,
        Some(doc.header_text.as_deref().unwrap_or(&default_title)),
        &format!(
            "background-color:{};padding:24px 32px;text-align:center",
            palette.primary
        ),
        &format!(
            "font-size:18px;font-weight:800;letter-spacing:3px;color:#ffffff;text-decoration:none;font-family:{}",
            SANS
        ),
        &format!(
            "font-size:24px;font-weight:800;letter-spacing:2px;color:#ffffff;margin:10px 0 0;font-family:{}",
            SANS
        ),
    ));

    // Edition bar.
    children.push(Node::section(
        "background-color:#171717;padding:10px 32px;text-align:center".to_string(),
        vec![Node::paragraph(
            format!(
                "font-size:11px;font-weight:600;letter-spacing:2px;text-transform:uppercase;color:#ffffff;margin:0;font-family:{}",
                SANS
            ),
            format!(
                "{} | Hi {}",
                doc.now.format("%B %Y"),
                parts::greeting_name(doc, "Reader")
            ),
        )],
    ));

    let hero = doc.posts.first();
    let secondary = doc.posts.get(1..3.min(doc.posts.len())).unwrap_or(&[]);
    let rest = doc.posts.get(3..).unwrap_or(&[]);

    if let Some(post) = hero {
        let mut section = Vec::new();
        if let Some(image) = &post.featured_image {
            section.push(Node::link(
                post.url.clone(),
                String::new(),
                vec![Node::image(image.clone(), post.title.clone(), Some(600))],
            ));
        }
        section.push(Node::paragraph(
            format!(
                "font-size:12px;font-weight:700;letter-spacing:2px;text-transform:uppercase;color:{};margin:16px 32px 6px",
                palette.primary
            ),
            post.primary_category()
                .map(str::to_uppercase)
                .unwrap_or_else(|| "FEATURED".to_string()),
        ));
        section.push(Node::link(
            post.url.clone(),
            "text-decoration:none".to_string(),
            vec![Node::heading(
                2,
                format!(
                    "font-size:32px;font-weight:800;line-height:1.15;text-transform:uppercase;color:{};margin:0 32px 10px;font-family:{}",
                    palette.text, SANS
                ),
                post.title.clone(),
            )],
        ));
        section.push(Node::paragraph(
            format!(
                "font-size:14px;line-height:1.6;color:{};margin:0 32px 10px;font-family:{}",
                with_opacity(&palette.text, 0.8),
                SANS
            ),
            truncate(&post.excerpt, HERO_EXCERPT),
        ));
        section.push(Node::paragraph(
            format!(
                "font-size:12px;font-weight:600;text-transform:uppercase;color:{};margin:0 32px 16px;font-family:{}",
                with_opacity(&palette.text, 0.6),
                SANS
            ),
            format!("By {} | {}", post.author, post_date(post.published_at)),
        ));
        section.push(Node::section(
            "margin:0 32px 8px".to_string(),
            vec![Node::button(
                post.url.clone(),
                button_style(&palette.primary, "#ffffff"),
                "READ FULL STORY",
            )],
        ));
        children.push(Node::section("padding:0 0 20px", section));
    }

    if let Some(content) = &doc.custom_content {
        children.push(Node::section(
            format!(
                "margin:0 32px 24px;padding:16px 20px;background-color:#fef2f2;border-left:4px solid {}",
                palette.primary
            ),
            vec![Node::paragraph(
                format!(
                    "font-size:14px;line-height:1.6;color:{};margin:0;font-family:{}",
                    palette.text, SANS
                ),
                content.clone(),
            )],
        ));
    }

    if !secondary.is_empty() {
        let columns = secondary
            .iter()
            .map(|post| {
                let mut card = Vec::new();
                if let Some(image) = &post.featured_image {
                    card.push(Node::link(
                        post.url.clone(),
                        String::new(),
                        vec![Node::image(image.clone(), post.title.clone(), Some(280))],
                    ));
                }
                card.push(Node::paragraph(
                    format!(
                        "font-size:11px;font-weight:700;letter-spacing:1.5px;text-transform:uppercase;color:{};margin:10px 0 4px",
                        palette.primary
                    ),
                    post.primary_category().unwrap_or("Article").to_string(),
                ));
                card.push(Node::link(
                    post.url.clone(),
                    "text-decoration:none".to_string(),
                    vec![Node::heading(
                        3,
                        format!(
                            "font-size:16px;font-weight:700;color:{};margin:0 0 6px;font-family:{}",
                            palette.text, SANS
                        ),
                        post.title.clone(),
                    )],
                ));
                card.push(Node::paragraph(
                    format!(
                        "font-size:13px;line-height:1.5;color:{};margin:0;font-family:{}",
                        with_opacity(&palette.text, 0.75),
                        SANS
                    ),
                    truncate(&post.excerpt, SECONDARY_EXCERPT),
                ));
                Column::new("width:50%;padding:0 8px", card)
            })
            .collect();
        children.push(Node::section(
            "padding:0 24px 24px",
            vec![
                Node::heading(
                    2,
                    format!(
                        "font-size:18px;font-weight:800;letter-spacing:2px;text-transform:uppercase;color:{};margin:0 8px 14px;font-family:{}",
                        palette.text, SANS
                    ),
                    "MORE STORIES",
                ),
                Node::row("", columns),
            ],
        ));
    }

    if !rest.is_empty() {
        let mut section = vec![Node::heading(
            2,
            format!(
                "font-size:16px;font-weight:800;letter-spacing:2px;text-transform:uppercase;color:{};margin:0 0 12px;font-family:{}",
                palette.text, SANS
            ),
            "ALSO WORTH READING",
        )];
        for post in rest {
            let mut columns = Vec::new();
            if let Some(image) = &post.featured_image {
                columns.push(Column::new(
                    "width:110px;padding-right:12px",
                    vec![Node::image(image.clone(), post.title.clone(), Some(100))],
                ));
            }
            columns.push(Column::new(
                "",
                vec![
                    Node::link(
                        post.url.clone(),
                        "text-decoration:none".to_string(),
                        vec![Node::heading(
                            3,
                            format!(
                                "font-size:14px;font-weight:700;color:{};margin:0 0 4px;font-family:{}",
                                palette.text, SANS
                            ),
                            post.title.clone(),
                        )],
                    ),
                    Node::paragraph(
                        format!(
                            "font-size:11px;font-weight:600;text-transform:uppercase;color:{};margin:0;font-family:{}",
                            with_opacity(&palette.text, 0.6),
                            SANS
                        ),
                        post_date(post.published_at).to_uppercase(),
                    ),
                ],
            ));
            section.push(Node::section(
                "background-color:#f5f5f5;padding:12px;margin:0 0 10px",
                vec![Node::row("", columns)],
            ));
        }
        children.push(Node::section("padding:0 32px 24px", section));
    }

    children.push(Node::section(
        format!(
            "background-color:{};padding:28px 32px;text-align:center",
            palette.primary
        ),
        vec![
            Node::heading(
                2,
                format!(
                    "font-size:22px;font-weight:800;letter-spacing:2px;color:#ffffff;margin:0 0 14px;font-family:{}",
                    SANS
                ),
                "DON'T MISS OUT",
            ),
            Node::button(
                doc.links.website.clone(),
                button_style("#ffffff", &palette.primary),
                "EXPLORE MORE →",
            ),
        ],
    ));

    children.push(parts::footer(
        doc,
        &FooterTheme {
            section_style: format!(
                "background-color:{};padding:24px 32px;text-align:center;font-family:{}",
                palette.primary, SANS
            ),
            text_color: "#ffffff".to_string(),
            link_color: "#ffffff".to_string(),
        },
    ));

    DocumentTree {
        body_style: format!("margin:0;padding:0;background-color:#171717;font-family:{}", SANS),
        container_style: format!(
            "max-width:600px;margin:0 auto;background-color:{}",
            palette.background
        ),
        preheader: doc.preheader.clone(),
        children,
    }
}
