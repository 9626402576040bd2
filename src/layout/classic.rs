//! Traditional newsletter layout: masthead, greeting, featured story,
//! three-column grid, headline list, call to action, footer.

use crate::document::{Column, Document, DocumentTree, Node};
use crate::engine::truncate;
use crate::layout::parts::{
    self, button_style, outline_button_style, post_date, FooterTheme, SANS,
};
use crate::palette::with_opacity;

const FEATURED_EXCERPT: usize = 150;
const GRID_EXCERPT: usize = 120;

pub(crate) fn compose(doc: &Document) -> DocumentTree {
    let palette = &doc.palette;
    let accent = palette.accent.as_deref().unwrap_or(&palette.primary);

    let mut children = Vec::new();

    children.push(parts::header(
        doc,
        Some(
            doc.header_text
                .as_deref()
                .unwrap_or("Your Weekly Newsletter"),
        ),
        &format!(
            "background-color:{};padding:28px 32px;text-align:center",
            palette.primary
        ),
        &format!(
            "font-size:20px;font-weight:700;color:#ffffff;text-decoration:none;font-family:{}",
            SANS
        ),
        &format!(
            "font-size:26px;font-weight:700;color:#ffffff;margin:14px 0 0;font-family:{}",
            SANS
        ),
    ));

    // Greeting.
    children.push(Node::section(
        format!("padding:28px 32px 0;font-family:{}", SANS),
        vec![
            Node::paragraph(
                format!(
                    "font-size:17px;font-weight:600;color:{};margin:0 0 8px",
                    palette.text
                ),
                format!("Hi {},", parts::greeting_name(doc, "there")),
            ),
            Node::paragraph(
                format!(
                    "font-size:14px;line-height:1.6;color:{};margin:0",
                    with_opacity(&palette.text, 0.8)
                ),
                "Here's what's new this week. We've picked out the stories worth your time.",
            ),
        ],
    ));

    if let Some(content) = &doc.custom_content {
        children.push(Node::section(
            format!(
                "margin:20px 32px 0;padding:16px 20px;background-color:#f9fafb;border-left:4px solid {}",
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

    let featured = doc.posts.first();
    let grid = doc.posts.get(1..4.min(doc.posts.len())).unwrap_or(&[]);
    let rest = doc.posts.get(4..).unwrap_or(&[]);

    if let Some(post) = featured {
        let mut section = vec![Node::heading(
            2,
            format!(
                "font-size:18px;font-weight:700;color:{};margin:0 0 14px;font-family:{}",
                palette.text, SANS
            ),
            "Featured",
        )];
        if let Some(image) = &post.featured_image {
            section.push(Node::link(
                post.url.clone(),
                String::new(),
                vec![Node::image(image.clone(), post.title.clone(), Some(600))],
            ));
        }
        section.push(Node::link(
            post.url.clone(),
            "text-decoration:none".to_string(),
            vec![Node::heading(
                3,
                format!(
                    "font-size:20px;font-weight:700;color:{};margin:14px 0 8px;font-family:{}",
                    palette.text, SANS
                ),
                post.title.clone(),
            )],
        ));
        section.push(Node::paragraph(
            format!(
                "font-size:14px;line-height:1.6;color:{};margin:0 0 14px;font-family:{}",
                with_opacity(&palette.text, 0.8),
                SANS
            ),
            truncate(&post.excerpt, FEATURED_EXCERPT),
        ));
        section.push(Node::button(
            post.url.clone(),
            button_style(&palette.primary, "#ffffff"),
            "Read More →",
        ));
        children.push(Node::section("padding:28px 32px 0", section));
    }

    if !grid.is_empty() {
        let columns = grid
            .iter()
            .map(|post| {
                Column::new(
                    "width:33.33%;padding:0 6px",
                    vec![parts::post_card(post, GRID_EXCERPT, palette)],
                )
            })
            .collect();
        children.push(Node::section(
            "padding:28px 26px 0",
            vec![
                Node::heading(
                    2,
                    format!(
                        "font-size:18px;font-weight:700;color:{};margin:0 6px 14px;font-family:{}",
                        palette.text, SANS
                    ),
                    "More Stories",
                ),
                Node::row("", columns),
            ],
        ));
    }

    if !rest.is_empty() {
        let mut items = vec![Node::heading(
            2,
            format!(
                "font-size:18px;font-weight:700;color:{};margin:0 0 10px;font-family:{}",
                palette.text, SANS
            ),
            "Also Worth Reading",
        )];
        for post in rest {
            items.push(Node::text_link(
                &post.url,
                format!(
                    "font-size:14px;font-weight:600;color:{};text-decoration:none",
                    accent
                ),
                format!("• {}", post.title),
            ));
            items.push(Node::paragraph(
                format!(
                    "font-size:12px;color:{};margin:2px 0 10px 14px;font-family:{}",
                    with_opacity(&palette.text, 0.6),
                    SANS
                ),
                post_date(post.published_at),
            ));
        }
        children.push(Node::section("padding:28px 32px 0", items));
    }

    children.push(Node::section(
        format!(
            "margin:28px 32px;padding:24px;background-color:#f9fafb;border-radius:8px;text-align:center;font-family:{}",
            SANS
        ),
        vec![
            Node::paragraph(
                format!(
                    "font-size:15px;font-weight:600;color:{};margin:0 0 12px",
                    palette.text
                ),
                "Want to explore more content?",
            ),
            Node::button(
                doc.links.website.clone(),
                outline_button_style(&palette.primary),
                "Visit Our Website",
            ),
        ],
    ));

    children.push(parts::footer(doc, &FooterTheme::light(palette)));

    DocumentTree {
        body_style: format!("margin:0;padding:24px 0;background-color:#f3f4f6;font-family:{}", SANS),
        container_style: "max-width:600px;margin:0 auto;background-color:#ffffff;border-radius:8px;overflow:hidden".to_string(),
        preheader: doc.preheader.clone(),
        children,
    }
}
