//! Text-focused serif layout: understated masthead, dated greeting,
//! numbered reading list with inline summaries, closing note, footer.

use crate::document::{Document, DocumentTree, Node};
use crate::engine::truncate;
use crate::layout::parts::{self, FooterTheme, SERIF};
use crate::palette::with_opacity;

const ITEM_EXCERPT: usize = 180;

pub(crate) fn compose(doc: &Document) -> DocumentTree {
    let palette = &doc.palette;
    let muted = with_opacity(&palette.text, 0.6);
    let divider_style = format!(
        "border:none;border-top:1px solid {};margin:28px 0",
        with_opacity(&palette.text, 0.15)
    );

    let mut children = Vec::new();

    children.push(parts::header(
        doc,
        doc.header_text.as_deref(),
        &format!(
            "padding:24px 0 18px;border-bottom:2px solid {};text-align:left",
            palette.primary
        ),
        &format!(
            "font-size:22px;font-weight:700;color:{};text-decoration:none;font-family:{}",
            palette.primary, SERIF
        ),
        &format!(
            "font-size:24px;font-weight:700;color:{};margin:12px 0 0;font-family:{}",
            palette.text, SERIF
        ),
    ));

    children.push(Node::section(
        "padding:28px 0 0".to_string(),
        vec![
            Node::paragraph(
                format!("font-size:17px;color:{};margin:0 0 4px", palette.text),
                format!("Hi {},", parts::greeting_name(doc, "there")),
            ),
            Node::paragraph(
                format!("font-size:13px;font-style:italic;color:{};margin:0", muted),
                parts::long_date(doc.now),
            ),
        ],
    ));

    if let Some(content) = &doc.custom_content {
        children.push(Node::section(
            "padding:20px 0 0".to_string(),
            vec![Node::paragraph(
                format!(
                    "font-size:15px;line-height:1.7;color:{};margin:0",
                    palette.text
                ),
                content.clone(),
            )],
        ));
    }

    if !doc.posts.is_empty() {
        children.push(Node::divider(divider_style.clone()));

        let mut list = vec![Node::heading(
            2,
            format!(
                "font-size:19px;font-weight:700;color:{};margin:0 0 18px",
                palette.text
            ),
            "This Week's Reads",
        )];
        for (index, post) in doc.posts.iter().enumerate() {
            list.push(Node::paragraph(
                format!(
                    "font-size:13px;font-weight:700;color:{};margin:0 0 2px",
                    palette.primary
                ),
                format!("{:02}", index + 1),
            ));
            list.push(Node::link(
                post.url.clone(),
                "text-decoration:none".to_string(),
                vec![Node::heading(
                    3,
                    format!(
                        "font-size:17px;font-weight:700;color:{};margin:0 0 6px;font-family:{}",
                        palette.text, SERIF
                    ),
                    post.title.clone(),
                )],
            ));
            list.push(Node::paragraph(
                format!(
                    "font-size:14px;line-height:1.7;color:{};margin:0 0 4px",
                    with_opacity(&palette.text, 0.85)
                ),
                truncate(&post.excerpt, ITEM_EXCERPT),
            ));
            let mut meta = format!("{} · {}", post.author, parts::short_date(post.published_at));
            if let Some(category) = post.primary_category() {
                meta.push_str(" · ");
                meta.push_str(category);
            }
            list.push(Node::paragraph(
                format!("font-size:12px;color:{};margin:0 0 20px", muted),
                meta,
            ));
        }
        children.push(Node::section(String::new(), list));
    }

    children.push(Node::divider(divider_style));
    children.push(Node::section(
        String::new(),
        vec![
            Node::paragraph(
                format!(
                    "font-size:15px;line-height:1.7;color:{};margin:0 0 6px",
                    palette.text
                ),
                "Thanks for reading. See you next week.",
            ),
            Node::paragraph(
                format!("font-size:15px;font-style:italic;color:{};margin:0", muted),
                format!("— The {} Team", doc.company_name),
            ),
        ],
    ));

    children.push(parts::footer(
        doc,
        &FooterTheme {
            section_style: format!("padding:28px 0 8px;text-align:left;font-family:{}", SERIF),
            text_color: palette.text.clone(),
            link_color: palette.primary.clone(),
        },
    ));

    DocumentTree {
        body_style: format!(
            "margin:0;padding:24px 0;background-color:{};font-family:{}",
            palette.background, SERIF
        ),
        container_style: "max-width:580px;margin:0 auto;padding:0 24px".to_string(),
        preheader: doc.preheader.clone(),
        children,
    }
}
