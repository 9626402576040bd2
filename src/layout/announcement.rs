//! Single-column announcement layout: gradient masthead, subject banner,
//! formal greeting, prose body, numbered what's-new items, contact box,
//! sign-off, footer.

use crate::document::{Column, Document, DocumentTree, Node};
use crate::engine::truncate;
use crate::layout::parts::{self, button_style, FooterTheme, SANS};
use crate::palette::with_opacity;

const ITEM_EXCERPT: usize = 150;

pub(crate) fn compose(doc: &Document) -> DocumentTree {
    let palette = &doc.palette;
    let box_bg = "#faf5ff";
    let box_border = "#e9d5ff";

    let mut children = Vec::new();

    children.push(parts::header(
        doc,
        Some(doc.header_text.as_deref().unwrap_or("Important Update")),
        &format!(
            "background:linear-gradient(135deg, {}, {});padding:28px 32px;text-align:center",
            palette.primary, palette.secondary
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

    // Subject banner under the masthead.
    children.push(Node::section(
        format!(
            "background-color:{};border-bottom:2px solid {};padding:18px 32px;text-align:center",
            box_bg, palette.primary
        ),
        vec![
            Node::paragraph("font-size:24px;margin:0 0 4px", "📢"),
            Node::heading(
                2,
                format!(
                    "font-size:19px;font-weight:700;color:{};margin:0;font-family:{}",
                    palette.text, SANS
                ),
                doc.subject.clone(),
            ),
        ],
    ));

    let mut body = vec![Node::paragraph(
        format!(
            "font-size:16px;font-weight:600;color:{};margin:0 0 14px",
            palette.text
        ),
        format!("Dear {},", parts::greeting_name(doc, "Valued Member")),
    )];
    if let Some(content) = &doc.custom_content {
        body.push(Node::paragraph(
            format!(
                "font-size:14px;line-height:1.7;color:{};margin:0",
                with_opacity(&palette.text, 0.9)
            ),
            content.clone(),
        ));
    }
    children.push(Node::section(
        format!("padding:28px 32px 0;font-family:{}", SANS),
        body,
    ));

    if !doc.posts.is_empty() {
        let mut section = vec![
            Node::heading(
                2,
                format!(
                    "font-size:18px;font-weight:700;color:{};margin:0 0 6px;font-family:{}",
                    palette.text, SANS
                ),
                "What's New",
            ),
            Node::divider(format!(
                "border:none;border-top:2px solid {};margin:0 0 18px;width:48px",
                palette.primary
            )),
        ];
        for (index, post) in doc.posts.iter().enumerate() {
            section.push(Node::row(
                "margin:0 0 18px",
                vec![
                    Column::new(
                        "width:44px;padding-right:12px",
                        vec![Node::paragraph(
                            format!(
                                "display:inline-block;width:32px;height:32px;line-height:32px;border-radius:50%;background-color:{};color:#ffffff;font-size:14px;font-weight:700;text-align:center;margin:0",
                                palette.primary
                            ),
                            (index + 1).to_string(),
                        )],
                    ),
                    Column::new(
                        "",
                        vec![
                            Node::link(
                                post.url.clone(),
                                "text-decoration:none".to_string(),
                                vec![Node::heading(
                                    3,
                                    format!(
                                        "font-size:16px;font-weight:700;color:{};margin:0 0 4px;font-family:{}",
                                        palette.text, SANS
                                    ),
                                    post.title.clone(),
                                )],
                            ),
                            Node::paragraph(
                                format!(
                                    "font-size:13px;line-height:1.6;color:{};margin:0 0 6px;font-family:{}",
                                    with_opacity(&palette.text, 0.8),
                                    SANS
                                ),
                                truncate(&post.excerpt, ITEM_EXCERPT),
                            ),
                            Node::text_link(
                                &post.url,
                                format!(
                                    "font-size:13px;font-weight:600;color:{};text-decoration:none",
                                    palette.accent.as_deref().unwrap_or(&palette.primary)
                                ),
                                "Learn more →",
                            ),
                        ],
                    ),
                ],
            ));
        }
        children.push(Node::section("padding:28px 32px 0", section));
    }

    children.push(Node::section(
        format!(
            "margin:28px 32px 0;padding:22px;background-color:{};border:1px solid {};border-radius:8px;text-align:center;font-family:{}",
            box_bg, box_border, SANS
        ),
        vec![
            Node::heading(
                3,
                format!(
                    "font-size:16px;font-weight:700;color:{};margin:0 0 6px",
                    palette.text
                ),
                "Questions?",
            ),
            Node::paragraph(
                format!(
                    "font-size:13px;color:{};margin:0 0 14px",
                    with_opacity(&palette.text, 0.75)
                ),
                "We're here to help. Reach out any time.",
            ),
            Node::button(
                doc.links.website.clone(),
                button_style(&palette.primary, "#ffffff"),
                "Contact Us",
            ),
        ],
    ));

    children.push(Node::section(
        format!("padding:28px 32px 8px;font-family:{}", SANS),
        vec![
            Node::paragraph(
                format!(
                    "font-size:14px;line-height:1.7;color:{};margin:0 0 12px",
                    with_opacity(&palette.text, 0.9)
                ),
                "Thank you for being part of our community.",
            ),
            Node::paragraph(
                format!("font-size:14px;color:{};margin:0", palette.text),
                "Best regards,",
            ),
            Node::paragraph(
                format!(
                    "font-size:14px;font-weight:600;color:{};margin:0",
                    palette.text
                ),
                format!("The {} Team", doc.company_name),
            ),
        ],
    ));

    children.push(parts::footer(doc, &FooterTheme::light(palette)));

    DocumentTree {
        body_style: format!(
            "margin:0;padding:24px 0;background-color:{};font-family:{}",
            palette.background, SANS
        ),
        container_style: "max-width:600px;margin:0 auto;background-color:#ffffff;border-radius:8px;overflow:hidden".to_string(),
        preheader: doc.preheader.clone(),
        children,
    }
}
