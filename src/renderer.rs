//! Serialization of a composed document tree to HTML and plain text.
//!
//! Both serializers are pure: identical trees yield byte-identical output,
//! and neither touches the clock or performs I/O.

use std::fmt::Write;

use crate::document::{Column, DocumentTree, Node};

/// Serialize a tree to a self-contained HTML document.
///
/// Every style is inline; there is no external stylesheet dependency,
/// because target email clients do not reliably fetch external CSS.
pub fn to_html(tree: &DocumentTree) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str("</head>\n");
    let _ = write!(out, "<body style=\"{}\">\n", escape_attr(&tree.body_style));

    if let Some(preheader) = &tree.preheader {
        // Hidden preview text. The trailing word joiners pad the preview so
        // clients do not pull body copy into it.
        let _ = write!(
            out,
            "<div style=\"display:none;font-size:1px;line-height:1px;max-height:0;max-width:0;opacity:0;overflow:hidden\">{}{}</div>\n",
            escape_text(preheader),
            "&#8204;".repeat(150),
        );
    }

    let _ = write!(
        out,
        "<div style=\"{}\">\n",
        escape_attr(&tree.container_style)
    );
    for node in &tree.children {
        write_node(&mut out, node);
    }
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Section { style, children } => {
            let _ = write!(out, "<div style=\"{}\">", escape_attr(style));
            for child in children {
                write_node(out, child);
            }
            out.push_str("</div>\n");
        }
        Node::Row { style, columns } => {
            let _ = write!(
                out,
                "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"{}\"><tr>",
                escape_attr(style)
            );
            for Column { style, children } in columns {
                let _ = write!(out, "<td valign=\"top\" style=\"{}\">", escape_attr(style));
                for child in children {
                    write_node(out, child);
                }
                out.push_str("</td>");
            }
            out.push_str("</tr></table>\n");
        }
        Node::Heading { level, style, text } => {
            let level = (*level).clamp(1, 3);
            let _ = write!(
                out,
                "<h{} style=\"{}\">{}</h{}>\n",
                level,
                escape_attr(style),
                escape_text(text),
                level
            );
        }
        Node::Paragraph { style, text } => {
            let _ = write!(
                out,
                "<p style=\"{}\">{}</p>\n",
                escape_attr(style),
                escape_text(text)
            );
        }
        Node::Link {
            href,
            style,
            children,
        } => {
            let _ = write!(
                out,
                "<a href=\"{}\" style=\"{}\">",
                escape_attr(href),
                escape_attr(style)
            );
            for child in children {
                write_node(out, child);
            }
            out.push_str("</a>\n");
        }
        Node::Button { href, style, label } => {
            let _ = write!(
                out,
                "<a href=\"{}\" style=\"{}\">{}</a>\n",
                escape_attr(href),
                escape_attr(style),
                escape_text(label)
            );
        }
        Node::Image {
            src,
            alt,
            width,
            style,
        } => {
            let _ = write!(
                out,
                "<img src=\"{}\" alt=\"{}\"",
                escape_attr(src),
                escape_attr(alt)
            );
            if let Some(width) = width {
                let _ = write!(out, " width=\"{}\"", width);
            }
            let _ = write!(out, " style=\"{}\">\n", escape_attr(style));
        }
        Node::Divider { style } => {
            let _ = write!(out, "<hr style=\"{}\">\n", escape_attr(style));
        }
    }
}

/// Serialize a tree to a plain-text equivalent.
///
/// Linearizes the content in reading order. Purely decorative elements
/// (preheader, dividers, images, colors) are dropped. Links render as
/// `label (url)`; a link with no visible label renders its bare URL, so the
/// destination is never lost.
pub fn to_text(tree: &DocumentTree) -> String {
    let mut blocks: Vec<String> = Vec::new();
    for node in &tree.children {
        collect_text(&mut blocks, node);
    }

    let mut out = blocks.join("\n");
    // Collapse runs of blank lines left by omitted regions.
    while out.contains("\n\n\n") {
        out = out.replace("\n\n\n", "\n\n");
    }
    let mut out = out.trim().to_string();
    out.push('\n');
    out
}

fn collect_text(blocks: &mut Vec<String>, node: &Node) {
    match node {
        Node::Section { children, .. } => {
            for child in children {
                collect_text(blocks, child);
            }
            blocks.push(String::new());
        }
        Node::Row { columns, .. } => {
            for column in columns {
                for child in &column.children {
                    collect_text(blocks, child);
                }
            }
        }
        Node::Heading { text, .. } => blocks.push(format!("{}\n", text)),
        Node::Paragraph { text, .. } => {
            if !text.is_empty() {
                blocks.push(text.clone());
            }
        }
        Node::Link { href, children, .. } => {
            let label = visible_label(children);
            if label.is_empty() {
                blocks.push(href.clone());
            } else {
                blocks.push(format!("{} ({})", label, href));
            }
        }
        Node::Button { href, label, .. } => {
            if label.is_empty() {
                blocks.push(href.clone());
            } else {
                blocks.push(format!("{} ({})", label, href));
            }
        }
        Node::Image { .. } | Node::Divider { .. } => {}
    }
}

/// Visible text inside a link, in reading order.
fn visible_label(children: &[Node]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for child in children {
        match child {
            Node::Paragraph { text, .. } | Node::Heading { text, .. } => {
                if !text.is_empty() {
                    parts.push(text.clone());
                }
            }
            Node::Section { children, .. } | Node::Link { children, .. } => {
                let inner = visible_label(children);
                if !inner.is_empty() {
                    parts.push(inner);
                }
            }
            _ => {}
        }
    }
    parts.join(" ")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
