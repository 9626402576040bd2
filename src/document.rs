//! The document model and the render-ready node tree.
//!
//! A [`Document`] is the fully-assembled shape of one email: recipient,
//! merged palette, expanded text fields, the clamped post list, and the
//! outbound links. Layout variants compose a [`DocumentTree`] from it; the
//! renderer serializes that tree to HTML and plain text.

use chrono::{DateTime, Utc};

use crate::links::LinkSet;
use crate::palette::Palette;
use crate::post::Post;
use crate::recipient::Recipient;

/// Everything a layout variant needs to compose one email.
///
/// All placeholder expansion has already happened by the time a `Document`
/// exists; layouts treat every text field as literal. `posts` is already
/// clamped to the effective max-post count (and emptied when the caller
/// disabled the post region), so layouts only slice, never re-clamp.
#[derive(Debug, Clone)]
pub struct Document {
    pub recipient: Recipient,
    pub palette: Palette,
    pub header_text: Option<String>,
    pub footer_text: Option<String>,
    pub subject: String,
    pub preheader: Option<String>,
    pub custom_content: Option<String>,
    pub posts: Vec<Post>,
    pub links: LinkSet,
    pub logo_url: Option<String>,
    pub company_name: String,
    /// Frozen render timestamp. Layouts read dates from here, never from the
    /// wall clock, so composition stays pure.
    pub now: DateTime<Utc>,
}

/// A column inside a [`Node::Row`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub style: String,
    pub children: Vec<Node>,
}

impl Column {
    pub fn new(style: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            style: style.into(),
            children,
        }
    }
}

/// One element of the composed document tree.
///
/// Nodes carry inline CSS style strings; the HTML serializer emits them
/// verbatim and the text serializer ignores them, so layouts own all visual
/// decisions.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Block container.
    Section { style: String, children: Vec<Node> },
    /// Multi-column table row.
    Row { style: String, columns: Vec<Column> },
    /// `<h1>`–`<h3>`.
    Heading {
        level: u8,
        style: String,
        text: String,
    },
    Paragraph { style: String, text: String },
    /// Anchor around child nodes. An empty label list renders the bare URL
    /// in plain text.
    Link {
        href: String,
        style: String,
        children: Vec<Node>,
    },
    /// Call-to-action link styled as a button.
    Button {
        href: String,
        style: String,
        label: String,
    },
    Image {
        src: String,
        alt: String,
        width: Option<u32>,
        style: String,
    },
    /// Horizontal rule. Decorative: dropped from plain text.
    Divider { style: String },
}

impl Node {
    pub fn section(style: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Section {
            style: style.into(),
            children,
        }
    }

    pub fn row(style: impl Into<String>, columns: Vec<Column>) -> Self {
        Node::Row {
            style: style.into(),
            columns,
        }
    }

    pub fn heading(level: u8, style: impl Into<String>, text: impl Into<String>) -> Self {
        Node::Heading {
            level,
            style: style.into(),
            text: text.into(),
        }
    }

    pub fn paragraph(style: impl Into<String>, text: impl Into<String>) -> Self {
        Node::Paragraph {
            style: style.into(),
            text: text.into(),
        }
    }

    pub fn link(href: impl Into<String>, style: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link {
            href: href.into(),
            style: style.into(),
            children,
        }
    }

    /// A link whose only content is its label text.
    pub fn text_link(
        href: impl Into<String>,
        style: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        Node::Link {
            href: href.into(),
            style: style.into(),
            children: vec![Node::paragraph("", label)],
        }
    }

    pub fn button(
        href: impl Into<String>,
        style: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Node::Button {
            href: href.into(),
            style: style.into(),
            label: label.into(),
        }
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>, width: Option<u32>) -> Self {
        Node::Image {
            src: src.into(),
            alt: alt.into(),
            width,
            style: String::new(),
        }
    }

    pub fn divider(style: impl Into<String>) -> Self {
        Node::Divider {
            style: style.into(),
        }
    }
}

/// The composed, render-ready structure a layout variant produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    /// Inline style for `<body>`.
    pub body_style: String,
    /// Inline style for the centered container.
    pub container_style: String,
    /// Hidden preview text for email clients. Dropped from plain text.
    pub preheader: Option<String>,
    pub children: Vec<Node>,
}

impl DocumentTree {
    /// Depth-first iterator over every node in the tree.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            match node {
                Node::Section { children, .. } | Node::Link { children, .. } => {
                    stack.extend(children.iter().rev());
                }
                Node::Row { columns, .. } => {
                    for column in columns.iter().rev() {
                        stack.extend(column.children.iter().rev());
                    }
                }
                _ => {}
            }
            Some(node)
        })
    }
}
