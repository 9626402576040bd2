//! Layout variants: each composes a render-ready [`DocumentTree`] from a
//! [`Document`].
//!
//! Composition is pure. Variants never re-clamp the post list (the document
//! builder already did) and never read the clock; every date comes from
//! `Document::now`.

mod announcement;
mod classic;
mod magazine;
mod minimal;
mod modern;
pub(crate) mod parts;

use crate::document::{Document, DocumentTree};
use crate::registry::TemplateKind;

/// Compose the tree for a template kind.
pub(crate) fn compose(kind: TemplateKind, doc: &Document) -> DocumentTree {
    match kind {
        TemplateKind::Classic => classic::compose(doc),
        TemplateKind::Modern => modern::compose(doc),
        TemplateKind::Minimal => minimal::compose(doc),
        TemplateKind::Magazine => magazine::compose(doc),
        TemplateKind::Announcement => announcement::compose(doc),
    }
}
