//! Newsletter email rendering.
//!
//! `bulletin` turns a [`RenderRequest`] into a finished email: it expands
//! `{{...}}` placeholders against the recipient, merges caller colors onto
//! the template's palette, clamps the post list, composes one of five
//! layout variants, and serializes the result to both HTML and plain text.
//!
//! ```
//! use bulletin::{render, Recipient, RenderRequest, TemplateKind};
//!
//! let request = RenderRequest::new(
//!     TemplateKind::Classic,
//!     Recipient::new("ana@example.com", "Ana", "Lee"),
//!     "Hello {{first_name}}!",
//!     "https://example.com/unsubscribe",
//! );
//! let email = render(request).unwrap();
//! assert_eq!(email.subject, "Hello Ana!");
//! assert!(email.html.contains("<!DOCTYPE html>"));
//! ```
//!
//! Rendering is deterministic: [`render_at`] freezes the clock, and two
//! calls with the same request and timestamp produce identical bytes.
//!
//! # Feature flags
//!
//! - `directory` (default): HTTP client for the membership directory.
//! - `session` (default): HMAC-signed session tokens.
//! - `http`: axum routes for listing, previewing and rendering templates.

mod document;
mod engine;
mod error;
mod layout;
mod links;
mod palette;
mod post;
mod recipient;
mod registry;
mod renderer;
mod request;
mod sample;
mod vars;

pub mod directory;
pub mod store;
pub mod sync;

#[cfg(feature = "session")]
pub mod session;

#[cfg(feature = "http")]
pub mod routes;

pub use document::{Column, Document, DocumentTree, Node};
pub use engine::expand;
pub use error::Error;
pub use links::{LinkSet, DEFAULT_COMPANY_NAME, DEFAULT_WEBSITE_URL};
pub use palette::{Palette, PaletteOverrides};
pub use post::Post;
pub use recipient::Recipient;
pub use registry::{TemplateInfo, TemplateKind};
pub use request::{RenderRequest, RenderedEmail};
pub use sample::{sample_posts_at, sample_recipient, sample_request, sample_request_at};
pub use vars::{build_vars, build_vars_at};

use chrono::{DateTime, Utc};

/// Render a request into a finished email, frozen at `now`.
///
/// Deterministic: every date in the output derives from `now`, never from
/// the wall clock.
pub fn render_at(request: RenderRequest, now: DateTime<Utc>) -> Result<RenderedEmail, Error> {
    let kind = request.template_type;
    let to = request.recipient.email.clone();
    tracing::debug!(template = %kind, %to, "rendering email");

    let doc = request.into_document_at(now)?;
    let tree = layout::compose(kind, &doc);

    Ok(RenderedEmail {
        template_type: kind,
        to,
        subject: doc.subject,
        html: renderer::to_html(&tree),
        text: renderer::to_text(&tree),
    })
}

/// [`render_at`] with the current wall-clock time.
pub fn render(request: RenderRequest) -> Result<RenderedEmail, Error> {
    render_at(request, Utc::now())
}

/// Render a template variant with bundled sample data, frozen at `now`.
pub fn preview_at(kind: TemplateKind, now: DateTime<Utc>) -> Result<RenderedEmail, Error> {
    render_at(sample::sample_request_at(kind, now), now)
}

/// [`preview_at`] with the current wall-clock time.
pub fn preview(kind: TemplateKind) -> Result<RenderedEmail, Error> {
    preview_at(kind, Utc::now())
}

/// The catalog of available template variants.
pub fn templates() -> Vec<TemplateInfo> {
    TemplateKind::ALL.iter().map(TemplateKind::info).collect()
}
