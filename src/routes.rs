//! Axum routes for the template surface.
//!
//! Three endpoints: list the template catalog, preview one variant with
//! sample data, and render an email from a full request body.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::Error;
use crate::registry::TemplateKind;
use crate::request::RenderRequest;

/// Build the template router. Stateless; mount it wherever the host app
/// wants it.
pub fn router() -> Router {
    Router::new()
        .route("/templates", get(list_templates))
        .route("/templates/{id}/preview", get(preview_template))
        .route("/templates/render", post(render_email))
}

async fn list_templates() -> Json<serde_json::Value> {
    Json(json!({ "templates": crate::templates() }))
}

#[derive(Deserialize)]
struct PreviewParams {
    format: Option<String>,
}

async fn preview_template(
    Path(id): Path<String>,
    Query(params): Query<PreviewParams>,
) -> Result<Response, ApiError> {
    let kind: TemplateKind = id.parse()?;
    let email = crate::preview(kind)?;

    match params.format.as_deref().unwrap_or("html") {
        "html" => Ok(Html(email.html).into_response()),
        "text" => Ok(email.text.into_response()),
        "json" => Ok(Json(email).into_response()),
        other => Err(Error::validation(
            "format",
            format!("unknown preview format '{}', expected html, text or json", other),
        )
        .into()),
    }
}

async fn render_email(Json(request): Json<RenderRequest>) -> Result<Json<crate::RenderedEmail>, ApiError> {
    Ok(Json(crate::render(request)?))
}

/// [`Error`] adapter carrying the HTTP status for each failure class.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation { .. } | Error::TemplateSyntax(_) | Error::UnknownTemplate(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::UpstreamAuth | Error::InvalidSession(_) => StatusCode::UNAUTHORIZED,
            Error::UserNotFound(_) => StatusCode::NOT_FOUND,
            Error::UpstreamUnavailable(_)
            | Error::Store(_)
            | Error::Json(_)
            | Error::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: Error) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(status(Error::validation("x", "bad")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(Error::UnknownTemplate("holiday".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(Error::TemplateSyntax("oops".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(Error::UpstreamAuth), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(Error::InvalidSession("expired".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(Error::UserNotFound("9".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(Error::UpstreamUnavailable("down".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(Error::Store("broken".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
