//! Page rendition endpoint.
//!
//! Maps any request path to a markdown file under the content root, runs
//! the expand/tokenize/transduce/render pipeline, and streams the PDF
//! bytes. Every failure along the way collapses into the not-found PDF
//! with status 404; the client always receives a valid PDF body.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use mdpress_compose::{Token, tokenize, transduce};
use mdpress_pdf::render;

use crate::error::ServeError;
use crate::state::AppState;

/// Markdown file extension appended to resolved paths.
const MD_EXTENSION: &str = "md";

/// Title of the not-found document.
const NOT_FOUND_TITLE: &str = "404 - Page Not Found";

/// Body of the not-found document.
const NOT_FOUND_MESSAGE: &str = "The requested page could not be found.";

/// Handle GET / (root page).
pub(crate) async fn get_root_page(State(state): State<Arc<AppState>>) -> Response {
    serve_page(String::new(), state).await
}

/// Handle GET /{path}.
pub(crate) async fn get_page(
    axum::extract::Path(path): axum::extract::Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    serve_page(path, state).await
}

/// Shared implementation: render the page or fall back to the not-found
/// document.
async fn serve_page(path: String, state: Arc<AppState>) -> Response {
    match render_page(&path, &state).await {
        Ok(bytes) => pdf_response(StatusCode::OK, bytes),
        Err(err) => {
            tracing::debug!(path = %path, error = %err, "Serving not-found document");
            let bytes = render_not_found(&state);
            pdf_response(StatusCode::NOT_FOUND, bytes)
        }
    }
}

/// Run the full pipeline for one request.
async fn render_page(path: &str, state: &AppState) -> Result<Vec<u8>, ServeError> {
    let file = resolve_content_file(path)?;
    let full_path = state.content_root.join(file);

    let raw = tokio::fs::read_to_string(&full_path)
        .await
        .map_err(|source| ServeError::Read {
            path: full_path,
            source,
        })?;

    let expanded = state.nav.expand(&raw);
    let tokens = tokenize(&expanded);
    let tree = transduce(&tokens, &state.styles);
    Ok(render(&tree, state.page_size))
}

/// Render the fixed two-block not-found document.
fn render_not_found(state: &AppState) -> Vec<u8> {
    let tokens = [
        Token::Heading {
            depth: 1,
            text: NOT_FOUND_TITLE.to_owned(),
        },
        Token::Paragraph {
            text: NOT_FOUND_MESSAGE.to_owned(),
            children: Vec::new(),
        },
    ];
    let tree = transduce(&tokens, &state.styles);
    render(&tree, state.not_found_page_size)
}

/// Map a URL path to a content-relative markdown file.
///
/// The root path maps to `index.md`; any other path gets the markdown
/// extension appended. Paths that escape the content root are rejected.
fn resolve_content_file(path: &str) -> Result<PathBuf, ServeError> {
    let trimmed = path.trim_matches('/');
    let name = if trimmed.is_empty() { "index" } else { trimmed };

    let relative = Path::new(name);
    let escapes = relative.components().any(|component| {
        !matches!(component, Component::Normal(_) | Component::CurDir)
    });
    if escapes {
        return Err(ServeError::InvalidPath(path.to_owned()));
    }

    Ok(PathBuf::from(format!("{name}.{MD_EXTENSION}")))
}

/// Build a PDF response with the given status.
fn pdf_response(status: StatusCode, bytes: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/pdf")],
        Body::from(bytes),
    )
        .into_response()
}
