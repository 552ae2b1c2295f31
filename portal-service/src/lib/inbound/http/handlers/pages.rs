use std::path::Path as FsPath;

use axum::extract::Path;
use axum::extract::State;
use axum::response::Html;

use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    read_template(&state.templates_dir, "index").await
}

/// Serves `{templates_dir}/{name}.html`; a trailing `.html` in the request is
/// optional.
pub async fn page(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Html<String>, ApiError> {
    let name = page_name(&filename)?;
    read_template(&state.templates_dir, name).await
}

/// Reject anything that could step outside the templates directory.
fn page_name(filename: &str) -> Result<&str, ApiError> {
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!(filename = %filename, "Rejected page request with path components");
        return Err(ApiError::BadRequest("Invalid filename".to_string()));
    }

    Ok(filename.strip_suffix(".html").unwrap_or(filename))
}

async fn read_template(templates_dir: &FsPath, name: &str) -> Result<Html<String>, ApiError> {
    let path = templates_dir.join(format!("{}.html", name));

    tokio::fs::read_to_string(&path)
        .await
        .map(Html)
        .map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "Page not served");
            ApiError::NotFound("File not found".to_string())
        })
}
