//! Directory listing
//!
//! Fallback for the static file service: reached when a path is not a file
//! and the directory has no `index.html`. Renders a plain HTML index of the
//! directory, or 404 when the path is not a directory under the root.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

/// One entry of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

/// GET fallback for directories
pub async fn list_directory(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let Some((display_path, dir)) = resolve_directory(&root, uri.path()) else {
        return not_found();
    };

    match tokio::fs::metadata(&dir).await {
        Ok(metadata) if metadata.is_dir() => {}
        _ => return not_found(),
    }

    match read_entries(&dir).await {
        Ok(entries) => Html(render_listing(&display_path, &entries)).into_response(),
        Err(e) => {
            warn!("Cannot list {}: {}", dir.display(), e);
            not_found()
        }
    }
}

/// Map a request path onto a directory under `root`
///
/// Returns the decoded path for display and the filesystem path. Parent
/// references and backslashes are rejected.
fn resolve_directory(root: &Path, request_path: &str) -> Option<(String, PathBuf)> {
    let decoded = urlencoding::decode(request_path).ok()?.into_owned();

    let mut dir = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s if s.contains('\\') || s.contains('\0') => return None,
            s => dir.push(s),
        }
    }

    Some((decoded, dir))
}

async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    entries.sort_by_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the listing page
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));

    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        html.push_str(&format!(
            "<li><a href=\"{}{suffix}\">{}{suffix}</a></li>\n",
            urlencoding::encode(&entry.name),
            escape_html(&entry.name),
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
