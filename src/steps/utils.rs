use crate::error::{Result, RunnerError};
use url::Url;

/// Resolve a navigate target against the base URL.
///
/// Absolute http(s) URLs are returned as-is; anything else is joined to `base`.
pub fn resolve_url(base: &Url, target: &str) -> Result<String> {
    let trimmed = target.trim();

    if has_scheme(trimmed) {
        return Ok(trimmed.to_string());
    }

    base.join(trimmed)
        .map(|u| u.to_string())
        .map_err(|e| RunnerError::InvalidUrl { url: trimmed.to_string(), reason: e.to_string() })
}

fn has_scheme(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Whether the last path segment of a target carries a file extension (`/login.html`)
pub fn has_extension(target: &str) -> bool {
    let path = target.split(['?', '#']).next().unwrap_or("");
    let path = match path.find("://") {
        Some(i) => path[i + 3..].split_once('/').map(|(_, p)| p).unwrap_or(""),
        None => path,
    };
    let last = path.rsplit('/').next().unwrap_or("");
    last.rfind('.').is_some_and(|i| i > 0 && i + 1 < last.len())
}

/// Same resolved URL with `.html` appended to its last path segment, keeping
/// host, query and fragment.
///
/// `None` for directory-like paths (`https://host`, `/docs/`) and for anything
/// that is not an absolute URL.
pub fn with_html_suffix(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    if parsed.cannot_be_a_base() {
        return None;
    }

    let path = parsed.path().to_string();
    if path.is_empty() || path.ends_with('/') {
        return None;
    }

    parsed.set_path(&format!("{}.html", path));
    Some(parsed.to_string())
}
