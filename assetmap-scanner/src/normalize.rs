// Path and offset helpers shared by the extractors and relation inference

use regex::Regex;
use std::sync::LazyLock;

static REPEATED_SLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/{2,}").expect("valid regex"));

static SCHEME_AND_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9+.\-]*://[^/]*").expect("valid regex"));

/// Join a class-level prefix and a method-level sub-path into an absolute route.
///
/// Both halves are trimmed of whitespace and surrounding slashes, joined with
/// `/`, runs of slashes are collapsed and a trailing slash is dropped unless
/// the result is the root. The result is never empty.
pub fn compose_path(class_path: &str, sub_path: &str) -> String {
    let combined = format!("/{}/{}", trim_slashes(class_path), trim_slashes(sub_path));
    let collapsed = REPEATED_SLASHES.replace_all(&combined, "/");

    if collapsed.len() > 1 && collapsed.ends_with('/') {
        collapsed[..collapsed.len() - 1].to_string()
    } else {
        collapsed.into_owned()
    }
}

fn trim_slashes(value: &str) -> &str {
    value.trim().trim_matches('/')
}

/// Canonical form used when comparing call-site URLs, menu routes and
/// endpoint paths: lowercased, `scheme://host` removed, rooted at `/` and
/// with repeated slashes collapsed.
pub fn normalize_for_match(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let without_host = SCHEME_AND_HOST.replace(&lowered, "");

    let rooted = if without_host.starts_with('/') {
        without_host.into_owned()
    } else {
        format!("/{}", without_host)
    };

    REPEATED_SLASHES.replace_all(&rooted, "/").into_owned()
}

/// First path segment of the normalized form, e.g. `order` for `/Order/history`.
/// Returns an empty string for the root.
pub fn first_segment(raw: &str) -> String {
    let normalized = normalize_for_match(raw);
    let rest = normalized.strip_prefix('/').unwrap_or(&normalized);
    rest.split('/').next().unwrap_or_default().to_string()
}

/// 1-based line number of a byte offset within `text`.
pub fn line_of_offset(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}
