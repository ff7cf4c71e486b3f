//! Global prefix resolution.
//!
//! # Responsibilities
//! - Compose the global prefix from the prefix and version segments
//! - Fall back to the prefix already in effect when nothing is configured
//! - Normalize slashes so the prefix is `""` or `/seg[/seg]`

use crate::config::schema::ResolvedOptions;

/// Collapse every run of `/` into a single slash.
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

/// `/` + non-empty segments joined by `/`, or `""` when all are empty.
pub fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let parts: Vec<&str> = segments.into_iter().filter(|s| !s.is_empty()).collect();
    if parts.is_empty() {
        return String::new();
    }
    format!("/{}", parts.join("/"))
}

/// Compute the global prefix for `options`.
///
/// Returns `existing` unchanged when both segments are empty.
pub fn resolve_global_prefix(options: &ResolvedOptions, existing: &str) -> String {
    let joined = join_segments([options.prefix.as_str(), options.version.as_str()]);
    let normalized = collapse_slashes(&joined);
    let normalized = normalized.trim_end_matches('/');

    if normalized.is_empty() {
        existing.to_string()
    } else {
        normalized.to_string()
    }
}

/// Apply a route prefix to a path at registration time.
///
/// A root path under a non-empty prefix registers at the prefix itself.
pub fn apply_prefix(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_string()
    } else if path == "/" {
        prefix.to_string()
    } else {
        format!("{prefix}{path}")
    }
}
