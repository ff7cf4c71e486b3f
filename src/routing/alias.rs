//! Alias path computation.
//!
//! # Responsibilities
//! - Strip the global prefix from a registered path
//! - Rebuild a path from override prefix/version with global fallbacks
//! - Decide whether an alias is needed at all
//!
//! # Design Decisions
//! - Pure string functions; registration happens in lifecycle::startup
//! - Presence of an override field wins over the global value, even when empty
//! - An alias identical to the original path is never produced

use crate::config::schema::{ResolvedOptions, RouteVersioning};
use crate::routing::prefix::collapse_slashes;

/// Remove `global` from the front of `path`.
///
/// Paths outside the prefixed namespace come back unchanged. An exact match
/// yields `/`.
pub fn strip_global(global: &str, path: &str) -> String {
    if global.is_empty() {
        return path.to_string();
    }
    match path.strip_prefix(global) {
        Some("") => "/".to_string(),
        Some(rest) => rest.to_string(),
        None => path.to_string(),
    }
}

/// Compose `/prefix/version/path`, skipping empty parts.
///
/// The result never contains consecutive slashes.
pub fn build_versioned_path(path: &str, prefix: &str, version: &str) -> String {
    let clean = path.strip_prefix('/').unwrap_or(path);
    let segments: Vec<&str> = [prefix, version, clean]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    collapse_slashes(&format!("/{}", segments.join("/")))
}

/// Path of the alias for a route registered at `path`, if one is needed.
pub fn alias_path(
    path: &str,
    versioning: &RouteVersioning,
    options: &ResolvedOptions,
    global: &str,
) -> Option<String> {
    let stripped = strip_global(global, path);

    let candidate = match versioning.overrides() {
        None => stripped,
        Some(o) => build_versioned_path(
            &stripped,
            o.prefix.resolve(&options.prefix),
            o.version.resolve(&options.version),
        ),
    };

    if candidate == path {
        None
    } else {
        Some(candidate)
    }
}
