//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntax and unknown keys)
//! - Enforce segment length limits on prefix and version
//! - Check manifest routes (method, path syntax, override lengths)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: options → Result<(), Vec<ValidationError>>
//! - Runs before options are accepted into the system

use thiserror::Error;

use crate::config::schema::{Manifest, RouteVersioning, Setting, VersioningOptions};
use crate::lifecycle::host::HostError;
use crate::routing::route::{check_path, parse_method};

/// Maximum length of a prefix or version segment.
pub const MAX_SEGMENT_LEN: usize = 255;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("\"{field}\" length must be less than or equal to {max} characters long (got {len})")]
    TooLong {
        field: String,
        len: usize,
        max: usize,
    },

    #[error("route {index}: invalid HTTP method \"{method}\"")]
    InvalidMethod { index: usize, method: String },

    #[error("route {index}: invalid path \"{path}\": {reason}")]
    InvalidPath {
        index: usize,
        path: String,
        reason: &'static str,
    },
}

fn check_segment(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    let len = value.chars().count();
    if len > MAX_SEGMENT_LEN {
        errors.push(ValidationError::TooLong {
            field: field.to_string(),
            len,
            max: MAX_SEGMENT_LEN,
        });
    }
}

/// Validate global versioning options.
pub fn validate_options(options: &VersioningOptions) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(prefix) = &options.prefix {
        check_segment("prefix", prefix, &mut errors);
    }
    if let Some(version) = &options.version {
        check_segment("version", version, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a whole manifest: global options plus every route entry.
pub fn validate_manifest(manifest: &Manifest) -> Result<(), Vec<ValidationError>> {
    let mut errors = match validate_options(&manifest.versioning) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    for (index, route) in manifest.routes.iter().enumerate() {
        if parse_method(&route.method).is_err() {
            errors.push(ValidationError::InvalidMethod {
                index,
                method: route.method.clone(),
            });
        }

        if let Err(HostError::InvalidPath { path, reason }) = check_path(&route.path) {
            errors.push(ValidationError::InvalidPath { index, path, reason });
        }

        if let Some(RouteVersioning::Override(o)) = &route.versioning {
            if let Setting::Explicit(prefix) = &o.prefix {
                check_segment(&format!("routes[{index}].versioning.prefix"), prefix, &mut errors);
            }
            if let Setting::Explicit(version) = &o.version {
                check_segment(&format!("routes[{index}].versioning.version"), version, &mut errors);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
