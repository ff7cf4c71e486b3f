//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! options (struct / JSON value / TOML manifest)
//!     → schema.rs (deserialize, unknown keys rejected)
//!     → validation.rs (segment length, route entries)
//!     → ResolvedOptions (merged with defaults, immutable)
//!     → consumed once by lifecycle::startup::register
//! ```
//!
//! # Design Decisions
//! - Options are immutable once registered; no reload
//! - Absent fields take defaults, explicit empty strings are kept
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_manifest, ConfigError};
pub use schema::{
    Manifest, ResolvedOptions, RouteConfig, RouteOverride, RouteVersioning, Setting,
    VersioningOptions,
};
pub use validation::ValidationError;
