//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! Application handlers (+ versioning metadata)
//!     → server.rs (VersionedRouter collects, acts as host)
//!     → lifecycle::startup (prefix + alias pass)
//!     → axum::Router (original and alias paths share handlers)
//!     → axum::serve
//! ```

pub mod server;

pub use server::{echo_router, serve, ServeError, VersionedRouter};
