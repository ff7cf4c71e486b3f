//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / routing / lifecycle
//!     → tracing events (prefix resolved, aliases added or skipped)
//!     → logging.rs subscriber (stdout, filtered by RUST_LOG)
//! ```

pub mod logging;

pub use logging::init_logging;
