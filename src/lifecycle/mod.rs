//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup.rs):
//!     Validate options → Resolve prefix → Install on host → Schedule hook
//!
//! Host start (host.rs):
//!     All routes registered → start() → pre-start hooks → alias pass
//!
//! Serving (signals.rs):
//!     SIGTERM/SIGINT → graceful shutdown of axum::serve
//! ```
//!
//! # Design Decisions
//! - Ordered startup: options first, then routes, then the alias pass
//! - The alias pass runs exactly once, before any traffic
//! - Fail fast: invalid options are fatal

pub mod host;
pub mod signals;
pub mod startup;

pub use host::{start_hook, HostError, Lifecycle, RouteRegistry, StartHook};
pub use startup::{register, register_aliases, PluginError, Registration};
