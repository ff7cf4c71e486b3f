//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     ResolvedOptions
//!     → prefix.rs (compose global prefix, fall back to existing)
//!     → table.rs (prefix applied to every application route)
//!
//! Pre-start pass:
//!     RouteDescriptor[] with versioning metadata
//!     → alias.rs (strip global prefix, rebuild with overrides)
//!     → AliasDescriptor[] added back to the table
//! ```
//!
//! # Design Decisions
//! - Path composition is pure string work, no regex
//! - Existing routes are never mutated, only new ones appended
//! - Deterministic: same table and options always yield the same aliases

pub mod alias;
pub mod prefix;
pub mod route;
pub mod table;

pub use route::{AliasDescriptor, RouteDescriptor};
pub use table::RouteTable;
