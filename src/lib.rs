//! API versioning for route tables.
//!
//! Installs a global `/prefix/version` route prefix and, once every route is
//! registered, adds alias routes for endpoints that override or opt out of
//! that prefix.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::{RouteOverride, RouteVersioning, Setting, VersioningOptions};
pub use http::VersionedRouter;
pub use lifecycle::{register, Lifecycle, PluginError, Registration, RouteRegistry};
pub use routing::RouteTable;
