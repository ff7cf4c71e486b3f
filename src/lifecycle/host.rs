//! Host framework seam.
//!
//! # Responsibilities
//! - Expose the active route prefix and allow replacing it
//! - Enumerate registered routes with their versioning metadata
//! - Register additional routes (aliases) during the pre-start pass
//! - Defer work until every application route has been registered
//!
//! # Design Decisions
//! - Two traits: `RouteRegistry` is what hooks see, `Lifecycle` adds hook
//!   registration for whoever owns the host
//! - Hooks are `FnOnce`; a host runs each of them exactly once

use axum::http::Method;
use thiserror::Error;

use crate::routing::route::{AliasDescriptor, RouteDescriptor};

/// Errors raised by a host while registering routes or starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Path the router cannot register.
    #[error("invalid route path \"{path}\": {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// The route is taken, or its captures clash with a registered route.
    #[error("route conflict: {method} {path} overlaps a registered route")]
    Conflict { method: Method, path: String },

    /// Method string is not a valid HTTP method.
    #[error("invalid HTTP method \"{0}\"")]
    InvalidMethod(String),

    /// The host cannot serve this method.
    #[error("unsupported method {0}")]
    UnsupportedMethod(Method),

    /// `start()` was called more than once.
    #[error("host already started")]
    AlreadyStarted,
}

/// Deferred callback run once before the host starts serving.
pub type StartHook<H> = Box<dyn FnOnce(&mut dyn RouteRegistry<Handler = H>) -> Result<(), HostError>>;

/// Route table access granted to plugins.
pub trait RouteRegistry {
    /// Handler stored per route; cloned onto aliases.
    type Handler;

    /// Prefix applied to routes registered from now on.
    fn route_prefix(&self) -> &str;

    /// Replace the active prefix.
    fn set_route_prefix(&mut self, prefix: String);

    /// Snapshot of every registered route, in registration order.
    fn routes(&self) -> Vec<RouteDescriptor<Self::Handler>>;

    /// Whether `method path` is already taken, or could not be added
    /// alongside the registered routes.
    fn has_route(&self, method: &Method, path: &str) -> bool;

    /// Register a route at exactly `alias.path`, no prefix applied.
    fn add_route(&mut self, alias: AliasDescriptor<Self::Handler>) -> Result<(), HostError>;
}

/// Start-up lifecycle of a host.
pub trait Lifecycle: RouteRegistry {
    /// Run `hook` after all routes are registered, before serving.
    fn on_before_start(&mut self, hook: StartHook<Self::Handler>);
}

/// Box a closure as a [`StartHook`], fixing its signature for inference.
pub fn start_hook<H, F>(f: F) -> StartHook<H>
where
    F: FnOnce(&mut dyn RouteRegistry<Handler = H>) -> Result<(), HostError> + 'static,
{
    Box::new(f)
}
