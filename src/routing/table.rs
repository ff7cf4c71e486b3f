//! In-memory route table.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Apply the active prefix when application routes are registered
//! - Reject malformed paths and method/path conflicts
//! - Run pre-start hooks exactly once
//!
//! # Design Decisions
//! - Generic over the handler so the same table backs tests, the CLI
//!   planner and the axum adapter
//! - Conflicts follow the router's rules: two paths differing only in
//!   capture names clash whatever their methods
//! - O(n) conflict scan (route tables are built once at startup)

use std::fmt;

use axum::http::Method;

use crate::config::schema::RouteVersioning;
use crate::lifecycle::host::{HostError, Lifecycle, RouteRegistry, StartHook};
use crate::routing::prefix::apply_prefix;
use crate::routing::route::{check_path, path_shape, AliasDescriptor, RouteDescriptor};

/// Route table with a prefix slot and a pre-start phase.
pub struct RouteTable<H> {
    prefix: String,
    routes: Vec<RouteDescriptor<H>>,
    hooks: Vec<StartHook<H>>,
    started: bool,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            routes: Vec::new(),
            hooks: Vec::new(),
            started: false,
        }
    }
}

impl<H> fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("prefix", &self.prefix)
            .field("routes", &self.routes.len())
            .field("hooks", &self.hooks.len())
            .field("started", &self.started)
            .finish()
    }
}

impl<H: Clone> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table whose routes already live under `prefix` (an enclosing scope).
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Register an application route under the active prefix.
    pub fn route(&mut self, method: Method, path: &str, handler: H) -> Result<(), HostError> {
        self.insert(method, path, handler, None)
    }

    /// Register an application route carrying per-route versioning.
    pub fn route_with(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
        versioning: RouteVersioning,
    ) -> Result<(), HostError> {
        self.insert(method, path, handler, Some(versioning))
    }

    fn insert(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
        versioning: Option<RouteVersioning>,
    ) -> Result<(), HostError> {
        // The alias pass has already seen the table.
        if self.started {
            return Err(HostError::AlreadyStarted);
        }
        check_path(path)?;
        let full = apply_prefix(&self.prefix, path);
        self.push(RouteDescriptor {
            method,
            path: full,
            handler,
            versioning,
            alias_of: None,
        })
    }

    fn push(&mut self, route: RouteDescriptor<H>) -> Result<(), HostError> {
        if self.has_route(&route.method, &route.path) {
            return Err(HostError::Conflict {
                method: route.method,
                path: route.path,
            });
        }
        tracing::trace!(method = %route.method, path = %route.path, "Route registered");
        self.routes.push(route);
        Ok(())
    }

    /// Run every pre-start hook once, in registration order.
    pub fn start(&mut self) -> Result<(), HostError> {
        if self.started {
            return Err(HostError::AlreadyStarted);
        }
        self.started = true;

        let hooks = std::mem::take(&mut self.hooks);
        for hook in hooks {
            let registry: &mut dyn RouteRegistry<Handler = H> = &mut *self;
            hook(registry)?;
        }

        tracing::debug!(routes = self.routes.len(), "Route table started");
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor<H>> {
        self.routes.iter()
    }

    /// Consume the table, yielding its routes.
    pub fn into_routes(self) -> Vec<RouteDescriptor<H>> {
        self.routes
    }
}

impl<H: Clone> RouteRegistry for RouteTable<H> {
    type Handler = H;

    fn route_prefix(&self) -> &str {
        &self.prefix
    }

    fn set_route_prefix(&mut self, prefix: String) {
        self.prefix = prefix;
    }

    fn routes(&self) -> Vec<RouteDescriptor<H>> {
        self.routes.clone()
    }

    fn has_route(&self, method: &Method, path: &str) -> bool {
        let shape = path_shape(path);
        self.routes.iter().any(|r| {
            if r.path == path {
                &r.method == method
            } else {
                path_shape(&r.path) == shape
            }
        })
    }

    fn add_route(&mut self, alias: AliasDescriptor<H>) -> Result<(), HostError> {
        check_path(&alias.path)?;
        self.push(alias.into())
    }
}

impl<H: Clone> Lifecycle for RouteTable<H> {
    fn on_before_start(&mut self, hook: StartHook<H>) {
        self.hooks.push(hook);
    }
}
