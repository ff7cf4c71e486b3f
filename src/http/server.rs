//! Axum integration.
//!
//! # Responsibilities
//! - Collect axum handlers together with their versioning metadata
//! - Act as the host for `lifecycle::startup::register`
//! - Run the alias pass and freeze into an `axum::Router`
//! - Serve a manifest with echo handlers for the CLI
//!
//! # Design Decisions
//! - Handlers are stored as `MethodRouter<S>` so aliases share them by clone
//! - Routes sharing a path are merged into one method router
//! - The router only exists after the alias pass ran

use axum::{
    extract::OriginalUri,
    handler::Handler,
    http::Method,
    routing::{on, MethodFilter, MethodRouter},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

use crate::config::schema::{Manifest, RouteVersioning};
use crate::lifecycle::host::{HostError, Lifecycle, RouteRegistry, StartHook};
use crate::lifecycle::signals::shutdown_signal;
use crate::lifecycle::startup::{register, PluginError, Registration};
use crate::routing::prefix::apply_prefix;
use crate::routing::route::{parse_method, AliasDescriptor, RouteDescriptor};
use crate::routing::table::RouteTable;

/// Route collector that turns into an `axum::Router` once started.
#[derive(Debug)]
pub struct VersionedRouter<S = ()> {
    table: RouteTable<MethodRouter<S>>,
}

impl<S> Default for VersionedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self {
            table: RouteTable::new(),
        }
    }
}

impl<S> VersionedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method path` under the active prefix.
    pub fn route<H, T>(&mut self, method: Method, path: &str, handler: H) -> Result<&mut Self, HostError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let method_router = method_router(&method, handler)?;
        self.table.route(method, path, method_router)?;
        Ok(self)
    }

    /// Like [`route`](Self::route), with per-route versioning.
    pub fn route_with<H, T>(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
        versioning: RouteVersioning,
    ) -> Result<&mut Self, HostError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let method_router = method_router(&method, handler)?;
        self.table.route_with(method, path, method_router, versioning)?;
        Ok(self)
    }

    pub fn table(&self) -> &RouteTable<MethodRouter<S>> {
        &self.table
    }

    /// Run the pre-start hooks and build the router.
    pub fn into_router(mut self) -> Result<Router<S>, HostError> {
        self.table.start()?;

        let mut by_path: Vec<(String, MethodRouter<S>)> = Vec::new();
        for route in self.table.into_routes() {
            match by_path.iter_mut().find(|(path, _)| *path == route.path) {
                Some((_, existing)) => {
                    let current = std::mem::replace(existing, MethodRouter::new());
                    *existing = current.merge(route.handler);
                }
                None => by_path.push((route.path, route.handler)),
            }
        }

        tracing::info!(paths = by_path.len(), "Router built");
        Ok(by_path
            .into_iter()
            .fold(Router::new(), |router, (path, handler)| router.route(&path, handler)))
    }
}

fn method_router<H, T, S>(method: &Method, handler: H) -> Result<MethodRouter<S>, HostError>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    let filter = MethodFilter::try_from(method.clone())
        .map_err(|_| HostError::UnsupportedMethod(method.clone()))?;
    Ok(on(filter, handler))
}

impl<S> RouteRegistry for VersionedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Handler = MethodRouter<S>;

    fn route_prefix(&self) -> &str {
        self.table.route_prefix()
    }

    fn set_route_prefix(&mut self, prefix: String) {
        self.table.set_route_prefix(prefix);
    }

    fn routes(&self) -> Vec<RouteDescriptor<MethodRouter<S>>> {
        self.table.routes()
    }

    fn has_route(&self, method: &Method, path: &str) -> bool {
        self.table.has_route(method, path)
    }

    fn add_route(&mut self, alias: AliasDescriptor<MethodRouter<S>>) -> Result<(), HostError> {
        self.table.add_route(alias)
    }
}

impl<S> Lifecycle for VersionedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn on_before_start(&mut self, hook: StartHook<MethodRouter<S>>) {
        self.table.on_before_start(hook);
    }
}

/// Error building or running the echo server.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Router answering every manifest route with a JSON description of itself.
///
/// Aliases reuse the original handler, so `route` in the body names the
/// canonical path while `path` is the one that was requested.
pub fn echo_router(manifest: &Manifest) -> Result<(Router, Registration), ServeError> {
    let mut router: VersionedRouter = VersionedRouter::new();
    let registration = register(&mut router, &manifest.versioning)?;

    for entry in &manifest.routes {
        let method = parse_method(&entry.method)?;
        let canonical = apply_prefix(router.route_prefix(), &entry.path);
        let method_name = method.to_string();

        let handler = move |OriginalUri(uri): OriginalUri| {
            let method_name = method_name.clone();
            let canonical = canonical.clone();
            async move {
                Json(json!({
                    "method": method_name,
                    "route": canonical,
                    "path": uri.path(),
                }))
            }
        };

        match &entry.versioning {
            Some(versioning) => router.route_with(method, &entry.path, handler, versioning.clone())?,
            None => router.route(method, &entry.path, handler)?,
        };
    }

    Ok((router.into_router()?, registration))
}

/// Serve `manifest` on `listener` until a shutdown signal arrives.
pub async fn serve(manifest: &Manifest, listener: TcpListener) -> Result<(), ServeError> {
    let (router, registration) = echo_router(manifest)?;
    let addr = listener.local_addr()?;

    tracing::info!(
        address = %addr,
        global_prefix = %registration.global_prefix().unwrap_or(""),
        "Echo server starting"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Echo server stopped");
    Ok(())
}
