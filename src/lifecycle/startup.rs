//! Plugin registration and the pre-start alias pass.
//!
//! # Responsibilities
//! - Validate options and merge them with defaults
//! - Resolve the global prefix once and install it on the host
//! - Defer alias generation until the route table is complete
//!
//! # Design Decisions
//! - Fail fast: invalid options abort registration
//! - The resolved prefix is returned to the caller, not stashed globally
//! - Aliases that would collide with an existing route are skipped

use thiserror::Error;

use crate::config::loader::join_errors;
use crate::config::schema::{Manifest, ResolvedOptions, VersioningOptions};
use crate::config::validation::{validate_options, ValidationError};
use crate::lifecycle::host::{start_hook, HostError, Lifecycle, RouteRegistry};
use crate::routing::alias::alias_path;
use crate::routing::prefix::resolve_global_prefix;
use crate::routing::route::{parse_method, AliasDescriptor};
use crate::routing::table::RouteTable;

/// Errors returned by [`register`].
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Invalid plugin options: {}", join_errors(.0))]
    InvalidOptions(Vec<ValidationError>),

    #[error("Invalid plugin options: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// `enabled = false`: nothing was changed.
    Disabled,
    /// Prefix installed and the alias pass scheduled.
    Active {
        global_prefix: String,
        options: ResolvedOptions,
    },
}

impl Registration {
    pub fn global_prefix(&self) -> Option<&str> {
        match self {
            Registration::Disabled => None,
            Registration::Active { global_prefix, .. } => Some(global_prefix),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Registration::Active { .. })
    }
}

impl VersioningOptions {
    /// Parse options from a loosely-typed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, PluginError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Install versioning on `host`.
///
/// Must be called before the application routes are registered so they pick
/// up the prefix. Aliases are generated when the host starts.
pub fn register<R>(host: &mut R, options: &VersioningOptions) -> Result<Registration, PluginError>
where
    R: Lifecycle,
    R::Handler: Clone,
{
    validate_options(options).map_err(PluginError::InvalidOptions)?;

    let options = options.resolve();
    if !options.enabled {
        tracing::warn!("API versioning disabled; route prefix left untouched");
        return Ok(Registration::Disabled);
    }

    let global_prefix = resolve_global_prefix(&options, host.route_prefix());
    host.set_route_prefix(global_prefix.clone());

    tracing::info!(
        global_prefix = %global_prefix,
        prefix = %options.prefix,
        version = %options.version,
        "API versioning registered"
    );

    let hook_options = options.clone();
    let hook_prefix = global_prefix.clone();
    host.on_before_start(start_hook::<R::Handler, _>(move |registry| {
        register_aliases(registry, &hook_options, &hook_prefix).map(|_| ())
    }));

    Ok(Registration::Active {
        global_prefix,
        options,
    })
}

/// Add one alias per route that declares versioning metadata.
///
/// Returns the number of aliases added.
pub fn register_aliases<H: Clone>(
    registry: &mut dyn RouteRegistry<Handler = H>,
    options: &ResolvedOptions,
    global_prefix: &str,
) -> Result<usize, HostError> {
    let mut added = 0;

    for route in registry.routes() {
        let Some(versioning) = &route.versioning else {
            continue;
        };
        let Some(path) = alias_path(&route.path, versioning, options, global_prefix) else {
            continue;
        };

        if registry.has_route(&route.method, &path) {
            tracing::warn!(
                method = %route.method,
                path = %path,
                original = %route.path,
                "Alias collides with an existing route, skipping"
            );
            continue;
        }

        tracing::debug!(method = %route.method, alias = %path, original = %route.path, "Alias route added");
        registry.add_route(AliasDescriptor {
            method: route.method,
            path,
            handler: route.handler,
            alias_of: route.path,
        })?;
        added += 1;
    }

    tracing::info!(aliases = added, "Alias pass complete");
    Ok(added)
}

/// Apply `manifest` to an in-memory table and run the alias pass.
///
/// Each route's handler is its index in `manifest.routes`, so aliases point
/// back at the entry they were generated from.
pub fn plan(manifest: &Manifest) -> Result<(Registration, RouteTable<usize>), PluginError> {
    let mut table = RouteTable::new();
    let registration = register(&mut table, &manifest.versioning)?;

    for (index, entry) in manifest.routes.iter().enumerate() {
        let method = parse_method(&entry.method)?;
        match &entry.versioning {
            Some(versioning) => table.route_with(method, &entry.path, index, versioning.clone())?,
            None => table.route(method, &entry.path, index)?,
        }
    }

    table.start()?;
    Ok((registration, table))
}
