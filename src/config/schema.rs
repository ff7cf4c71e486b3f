//! Configuration schema definitions.
//!
//! Global versioning options, per-route overrides and the TOML manifest
//! consumed by the CLI. All types derive Serde traits for deserialization
//! from config files; unknown keys are rejected everywhere.

use serde::{Deserialize, Deserializer, Serialize};

/// Default version segment.
pub const DEFAULT_VERSION: &str = "v1";

/// Default prefix segment.
pub const DEFAULT_PREFIX: &str = "api";

/// Global versioning options as supplied by the user.
///
/// Absent fields fall back to the defaults in [`VersioningOptions::resolve`].
/// An explicit empty string is kept and disables that segment. A present
/// field must carry a value of its type; `null` is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VersioningOptions {
    /// Version segment (e.g., "v1").
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Prefix segment (e.g., "api").
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// `false` disables prefixing and aliasing altogether.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Deserialize a key that, when present, must hold a `T` (not `null`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl VersioningOptions {
    pub fn new(prefix: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            prefix: Some(prefix.into()),
            enabled: None,
        }
    }

    /// Options with everything switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: Some(false),
            ..Self::default()
        }
    }

    /// Merge with the defaults.
    pub fn resolve(&self) -> ResolvedOptions {
        ResolvedOptions {
            prefix: self
                .prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            version: self
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            enabled: self.enabled.unwrap_or(true),
        }
    }
}

/// Options after merging with the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub prefix: String,
    pub version: String,
    pub enabled: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        VersioningOptions::default().resolve()
    }
}

/// A single override field that tracks whether the key was present.
///
/// `Inherit` means the key was absent and the global value applies.
/// `Explicit("")` means the key was present but empty, which drops the
/// segment instead of falling back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Setting {
    #[default]
    Inherit,
    Explicit(String),
}

impl Setting {
    pub fn explicit(value: impl Into<String>) -> Self {
        Setting::Explicit(value.into())
    }

    /// Effective value given the global fallback.
    pub fn resolve<'a>(&'a self, global: &'a str) -> &'a str {
        match self {
            Setting::Inherit => global,
            Setting::Explicit(value) => value,
        }
    }

    pub fn as_explicit(&self) -> Option<&str> {
        match self {
            Setting::Inherit => None,
            Setting::Explicit(value) => Some(value),
        }
    }
}

impl<'de> Deserialize<'de> for Setting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Reaching this impl means the key exists; null counts as empty.
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Setting::Explicit(value.unwrap_or_default()))
    }
}

/// Per-route override table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteOverride {
    #[serde(default)]
    pub prefix: Setting,

    #[serde(default)]
    pub version: Setting,

    #[serde(default)]
    pub enabled: Option<bool>,
}

impl RouteOverride {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Setting::explicit(prefix);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Setting::explicit(version);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

/// Versioning metadata attached to a single route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRouteVersioning")]
pub enum RouteVersioning {
    /// Expose the route without any prefix or version segment as well.
    Disabled,
    /// Expose the route under a different prefix and/or version as well.
    Override(RouteOverride),
}

impl RouteVersioning {
    /// Shorthand for an override that only changes the version.
    pub fn version(version: impl Into<String>) -> Self {
        RouteVersioning::Override(RouteOverride::default().version(version))
    }

    /// Shorthand for an override that only changes the prefix.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        RouteVersioning::Override(RouteOverride::default().prefix(prefix))
    }

    /// True for `false` and for tables carrying `enabled = false`.
    pub fn is_disabled(&self) -> bool {
        match self {
            RouteVersioning::Disabled => true,
            RouteVersioning::Override(o) => o.enabled == Some(false),
        }
    }

    /// The override table, unless the route opted out.
    pub fn overrides(&self) -> Option<&RouteOverride> {
        match self {
            RouteVersioning::Override(o) if o.enabled != Some(false) => Some(o),
            _ => None,
        }
    }
}

impl From<RouteOverride> for RouteVersioning {
    fn from(value: RouteOverride) -> Self {
        RouteVersioning::Override(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRouteVersioning {
    Flag(bool),
    Table(RouteOverride),
}

impl From<RawRouteVersioning> for RouteVersioning {
    fn from(raw: RawRouteVersioning) -> Self {
        match raw {
            RawRouteVersioning::Flag(false) => RouteVersioning::Disabled,
            RawRouteVersioning::Flag(true) => RouteVersioning::Override(RouteOverride::default()),
            RawRouteVersioning::Table(table) => RouteVersioning::Override(table),
        }
    }
}

/// Root of a TOML route manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Global versioning options.
    pub versioning: VersioningOptions,

    /// Application routes, registered in order.
    pub routes: Vec<RouteConfig>,

    /// Settings for the `serve` command.
    pub server: ServerConfig,
}

/// One application route in a manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// HTTP method (e.g., "GET").
    pub method: String,

    /// Path relative to the global prefix.
    pub path: String,

    /// Optional per-route override (`false` or a table).
    #[serde(default)]
    pub versioning: Option<RouteVersioning>,
}

/// Listener settings for the `serve` command.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}
