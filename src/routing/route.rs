//! Route and alias descriptors exchanged with the host.

use std::str::FromStr;

use axum::http::Method;

use crate::config::schema::RouteVersioning;
use crate::lifecycle::host::HostError;

/// Parse a method name such as `"GET"`.
pub fn parse_method(method: &str) -> Result<Method, HostError> {
    if method.is_empty() {
        return Err(HostError::InvalidMethod(String::new()));
    }
    Method::from_str(method).map_err(|_| HostError::InvalidMethod(method.to_string()))
}

/// Render a route as `METHOD /path`.
pub fn method_path(method: &Method, path: &str) -> String {
    format!("{method} {path}")
}

/// Check that `path` is a route path the router can register.
///
/// Captures are whole segments written `{name}`, or `{*name}` as the last
/// segment. Colon-style `:name` segments are not supported.
pub fn check_path(path: &str) -> Result<(), HostError> {
    let invalid = |reason| {
        Err(HostError::InvalidPath {
            path: path.to_string(),
            reason,
        })
    };

    if !path.starts_with('/') {
        return invalid("must start with '/'");
    }

    let mut segments = path[1..].split('/').peekable();
    while let Some(segment) = segments.next() {
        if segment.starts_with(':') {
            return invalid("captures are written {name}, not :name");
        }
        if !segment.contains(['{', '}']) {
            continue;
        }

        let Some(name) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
            return invalid("a capture must span the whole segment");
        };
        let (wildcard, name) = match name.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, name),
        };
        if name.is_empty() || name.contains(['{', '}', '*']) {
            return invalid("malformed capture");
        }
        if wildcard && segments.peek().is_some() {
            return invalid("a wildcard capture must be the last segment");
        }
    }

    Ok(())
}

/// `path` with every capture name erased, so `/u/{id}` and `/u/{name}`
/// compare equal. The router cannot hold two such paths at once.
pub fn path_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with("{*") {
                "{*}"
            } else if segment.starts_with('{') {
                "{}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// A route as held by the host's route table.
#[derive(Debug, Clone)]
pub struct RouteDescriptor<H> {
    pub method: Method,

    /// Full registered path, global prefix included.
    pub path: String,

    pub handler: H,

    /// Per-route versioning metadata, if the route declared any.
    pub versioning: Option<RouteVersioning>,

    /// Original path when this route was added as an alias.
    pub alias_of: Option<String>,
}

impl<H> RouteDescriptor<H> {
    pub fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }
}

/// A new route produced by the alias pass.
#[derive(Debug, Clone)]
pub struct AliasDescriptor<H> {
    pub method: Method,
    pub path: String,
    pub handler: H,
    pub alias_of: String,
}

impl<H> From<AliasDescriptor<H>> for RouteDescriptor<H> {
    fn from(alias: AliasDescriptor<H>) -> Self {
        Self {
            method: alias.method,
            path: alias.path,
            handler: alias.handler,
            versioning: None,
            alias_of: Some(alias.alias_of),
        }
    }
}
