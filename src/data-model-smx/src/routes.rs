//! The declarative route tree consumed by the sitemap resolver.

use serde::Deserialize;

use crate::meta::MetaTags;
use crate::slugs::Slugs;

/// A node in the route tree.
///
/// `path` is a template: absolute (`/docs`) or relative to its parent
/// (`articles`), with zero or more dynamic parameters (`:id`, optionally
/// constrained as `:id(\d+)`, optionally marked optional as `:title?`) and
/// possibly a wildcard segment (`*`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub path: String,
    #[serde(default)]
    pub meta: RouteMeta,
    #[serde(default)]
    pub children: Vec<Route>,
}

impl Route {
    /// A plain route with no metadata and no children.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_meta(path: impl Into<String>, meta: RouteMeta) -> Self {
        Self {
            path: path.into(),
            meta,
            children: Vec::new(),
        }
    }

    pub fn with_children(path: impl Into<String>, children: Vec<Route>) -> Self {
        Self {
            path: path.into(),
            meta: RouteMeta::default(),
            children,
        }
    }
}

/// Sitemap-relevant settings attached to a route.
///
/// `loc` overrides the location derived from the path. `ignore_route`
/// excludes the route and its whole subtree. `slugs` supplies parameter
/// values for dynamic paths. The flattened tags are inherited by children
/// and overridable key-by-key; `loc` is never inherited.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteMeta {
    pub loc: Option<String>,
    pub ignore_route: bool,
    pub slugs: Option<Slugs>,
    #[serde(flatten)]
    pub tags: MetaTags,
}
