//! Route-tree resolution.
//!
//! Expands the declarative route tree into concrete URL entries: inherited
//! meta tags flow down the tree (overridable key-by-key, `loc` excluded),
//! dynamic segments are substituted from slug sources, and sibling subtrees
//! resolve concurrently. Output order always matches declaration order,
//! whatever order the branches complete in.

use std::collections::BTreeMap;

use futures::future::{BoxFuture, join_all};

use data_model_smx::meta::MetaTags;
use data_model_smx::routes::{Route, RouteMeta};
use data_model_smx::slugs::{SlugEntry, SlugValue, Slugs};
use data_model_smx::urls::UrlEntry;

use crate::errors::{Result, SitemapError};
use crate::path::PathTemplate;
use crate::validation::validate_slugs;

/// Immutable context threaded down the route tree.
#[derive(Debug, Clone, Default)]
struct Inherited {
    /// Accumulated concrete parent path.
    path: String,
    /// Slug source inherited from an ancestor, unless overridden.
    slugs: Option<Slugs>,
    /// Meta tags inherited from ancestors, already merged.
    tags: MetaTags,
}

/// Merged view of a route's own meta over the inherited context. The
/// parent's `loc` never leaks down, so only the route's own `loc` appears
/// here.
struct Effective {
    loc: Option<String>,
    ignore: bool,
    slugs: Option<Slugs>,
    tags: MetaTags,
}

fn merge_meta(inherited: &Inherited, own: &RouteMeta) -> Effective {
    Effective {
        loc: own.loc.clone(),
        ignore: own.ignore_route,
        slugs: own.slugs.clone().or_else(|| inherited.slugs.clone()),
        tags: inherited.tags.overridden_by(&own.tags),
    }
}

/// Expands a forest of routes into URL entries, in declaration order.
pub async fn expand_routes(routes: &[Route]) -> Result<Vec<UrlEntry>> {
    tracing::debug!(routes = routes.len(), "expanding route tree");
    let root = Inherited::default();
    expand_siblings(routes, &root).await
}

/// One future per sibling; `join_all` keeps declaration order no matter
/// which branch finishes first.
fn expand_siblings<'a>(
    routes: &'a [Route],
    inherited: &'a Inherited,
) -> BoxFuture<'a, Result<Vec<UrlEntry>>> {
    Box::pin(async move {
        let branches = join_all(
            routes
                .iter()
                .map(|route| expand_route(route, inherited)),
        )
        .await;

        let mut urls = Vec::new();
        for branch in branches {
            urls.extend(branch?);
        }
        Ok(urls)
    })
}

async fn expand_route(route: &Route, inherited: &Inherited) -> Result<Vec<UrlEntry>> {
    let effective = merge_meta(inherited, &route.meta);

    if effective.ignore {
        return Ok(Vec::new());
    }

    let template = PathTemplate::parse(&route.path)?;

    // Catch-all routes never materialize unless an explicit loc says so.
    if template.has_wildcard() && effective.loc.is_none() {
        return Ok(Vec::new());
    }

    if let Some(loc) = &effective.loc {
        if route.children.is_empty() {
            return Ok(vec![UrlEntry::with_tags(loc.clone(), effective.tags)]);
        }
        // The explicit loc only serves as the base for descendants.
        let next = Inherited {
            path: loc.clone(),
            slugs: effective.slugs,
            tags: effective.tags,
        };
        return expand_siblings(&route.children, &next).await;
    }

    if !template.has_params() {
        let path = join_paths(&inherited.path, &route.path);
        if route.children.is_empty() {
            return Ok(vec![UrlEntry::with_tags(path, effective.tags)]);
        }
        let next = Inherited {
            path,
            slugs: effective.slugs,
            tags: effective.tags,
        };
        return expand_siblings(&route.children, &next).await;
    }

    // Dynamic route: a slug source is mandatory.
    let Some(slugs) = &effective.slugs else {
        return Err(SitemapError::MissingSlugs {
            route: route.path.clone(),
        });
    };

    let entries = slugs
        .materialize()
        .await
        .map_err(|source| SitemapError::SlugGenerator {
            route: route.path.clone(),
            message: source.to_string(),
        })?;
    validate_slugs(&route.path, &entries)?;

    if route.children.is_empty() {
        let mut urls = Vec::with_capacity(entries.len());
        for entry in &entries {
            let (values, slug_tags) = slug_bindings(entry, &template);
            let filled = template.fill(&values)?;
            urls.push(UrlEntry::with_tags(
                join_paths(&inherited.path, &filled),
                effective.tags.overridden_by(&slug_tags),
            ));
        }
        return Ok(urls);
    }

    // With children, every slug spawns its own subtree; the subtrees
    // resolve concurrently and reassemble in slug order.
    let mut contexts = Vec::with_capacity(entries.len());
    for entry in &entries {
        let (values, slug_tags) = slug_bindings(entry, &template);
        let filled = template.fill(&values)?;
        contexts.push(Inherited {
            path: join_paths(&inherited.path, &filled),
            slugs: effective.slugs.clone(),
            tags: effective.tags.overridden_by(&slug_tags),
        });
    }

    let branches = join_all(
        contexts
            .iter()
            .map(|context| expand_siblings(&route.children, context)),
    )
    .await;

    let mut urls = Vec::new();
    for branch in branches {
        urls.extend(branch?);
    }
    Ok(urls)
}

/// Normalizes a slug entry into a parameter-name -> value map plus its
/// override tags. A bare scalar binds to the route's first parameter.
fn slug_bindings(
    entry: &SlugEntry,
    template: &PathTemplate,
) -> (BTreeMap<String, SlugValue>, MetaTags) {
    match entry {
        SlugEntry::Value(value) => {
            let mut values = BTreeMap::new();
            if let Some(param) = template.first_param() {
                values.insert(param.name.clone(), value.clone());
            }
            (values, MetaTags::default())
        }
        SlugEntry::Record { values, tags } => (values.clone(), tags.clone()),
    }
}

/// An absolute child path replaces the accumulated parent path; a relative
/// one concatenates to it.
fn join_paths(parent: &str, child: &str) -> String {
    if child.starts_with('/') || parent.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), child)
    }
}
