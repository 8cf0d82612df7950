//! Convenience constructors for building route trees, slug sets, and URL
//! entries in tests of this crate and dependent crates.

use std::collections::BTreeMap;

use crate::meta::MetaTags;
use crate::routes::{Route, RouteMeta};
use crate::slugs::{SlugEntry, SlugValue, Slugs};
use crate::urls::UrlEntry;

/// A plain route.
pub fn route(path: &str) -> Route {
    Route::new(path)
}

/// A dynamic route with a literal slug sequence.
pub fn dynamic_route(path: &str, slugs: Slugs) -> Route {
    Route::with_meta(
        path,
        RouteMeta {
            slugs: Some(slugs),
            ..RouteMeta::default()
        },
    )
}

/// A literal slug source from bare string values.
pub fn literal_slugs(values: &[&str]) -> Slugs {
    Slugs::Literal(values.iter().map(|v| SlugEntry::value(*v)).collect())
}

/// A slug record binding parameters by name, with no meta tags.
pub fn slug_record(pairs: &[(&str, &str)]) -> SlugEntry {
    SlugEntry::Record {
        values: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), SlugValue::from(*v)))
            .collect::<BTreeMap<_, _>>(),
        tags: MetaTags::default(),
    }
}

/// A hand-written URL entry.
pub fn url(loc: &str) -> UrlEntry {
    UrlEntry::new(loc)
}
