//! Structural validation of slug sequences.
//!
//! Runs after a slug source is materialized and before any substitution.
//! Scalar-ness of the values is already guaranteed by the types; the check
//! left to do at runtime is that a record actually binds at least one
//! parameter instead of only carrying meta tags.

use data_model_smx::slugs::SlugEntry;

use crate::errors::{Result, SitemapError};

/// Validates a materialized slug sequence for the route at `route_path`.
///
/// A bare scalar entry is always valid on its own (it is bound to the
/// route's single parameter later). A record entry must have at least one
/// key outside the reserved meta-tag names.
///
/// Pure predicate; no side effects.
pub fn validate_slugs(route_path: &str, entries: &[SlugEntry]) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        if let SlugEntry::Record { values, .. } = entry
            && values.is_empty()
        {
            return Err(SitemapError::InvalidSlugs {
                route: route_path.to_string(),
                reason: format!("slug #{index} binds no parameter (it only carries meta tags)"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_model_smx::meta::MetaTags;
    use data_model_smx::test_helpers::slug_record;
    use data_model_smx::slugs::SlugEntry;
    use std::collections::BTreeMap;

    #[test]
    fn test_scalars_are_valid() {
        let entries = vec![SlugEntry::value("a"), SlugEntry::value(7i64)];
        assert!(validate_slugs("/article/:title", &entries).is_ok());
    }

    #[test]
    fn test_record_with_params_is_valid() {
        let entries = vec![slug_record(&[("category", "blog"), ("title", "x")])];
        assert!(validate_slugs("/article/:category/:title", &entries).is_ok());
    }

    #[test]
    fn test_meta_only_record_is_invalid() {
        let entries = vec![
            SlugEntry::value("fine"),
            SlugEntry::Record {
                values: BTreeMap::new(),
                tags: MetaTags {
                    priority: Some(0.8),
                    ..MetaTags::default()
                },
            },
        ];

        let err = validate_slugs("/user/:id", &entries).unwrap_err();
        match err {
            SitemapError::InvalidSlugs { route, reason } => {
                assert_eq!(route, "/user/:id");
                assert!(reason.contains("slug #1"), "reason was: {reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
