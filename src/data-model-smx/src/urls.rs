//! Resolved and hand-written sitemap URL entries.

use serde::Deserialize;

use crate::meta::MetaTags;

/// One sitemap URL.
///
/// Before finalization `loc` is a path (pre-base-URL-join) or a full URL;
/// after finalization it is the exact, escaped text of the `<loc>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub tags: MetaTags,
}

impl UrlEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            tags: MetaTags::default(),
        }
    }

    pub fn with_tags(loc: impl Into<String>, tags: MetaTags) -> Self {
        Self {
            loc: loc.into(),
            tags,
        }
    }
}

// Hand-written URLs come either as a bare string or as a record with
// optional meta tags.
#[derive(Deserialize)]
#[serde(untagged)]
enum UrlEntryRepr {
    Bare(String),
    Full {
        loc: String,
        #[serde(flatten)]
        tags: MetaTags,
    },
}

impl<'de> Deserialize<'de> for UrlEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match UrlEntryRepr::deserialize(deserializer)? {
            UrlEntryRepr::Bare(loc) => UrlEntry::new(loc),
            UrlEntryRepr::Full { loc, tags } => UrlEntry::with_tags(loc, tags),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::Changefreq;

    #[test]
    fn test_bare_string_url() {
        let url: UrlEntry = serde_json::from_str(r#""https://website.net/about""#).unwrap();
        assert_eq!(url, UrlEntry::new("https://website.net/about"));
        assert!(url.tags.is_empty());
    }

    #[test]
    fn test_record_url_with_tags() {
        let url: UrlEntry = serde_json::from_str(
            r#"{"loc": "/about", "changefreq": "monthly", "lastmod": "2020-01-01", "priority": 0.3}"#,
        )
        .unwrap();

        assert_eq!(url.loc, "/about");
        assert_eq!(url.tags.changefreq, Some(Changefreq::Monthly));
        assert_eq!(url.tags.lastmod.as_deref(), Some("2020-01-01"));
        assert_eq!(url.tags.priority, Some(0.3));
    }

    #[test]
    fn test_record_url_requires_loc() {
        assert!(serde_json::from_str::<UrlEntry>(r#"{"priority": 0.3}"#).is_err());
    }
}
