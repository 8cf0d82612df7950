//! Sitemap meta tags shared by URL entries, routes, and slug records.

use serde::Deserialize;

/// Tag names that carry sitemap metadata inside a slug record. Every other
/// key of a slug record names a route parameter.
pub const RESERVED_META_KEYS: [&str; 3] = ["lastmod", "changefreq", "priority"];

/// Update-frequency hint of a sitemap entry, as defined by the sitemaps
/// protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Changefreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl Changefreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl std::fmt::Display for Changefreq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three optional per-URL sitemap tags.
///
/// `lastmod` is an opaque, already-validated W3C date or date-time string;
/// the generation core never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetaTags {
    pub lastmod: Option<String>,
    pub changefreq: Option<Changefreq>,
    pub priority: Option<f64>,
}

impl MetaTags {
    pub fn is_empty(&self) -> bool {
        self.lastmod.is_none() && self.changefreq.is_none() && self.priority.is_none()
    }

    /// Key-by-key override: tags set on `other` win, tags only set on
    /// `self` are kept.
    pub fn overridden_by(&self, other: &MetaTags) -> MetaTags {
        MetaTags {
            lastmod: other.lastmod.clone().or_else(|| self.lastmod.clone()),
            changefreq: other.changefreq.or(self.changefreq),
            priority: other.priority.or(self.priority),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changefreq_from_json() {
        let freq: Changefreq = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(freq, Changefreq::Monthly);
        assert_eq!(freq.to_string(), "monthly");

        assert!(serde_json::from_str::<Changefreq>("\"fortnightly\"").is_err());
    }

    #[test]
    fn test_meta_tags_from_json() {
        let tags: MetaTags =
            serde_json::from_str(r#"{"lastmod": "2020-01-01", "priority": 0.3}"#).unwrap();
        assert_eq!(tags.lastmod.as_deref(), Some("2020-01-01"));
        assert_eq!(tags.changefreq, None);
        assert_eq!(tags.priority, Some(0.3));
    }

    #[test]
    fn test_overridden_by_prefers_other() {
        let base = MetaTags {
            lastmod: Some("2020-01-01".to_string()),
            changefreq: Some(Changefreq::Weekly),
            priority: Some(0.5),
        };
        let overrides = MetaTags {
            changefreq: Some(Changefreq::Never),
            ..MetaTags::default()
        };

        let merged = base.overridden_by(&overrides);
        assert_eq!(merged.lastmod.as_deref(), Some("2020-01-01"));
        assert_eq!(merged.changefreq, Some(Changefreq::Never));
        assert_eq!(merged.priority, Some(0.5));
    }

    #[test]
    fn test_overridden_by_empty_keeps_base() {
        let base = MetaTags {
            priority: Some(0.8),
            ..MetaTags::default()
        };
        let merged = base.overridden_by(&MetaTags::default());
        assert_eq!(merged, base);
    }
}
