//! Configuration loading and validation.
//!
//! The config file is a JSON document in the shape the surrounding build
//! tooling produces: generation options plus the declarative URL list and
//! route tree. Serde handles the shape; `validate` adds the structural
//! checks serde cannot express (base URL syntax, priority range, lastmod
//! format).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use data_model_smx::meta::MetaTags;
use data_model_smx::routes::Route;
use data_model_smx::slugs::{SlugEntry, Slugs};
use data_model_smx::urls::UrlEntry;

use crate::sitemap::SitemapOptions;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config declares neither urls nor routes")]
    Empty,

    #[error("invalid baseURL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid priority {value}: must lie between 0.0 and 1.0 in steps of 0.1")]
    InvalidPriority { value: f64 },

    #[error("invalid lastmod '{value}': expected a W3C date or date-time")]
    InvalidLastmod { value: String },
}

/// The full sitemap configuration, as read from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SitemapConfig {
    #[serde(rename = "baseURL")]
    pub base_url: Option<String>,
    pub trailing_slash: bool,
    pub hash_mode: bool,
    pub pretty: bool,
    /// Directory the CLI writes the generated files into.
    pub out_dir: Option<PathBuf>,
    pub defaults: MetaTags,
    pub urls: Vec<UrlEntry>,
    pub routes: Vec<Route>,
}

impl SitemapConfig {
    /// Reads, parses, and validates a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks beyond the JSON shape.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.urls.is_empty() && self.routes.is_empty() {
            return Err(ConfigError::Empty);
        }

        if let Some(base) = &self.base_url {
            url::Url::parse(base).map_err(|source| ConfigError::InvalidBaseUrl {
                url: base.clone(),
                source,
            })?;
        }

        validate_tags(&self.defaults)?;
        for url in &self.urls {
            validate_tags(&url.tags)?;
        }
        for route in &self.routes {
            validate_route(route)?;
        }

        Ok(())
    }

    /// Splits the configuration into the resolver's immutable options plus
    /// its URL and route inputs.
    pub fn into_parts(self) -> (SitemapOptions, Vec<UrlEntry>, Vec<Route>) {
        let options = SitemapOptions {
            base_url: self.base_url,
            trailing_slash: self.trailing_slash,
            hash_mode: self.hash_mode,
            pretty: self.pretty,
            defaults: self.defaults,
        };
        (options, self.urls, self.routes)
    }
}

fn validate_route(route: &Route) -> Result<(), ConfigError> {
    validate_tags(&route.meta.tags)?;

    if let Some(Slugs::Literal(entries)) = &route.meta.slugs {
        for entry in entries {
            if let SlugEntry::Record { tags, .. } = entry {
                validate_tags(tags)?;
            }
        }
    }

    for child in &route.children {
        validate_route(child)?;
    }

    Ok(())
}

fn validate_tags(tags: &MetaTags) -> Result<(), ConfigError> {
    if let Some(priority) = tags.priority {
        let scaled = priority * 10.0;
        if !(0.0..=1.0).contains(&priority) || (scaled - scaled.round()).abs() > 1e-9 {
            return Err(ConfigError::InvalidPriority { value: priority });
        }
    }

    if let Some(lastmod) = &tags.lastmod
        && !is_w3c_datetime(lastmod)
    {
        return Err(ConfigError::InvalidLastmod {
            value: lastmod.clone(),
        });
    }

    Ok(())
}

/// Accepts the two W3C forms in use here: a plain `YYYY-MM-DD` date or a
/// full RFC 3339 date-time.
fn is_w3c_datetime(value: &str) -> bool {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(value).is_ok()
}
