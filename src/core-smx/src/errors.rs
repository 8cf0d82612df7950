//! Error types for sitemap generation.

use thiserror::Error;

/// Main error type for sitemap generation operations.
///
/// Every variant is fatal to the current resolution pass: no partial
/// sitemap is ever produced, and nothing is retried.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// Dynamic route declared without a slug source
    #[error("route '{route}' has dynamic parameters but no slugs")]
    MissingSlugs { route: String },

    /// Slug sequence failed structural validation
    #[error("invalid slugs for route '{route}': {reason}")]
    InvalidSlugs { route: String, reason: String },

    /// Slug record lacks a value for a required path parameter
    #[error("no slug value for parameter ':{param}' of route '{route}'")]
    MissingSlugValue { param: String, route: String },

    /// Slug value rejected by the parameter's inline regex constraint
    #[error("slug value '{value}' for parameter ':{param}' does not match pattern '{pattern}'")]
    SlugPatternMismatch {
        param: String,
        value: String,
        pattern: String,
    },

    /// Inline parameter pattern in a route path does not compile
    #[error("invalid pattern '{pattern}' for parameter ':{param}' of route '{route}': {source}")]
    InvalidParamPattern {
        param: String,
        pattern: String,
        route: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A slug generator itself failed
    #[error("slug generator failed for route '{route}': {message}")]
    SlugGenerator { route: String, message: String },

    /// XML rendering error
    #[error("XML rendering failed: {0}")]
    Render(#[from] quick_xml::Error),
}

/// Type alias for Result with SitemapError
pub type Result<T> = std::result::Result<T, SitemapError>;
