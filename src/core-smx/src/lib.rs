//! # Sitemap Generation Library
//!
//! A Rust library for generating XML sitemaps from a declarative
//! description of a site's URLs: a flat list of explicit URLs, a tree of
//! routes (nested, possibly parameterized with dynamic segments), or both.
//!
//! ## Features
//!
//! - Expand nested route trees with inherited, overridable meta tags
//! - Fill dynamic `:param` segments from literal slug lists or async
//!   generators, with inline regex constraints and optional parameters
//! - Resolve sibling routes concurrently while preserving declaration order
//! - Deduplicate locations (hand-written URLs win over routes)
//! - Shard sites over 50,000 URLs into numbered parts plus a sitemap index
//! - Render compact or pretty XML, byte-for-byte consistent
//!
//! ## Examples
//!
//! ### Basic Usage
//!
//! ```no_run
//! use core_smx::{SitemapOptions, generate_sitemaps};
//! use data_model_smx::routes::Route;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = SitemapOptions {
//!         base_url: Some("https://example.com".to_string()),
//!         ..SitemapOptions::default()
//!     };
//!     let routes = vec![Route::new("/"), Route::new("/about")];
//!
//!     let sitemaps = generate_sitemaps(&options, &[], &routes).await?;
//!     println!("{}", sitemaps["sitemap"]);
//!     Ok(())
//! }
//! ```
//!
//! ### Generating slugs asynchronously
//!
//! ```no_run
//! use core_smx::{SitemapOptions, generate_sitemaps};
//! use data_model_smx::routes::{Route, RouteMeta};
//! use data_model_smx::slugs::{SlugEntry, Slugs};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let route = Route::with_meta(
//!         "/article/:title",
//!         RouteMeta {
//!             slugs: Some(Slugs::from_fn(|| async {
//!                 // Typically a database or API call.
//!                 Ok(vec![SlugEntry::value("my-first-article")])
//!             })),
//!             ..RouteMeta::default()
//!         },
//!     );
//!
//!     let sitemaps = generate_sitemaps(&SitemapOptions::default(), &[], &[route]).await?;
//!     println!("{}", sitemaps["sitemap"]);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod common;
pub mod config;
mod errors;
mod path;
mod resolver;
mod sitemap;
mod validation;
pub mod writer;
mod xml;

// Public API re-exports
pub use config::{ConfigError, SitemapConfig};
pub use errors::{Result, SitemapError};
pub use sitemap::{
    MAX_URLS_PER_SITEMAP, SITEMAP_FILENAME, SITEMAP_INDEX_FILENAME, SitemapOptions,
    generate_sitemaps,
};

// Additional exports for advanced usage
pub use path::{Constraint, Param, PathTemplate, Segment};
pub use resolver::expand_routes;
pub use validation::validate_slugs;
pub use xml::{SITEMAP_XMLNS, escape_url, render_index, render_urlset};
