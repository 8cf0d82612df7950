//! Sitemap assembly: URL finalization, deduplication, sharding, and the
//! top-level generation entry point.

use std::collections::{BTreeMap, HashSet};

use data_model_smx::meta::MetaTags;
use data_model_smx::routes::Route;
use data_model_smx::urls::UrlEntry;

use crate::errors::Result;
use crate::resolver::expand_routes;
use crate::xml::{escape_url, render_index, render_urlset};

/// Hard cap of the sitemaps protocol: one file holds at most this many
/// URLs; anything larger splits into shards plus an index.
pub const MAX_URLS_PER_SITEMAP: usize = 50_000;

/// Map key (and file stem) of a single, unsharded sitemap.
pub const SITEMAP_FILENAME: &str = "sitemap";

/// Map key (and file stem) of the index document when sharded.
pub const SITEMAP_INDEX_FILENAME: &str = "sitemap-index";

/// Immutable inputs of one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct SitemapOptions {
    /// Prefix joined onto every relative location.
    pub base_url: Option<String>,
    /// Re-append a trailing slash to every finalized location.
    pub trailing_slash: bool,
    /// Insert the `#/` marker after the domain, for client-side-routed
    /// sites without server-side path handling.
    pub hash_mode: bool,
    /// Keep tabs and newlines in the rendered XML.
    pub pretty: bool,
    /// Fallback meta tags applied to entries that define none of their own.
    pub defaults: MetaTags,
}

/// Resolves routes, merges them with the hand-written URLs, and renders the
/// sitemap file set.
///
/// Returns a mapping of filename (without the `.xml` extension) to document
/// text: a single `sitemap` entry, or `sitemap-part-*` shards plus a
/// `sitemap-index` when the URL count exceeds [`MAX_URLS_PER_SITEMAP`].
pub async fn generate_sitemaps(
    options: &SitemapOptions,
    urls: &[UrlEntry],
    routes: &[Route],
) -> Result<BTreeMap<String, String>> {
    let base_url = normalize_base_url(options);

    // Hand-written URLs come first: on a duplicate location they win over
    // any route-derived entry.
    let mut entries: Vec<UrlEntry> = urls.to_vec();
    entries.extend(expand_routes(routes).await?);

    for entry in &mut entries {
        entry.loc = finalize_loc(&base_url, &entry.loc, options.trailing_slash);
    }

    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.loc.clone()));

    tracing::debug!(urls = entries.len(), "resolved sitemap entries");

    let mut sitemaps = BTreeMap::new();

    if entries.len() > MAX_URLS_PER_SITEMAP {
        let shards: Vec<&[UrlEntry]> = entries.chunks(MAX_URLS_PER_SITEMAP).collect();
        let width = shards.len().to_string().len();

        let mut filenames = Vec::with_capacity(shards.len());
        for (index, shard) in shards.iter().enumerate() {
            let number = index + 1;
            let filename = format!("{SITEMAP_FILENAME}-part-{number:0width$}");
            sitemaps.insert(
                filename.clone(),
                render_urlset(shard, &options.defaults, options.pretty)?,
            );
            filenames.push(filename);
        }

        let file_base = options
            .base_url
            .as_deref()
            .unwrap_or("")
            .trim_end_matches('/');
        sitemaps.insert(
            SITEMAP_INDEX_FILENAME.to_string(),
            render_index(&filenames, file_base, options.pretty)?,
        );
        tracing::info!(shards = filenames.len(), "sharded sitemap rendered");
    } else {
        sitemaps.insert(
            SITEMAP_FILENAME.to_string(),
            render_urlset(&entries, &options.defaults, options.pretty)?,
        );
    }

    Ok(sitemaps)
}

/// Exactly one trailing slash on the base URL, plus the hash-mode marker
/// when enabled. An unset base collapses to the empty string, leaving
/// locations as written.
fn normalize_base_url(options: &SitemapOptions) -> String {
    match options.base_url.as_deref() {
        Some(url) if !url.is_empty() => {
            let mut base = format!("{}/", url.trim_end_matches('/'));
            if options.hash_mode {
                base.push_str("#/");
            }
            base
        }
        _ => String::new(),
    }
}

/// Joins, escapes, and normalizes one location into its final `<loc>` text.
fn finalize_loc(base_url: &str, loc: &str, trailing_slash: bool) -> String {
    let relative = loc.strip_prefix('/').unwrap_or(loc);
    let escaped = escape_url(&format!("{base_url}{relative}"));
    let stripped = escaped.strip_suffix('/').unwrap_or(&escaped);

    if trailing_slash {
        format!("{stripped}/")
    } else {
        stripped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_model_smx::test_helpers::{route, url};

    fn base_options(base_url: &str) -> SitemapOptions {
        SitemapOptions {
            base_url: Some(base_url.to_string()),
            ..SitemapOptions::default()
        }
    }

    #[test]
    fn test_finalize_loc_strips_trailing_slash() {
        assert_eq!(
            finalize_loc("https://website.net/", "/page/", false),
            "https://website.net/page"
        );
        assert_eq!(finalize_loc("https://website.net/", "/", false), "https://website.net");
    }

    #[test]
    fn test_finalize_loc_adds_trailing_slash() {
        assert_eq!(
            finalize_loc("https://website.net/", "/page", true),
            "https://website.net/page/"
        );
        assert_eq!(finalize_loc("https://website.net/", "/", true), "https://website.net/");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(&base_options("https://x.net")), "https://x.net/");
        assert_eq!(normalize_base_url(&base_options("https://x.net///")), "https://x.net/");
        assert_eq!(normalize_base_url(&SitemapOptions::default()), "");

        let hash = SitemapOptions {
            hash_mode: true,
            ..base_options("https://x.net")
        };
        assert_eq!(normalize_base_url(&hash), "https://x.net/#/");
    }

    #[tokio::test]
    async fn test_single_sitemap_from_urls_and_routes() {
        let sitemaps = generate_sitemaps(
            &base_options("https://website.net"),
            &[url("/")],
            &[route("/about")],
        )
        .await
        .unwrap();

        assert_eq!(sitemaps.len(), 1);
        let xml = &sitemaps[SITEMAP_FILENAME];
        assert!(xml.contains("<loc>https://website.net</loc>"));
        assert!(xml.contains("<loc>https://website.net/about</loc>"));
    }

    #[tokio::test]
    async fn test_duplicate_locations_keep_first_occurrence() {
        let sitemaps = generate_sitemaps(
            &base_options("https://website.net"),
            &[url("/"), url("/about")],
            &[route("/"), route("/about"), route("/page")],
        )
        .await
        .unwrap();

        let xml = &sitemaps[SITEMAP_FILENAME];
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[tokio::test]
    async fn test_hash_mode_locations() {
        let options = SitemapOptions {
            hash_mode: true,
            ..base_options("https://website.net")
        };
        let sitemaps = generate_sitemaps(&options, &[], &[route("/"), route("/about")])
            .await
            .unwrap();

        let xml = &sitemaps[SITEMAP_FILENAME];
        assert!(xml.contains("<loc>https://website.net/#</loc>"));
        assert!(xml.contains("<loc>https://website.net/#/about</loc>"));
    }

    #[tokio::test]
    async fn test_generation_is_idempotent() {
        let options = base_options("https://website.net");
        let urls = [url("/"), url("/about")];
        let routes = [route("/page")];

        let first = generate_sitemaps(&options, &urls, &routes).await.unwrap();
        let second = generate_sitemaps(&options, &urls, &routes).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_sharding_at_the_boundary() {
        let urls: Vec<_> = (0..MAX_URLS_PER_SITEMAP)
            .map(|i| url(&format!("/page/{i}")))
            .collect();
        let sitemaps = generate_sitemaps(&base_options("https://website.net"), &urls, &[])
            .await
            .unwrap();

        // Exactly at the cap: one file, no index.
        assert_eq!(sitemaps.len(), 1);
        assert!(sitemaps.contains_key(SITEMAP_FILENAME));
    }

    #[tokio::test]
    async fn test_sharding_above_the_boundary() {
        let urls: Vec<_> = (0..MAX_URLS_PER_SITEMAP + 1)
            .map(|i| url(&format!("/page/{i}")))
            .collect();
        let sitemaps = generate_sitemaps(&base_options("https://website.net"), &urls, &[])
            .await
            .unwrap();

        assert_eq!(sitemaps.len(), 3);
        assert_eq!(
            sitemaps["sitemap-part-1"].matches("<url>").count(),
            MAX_URLS_PER_SITEMAP
        );
        assert_eq!(sitemaps["sitemap-part-2"].matches("<url>").count(), 1);

        let index = &sitemaps[SITEMAP_INDEX_FILENAME];
        assert!(index.contains("<loc>https://website.net/sitemap-part-1.xml</loc>"));
        assert!(index.contains("<loc>https://website.net/sitemap-part-2.xml</loc>"));
        assert!(!sitemaps.contains_key(SITEMAP_FILENAME));
    }
}
