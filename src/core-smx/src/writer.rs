//! Writes rendered sitemap documents to disk.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Writes every rendered document to `<dir>/<filename>.xml`, creating the
/// directory first when needed. Returns the written paths.
pub fn write_sitemaps(dir: &Path, sitemaps: &BTreeMap<String, String>) -> io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(sitemaps.len());
    for (filename, xml) in sitemaps {
        let path = dir.join(format!("{filename}.xml"));
        std::fs::write(&path, xml)?;
        tracing::info!(file = %path.display(), bytes = xml.len(), "wrote sitemap");
        written.push(path);
    }

    Ok(written)
}
