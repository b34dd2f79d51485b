use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::locale::Language;

/// One generated HTML page of the built site.
#[derive(Debug, Clone)]
pub struct SitePage {
    /// Absolute location on disk.
    pub file: PathBuf,
    /// Location relative to the site root.
    pub rel: PathBuf,
    /// URL path the page is served under, e.g. `/Argode/ja/guide/setup/`.
    pub url_path: String,
    pub language: Language,
}

/// Collect every HTML page under `site_dir`, sorted for deterministic
/// processing order.
pub fn discover_pages(site_dir: &Path, base: &str) -> anyhow::Result<Vec<SitePage>> {
    let mut pages = Vec::new();
    for entry in walkdir::WalkDir::new(site_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", site_dir.display()))?;
        if !entry.file_type().is_file() || !is_html(entry.path()) {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(site_dir)
            .expect("walked path is under site dir")
            .to_path_buf();
        let url_path = page_url_path(&rel, base);
        pages.push(SitePage {
            file: entry.path().to_path_buf(),
            language: Language::of_path(&url_path),
            rel,
            url_path,
        });
    }
    pages.sort_by(|a, b| a.rel.cmp(&b.rel));
    Ok(pages)
}

pub(crate) fn is_html(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html") | Some("htm")
    )
}

/// URL path for a site-relative file. MkDocs publishes directory URLs, so
/// `guide/setup/index.html` maps to `<base>guide/setup/` while any other
/// file keeps its name.
pub fn page_url_path(rel: &Path, base: &str) -> String {
    let mut segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let file = segments.pop().unwrap_or_default();

    let mut path = String::from(base);
    for segment in &segments {
        path.push_str(segment);
        path.push('/');
    }
    if file != "index.html" {
        path.push_str(&file);
    }
    path
}

/// Map a URL path under `base` back to the file that serves it. Directory
/// URLs resolve to their `index.html`. Paths outside the base are not ours.
pub fn file_for_url_path(site_dir: &Path, url_path: &str, base: &str) -> Option<PathBuf> {
    let rel = url_path.strip_prefix(base)?;
    let mut file = site_dir.to_path_buf();
    for segment in rel.split('/').filter(|s| !s.is_empty()) {
        file.push(segment);
    }
    if url_path.ends_with('/') {
        file.push("index.html");
    }
    Some(file)
}
