use std::path::Path;

use anyhow::Context as _;
use url::Url;

use crate::fetcher::Fetcher;
use crate::locale::switch_target;
use crate::pages::{SitePage, file_for_url_path};
use crate::progress::Progress;
use crate::report::CounterpartStatus;

/// Target path of the page's other-language counterpart.
pub fn counterpart_target(page: &SitePage, base: &str) -> String {
    switch_target(&page.url_path, base, page.language.other())
        .unwrap_or_else(|| page.url_path.clone())
}

/// Verify counterparts against the site tree itself.
pub fn check_local(site_dir: &Path, pages: &[SitePage], base: &str) -> Vec<CounterpartStatus> {
    pages
        .iter()
        .map(|page| {
            let target = counterpart_target(page, base);
            let found = file_for_url_path(site_dir, &target, base)
                .map(|file| file.is_file())
                .unwrap_or(false);
            if found {
                CounterpartStatus::Found
            } else {
                tracing::warn!(page = %page.url_path, %target, "language counterpart missing");
                CounterpartStatus::Missing
            }
        })
        .collect()
}

/// Verify counterparts against a deployed site. Probes run as tasks bounded
/// by the fetcher's semaphore; a 404 marks the counterpart missing, other
/// failures abort.
pub async fn check_remote(
    fetcher: &Fetcher,
    remote_base: &Url,
    pages: &[SitePage],
    base: &str,
    progress: &Progress,
) -> anyhow::Result<Vec<CounterpartStatus>> {
    let mut set = tokio::task::JoinSet::new();
    for (idx, page) in pages.iter().enumerate() {
        let target = counterpart_target(page, base);
        let url = remote_base
            .join(&target)
            .with_context(|| format!("resolve counterpart url {}", target))?;
        let fetcher = fetcher.clone();
        let page_path = page.url_path.clone();
        set.spawn(async move {
            let found = fetcher.probe(url).await;
            (idx, page_path, target, found)
        });
    }

    let mut statuses = vec![CounterpartStatus::Skipped; pages.len()];
    while let Some(joined) = set.join_next().await {
        let (idx, page_path, target, found) = joined.context("join probe task")?;
        let found = found.with_context(|| format!("probe counterpart of {}", page_path))?;
        statuses[idx] = if found {
            CounterpartStatus::Found
        } else {
            tracing::warn!(page = %page_path, %target, "language counterpart missing");
            CounterpartStatus::Missing
        };
        progress.check_done(found);
    }
    Ok(statuses)
}
