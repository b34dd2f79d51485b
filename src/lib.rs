mod check;
mod cli;
mod fetcher;
mod locale;
mod pages;
mod progress;
mod report;
mod strict;
mod switcher;

use std::path::Path;

use anyhow::Context as _;
use cli::Args;
use fetcher::Fetcher;
use kuchiki::traits::TendrilSink as _;
use pages::SitePage;
use report::CounterpartStatus;

pub use cli::{Args as CliArgs, CheckMode, Mode, ProgressMode};
pub use locale::{Language, switch_target};

pub async fn run(args: Args) -> anyhow::Result<()> {
    use std::io::IsTerminal as _;

    if matches!(args.check, CheckMode::Remote) && args.remote_base.is_none() {
        anyhow::bail!("--check remote requires --remote-base");
    }
    if matches!(args.mode, Mode::Out) && args.out.is_none() {
        anyhow::bail!("--mode out requires --out");
    }

    let progress_enabled = match args.progress {
        ProgressMode::Always => true,
        ProgressMode::Never => false,
        ProgressMode::Auto => std::io::stderr().is_terminal(),
    };
    let progress = progress::Progress::new(progress_enabled);

    progress.set_stage("scanning site");
    let site_pages = pages::discover_pages(&args.site, &args.base_path)?;
    if site_pages.is_empty() {
        anyhow::bail!("no html pages found under {}", args.site.display());
    }
    progress.set_pages_total(site_pages.len());

    let out_dir = match args.mode {
        Mode::InPlace => None,
        Mode::Out => args.out.clone(),
    };
    if let Some(out) = &out_dir {
        progress.set_stage("mirroring site assets");
        mirror_assets(&args.site, out)?;
    }

    progress.set_stage("enhancing pages");
    let mut switchers_injected = 0usize;
    let mut toggles_annotated = 0usize;
    for page in &site_pages {
        let (injected, annotated) = enhance_page(page, &args.base_path, out_dir.as_deref())?;
        if injected {
            switchers_injected += 1;
        } else {
            tracing::debug!(page = %page.url_path, "switcher not injected");
        }
        if annotated {
            toggles_annotated += 1;
        }
        progress.page_done(&page.url_path);
    }

    progress.set_stage("checking counterparts");
    let statuses = match args.check {
        CheckMode::Off => vec![CounterpartStatus::Skipped; site_pages.len()],
        CheckMode::Local => check::check_local(&args.site, &site_pages, &args.base_path),
        CheckMode::Remote => {
            let Some(remote_base) = args.remote_base.as_ref() else {
                anyhow::bail!("--check remote requires --remote-base");
            };
            let fetcher = Fetcher::new(&args.user_agent, args.max_concurrency)?;
            progress.set_checks_total(site_pages.len());
            check::check_remote(
                &fetcher,
                remote_base,
                &site_pages,
                &args.base_path,
                &progress,
            )
            .await?
        }
    };
    let missing = statuses
        .iter()
        .filter(|s| **s == CounterpartStatus::Missing)
        .count();

    if let Some(report_path) = &args.report {
        progress.set_stage("writing report");
        let report = report::Report::new(
            &args.base_path,
            &site_pages,
            &statuses,
            switchers_injected,
            toggles_annotated,
        );
        let json = serde_json::to_vec_pretty(&report).context("serialize report")?;
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        std::fs::write(report_path, json)
            .with_context(|| format!("write {}", report_path.display()))?;
    }

    progress.finish();
    tracing::info!(
        pages = site_pages.len(),
        switchers = switchers_injected,
        toggles = toggles_annotated,
        missing,
        "site enhanced"
    );
    Ok(())
}

fn enhance_page(
    page: &SitePage,
    base: &str,
    out_dir: Option<&Path>,
) -> anyhow::Result<(bool, bool)> {
    let html = std::fs::read_to_string(&page.file)
        .with_context(|| format!("read {}", page.file.display()))?;
    let document = kuchiki::parse_html().one(html);

    let injected = switcher::inject_language_switcher(&document, &page.url_path, base);
    let annotated = switcher::annotate_theme_toggle(&document);

    let mut out = Vec::new();
    document
        .serialize(&mut out)
        .with_context(|| format!("serialize {}", page.rel.display()))?;
    let html = String::from_utf8(out).context("page html not utf-8")?;
    strict::assert_enhanced(&html, base)
        .with_context(|| format!("validate {}", page.rel.display()))?;

    let dest = match out_dir {
        Some(out) => out.join(&page.rel),
        None => page.file.clone(),
    };
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(&dest, html).with_context(|| format!("write {}", dest.display()))?;

    Ok((injected, annotated))
}

/// Copy everything that is not a page into the output tree; pages land there
/// through `enhance_page`.
fn mirror_assets(site_dir: &Path, out_dir: &Path) -> anyhow::Result<()> {
    for entry in walkdir::WalkDir::new(site_dir) {
        let entry = entry.with_context(|| format!("walk {}", site_dir.display()))?;
        if !entry.file_type().is_file() || pages::is_html(entry.path()) {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(site_dir)
            .expect("walked path is under site dir");
        let dest = out_dir.join(rel);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        std::fs::copy(entry.path(), &dest)
            .with_context(|| format!("copy {} to {}", entry.path().display(), dest.display()))?;
    }
    Ok(())
}
