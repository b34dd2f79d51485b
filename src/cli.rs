use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    InPlace,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckMode {
    Off,
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Built documentation site directory (e.g. MkDocs `site/` output).
    #[arg(long)]
    pub site: PathBuf,

    /// URL path prefix the site is served under (GitHub Pages project path).
    ///
    /// Must start and end with `/`.
    #[arg(long, default_value = "/Argode/", value_parser = parse_base_path)]
    pub base_path: String,

    /// Processing mode: `in-place` rewrites pages where they are, `out` mirrors
    /// the site into --out and leaves the source untouched.
    #[arg(long, value_enum, default_value = "in-place")]
    pub mode: Mode,

    /// Output directory for `out` mode.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Counterpart verification: `local` checks the site tree, `remote` probes
    /// the deployed site at --remote-base.
    #[arg(long, value_enum, default_value = "local")]
    pub check: CheckMode,

    /// Base URL of the deployed site for `--check remote` (e.g. `https://example.github.io`).
    #[arg(long)]
    pub remote_base: Option<Url>,

    /// Write a JSON processing report to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Max concurrent HTTP probes.
    #[arg(long, default_value_t = 8)]
    pub max_concurrency: usize,

    /// HTTP User-Agent used for remote probes.
    #[arg(long, default_value = "mkdocs-lang-switch/0.1")]
    pub user_agent: String,

    /// Progress display: `auto`, `always`, or `never`.
    #[arg(long, value_enum, default_value = "auto")]
    pub progress: ProgressMode,
}

fn parse_base_path(s: &str) -> Result<String, String> {
    if s.starts_with('/') && s.ends_with('/') {
        Ok(s.to_string())
    } else {
        Err("base path must start and end with '/'".to_string())
    }
}
