use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use indicatif::{
    HumanDuration, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle,
};

pub struct Progress {
    enabled: bool,
    start: Instant,

    // UI
    mp: Option<MultiProgress>,
    stage: ProgressBar,
    pages: ProgressBar,
    checks: ProgressBar,

    // Counters
    checks_missing: AtomicU64,
}

impl Progress {
    pub fn new(enabled: bool) -> Arc<Self> {
        let start = Instant::now();

        if !enabled {
            return Arc::new(Self {
                enabled: false,
                start,
                mp: None,
                stage: ProgressBar::hidden(),
                pages: ProgressBar::hidden(),
                checks: ProgressBar::hidden(),
                checks_missing: AtomicU64::new(0),
            });
        }

        let mp = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

        let stage = mp.add(ProgressBar::new_spinner());
        stage.set_style(
            ProgressStyle::with_template("{spinner} {msg}  [{elapsed_precise}]").unwrap(),
        );
        stage.enable_steady_tick(Duration::from_millis(80));
        stage.set_message("starting");

        let pages = mp.add(ProgressBar::new(0));
        pages.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        pages.set_message("pages");

        let checks = mp.add(ProgressBar::new(0));
        checks.set_style(
            ProgressStyle::with_template("{bar:40.green/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        checks.set_message("counterparts");

        Arc::new(Self {
            enabled: true,
            start,
            mp: Some(mp),
            stage,
            pages,
            checks,
            checks_missing: AtomicU64::new(0),
        })
    }

    pub fn set_stage(&self, msg: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.stage.set_message(msg.into());
    }

    pub fn set_pages_total(&self, total: usize) {
        if self.enabled {
            self.pages.set_length(total as u64);
        }
    }

    pub fn page_done(&self, url_path: &str) {
        if self.enabled {
            self.pages.inc(1);
            self.pages.set_message(url_path.to_string());
        }
    }

    pub fn set_checks_total(&self, total: usize) {
        if self.enabled {
            self.checks.set_length(total as u64);
        }
    }

    pub fn check_done(&self, found: bool) {
        if !found {
            self.checks_missing.fetch_add(1, Ordering::Relaxed);
        }
        if self.enabled {
            self.checks.inc(1);
            let missing = self.checks_missing.load(Ordering::Relaxed);
            if missing > 0 {
                self.checks.set_message(format!("{missing} missing"));
            }
        }
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        self.stage.finish_with_message("done");
        self.pages.finish_and_clear();
        self.checks.finish_and_clear();
        if let Some(mp) = &self.mp {
            // Best effort: ensure the last render flushes.
            let _ = mp.println(format!("Done in {}", HumanDuration(self.start.elapsed())));
        }
    }
}
