use serde::Serialize;

use crate::check::counterpart_target;
use crate::pages::SitePage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartStatus {
    Found,
    Missing,
    Skipped,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub base_path: String,
    pub pages: Vec<PageEntry>,
    pub pages_total: usize,
    pub switchers_injected: usize,
    pub toggles_annotated: usize,
    pub counterparts_missing: usize,
}

#[derive(Debug, Serialize)]
pub struct PageEntry {
    pub file: String,
    pub path: String,
    pub language: &'static str,
    pub switch_target: String,
    pub counterpart: CounterpartStatus,
}

impl Report {
    pub fn new(
        base: &str,
        pages: &[SitePage],
        statuses: &[CounterpartStatus],
        switchers_injected: usize,
        toggles_annotated: usize,
    ) -> Self {
        let entries: Vec<PageEntry> = pages
            .iter()
            .zip(statuses)
            .map(|(page, status)| PageEntry {
                file: page.rel.display().to_string(),
                path: page.url_path.clone(),
                language: page.language.code(),
                switch_target: counterpart_target(page, base),
                counterpart: *status,
            })
            .collect();
        let counterparts_missing = entries
            .iter()
            .filter(|e| e.counterpart == CounterpartStatus::Missing)
            .count();
        Report {
            base_path: base.to_string(),
            pages_total: entries.len(),
            switchers_injected,
            toggles_annotated,
            counterparts_missing,
            pages: entries,
        }
    }
}
