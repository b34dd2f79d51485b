use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink as _;
use maud::html;

use crate::locale::{Language, switch_target};

const HEADER_TITLE: &str = ".md-header__inner .md-header__title";
const PALETTE_TOGGLE: &str = r#"[data-md-toggle="__palette"]"#;

/// Build the selector for `page_path` and insert it right after the header
/// title. Returns false when the page has no header title (nothing injected)
/// or already carries a switcher, so re-running over an enhanced tree is safe.
pub fn inject_language_switcher(document: &NodeRef, page_path: &str, base: &str) -> bool {
    if document.select_first("div.language-switcher").is_ok() {
        return false;
    }
    let Ok(title) = document.select_first(HEADER_TITLE) else {
        return false;
    };
    // Insertion needs a sibling position; a detached title node gets nothing.
    if title.as_node().parent().is_none() {
        return false;
    }

    let current = Language::of_path(page_path);
    title
        .as_node()
        .insert_after(build_switcher_node(page_path, base, current));
    true
}

/// The active language keeps an empty value so re-selecting it never
/// navigates; the other option carries its pre-computed target path.
fn build_switcher_node(page_path: &str, base: &str, current: Language) -> NodeRef {
    let markup = html! {
        div class="language-switcher" style="margin-left: auto;" {
            select
                style="margin-left: 1rem;"
                onchange="if (this.value) { window.location.href = this.value; }"
            {
                @for lang in Language::ALL {
                    option
                        value=(switch_target(page_path, base, lang).unwrap_or_default())
                        selected[lang == current]
                    {
                        (lang.label())
                    }
                }
            }
        }
    };
    let doc = kuchiki::parse_html().one(markup.into_string());
    doc.select_first("div.language-switcher")
        .unwrap()
        .as_node()
        .clone()
}

/// Label the palette toggle for screen readers. Returns false when the page
/// has no toggle.
pub fn annotate_theme_toggle(document: &NodeRef) -> bool {
    let Ok(toggle) = document.select_first(PALETTE_TOGGLE) else {
        return false;
    };
    let mut attrs = toggle.attributes.borrow_mut();
    attrs.insert("aria-label", "Switch color scheme".to_string());
    attrs.insert("title", "Toggle dark/light mode".to_string());
    true
}
