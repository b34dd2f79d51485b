/// Languages the site is published in, in the order the selector lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Japanese];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Japanese => "日本語",
        }
    }

    pub fn other(self) -> Language {
        match self {
            Language::English => Language::Japanese,
            Language::Japanese => Language::English,
        }
    }

    /// A page is Japanese iff its URL path carries the `/ja/` segment.
    pub fn of_path(path: &str) -> Language {
        if path.contains("/ja/") {
            Language::Japanese
        } else {
            Language::English
        }
    }
}

/// Target path when switching `path` to language `to`.
///
/// Returns `None` when `to` is already the page's language. The rewrite is
/// deliberately the narrow substring form the site relies on: pages live
/// under `base` and the base segment appears nowhere else in a path.
pub fn switch_target(path: &str, base: &str, to: Language) -> Option<String> {
    if Language::of_path(path) == to {
        return None;
    }
    let target = match to {
        Language::Japanese => {
            let ja_base = format!("{base}ja/");
            if path == "/" || path == base {
                ja_base
            } else {
                path.replacen(base, &ja_base, 1)
            }
        }
        Language::English => path.replacen("/ja/", "/", 1),
    };
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/Argode/";

    #[test]
    fn language_of_path() {
        assert_eq!(Language::of_path("/Argode/guide/setup/"), Language::English);
        assert_eq!(
            Language::of_path("/Argode/ja/guide/setup/"),
            Language::Japanese
        );
        assert_eq!(Language::of_path("/"), Language::English);
    }

    #[test]
    fn root_to_japanese() {
        assert_eq!(
            switch_target("/", BASE, Language::Japanese).as_deref(),
            Some("/Argode/ja/")
        );
        assert_eq!(
            switch_target("/Argode/", BASE, Language::Japanese).as_deref(),
            Some("/Argode/ja/")
        );
    }

    #[test]
    fn page_to_japanese() {
        assert_eq!(
            switch_target("/Argode/guide/setup/", BASE, Language::Japanese).as_deref(),
            Some("/Argode/ja/guide/setup/")
        );
    }

    #[test]
    fn page_to_english() {
        assert_eq!(
            switch_target("/Argode/ja/guide/setup/", BASE, Language::English).as_deref(),
            Some("/Argode/guide/setup/")
        );
        assert_eq!(
            switch_target("/Argode/ja/", BASE, Language::English).as_deref(),
            Some("/Argode/")
        );
    }

    #[test]
    fn active_language_is_noop() {
        assert!(switch_target("/Argode/guide/", BASE, Language::English).is_none());
        assert!(switch_target("/Argode/ja/guide/", BASE, Language::Japanese).is_none());
    }

    #[test]
    fn only_first_ja_segment_is_removed() {
        assert_eq!(
            switch_target("/Argode/ja/notes/ja/", BASE, Language::English).as_deref(),
            Some("/Argode/notes/ja/")
        );
    }
}
