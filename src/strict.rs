use kuchiki::traits::TendrilSink as _;

/// Validate an enhanced page before it is written. A page may legitimately
/// carry no switcher (no header title) or no toggle, but whatever was
/// injected has to be well-formed.
pub fn assert_enhanced(html: &str, base: &str) -> anyhow::Result<()> {
    let doc = kuchiki::parse_html().one(html);

    let switchers: Vec<_> = match doc.select("div.language-switcher") {
        Ok(nodes) => nodes.collect(),
        Err(()) => Vec::new(),
    };
    if switchers.len() > 1 {
        anyhow::bail!("output check failed: page has {} switchers", switchers.len());
    }
    if let Some(switcher) = switchers.first() {
        assert_switcher(switcher.as_node(), base)?;
    }

    if let Ok(toggle) = doc.select_first(r#"[data-md-toggle="__palette"]"#) {
        let attrs = toggle.attributes.borrow();
        if attrs.get("aria-label").map(str::is_empty).unwrap_or(true) {
            anyhow::bail!("output check failed: palette toggle is missing its aria-label");
        }
    }

    Ok(())
}

fn assert_switcher(switcher: &kuchiki::NodeRef, base: &str) -> anyhow::Result<()> {
    let options: Vec<_> = match switcher.select("option") {
        Ok(nodes) => nodes.collect(),
        Err(()) => Vec::new(),
    };
    if options.len() != 2 {
        anyhow::bail!(
            "output check failed: switcher has {} options, expected 2",
            options.len()
        );
    }

    let mut selected = 0usize;
    for option in &options {
        let attrs = option.attributes.borrow();
        let is_selected = attrs.get("selected").is_some();
        if is_selected {
            selected += 1;
        }
        let value = attrs.get("value").unwrap_or("");
        match (is_selected, value.is_empty()) {
            // The active language must not navigate anywhere.
            (true, false) => {
                anyhow::bail!("output check failed: selected option carries a target {value}")
            }
            (false, true) => {
                anyhow::bail!("output check failed: inactive option has no target")
            }
            (false, false) if !value.starts_with(base) => {
                anyhow::bail!("output check failed: target {value} is outside {base}")
            }
            _ => {}
        }
    }
    if selected != 1 {
        anyhow::bail!("output check failed: {selected} options selected, expected 1");
    }
    Ok(())
}
