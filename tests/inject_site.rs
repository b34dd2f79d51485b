use std::path::Path;

use httpmock::Method::GET;
use httpmock::MockServer;
use tempfile::tempdir;
use url::Url;

use mkdocs_lang_switch::{CheckMode, CliArgs, Mode, ProgressMode};

fn page_html(title: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <head><title>{title}</title></head>
  <body>
    <header class="md-header">
      <nav class="md-header__inner md-grid">
        <div class="md-header__title"><span class="md-header__topic">{title}</span></div>
        <form class="md-header__option">
          <input class="md-option" type="radio" name="__palette" data-md-toggle="__palette">
        </form>
      </nav>
    </header>
    <main class="md-main"><p>{title}</p></main>
  </body>
</html>"#
    )
}

fn write_page(site: &Path, rel: &str, html: &str) {
    let path = site.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, html).unwrap();
}

fn read_to_string(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

fn args(site: &Path) -> CliArgs {
    CliArgs {
        site: site.to_path_buf(),
        base_path: "/Argode/".to_string(),
        mode: Mode::InPlace,
        out: None,
        check: CheckMode::Local,
        remote_base: None,
        report: None,
        max_concurrency: 4,
        user_agent: "test-agent".to_string(),
        progress: ProgressMode::Never,
    }
}

#[tokio::test]
async fn enhances_site_in_place() {
    let tmp = tempdir().unwrap();
    let site = tmp.path().join("site");
    write_page(&site, "index.html", &page_html("Home"));
    write_page(&site, "guide/setup/index.html", &page_html("Setup"));
    write_page(&site, "ja/index.html", &page_html("ホーム"));
    write_page(&site, "ja/guide/setup/index.html", &page_html("セットアップ"));
    write_page(&site, "notes/index.html", &page_html("Notes"));
    write_page(
        &site,
        "404.html",
        "<html><body><p>not found</p></body></html>",
    );

    let report_path = tmp.path().join("report.json");
    let mut args = args(&site);
    args.report = Some(report_path.clone());
    mkdocs_lang_switch::run(args).await.unwrap();

    let setup = read_to_string(&site.join("guide/setup/index.html"));
    assert!(setup.contains("language-switcher"));
    assert!(setup.contains(r#"value="/Argode/ja/guide/setup/""#));
    assert!(setup.contains("English"));
    assert!(setup.contains("日本語"));
    assert!(setup.contains(r#"aria-label="Switch color scheme""#));
    assert!(setup.contains(r#"title="Toggle dark/light mode""#));

    let ja_setup = read_to_string(&site.join("ja/guide/setup/index.html"));
    assert!(ja_setup.contains(r#"value="/Argode/guide/setup/""#));

    let home = read_to_string(&site.join("index.html"));
    assert!(home.contains(r#"value="/Argode/ja/""#));

    // No header title: the page stays switcher-free and the run still succeeds.
    let not_found = read_to_string(&site.join("404.html"));
    assert!(!not_found.contains("language-switcher"));

    let report: serde_json::Value =
        serde_json::from_str(&read_to_string(&report_path)).unwrap();
    assert_eq!(report["pages_total"], 6);
    assert_eq!(report["switchers_injected"], 5);
    assert_eq!(report["toggles_annotated"], 5);
    // notes/ has no translation and 404.html no ja twin.
    assert_eq!(report["counterparts_missing"], 2);
}

#[tokio::test]
async fn second_in_place_run_changes_nothing() {
    let tmp = tempdir().unwrap();
    let site = tmp.path().join("site");
    write_page(&site, "index.html", &page_html("Home"));
    write_page(&site, "ja/index.html", &page_html("ホーム"));

    mkdocs_lang_switch::run(args(&site)).await.unwrap();
    let first = read_to_string(&site.join("index.html"));
    mkdocs_lang_switch::run(args(&site)).await.unwrap();
    let second = read_to_string(&site.join("index.html"));

    assert_eq!(first, second);
    assert_eq!(second.matches("language-switcher").count(), 1);
}

#[tokio::test]
async fn out_mode_leaves_source_untouched() {
    let tmp = tempdir().unwrap();
    let site = tmp.path().join("site");
    write_page(&site, "index.html", &page_html("Home"));
    write_page(&site, "ja/index.html", &page_html("ホーム"));
    std::fs::create_dir_all(site.join("assets")).unwrap();
    std::fs::write(site.join("assets/extra.css"), ".md-header {}\n").unwrap();

    let out = tmp.path().join("enhanced");
    let mut args = args(&site);
    args.mode = Mode::Out;
    args.out = Some(out.clone());
    mkdocs_lang_switch::run(args).await.unwrap();

    let enhanced = read_to_string(&out.join("index.html"));
    assert!(enhanced.contains("language-switcher"));
    assert_eq!(
        read_to_string(&out.join("assets/extra.css")),
        ".md-header {}\n"
    );

    let source = read_to_string(&site.join("index.html"));
    assert!(!source.contains("language-switcher"));
}

#[tokio::test]
async fn remote_check_records_missing_counterparts() {
    let server = MockServer::start();
    for path in ["/Argode/", "/Argode/ja/"] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200)
                .header("Content-Type", "text/html")
                .body("ok");
        });
    }
    server.mock(|when, then| {
        when.method(GET).path("/Argode/ja/notes/");
        then.status(404);
    });

    let tmp = tempdir().unwrap();
    let site = tmp.path().join("site");
    write_page(&site, "index.html", &page_html("Home"));
    write_page(&site, "ja/index.html", &page_html("ホーム"));
    write_page(&site, "notes/index.html", &page_html("Notes"));

    let report_path = tmp.path().join("report.json");
    let mut args = args(&site);
    args.check = CheckMode::Remote;
    args.remote_base = Some(Url::parse(&server.url("/")).unwrap());
    args.report = Some(report_path.clone());
    mkdocs_lang_switch::run(args).await.unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&read_to_string(&report_path)).unwrap();
    assert_eq!(report["counterparts_missing"], 1);
    let notes = report["pages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["path"] == "/Argode/notes/")
        .unwrap();
    assert_eq!(notes["counterpart"], "missing");
    assert_eq!(notes["switch_target"], "/Argode/ja/notes/");
}

#[tokio::test]
async fn remote_server_errors_fail_the_run() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/Argode/ja/");
        then.status(500);
    });

    let tmp = tempdir().unwrap();
    let site = tmp.path().join("site");
    write_page(&site, "index.html", &page_html("Home"));

    let mut args = args(&site);
    args.check = CheckMode::Remote;
    args.remote_base = Some(Url::parse(&server.url("/")).unwrap());
    assert!(mkdocs_lang_switch::run(args).await.is_err());
}
