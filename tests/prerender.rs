//! Static build: planned files and files on disk.

use std::path::PathBuf;

use locale_router::build::{self, FileKind, StaticFile};
use locale_router::config::schema::{RoutingStrategy, TrailingSlash};

mod common;

fn find<'a>(files: &'a [StaticFile], file: &str) -> Option<&'a StaticFile> {
    files.iter().find(|f| f.file == PathBuf::from(file))
}

fn text(file: &StaticFile) -> String {
    String::from_utf8(file.contents.clone()).unwrap()
}

#[test]
fn test_prefix_always_root_is_meta_refresh() {
    let site = common::site(common::i18n(RoutingStrategy::PrefixAlways));
    let (files, report) = build::plan(&site);

    let index = find(&files, "index.html").unwrap();
    assert_eq!(index.kind, FileKind::Redirect);
    assert!(text(index).contains(r#"content="0;url=/new-site/en""#));

    let start = find(&files, "pt/start/index.html").unwrap();
    assert_eq!(start.kind, FileKind::Page);
    assert_eq!(text(start), "Oi essa e start");

    // Unprefixed pages are not found under prefix-always.
    assert!(find(&files, "start/index.html").is_none());
    assert!(report.redirects >= 1);
}

#[test]
fn test_fallback_is_meta_refresh() {
    let site = common::site(common::i18n(RoutingStrategy::PrefixOtherLocales));
    let (files, _) = build::plan(&site);

    let it_start = find(&files, "it/start/index.html").unwrap();
    assert_eq!(it_start.kind, FileKind::Redirect);
    assert!(text(it_start).contains("url=/new-site/start"));

    // Default locale is unprefixed.
    assert_eq!(text(find(&files, "start/index.html").unwrap()), "Start");
    assert!(find(&files, "en/start/index.html").is_none());
}

#[test]
fn test_trailing_slash_always_root() {
    let mut i18n = common::i18n(RoutingStrategy::PrefixAlways);
    i18n.trailing_slash = TrailingSlash::Always;
    let (files, _) = build::plan(&common::site(i18n));

    let index = find(&files, "index.html").unwrap();
    assert!(text(index).contains("url=/new-site/en/"));
}

#[test]
fn test_endpoints_and_not_found_page() {
    let site = common::site(common::i18n(RoutingStrategy::PrefixAlways));
    let (files, report) = build::plan(&site);

    let endpoint = find(&files, "test.json").unwrap();
    assert_eq!(endpoint.kind, FileKind::Endpoint);
    assert_eq!(endpoint.url, "/new-site/test.json");
    assert_eq!(report.endpoints, 1);

    let not_found = find(&files, "404.html").unwrap();
    assert_eq!(not_found.kind, FileKind::NotFoundPage);
}

#[test]
fn test_domains_write_per_host() {
    let mut i18n = common::i18n(RoutingStrategy::Domains);
    i18n.domains = [
        ("en".to_string(), "https://example.com".to_string()),
        ("pt".to_string(), "https://example.pt".to_string()),
        ("it".to_string(), "https://it.example.com".to_string()),
    ]
    .into_iter()
    .collect();
    i18n.fallback.clear();
    let (files, _) = build::plan(&common::site(i18n));

    assert_eq!(text(find(&files, "example.pt/start/index.html").unwrap()), "Oi essa e start");
    assert_eq!(text(find(&files, "example.com/start/index.html").unwrap()), "Start");
}

#[test]
fn test_build_writes_files() {
    let site = common::site(common::i18n(RoutingStrategy::PrefixAlways));
    let tmp = common::scratch_dir();
    let out = tmp.path();

    let report = build::build(&site, out).unwrap();
    assert!(report.pages > 0);

    let index = std::fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains(r#"<meta http-equiv="refresh" content="0;url=/new-site/en">"#));
    assert!(out.join("en/index.html").is_file());
    assert!(out.join("test.json").is_file());
}
