//! Static pre-render.
//!
//! # Responsibilities
//! - Enumerate every candidate URL: each page path unprefixed and prefixed
//!   with every locale, plus the root
//! - Resolve each URL exactly as the live server would
//! - Turn `Serve` into rendered HTML and `Redirect` into meta-refresh HTML
//! - Copy endpoints verbatim and emit `404.html`
//!
//! # Design Decisions
//! - Planning is pure and returns files in memory; writing is separate
//! - Output paths are relative to the base: the base is where `out_dir`
//!   gets mounted
//! - Under `domains`, each domain gets its own host subdirectory

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::schema::{RoutingStrategy, TrailingSlash};
use crate::content::table::NOT_FOUND_PAGE;
use crate::lifecycle::startup::Site;
use crate::observability::metrics;
use crate::page::{render, PageContext};
use crate::routing::context::RequestContext;
use crate::routing::decision::{meta_refresh_html, RoutingDecision};
use crate::routing::path::strip_base;
use crate::routing::url::join;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Page,
    Redirect,
    Endpoint,
    NotFoundPage,
}

/// One file of the static output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    /// URL this file answers, including the base.
    pub url: String,
    /// Path relative to the output directory.
    pub file: PathBuf,
    pub contents: Vec<u8>,
    pub kind: FileKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub pages: usize,
    pub redirects: usize,
    pub endpoints: usize,
    pub skipped: usize,
}

/// Resolve every candidate URL of `site` into output files.
pub fn plan(site: &Site) -> (Vec<StaticFile>, BuildReport) {
    let config = site.resolver.config();
    let mut files = Vec::new();
    let mut report = BuildReport::default();

    let mut paths = site.pages.paths();
    paths.insert("/".to_string());

    if config.strategy() == RoutingStrategy::Domains {
        for domain in config.domains() {
            let urls: BTreeSet<String> = paths
                .iter()
                .map(|p| join(config.base(), None, p, config.trailing_slash()))
                .collect();
            let host_dir = PathBuf::from(domain.host());
            for url in urls {
                let ctx = RequestContext::new(url.as_str())
                    .with_host(domain.host())
                    .with_protocol(domain.origin().scheme());
                if let Some(file) = render_url(site, &ctx, &host_dir, &mut report) {
                    files.push(file);
                }
            }
        }
    } else {
        let mut urls = BTreeSet::new();
        for path in &paths {
            urls.insert(join(config.base(), None, path, config.trailing_slash()));
            for locale in config.locales() {
                urls.insert(join(
                    config.base(),
                    Some(locale.path()),
                    path,
                    config.trailing_slash(),
                ));
            }
        }
        for url in urls {
            let ctx = RequestContext::new(url.as_str());
            if let Some(file) = render_url(site, &ctx, Path::new(""), &mut report) {
                files.push(file);
            }
        }
    }

    for (path, endpoint) in site.pages.endpoints() {
        files.push(StaticFile {
            url: join(config.base(), None, path, TrailingSlash::Ignore),
            file: PathBuf::from(path.trim_start_matches('/')),
            contents: endpoint.body.clone(),
            kind: FileKind::Endpoint,
        });
        report.endpoints += 1;
    }

    if let Some(template) = site.pages.not_found() {
        let ctx = PageContext::new(config, config.default_locale().path(), None);
        files.push(StaticFile {
            url: format!("{}/{NOT_FOUND_PAGE}", config.base()),
            file: PathBuf::from(NOT_FOUND_PAGE),
            contents: render(template, &ctx).into_bytes(),
            kind: FileKind::NotFoundPage,
        });
    }

    (files, report)
}

fn render_url(
    site: &Site,
    ctx: &RequestContext,
    prefix: &Path,
    report: &mut BuildReport,
) -> Option<StaticFile> {
    let config = site.resolver.config();
    let decision = site.resolver.resolve(ctx, &site.pages);
    metrics::record_decision(&decision, "build");

    let (contents, kind) = match &decision {
        RoutingDecision::Serve { locale, path, .. } => {
            let Some(template) = site.pages.page(locale, path) else {
                report.skipped += 1;
                return None;
            };
            let page = PageContext::new(config, locale, None);
            report.pages += 1;
            (render(template, &page), FileKind::Page)
        }
        RoutingDecision::Redirect { location, .. } => {
            report.redirects += 1;
            (meta_refresh_html(location), FileKind::Redirect)
        }
        RoutingDecision::NotFound { reason } => {
            tracing::trace!(url = %ctx.path(), reason = reason.as_str(), "Skipping URL");
            report.skipped += 1;
            return None;
        }
    };

    let rest = strip_base(ctx.path(), config.base()).unwrap_or(ctx.path());
    Some(StaticFile {
        url: ctx.path().to_string(),
        file: prefix.join(index_file(rest)),
        contents: contents.into_bytes(),
        kind,
    })
}

/// `/en/start` -> `en/start/index.html`, `` -> `index.html`.
fn index_file(rest: &str) -> PathBuf {
    let trimmed = rest.trim_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("index.html")
    } else {
        PathBuf::from(trimmed).join("index.html")
    }
}

/// Write planned files below `out_dir`.
pub fn write(out_dir: &Path, files: &[StaticFile]) -> io::Result<()> {
    for file in files {
        let target = out_dir.join(&file.file);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &file.contents)?;
    }
    Ok(())
}

/// Plan and write the whole site to `out_dir`.
pub fn build(site: &Site, out_dir: &Path) -> io::Result<BuildReport> {
    let (files, report) = plan(site);
    write(out_dir, &files)?;
    tracing::info!(
        out_dir = %out_dir.display(),
        pages = report.pages,
        redirects = report.redirects,
        endpoints = report.endpoints,
        skipped = report.skipped,
        "Static build complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_file() {
        assert_eq!(index_file(""), PathBuf::from("index.html"));
        assert_eq!(index_file("/"), PathBuf::from("index.html"));
        assert_eq!(index_file("/en/start/"), PathBuf::from("en/start/index.html"));
        assert_eq!(index_file("/it/start"), PathBuf::from("it/start/index.html"));
    }
}
