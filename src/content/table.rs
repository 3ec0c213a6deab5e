//! In-memory page table.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::i18n::LocaleConfig;
use crate::content::ContentIndex;
use crate::locale::normalize::{normalize, LocaleKey};
use crate::routing::path::canonical_path;

/// Directory holding locale-agnostic endpoints and assets.
pub const ENDPOINTS_DIR: &str = "_endpoints";
pub const NOT_FOUND_PAGE: &str = "404.html";

/// A file served verbatim, before locale routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub body: Vec<u8>,
    pub content_type: String,
}

impl Endpoint {
    pub fn new(body: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.into(),
        }
    }
}

/// Page templates per (locale, path), plus endpoints and the 404 page.
#[derive(Debug, Clone, Default)]
pub struct PageTable {
    pages: BTreeMap<(LocaleKey, String), String>,
    endpoints: BTreeMap<String, Endpoint>,
    not_found: Option<String>,
}

impl PageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locale: &str, path: &str, template: impl Into<String>) {
        self.pages
            .insert((normalize(locale), canonical_path(path)), template.into());
    }

    pub fn with_page(mut self, locale: &str, path: &str, template: impl Into<String>) -> Self {
        self.insert(locale, path, template);
        self
    }

    pub fn insert_endpoint(&mut self, path: &str, endpoint: Endpoint) {
        self.endpoints.insert(canonical_path(path), endpoint);
    }

    pub fn with_endpoint(mut self, path: &str, endpoint: Endpoint) -> Self {
        self.insert_endpoint(path, endpoint);
        self
    }

    pub fn set_not_found(&mut self, template: impl Into<String>) {
        self.not_found = Some(template.into());
    }

    pub fn page(&self, locale: &str, path: &str) -> Option<&str> {
        self.pages
            .get(&(normalize(locale), canonical_path(path)))
            .map(String::as_str)
    }

    pub fn endpoint(&self, path: &str) -> Option<&Endpoint> {
        self.endpoints.get(&canonical_path(path))
    }

    pub fn endpoints(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.endpoints.iter().map(|(path, e)| (path.as_str(), e))
    }

    pub fn not_found(&self) -> Option<&str> {
        self.not_found.as_deref()
    }

    /// Every page path, across all locales.
    pub fn paths(&self) -> BTreeSet<String> {
        self.pages.keys().map(|(_, path)| path.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Load pages, endpoints and the 404 page from a content directory.
    ///
    /// Missing locale directories are skipped; a missing `dir` is an error.
    pub fn scan_dir(dir: &Path, config: &LocaleConfig) -> io::Result<Self> {
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("content directory {} does not exist", dir.display()),
            ));
        }

        let mut table = PageTable::new();

        for locale in config.locales() {
            let locale_dir = dir.join(locale.path());
            if !locale_dir.is_dir() {
                tracing::debug!(locale = %locale.path(), "No content directory for locale");
                continue;
            }
            for file in walk(&locale_dir)? {
                let Some(rel) = relative(&locale_dir, &file) else {
                    continue;
                };
                let Some(page_path) = page_path(&rel) else {
                    continue;
                };
                table.insert(locale.path(), &page_path, fs::read_to_string(&file)?);
            }
        }

        let endpoints_dir = dir.join(ENDPOINTS_DIR);
        if endpoints_dir.is_dir() {
            for file in walk(&endpoints_dir)? {
                let Some(rel) = relative(&endpoints_dir, &file) else {
                    continue;
                };
                let endpoint = Endpoint::new(fs::read(&file)?, content_type_for(&rel));
                table.insert_endpoint(&rel, endpoint);
            }
        }

        let not_found = dir.join(NOT_FOUND_PAGE);
        if not_found.is_file() {
            table.set_not_found(fs::read_to_string(not_found)?);
        }

        tracing::info!(
            dir = %dir.display(),
            pages = table.len(),
            endpoints = table.endpoints.len(),
            "Content scanned"
        );
        Ok(table)
    }
}

impl ContentIndex for PageTable {
    fn has_content(&self, locale: &str, path: &str) -> bool {
        self.page(locale, path).is_some()
    }
}

/// Regular files below `dir`, sorted. Symlinks are not followed.
fn walk(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// `/`-separated path of `file` below `root`.
fn relative(root: &Path, file: &Path) -> Option<String> {
    let rel = file.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    Some(format!("/{}", parts?.join("/")))
}

/// `/blog/index.html` -> `/blog`, `/start.html` -> `/start`; other files are not pages.
fn page_path(rel: &str) -> Option<String> {
    let stem = rel.strip_suffix(".html")?;
    let path = stem.strip_suffix("/index").unwrap_or(stem);
    Some(canonical_path(path))
}

fn content_type_for(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}
