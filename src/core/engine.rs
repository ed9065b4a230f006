use crate::bulk::{run_bulk_update, BulkOptions, BulkReport};
use crate::core::converter::{has_persian_or_arabic, is_latin_slug, transliterate};
use crate::core::resolver::{normalize_request_slugs, resolve_taxonomy_slug};
use crate::core::types::{PostId, Slug};
use crate::error::Result;
use crate::persistence::{load_from_disk, save_to_disk};
use crate::store::SiteStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Summary of how one piece of text classifies and transliterates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SlugReport {
    pub slug: Slug,
    pub is_latin_slug: bool,
    pub has_persian_or_arabic: bool,
}

// The engine ties the pure transliteration core to a site store and its
// on-disk snapshot.
pub struct SlugEngine {
    pub site: SiteStore,
    store_path: Option<PathBuf>,
}

impl Default for SlugEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SlugEngine {
    pub fn new() -> Self {
        Self {
            site: SiteStore::new(),
            store_path: None,
        }
    }

    /// Loads the snapshot at `path`, or starts empty when it can't be read.
    /// Either way later saves go to `path`.
    pub fn from_file_or_new(path: &Path) -> Self {
        let site = match load_from_disk(path) {
            Ok(site) => site,
            Err(e) => {
                if path.exists() {
                    warn!(path = %path.display(), error = %e, "unreadable site snapshot, starting empty");
                } else {
                    info!(path = %path.display(), "no site snapshot yet, starting empty");
                }
                SiteStore::new()
            }
        };
        Self {
            site,
            store_path: Some(path.to_path_buf()),
        }
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    pub fn transliterate(&self, text: &str) -> Slug {
        transliterate(text)
    }

    pub fn inspect(&self, text: &str) -> SlugReport {
        SlugReport {
            slug: transliterate(text),
            is_latin_slug: is_latin_slug(text),
            has_persian_or_arabic: has_persian_or_arabic(text),
        }
    }

    pub fn resolve(&self, incoming_slug: &str, taxonomy: &str) -> Option<String> {
        resolve_taxonomy_slug(incoming_slug, taxonomy, &self.site)
    }

    pub fn normalize_request(&self, query_vars: &mut HashMap<String, String>) -> usize {
        normalize_request_slugs(query_vars, &self.site)
    }

    pub fn add_term(&mut self, taxonomy: &str, slug: &str, name: &str) -> Result<()> {
        self.site.add_term(taxonomy, slug, name)
    }

    pub fn add_post(&mut self, post_type: &str, title: &str, slug: &str) -> PostId {
        self.site.add_post(post_type, title, slug)
    }

    pub fn bulk_update(&mut self, options: &BulkOptions) -> BulkReport {
        run_bulk_update(&mut self.site, options)
    }

    pub fn save(&self) -> Result<()> {
        match &self.store_path {
            Some(path) => save_to_disk(&self.site, path),
            None => Ok(()), // Don't error if no path is set
        }
    }
}
