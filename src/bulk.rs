// File: src/bulk.rs
use crate::core::converter::{is_latin_slug, transliterate};
use crate::core::types::{Post, PostId};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_POST_TYPE: &str = "post";
pub const DEFAULT_BATCH_LIMIT: usize = 200;
pub const MAX_BATCH_LIMIT: usize = 2000;

/// Storage the bulk job rewrites slugs in.
pub trait ContentStore {
    fn post_type_exists(&self, post_type: &str) -> bool;

    /// Ids of `post_type` posts in ascending id order, skipping `offset`
    /// and returning at most `limit`.
    fn fetch_batch(&self, post_type: &str, limit: usize, offset: usize) -> Vec<PostId>;

    fn get_post(&self, id: PostId) -> Option<Post>;

    /// A slug based on `desired` that no other post of the same type uses.
    fn unique_slug(&self, desired: &str, post: &Post) -> String;

    fn update_slug(&mut self, id: PostId, slug: &str) -> Result<()>;
}

/// Parameters of one bulk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkOptions {
    pub post_type: String,
    pub limit: usize,
    pub offset: usize,
    /// Also regenerate slugs that are already Latin.
    pub force: bool,
}

impl Default for BulkOptions {
    fn default() -> Self {
        Self {
            post_type: DEFAULT_POST_TYPE.to_string(),
            limit: DEFAULT_BATCH_LIMIT,
            offset: 0,
            force: false,
        }
    }
}

impl BulkOptions {
    /// Clamps the limit to 1..=2000 and swaps an unknown post type for "post".
    pub fn sanitized<S: ContentStore + ?Sized>(&self, store: &S) -> Self {
        let post_type = if store.post_type_exists(&self.post_type) {
            self.post_type.clone()
        } else {
            DEFAULT_POST_TYPE.to_string()
        };
        Self {
            post_type,
            limit: self.limit.clamp(1, MAX_BATCH_LIMIT),
            offset: self.offset,
            force: self.force,
        }
    }
}

/// Outcome counts of a bulk run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReport {
    pub changed: usize,
    pub skipped: usize,
}

/// Regenerates slugs from titles for one batch of posts.
///
/// A post is skipped when it's gone, when its title transliterates to
/// nothing, when its current slug is already Latin (unless `force`), or
/// when the store refuses the update.
pub fn run_bulk_update<S: ContentStore + ?Sized>(store: &mut S, options: &BulkOptions) -> BulkReport {
    let options = options.sanitized(&*store);
    let ids = store.fetch_batch(&options.post_type, options.limit, options.offset);
    let mut report = BulkReport::default();

    for id in ids {
        let post = match store.get_post(id) {
            Some(post) => post,
            None => {
                report.skipped += 1;
                continue;
            }
        };

        let new_slug = transliterate(&post.title);
        if new_slug.is_empty() {
            debug!(id, "title has no usable transliteration");
            report.skipped += 1;
            continue;
        }

        if !options.force && !post.slug.is_empty() && is_latin_slug(&post.slug) {
            report.skipped += 1;
            continue;
        }

        let unique = store.unique_slug(&new_slug, &post);
        match store.update_slug(id, &unique) {
            Ok(()) => {
                debug!(id, slug = %unique, "slug updated");
                report.changed += 1;
            }
            Err(e) => {
                warn!(id, error = %e, "slug update failed");
                report.skipped += 1;
            }
        }
    }

    info!(
        post_type = %options.post_type,
        offset = options.offset,
        changed = report.changed,
        skipped = report.skipped,
        "bulk update finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SlugError;
    use crate::store::SiteStore;

    fn sample_store() -> SiteStore {
        let mut store = SiteStore::new();
        store.add_post("post", "سلام دنیا", "سلام-دنیا"); // 1: persian slug
        store.add_post("post", "علی", "already-latin"); // 2: latin slug
        store.add_post("post", "!!!", ""); // 3: nothing to transliterate
        store.add_post("page", "درباره ما", ""); // 4: other type
        store.add_post("post", "سلام دنیا", ""); // 5: collides with 1 after update
        store
    }

    #[test]
    fn test_bulk_update_skips_latin_and_empty() {
        let mut store = sample_store();
        let report = run_bulk_update(&mut store, &BulkOptions::default());

        assert_eq!(report, BulkReport { changed: 2, skipped: 2 });
        assert_eq!(store.post(1).unwrap().slug, "slam-dnya");
        assert_eq!(store.post(2).unwrap().slug, "already-latin");
        assert_eq!(store.post(3).unwrap().slug, "");
        assert_eq!(store.post(4).unwrap().slug, "");
        assert_eq!(store.post(5).unwrap().slug, "slam-dnya-2");
    }

    #[test]
    fn test_bulk_update_force_overwrites_latin() {
        let mut store = sample_store();
        let options = BulkOptions { force: true, ..BulkOptions::default() };
        let report = run_bulk_update(&mut store, &options);

        assert_eq!(report, BulkReport { changed: 3, skipped: 1 });
        assert_eq!(store.post(2).unwrap().slug, "ly");
    }

    #[test]
    fn test_bulk_update_limit_and_offset() {
        let mut store = sample_store();
        let options = BulkOptions { limit: 1, offset: 1, force: true, ..BulkOptions::default() };
        let report = run_bulk_update(&mut store, &options);

        assert_eq!(report, BulkReport { changed: 1, skipped: 0 });
        assert_eq!(store.post(1).unwrap().slug, "سلام-دنیا");
        assert_eq!(store.post(2).unwrap().slug, "ly");
    }

    #[test]
    fn test_bulk_options_sanitized() {
        let store = SiteStore::new();
        let options = BulkOptions { post_type: "product".to_string(), limit: 0, offset: 7, force: true };
        let clean = options.sanitized(&store);
        assert_eq!(clean.post_type, "post");
        assert_eq!(clean.limit, 1);
        assert_eq!(clean.offset, 7);

        let big = BulkOptions { limit: 50_000, ..BulkOptions::default() }.sanitized(&store);
        assert_eq!(big.limit, MAX_BATCH_LIMIT);
    }

    #[test]
    fn test_bulk_update_page_type() {
        let mut store = sample_store();
        let options = BulkOptions { post_type: "page".to_string(), ..BulkOptions::default() };
        let report = run_bulk_update(&mut store, &options);

        assert_eq!(report, BulkReport { changed: 1, skipped: 0 });
        assert_eq!(store.post(4).unwrap().slug, "drbarh-ma");
    }

    /// Wraps a store and refuses every update.
    struct ReadOnly(SiteStore);

    impl ContentStore for ReadOnly {
        fn post_type_exists(&self, post_type: &str) -> bool {
            self.0.post_type_exists(post_type)
        }

        fn fetch_batch(&self, post_type: &str, limit: usize, offset: usize) -> Vec<PostId> {
            self.0.fetch_batch(post_type, limit, offset)
        }

        fn get_post(&self, id: PostId) -> Option<Post> {
            self.0.get_post(id)
        }

        fn unique_slug(&self, desired: &str, post: &Post) -> String {
            self.0.unique_slug(desired, post)
        }

        fn update_slug(&mut self, id: PostId, _slug: &str) -> Result<()> {
            Err(SlugError::UpdateRejected { id, reason: "read-only".to_string() })
        }
    }

    #[test]
    fn test_bulk_update_counts_rejected_updates_as_skipped() {
        let mut store = ReadOnly(sample_store());
        let report = run_bulk_update(&mut store, &BulkOptions::default());
        assert_eq!(report, BulkReport { changed: 0, skipped: 4 });
    }
}
