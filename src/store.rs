// File: src/store.rs
use crate::bulk::ContentStore;
use crate::core::resolver::TermLookup;
use crate::core::types::{Post, PostId, Term};
use crate::error::{Result, SlugError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory terms and posts of one site.
///
/// This is the collaborator the resolver and the bulk job talk to in the
/// binaries and tests. It derives Clone + serde so persistence can snapshot it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteStore {
    /// taxonomy -> terms, in insertion order
    taxonomies: BTreeMap<String, Vec<Term>>,
    post_types: BTreeSet<String>,
    posts: BTreeMap<PostId, Post>,
}

impl Default for SiteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteStore {
    /// A store with the built-in `category`/`post_tag` taxonomies and
    /// `post`/`page` post types.
    pub fn new() -> Self {
        let mut store = Self {
            taxonomies: BTreeMap::new(),
            post_types: BTreeSet::new(),
            posts: BTreeMap::new(),
        };
        store.register_taxonomy("category");
        store.register_taxonomy("post_tag");
        store.register_post_type("post");
        store.register_post_type("page");
        store
    }

    pub fn register_taxonomy(&mut self, taxonomy: &str) {
        self.taxonomies.entry(taxonomy.to_string()).or_default();
    }

    pub fn register_post_type(&mut self, post_type: &str) {
        self.post_types.insert(post_type.to_string());
    }

    /// Adds a term, registering its taxonomy on first use.
    /// A term whose slug is already taken in the taxonomy has its name updated.
    pub fn add_term(&mut self, taxonomy: &str, slug: &str, name: &str) -> Result<()> {
        if taxonomy.is_empty() || slug.is_empty() || name.is_empty() {
            return Err(SlugError::InvalidInput(format!(
                "term needs taxonomy, slug and name (got {:?}, {:?}, {:?})",
                taxonomy, slug, name
            )));
        }

        let terms = self.taxonomies.entry(taxonomy.to_string()).or_default();
        match terms.iter_mut().find(|t| t.slug == slug) {
            Some(term) => term.name = name.to_string(),
            None => terms.push(Term { slug: slug.to_string(), name: name.to_string() }),
        }
        Ok(())
    }

    pub fn terms(&self, taxonomy: &str) -> &[Term] {
        self.taxonomies.get(taxonomy).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Adds a post with the next free id, registering its post type.
    pub fn add_post(&mut self, post_type: &str, title: &str, slug: &str) -> PostId {
        let id = self.posts.keys().next_back().map_or(1, |last| last + 1);
        self.register_post_type(post_type);
        self.posts.insert(
            id,
            Post {
                id,
                post_type: post_type.to_string(),
                title: title.to_string(),
                slug: slug.to_string(),
            },
        );
        id
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    fn slug_taken(&self, slug: &str, post: &Post) -> bool {
        self.posts
            .values()
            .any(|other| other.id != post.id && other.post_type == post.post_type && other.slug == slug)
    }
}

impl TermLookup for SiteStore {
    fn find_by_slug(&self, taxonomy: &str, slug: &str) -> Option<Term> {
        self.terms(taxonomy).iter().find(|t| t.slug == slug).cloned()
    }

    fn find_by_name(&self, taxonomy: &str, name: &str) -> Option<Term> {
        self.terms(taxonomy).iter().find(|t| t.name == name).cloned()
    }

    fn taxonomy_exists(&self, taxonomy: &str) -> bool {
        self.taxonomies.contains_key(taxonomy)
    }
}

impl ContentStore for SiteStore {
    fn post_type_exists(&self, post_type: &str) -> bool {
        self.post_types.contains(post_type)
    }

    fn fetch_batch(&self, post_type: &str, limit: usize, offset: usize) -> Vec<PostId> {
        self.posts
            .values()
            .filter(|p| p.post_type == post_type)
            .skip(offset)
            .take(limit)
            .map(|p| p.id)
            .collect()
    }

    fn get_post(&self, id: PostId) -> Option<Post> {
        self.posts.get(&id).cloned()
    }

    fn unique_slug(&self, desired: &str, post: &Post) -> String {
        if !self.slug_taken(desired, post) {
            return desired.to_string();
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}-{}", desired, suffix);
            if !self.slug_taken(&candidate, post) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn update_slug(&mut self, id: PostId, slug: &str) -> Result<()> {
        if slug.is_empty() {
            return Err(SlugError::UpdateRejected { id, reason: "empty slug".to_string() });
        }
        match self.posts.get_mut(&id) {
            Some(post) => {
                post.slug = slug.to_string();
                Ok(())
            }
            None => Err(SlugError::UpdateRejected { id, reason: "no such post".to_string() }),
        }
    }
}
