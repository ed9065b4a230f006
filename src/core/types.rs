// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A URL-safe slug: empty, or `^[a-z0-9]+(-[a-z0-9]+)*$`.
/// Empty means "no usable transliteration".
pub type Slug = String;

/// Identifier of a post in the content store.
pub type PostId = u64;

/// A taxonomy term as the term store sees it.
/// The core only reads it and recommends a target slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub slug: String,
    pub name: String,
}

/// A piece of content whose slug the bulk job may rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub post_type: String,
    pub title: String,
    /// Current stored slug; may still be Persian/Arabic or empty.
    pub slug: String,
}
