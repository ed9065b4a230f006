// src/lib.rs

pub mod bulk;
pub mod c_api;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod store;

pub use crate::core::converter::{has_persian_or_arabic, is_latin_slug, sanitize_title, transliterate};
pub use crate::core::engine::SlugEngine;
pub use crate::core::resolver::{normalize_request_slugs, resolve_taxonomy_slug, TermLookup};
pub use crate::error::{Result, SlugError};
