// src/core/mod.rs
pub mod charmap;
pub mod converter;
pub mod engine;
pub mod resolver;
pub mod tables;
pub mod types;
