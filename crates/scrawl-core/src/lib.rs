//! # scrawl-core
//!
//! Core types, traits, and abstractions for the scrawl notes application.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other scrawl crates depend on.

pub mod error;
pub mod models;
pub mod slug;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use slug::{is_valid_slug, resolve_slug, slugify, SLUG_MAX_LEN, SLUG_TAKEN_WARNING};
pub use traits::*;
pub use uuid_utils::new_v7;
