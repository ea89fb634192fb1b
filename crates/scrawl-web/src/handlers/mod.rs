//! Handler modules for scrawl-web.
//!
//! This module contains the HTTP handlers for the HTML surface.

pub mod auth;
pub mod notes;
