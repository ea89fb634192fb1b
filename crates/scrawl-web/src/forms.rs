//! Form payloads for the HTML surface.
//!
//! Every field defaults to an empty string so a partial submission
//! deserializes cleanly and comes back as a validation error instead of a
//! 422 from the extractor.

use serde::Deserialize;

use scrawl_core::{Error, Note, Result, TITLE_MAX_LEN};

/// Query parameters carrying the post-login destination.
#[derive(Debug, Default, Deserialize)]
pub struct NextParams {
    #[serde(default)]
    pub next: String,
}

/// The add/edit note form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteForm {
    /// Pre-fill the form from an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
        }
    }

    /// Validate title and text.
    ///
    /// Slug format and uniqueness are checked by the repository, so the
    /// collision message is built in exactly one place.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("title", "This field is required."));
        }
        if self.title.chars().count() > TITLE_MAX_LEN {
            return Err(Error::validation(
                "title",
                format!("Ensure this value has at most {} characters.", TITLE_MAX_LEN),
            ));
        }
        if self.text.trim().is_empty() {
            return Err(Error::validation("text", "This field is required."));
        }
        Ok(())
    }

    /// The slug for repository requests; an empty input means derive one
    /// from the title.
    pub fn slug_input(&self) -> Option<String> {
        let trimmed = self.slug.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// The login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: String,
}

/// The signup form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: String,
}

impl SignupForm {
    /// Validate username and password presence. Uniqueness is checked by
    /// the user repository.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::validation("username", "This field is required."));
        }
        if self.password.is_empty() {
            return Err(Error::validation("password", "This field is required."));
        }
        Ok(())
    }
}
