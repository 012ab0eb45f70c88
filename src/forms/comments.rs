use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::{empty_string_as_none, sanitize_inline_text};
use crate::domain::comment::NewComment;

const NAME_MAX_LEN: u64 = 128;
const BODY_MAX_LEN: u64 = 2000;

#[derive(Debug, Error)]
pub enum CommentFormError {
    #[error("comment body required")]
    EmptyBody,
    #[error("id required")]
    MissingId,
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SubmitCommentForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = BODY_MAX_LEN))]
    pub body: Option<String>,
}

impl SubmitCommentForm {
    pub fn into_new_comment(self) -> Result<NewComment, CommentFormError> {
        let body = self
            .body
            .as_deref()
            .map(str::trim)
            .filter(|body| !body.is_empty())
            .ok_or(CommentFormError::EmptyBody)?
            .to_string();

        self.validate()?;

        Ok(NewComment::new(
            self.name.as_deref().map(sanitize_inline_text),
            self.email.map(|email| email.trim().to_lowercase()),
            body,
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HideCommentForm {
    #[serde(default)]
    pub id: Option<i32>,
}

impl HideCommentForm {
    pub fn comment_id(&self) -> Result<i32, CommentFormError> {
        self.id.filter(|id| *id > 0).ok_or(CommentFormError::MissingId)
    }
}

#[derive(Debug, Deserialize)]
pub struct PinCommentForm {
    #[serde(default = "default_pinned")]
    pub pinned: bool,
}

impl Default for PinCommentForm {
    fn default() -> Self {
        Self { pinned: true }
    }
}

fn default_pinned() -> bool {
    true
}
