//! Comment validation

use super::model::Comment;
use crate::error::{DiscussError, Result};
use crate::types::CommentId;

/// Maximum comment length (default)
pub const MAX_CONTENT_LENGTH: usize = 10000;

/// Minimum comment length
pub const MIN_CONTENT_LENGTH: usize = 1;

/// Validator for comment input
pub struct CommentValidator {
    max_length: usize,
    min_length: usize,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_CONTENT_LENGTH,
            min_length: MIN_CONTENT_LENGTH,
        }
    }

    /// Create a new validator with custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            min_length: MIN_CONTENT_LENGTH,
        }
    }

    /// Validate comment content
    pub fn validate_content(&self, content: &str) -> Result<()> {
        let trimmed = content.trim();

        if trimmed.len() < self.min_length {
            return Err(DiscussError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > self.max_length {
            return Err(DiscussError::Validation(format!(
                "Comment content exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }

    /// Validate the parent relation for a comment about to be created
    ///
    /// Rejects self-parenting and two-hop cycles. Deeper cycles cannot arise:
    /// the parent is immutable after creation and every insert attaches a
    /// fresh leaf.
    pub fn validate_parent(&self, id: &CommentId, parent: Option<&Comment>) -> Result<()> {
        let Some(parent) = parent else {
            return Ok(());
        };

        if parent.id == *id {
            return Err(DiscussError::Validation(
                "Parent comment cannot be self".to_string(),
            ));
        }
        if parent.parent.as_ref() == Some(id) {
            return Err(DiscussError::Validation(
                "Cannot have circular parents".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}
