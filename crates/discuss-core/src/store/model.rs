//! Comment data models

use crate::reaction::KindCounts;
use crate::types::{CommentId, ObjectId, ScopeKey, TenantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted comment
///
/// `content` is the post-censor author text; `content_html` is always
/// re-derived from it on save and never independently settable. The two
/// count fields are derived from the tree engine on every read and are not
/// part of the persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Owning tenant; inherited from the parent when one exists
    pub tenant: TenantId,
    /// Host object being discussed; inherited from the parent when one exists
    pub object: ObjectId,
    /// Optional parent comment in the same scope
    pub parent: Option<CommentId>,
    /// Creating user
    pub author: UserId,
    /// Author text, after profanity filtering
    pub content: String,
    /// HTML derived from `content`
    pub content_html: String,
    /// Reaction counters by kind
    #[serde(default)]
    pub reactions: KindCounts,
    /// Flag counters by kind
    #[serde(default)]
    pub flags: KindCounts,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the comment was last updated
    pub updated_at: DateTime<Utc>,
    /// Number of direct children (derived)
    #[serde(skip)]
    pub children_count: usize,
    /// Number of all descendants (derived)
    #[serde(skip)]
    pub descendant_count: usize,
}

impl Comment {
    /// The root scope this comment belongs to
    pub fn scope(&self) -> ScopeKey {
        ScopeKey::new(self.tenant.clone(), self.object.clone())
    }

    /// Whether this comment has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Replace the content pair and refresh updated_at
    pub fn set_content(&mut self, text: impl Into<String>, html: impl Into<String>) {
        self.content = text.into();
        self.content_html = html.into();
        self.updated_at = Utc::now();
    }

    /// Counter for one reaction kind (0 when absent)
    pub fn reaction_count(&self, kind: &str) -> u64 {
        self.reactions.get(kind).copied().unwrap_or(0)
    }

    /// Counter for one flag kind (0 when absent)
    pub fn flag_count(&self, kind: &str) -> u64 {
        self.flags.get(kind).copied().unwrap_or(0)
    }

    /// Sum of all reaction counters
    pub fn total_reactions(&self) -> u64 {
        self.reactions.values().sum()
    }
}

/// Input for creating a comment
///
/// `tenant` and `object` are resolved by the caller (the request layer);
/// when `parent` is set they are overridden by the parent's scope.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Owning tenant
    pub tenant: TenantId,
    /// Host object; required for root comments, ignored for replies
    pub object: Option<ObjectId>,
    /// Creating user
    pub author: UserId,
    /// Raw author text, pre-censor
    pub content: String,
    /// Optional parent comment
    pub parent: Option<CommentId>,
}

impl NewComment {
    /// Input for a new root comment
    pub fn root(
        tenant: TenantId,
        object: ObjectId,
        author: UserId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            tenant,
            object: Some(object),
            author,
            content: content.into(),
            parent: None,
        }
    }

    /// Input for a reply; scope is inherited from the parent
    pub fn reply(parent: CommentId, author: UserId, content: impl Into<String>) -> Self {
        Self {
            tenant: TenantId::from_string(""),
            object: None,
            author,
            content: content.into(),
            parent: Some(parent),
        }
    }
}
