//! Core type definitions for discuss

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(pub Uuid);

impl CommentId {
    /// Generate a new CommentId
    pub fn new() -> Self {
        CommentId(Uuid::new_v4())
    }

    /// Create from UUID string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(CommentId(Uuid::parse_str(s)?))
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for the tenant (application) owning a comment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl TenantId {
    /// Create a TenantId from a string
    pub fn from_string(s: impl Into<String>) -> Self {
        TenantId(s.into())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for the host object a comment thread is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub String);

impl ObjectId {
    /// Create an ObjectId from a string
    pub fn from_string(s: impl Into<String>) -> Self {
        ObjectId(s.into())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a user (author, reactor, requestor)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Create a UserId from a string
    pub fn from_string(s: impl Into<String>) -> Self {
        UserId(s.into())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The `(tenant, object)` pair that roots exactly one comment tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeKey {
    /// Owning tenant
    pub tenant: TenantId,
    /// Host object being discussed
    pub object: ObjectId,
}

impl ScopeKey {
    /// Create a new scope key
    pub fn new(tenant: TenantId, object: ObjectId) -> Self {
        Self { tenant, object }
    }

    /// Stable file stem for this scope, safe for use in file names
    pub fn file_stem(&self) -> String {
        let hash = blake3::hash(format!("{}\0{}", self.tenant, self.object).as_bytes());
        format!("s_{}", &hash.to_hex()[..16])
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_id_uniqueness() {
        let id1 = CommentId::new();
        let id2 = CommentId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_comment_id_from_string() {
        let id = CommentId::new();
        let parsed = CommentId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);

        assert!(CommentId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_scope_key_file_stem_stability() {
        let key = ScopeKey::new(
            TenantId::from_string("acme"),
            ObjectId::from_string("post-42"),
        );
        let stem1 = key.file_stem();
        let stem2 = key.file_stem();
        assert_eq!(stem1, stem2);
        assert!(stem1.starts_with("s_"));
        assert_eq!(stem1.len(), 18); // "s_" + 16 hex chars
    }

    #[test]
    fn test_scope_key_file_stem_distinct() {
        let a = ScopeKey::new(
            TenantId::from_string("acme"),
            ObjectId::from_string("post-1"),
        );
        let b = ScopeKey::new(
            TenantId::from_string("acme"),
            ObjectId::from_string("post-2"),
        );
        assert_ne!(a.file_stem(), b.file_stem());
    }

    #[test]
    fn test_scope_key_display() {
        let key = ScopeKey::new(
            TenantId::from_string("acme"),
            ObjectId::from_string("post-42"),
        );
        assert_eq!(key.to_string(), "acme/post-42");
    }

    #[test]
    fn test_id_serialization() {
        let id = CommentId::new();
        let json = serde_json::to_string(&id).unwrap();
        let id2: CommentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, id2);
    }
}
