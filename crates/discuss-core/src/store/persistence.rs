//! Scope storage trait and snapshot format
//!
//! One snapshot per root scope is the unit of persistence: a structural
//! mutation commits by writing the scope's snapshot in full, which gives the
//! per-scope transaction boundary its concrete form.

use super::model::Comment;
use crate::error::Result;
use crate::reaction::ReactionBoard;
use crate::tree::TreeEngine;
use crate::types::{CommentId, ScopeKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Snapshot schema version understood by this build
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Versioned on-disk form of one root scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeSnapshot {
    /// Schema version of this snapshot
    pub schema_version: u32,
    /// The scope this snapshot covers
    pub scope: ScopeKey,
    /// When the snapshot was written
    pub saved_at: DateTime<Utc>,
    /// All comments of the scope by id
    pub comments: HashMap<CommentId, Comment>,
    /// Tree placement metadata
    pub tree: TreeEngine,
    /// Active reaction and flag records
    #[serde(default)]
    pub board: ReactionBoard,
}

impl ScopeSnapshot {
    /// Create a snapshot at the current schema version
    pub fn new(
        scope: ScopeKey,
        comments: HashMap<CommentId, Comment>,
        tree: TreeEngine,
        board: ReactionBoard,
    ) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            scope,
            saved_at: Utc::now(),
            comments,
            tree,
            board,
        }
    }
}

/// Trait for scope storage implementations
pub trait ScopeStorage: Send + Sync {
    /// Save a scope snapshot
    fn save(&self, snapshot: &ScopeSnapshot) -> Result<()>;

    /// Load a scope snapshot
    fn load(&self, scope: &ScopeKey) -> Result<ScopeSnapshot>;

    /// List all stored scopes
    fn list(&self) -> Result<Vec<ScopeKey>>;

    /// Delete a scope snapshot
    fn delete(&self, scope: &ScopeKey) -> Result<()>;

    /// Check if a scope snapshot exists
    fn exists(&self, scope: &ScopeKey) -> bool;
}

/// In-memory storage for testing
#[cfg(test)]
pub mod memory {
    use super::*;
    use crate::error::DiscussError;
    use std::sync::RwLock;

    /// In-memory scope storage for testing
    #[derive(Default)]
    pub struct MemoryStorage {
        scopes: RwLock<HashMap<ScopeKey, ScopeSnapshot>>,
    }

    impl MemoryStorage {
        /// Create a new in-memory storage
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl ScopeStorage for MemoryStorage {
        fn save(&self, snapshot: &ScopeSnapshot) -> Result<()> {
            let mut scopes = self.scopes.write().unwrap();
            scopes.insert(snapshot.scope.clone(), snapshot.clone());
            Ok(())
        }

        fn load(&self, scope: &ScopeKey) -> Result<ScopeSnapshot> {
            let scopes = self.scopes.read().unwrap();
            scopes
                .get(scope)
                .cloned()
                .ok_or_else(|| DiscussError::ScopeNotFound(scope.to_string()))
        }

        fn list(&self) -> Result<Vec<ScopeKey>> {
            let scopes = self.scopes.read().unwrap();
            Ok(scopes.keys().cloned().collect())
        }

        fn delete(&self, scope: &ScopeKey) -> Result<()> {
            let mut scopes = self.scopes.write().unwrap();
            scopes
                .remove(scope)
                .ok_or_else(|| DiscussError::ScopeNotFound(scope.to_string()))?;
            Ok(())
        }

        fn exists(&self, scope: &ScopeKey) -> bool {
            let scopes = self.scopes.read().unwrap();
            scopes.contains_key(scope)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::types::{ObjectId, TenantId};

        fn create_test_snapshot() -> ScopeSnapshot {
            let scope = ScopeKey::new(
                TenantId::from_string("acme"),
                ObjectId::from_string("post-1"),
            );
            ScopeSnapshot::new(
                scope,
                HashMap::new(),
                TreeEngine::new(),
                ReactionBoard::new(),
            )
        }

        #[test]
        fn test_memory_storage_save_load() {
            let storage = MemoryStorage::new();
            let snapshot = create_test_snapshot();
            let scope = snapshot.scope.clone();

            storage.save(&snapshot).unwrap();
            let loaded = storage.load(&scope).unwrap();

            assert_eq!(loaded.scope, scope);
            assert_eq!(loaded.schema_version, CURRENT_SCHEMA_VERSION);
        }

        #[test]
        fn test_memory_storage_delete() {
            let storage = MemoryStorage::new();
            let snapshot = create_test_snapshot();
            let scope = snapshot.scope.clone();

            storage.save(&snapshot).unwrap();
            assert!(storage.exists(&scope));

            storage.delete(&scope).unwrap();
            assert!(!storage.exists(&scope));
        }

        #[test]
        fn test_memory_storage_load_nonexistent() {
            let storage = MemoryStorage::new();
            let scope = ScopeKey::new(
                TenantId::from_string("ghost"),
                ObjectId::from_string("nothing"),
            );

            let result = storage.load(&scope);
            assert!(matches!(result, Err(DiscussError::ScopeNotFound(_))));
        }

        #[test]
        fn test_memory_storage_list() {
            let storage = MemoryStorage::new();
            assert!(storage.list().unwrap().is_empty());

            storage.save(&create_test_snapshot()).unwrap();
            assert_eq!(storage.list().unwrap().len(), 1);
        }
    }
}
