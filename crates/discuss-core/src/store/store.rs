//! Comment store facade
//!
//! Composes the content pipeline, the tree engine, the reaction board and a
//! scope storage backend behind the public CRUD, tree-query and
//! reaction/flag API. State is partitioned per root scope; every scope sits
//! behind its own lock, so mutations on one scope never block reads or
//! writes on another.
//!
//! A mutation clones the scope state, applies the change to the clone,
//! persists the resulting snapshot and only then swaps the clone in. A
//! failed persist therefore leaves the previous state untouched, and readers
//! can never observe a half-renumbered tree.

use super::model::{Comment, NewComment};
use super::persistence::{ScopeSnapshot, ScopeStorage};
use super::validator::CommentValidator;
use crate::config::StoreConfig;
use crate::content::ContentPipeline;
use crate::error::{DiscussError, Result};
use crate::reaction::ReactionBoard;
use crate::tree::TreeEngine;
use crate::types::{CommentId, ObjectId, ScopeKey, TenantId, UserId};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::{debug, info};

/// Mutable state of one root scope
#[derive(Debug, Clone, Default)]
struct ScopeState {
    comments: HashMap<CommentId, Comment>,
    tree: TreeEngine,
    board: ReactionBoard,
}

/// The threaded-discussion store
pub struct CommentStore {
    config: StoreConfig,
    pipeline: ContentPipeline,
    validator: CommentValidator,
    storage: Arc<dyn ScopeStorage>,
    scopes: RwLock<HashMap<ScopeKey, Arc<Mutex<ScopeState>>>>,
    locations: RwLock<HashMap<CommentId, ScopeKey>>,
    blocked: RwLock<HashSet<UserId>>,
}

impl CommentStore {
    /// Open a store over the given storage backend
    ///
    /// Existing scope snapshots are loaded eagerly.
    pub fn open(config: StoreConfig, storage: impl ScopeStorage + 'static) -> Result<Self> {
        Self::open_shared(config, Arc::new(storage))
    }

    /// Open a store over shared storage
    pub fn open_shared(config: StoreConfig, storage: Arc<dyn ScopeStorage>) -> Result<Self> {
        let pipeline = ContentPipeline::basic(&config.content.censored_words);
        Self::with_pipeline(config, pipeline, storage)
    }

    /// Open a store with a custom content pipeline (real censor/renderer engines)
    pub fn with_pipeline(
        config: StoreConfig,
        pipeline: ContentPipeline,
        storage: Arc<dyn ScopeStorage>,
    ) -> Result<Self> {
        let validator = CommentValidator::with_max_length(config.content.max_length);
        let store = Self {
            config,
            pipeline,
            validator,
            storage,
            scopes: RwLock::new(HashMap::new()),
            locations: RwLock::new(HashMap::new()),
            blocked: RwLock::new(HashSet::new()),
        };
        store.hydrate()?;
        Ok(store)
    }

    /// Load every stored scope into memory
    fn hydrate(&self) -> Result<()> {
        for key in self.storage.list()? {
            let snapshot = self
                .storage
                .load(&key)
                .map_err(|e| e.with_context(format!("Failed to hydrate scope {}", key)))?;
            let state = ScopeState {
                comments: snapshot.comments,
                tree: snapshot.tree,
                board: snapshot.board,
            };

            let mut locations = write_lock(&self.locations)?;
            for id in state.comments.keys() {
                locations.insert(*id, key.clone());
            }
            drop(locations);

            let count = state.comments.len();
            write_lock(&self.scopes)?.insert(key.clone(), Arc::new(Mutex::new(state)));
            debug!("Hydrated scope {} with {} comments", key, count);
        }
        Ok(())
    }

    /// Get the store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ---- create / update / delete -------------------------------------

    /// Create a comment with a fresh id
    pub fn create(&self, new: NewComment) -> Result<Comment> {
        self.create_with_id(CommentId::new(), new)
    }

    /// Create a comment with a specific id
    ///
    /// A reply always lands in its parent's scope: caller-supplied tenant
    /// and object values are overridden by the parent's. A root comment
    /// requires an object id.
    pub fn create_with_id(&self, id: CommentId, new: NewComment) -> Result<Comment> {
        self.validator.validate_content(&new.content)?;

        let scope_key = match &new.parent {
            Some(parent_id) => self.locate(parent_id)?,
            None => {
                let object = new.object.clone().ok_or_else(|| {
                    DiscussError::Validation(
                        "An object id is required for a root comment".to_string(),
                    )
                })?;
                ScopeKey::new(new.tenant.clone(), object)
            }
        };

        let handle = self.scope_handle(&scope_key)?;
        let mut guard = lock_scope(&handle)?;

        // Re-resolve the parent under the scope lock: it may have been
        // deleted between locate() and here.
        let parent = match &new.parent {
            Some(parent_id) => Some(guard.comments.get(parent_id).cloned().ok_or_else(|| {
                DiscussError::CommentNotFound(parent_id.to_string())
            })?),
            None => None,
        };
        self.validator.validate_parent(&id, parent.as_ref())?;

        if read_lock(&self.locations)?.contains_key(&id) {
            return Err(DiscussError::Validation(format!(
                "Comment with ID {} already exists",
                id
            )));
        }

        let processed = self.pipeline.process(&new.content);

        let mut next = guard.clone();
        match &parent {
            Some(parent) => next.tree.insert_child(&parent.id, id)?,
            None => next.tree.insert_root(id)?,
        };

        let now = Utc::now();
        let comment = Comment {
            id,
            tenant: scope_key.tenant.clone(),
            object: scope_key.object.clone(),
            parent: parent.map(|p| p.id),
            author: new.author,
            content: processed.text,
            content_html: processed.html,
            reactions: Default::default(),
            flags: Default::default(),
            created_at: now,
            updated_at: now,
            children_count: 0,
            descendant_count: 0,
        };
        next.comments.insert(id, comment.clone());

        self.commit(&scope_key, &handle, &mut guard, next)?;
        write_lock(&self.locations)?.insert(id, scope_key.clone());

        debug!("Created comment {} in scope {}", id, scope_key);
        Ok(comment)
    }

    /// Update a comment's content
    ///
    /// Only the original author may edit. The content pipeline runs again;
    /// placement, scope, parent and author are never touched.
    pub fn update(&self, id: &CommentId, content: &str, requestor: &UserId) -> Result<Comment> {
        self.validator.validate_content(content)?;
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let mut guard = lock_scope(&handle)?;

        let current = guard
            .comments
            .get(id)
            .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))?;
        if current.author != *requestor {
            return Err(DiscussError::Forbidden(format!(
                "User {} is not the author of comment {}",
                requestor, id
            )));
        }

        let processed = self.pipeline.process(content);
        let mut next = guard.clone();
        let comment = next
            .comments
            .get_mut(id)
            .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))?;
        comment.set_content(processed.text, processed.html);

        self.commit(&key, &handle, &mut guard, next)?;
        debug!("Updated comment {} in scope {}", id, key);
        refreshed(&guard, id)
    }

    /// Delete a comment and its entire subtree
    ///
    /// Returns the removed ids, the deleted comment first.
    pub fn delete(&self, id: &CommentId, requestor: &UserId) -> Result<Vec<CommentId>> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let mut guard = lock_scope(&handle)?;

        let current = guard
            .comments
            .get(id)
            .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))?;
        if current.author != *requestor {
            return Err(DiscussError::Forbidden(format!(
                "User {} is not the author of comment {}",
                requestor, id
            )));
        }

        let mut next = guard.clone();
        let removed = next.tree.delete_subtree(id)?;
        for removed_id in &removed {
            next.comments.remove(removed_id);
            next.board.forget_comment(removed_id);
        }

        self.commit(&key, &handle, &mut guard, next)?;
        let mut locations = write_lock(&self.locations)?;
        for removed_id in &removed {
            locations.remove(removed_id);
        }
        drop(locations);

        info!(
            "Deleted comment {} and {} descendants from scope {}",
            id,
            removed.len() - 1,
            key
        );
        Ok(removed)
    }

    // ---- reads ---------------------------------------------------------

    /// Fetch one comment
    ///
    /// With `include_blocked` false, comments authored by blocked users are
    /// reported as not found.
    pub fn get(&self, id: &CommentId, include_blocked: bool) -> Result<Comment> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let guard = lock_scope(&handle)?;
        let comment = refreshed(&guard, id)?;

        if !include_blocked && self.is_user_blocked(&comment.author)? {
            return Err(DiscussError::CommentNotFound(id.to_string()));
        }
        Ok(comment)
    }

    /// Root comments of a scope, in creation order
    pub fn list_roots(
        &self,
        tenant: &TenantId,
        object: &ObjectId,
        include_blocked: bool,
    ) -> Result<Vec<Comment>> {
        let key = ScopeKey::new(tenant.clone(), object.clone());
        let Some(handle) = self.existing_scope(&key)? else {
            return Ok(Vec::new());
        };
        let guard = lock_scope(&handle)?;
        let blocked = read_lock(&self.blocked)?;

        let mut roots: Vec<Comment> = guard
            .tree
            .roots()
            .iter()
            .map(|root_id| refreshed(&guard, root_id))
            .collect::<Result<_>>()?;
        roots.retain(|comment| include_blocked || !blocked.contains(&comment.author));
        roots.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(roots)
    }

    /// Direct children of a comment, in creation order
    pub fn list_children(&self, id: &CommentId, include_blocked: bool) -> Result<Vec<Comment>> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let guard = lock_scope(&handle)?;

        if !guard.comments.contains_key(id) {
            return Err(DiscussError::CommentNotFound(id.to_string()));
        }

        let blocked = read_lock(&self.blocked)?;
        guard
            .tree
            .children_of(id)
            .iter()
            .map(|child_id| refreshed(&guard, child_id))
            .filter(|result| match result {
                Ok(comment) => include_blocked || !blocked.contains(&comment.author),
                Err(_) => true,
            })
            .collect()
    }

    /// Number of direct children of a comment
    pub fn children_count(&self, id: &CommentId) -> Result<usize> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let guard = lock_scope(&handle)?;
        if !guard.tree.contains(id) {
            return Err(DiscussError::CommentNotFound(id.to_string()));
        }
        Ok(guard.tree.children_of(id).len())
    }

    /// Number of all descendants of a comment
    pub fn descendant_count(&self, id: &CommentId) -> Result<usize> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let guard = lock_scope(&handle)?;
        if !guard.tree.contains(id) {
            return Err(DiscussError::CommentNotFound(id.to_string()));
        }
        Ok(guard.tree.descendant_count(id))
    }

    /// Ancestors of a comment, root first, parent last
    pub fn ancestor_chain(&self, id: &CommentId) -> Result<Vec<Comment>> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let guard = lock_scope(&handle)?;
        if !guard.tree.contains(id) {
            return Err(DiscussError::CommentNotFound(id.to_string()));
        }
        guard
            .tree
            .ancestor_chain(id)
            .iter()
            .map(|ancestor_id| refreshed(&guard, ancestor_id))
            .collect()
    }

    /// Total number of comments across all scopes
    pub fn comment_count(&self) -> Result<usize> {
        Ok(read_lock(&self.locations)?.len())
    }

    // ---- reactions and flags -------------------------------------------

    /// Add or move the user's reaction on a comment
    pub fn add_reaction(&self, id: &CommentId, user: &UserId, kind: &str) -> Result<Comment> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let mut guard = lock_scope(&handle)?;

        let mut next = guard.clone();
        let comment = next
            .comments
            .get_mut(id)
            .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))?;
        let changed = next.board.add_reaction(
            id,
            user,
            kind,
            &self.config.kinds.reactions,
            &mut comment.reactions,
        )?;

        if changed {
            self.commit(&key, &handle, &mut guard, next)?;
            debug!("User {} reacted {} on comment {}", user, kind, id);
        }
        refreshed(&guard, id)
    }

    /// Remove the user's active reaction, if any
    pub fn remove_reaction(&self, id: &CommentId, user: &UserId) -> Result<Comment> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let mut guard = lock_scope(&handle)?;

        let mut next = guard.clone();
        let comment = next
            .comments
            .get_mut(id)
            .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))?;
        let changed = next.board.remove_reaction(id, user, &mut comment.reactions);

        if changed {
            self.commit(&key, &handle, &mut guard, next)?;
        }
        refreshed(&guard, id)
    }

    /// Add or move the user's flag on a comment
    pub fn add_flag(&self, id: &CommentId, user: &UserId, kind: &str) -> Result<Comment> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let mut guard = lock_scope(&handle)?;

        let mut next = guard.clone();
        let comment = next
            .comments
            .get_mut(id)
            .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))?;
        let changed =
            next.board
                .add_flag(id, user, kind, &self.config.kinds.flags, &mut comment.flags)?;

        if changed {
            self.commit(&key, &handle, &mut guard, next)?;
            debug!("User {} flagged {} on comment {}", user, kind, id);
        }
        refreshed(&guard, id)
    }

    /// Remove the user's active flag, if any
    pub fn remove_flag(&self, id: &CommentId, user: &UserId) -> Result<Comment> {
        let key = self.locate(id)?;
        let handle = self.located_handle(&key, id)?;
        let mut guard = lock_scope(&handle)?;

        let mut next = guard.clone();
        let comment = next
            .comments
            .get_mut(id)
            .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))?;
        let changed = next.board.remove_flag(id, user, &mut comment.flags);

        if changed {
            self.commit(&key, &handle, &mut guard, next)?;
        }
        refreshed(&guard, id)
    }

    // ---- moderation ----------------------------------------------------

    /// Hide a user's comments from default reads
    ///
    /// The blocked set is fed by the external identity layer; it is not
    /// persisted with scope snapshots.
    pub fn block_user(&self, user: &UserId) -> Result<()> {
        write_lock(&self.blocked)?.insert(user.clone());
        Ok(())
    }

    /// Make a user's comments visible again
    pub fn unblock_user(&self, user: &UserId) -> Result<()> {
        write_lock(&self.blocked)?.remove(user);
        Ok(())
    }

    /// Check whether a user is currently blocked
    pub fn is_user_blocked(&self, user: &UserId) -> Result<bool> {
        Ok(read_lock(&self.blocked)?.contains(user))
    }

    // ---- internals -----------------------------------------------------

    /// Find the scope a comment lives in
    fn locate(&self, id: &CommentId) -> Result<ScopeKey> {
        read_lock(&self.locations)?
            .get(id)
            .cloned()
            .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))
    }

    /// Get or create the lock handle for a scope
    fn scope_handle(&self, key: &ScopeKey) -> Result<Arc<Mutex<ScopeState>>> {
        if let Some(handle) = read_lock(&self.scopes)?.get(key) {
            return Ok(Arc::clone(handle));
        }
        let mut scopes = write_lock(&self.scopes)?;
        Ok(Arc::clone(scopes.entry(key.clone()).or_default()))
    }

    /// Get the lock handle for a scope, if it exists
    fn existing_scope(&self, key: &ScopeKey) -> Result<Option<Arc<Mutex<ScopeState>>>> {
        Ok(read_lock(&self.scopes)?.get(key).map(Arc::clone))
    }

    /// Get the lock handle for the scope a located comment lives in
    ///
    /// Unlike `scope_handle` this never seeds an entry: a read on a comment
    /// whose scope has vanished is a plain miss.
    fn located_handle(&self, key: &ScopeKey, id: &CommentId) -> Result<Arc<Mutex<ScopeState>>> {
        self.existing_scope(key)?
            .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))
    }

    /// Persist the next state of a scope, then swap it in
    ///
    /// If the persist fails the previous state stays current. An empty scope
    /// is removed from the backend and from the in-memory scope map rather
    /// than kept as an empty record.
    fn commit(
        &self,
        key: &ScopeKey,
        handle: &Arc<Mutex<ScopeState>>,
        guard: &mut MutexGuard<'_, ScopeState>,
        next: ScopeState,
    ) -> Result<()> {
        if next.comments.is_empty() {
            if self.storage.exists(key) {
                self.storage.delete(key)?;
            }
            **guard = next;

            // Drop the map entry for the now-empty scope, but only while we
            // are its last user: a writer already waiting on this mutex must
            // keep operating on the entry the map still hands out.
            let mut scopes = write_lock(&self.scopes)?;
            if let Some(current) = scopes.get(key) {
                if Arc::ptr_eq(current, handle) && Arc::strong_count(current) == 2 {
                    scopes.remove(key);
                }
            }
        } else {
            let snapshot = ScopeSnapshot::new(
                key.clone(),
                next.comments.clone(),
                next.tree.clone(),
                next.board.clone(),
            );
            self.storage.save(&snapshot)?;
            **guard = next;
        }
        Ok(())
    }
}

/// Clone a comment with its derived counts refreshed from the tree
fn refreshed(state: &ScopeState, id: &CommentId) -> Result<Comment> {
    let mut comment = state
        .comments
        .get(id)
        .cloned()
        .ok_or_else(|| DiscussError::CommentNotFound(id.to_string()))?;
    comment.children_count = state.tree.children_of(id).len();
    comment.descendant_count = state.tree.descendant_count(id);
    Ok(comment)
}

fn lock_scope<'a>(handle: &'a Arc<Mutex<ScopeState>>) -> Result<MutexGuard<'a, ScopeState>> {
    handle.lock().map_err(|_| {
        DiscussError::Conflict("Scope lock poisoned by a failed mutation; retry".to_string())
    })
}

fn read_lock<T>(lock: &RwLock<T>) -> Result<std::sync::RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| DiscussError::Conflict("Store index poisoned; retry".to_string()))
}

fn write_lock<T>(lock: &RwLock<T>) -> Result<std::sync::RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| DiscussError::Conflict("Store index poisoned; retry".to_string()))
}

#[cfg(test)]
impl CommentStore {
    fn tracked_scope_count(&self) -> usize {
        self.scopes.read().unwrap().len()
    }
}
