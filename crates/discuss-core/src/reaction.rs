//! Reaction and flag aggregation
//!
//! Counters on a comment are derived aggregates: they must always equal the
//! number of currently-active `(comment, user, kind)` records held here. At
//! most one reaction record and one flag record exist per `(comment, user)`
//! pair; reacting again with a different kind moves the record.

use crate::error::{DiscussError, Result};
use crate::types::{CommentId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Per-kind counters stored on a comment record
pub type KindCounts = BTreeMap<String, u64>;

/// Active reaction and flag records for one root scope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactionBoard {
    /// Active reaction kind per (comment, user)
    #[serde(default)]
    reactions: HashMap<CommentId, HashMap<UserId, String>>,
    /// Active flag kind per (comment, user)
    #[serde(default)]
    flags: HashMap<CommentId, HashMap<UserId, String>>,
}

impl ReactionBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's currently active reaction kind on a comment, if any
    pub fn active_reaction(&self, comment: &CommentId, user: &UserId) -> Option<&str> {
        self.reactions
            .get(comment)
            .and_then(|users| users.get(user))
            .map(String::as_str)
    }

    /// The user's currently active flag kind on a comment, if any
    pub fn active_flag(&self, comment: &CommentId, user: &UserId) -> Option<&str> {
        self.flags
            .get(comment)
            .and_then(|users| users.get(user))
            .map(String::as_str)
    }

    /// Record a reaction; returns whether counters changed
    ///
    /// Re-applying the active kind is a no-op. A different kind decrements
    /// the old kind and increments the new one, leaving the total unchanged.
    pub fn add_reaction(
        &mut self,
        comment: &CommentId,
        user: &UserId,
        kind: &str,
        allowed: &[String],
        counters: &mut KindCounts,
    ) -> Result<bool> {
        apply_add(&mut self.reactions, comment, user, kind, allowed, counters)
    }

    /// Remove the user's active reaction; no-op if there is none
    pub fn remove_reaction(
        &mut self,
        comment: &CommentId,
        user: &UserId,
        counters: &mut KindCounts,
    ) -> bool {
        apply_remove(&mut self.reactions, comment, user, counters)
    }

    /// Record a flag; same semantics as reactions over the flag enumeration
    pub fn add_flag(
        &mut self,
        comment: &CommentId,
        user: &UserId,
        kind: &str,
        allowed: &[String],
        counters: &mut KindCounts,
    ) -> Result<bool> {
        apply_add(&mut self.flags, comment, user, kind, allowed, counters)
    }

    /// Remove the user's active flag; no-op if there is none
    pub fn remove_flag(
        &mut self,
        comment: &CommentId,
        user: &UserId,
        counters: &mut KindCounts,
    ) -> bool {
        apply_remove(&mut self.flags, comment, user, counters)
    }

    /// Drop all active records for a deleted comment
    pub fn forget_comment(&mut self, comment: &CommentId) {
        self.reactions.remove(comment);
        self.flags.remove(comment);
    }
}

#[cfg(test)]
impl ReactionBoard {
    fn reaction_record_count(&self, comment: &CommentId) -> usize {
        self.reactions.get(comment).map(HashMap::len).unwrap_or(0)
    }
}

fn apply_add(
    active: &mut HashMap<CommentId, HashMap<UserId, String>>,
    comment: &CommentId,
    user: &UserId,
    kind: &str,
    allowed: &[String],
    counters: &mut KindCounts,
) -> Result<bool> {
    if !allowed.iter().any(|k| k == kind) {
        return Err(DiscussError::InvalidKind(kind.to_string()));
    }

    let users = active.entry(*comment).or_default();
    match users.get(user) {
        Some(current) if current == kind => Ok(false),
        Some(current) => {
            let previous = current.clone();
            decrement(counters, &previous);
            increment(counters, kind);
            users.insert(user.clone(), kind.to_string());
            Ok(true)
        }
        None => {
            increment(counters, kind);
            users.insert(user.clone(), kind.to_string());
            Ok(true)
        }
    }
}

fn apply_remove(
    active: &mut HashMap<CommentId, HashMap<UserId, String>>,
    comment: &CommentId,
    user: &UserId,
    counters: &mut KindCounts,
) -> bool {
    let Some(users) = active.get_mut(comment) else {
        return false;
    };
    let Some(kind) = users.remove(user) else {
        return false;
    };
    if users.is_empty() {
        active.remove(comment);
    }
    decrement(counters, &kind);
    true
}

fn increment(counters: &mut KindCounts, kind: &str) {
    *counters.entry(kind.to_string()).or_insert(0) += 1;
}

// Counters never go negative; a zeroed kind is dropped from the map.
fn decrement(counters: &mut KindCounts, kind: &str) {
    if let Some(count) = counters.get_mut(kind) {
        *count = count.saturating_sub(1);
        if *count == 0 {
            counters.remove(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["like".to_string(), "love".to_string(), "laugh".to_string()]
    }

    fn setup() -> (ReactionBoard, CommentId, UserId, KindCounts) {
        (
            ReactionBoard::new(),
            CommentId::new(),
            UserId::from_string("user-1"),
            KindCounts::new(),
        )
    }

    #[test]
    fn test_add_reaction() {
        let (mut board, comment, user, mut counts) = setup();

        let changed = board
            .add_reaction(&comment, &user, "like", &allowed(), &mut counts)
            .unwrap();

        assert!(changed);
        assert_eq!(counts.get("like"), Some(&1));
        assert_eq!(board.active_reaction(&comment, &user), Some("like"));
    }

    #[test]
    fn test_add_same_kind_is_idempotent() {
        let (mut board, comment, user, mut counts) = setup();

        board
            .add_reaction(&comment, &user, "like", &allowed(), &mut counts)
            .unwrap();
        let changed = board
            .add_reaction(&comment, &user, "like", &allowed(), &mut counts)
            .unwrap();

        assert!(!changed);
        assert_eq!(counts.get("like"), Some(&1));
    }

    #[test]
    fn test_changing_kind_moves_the_record() {
        let (mut board, comment, user, mut counts) = setup();

        board
            .add_reaction(&comment, &user, "like", &allowed(), &mut counts)
            .unwrap();
        board
            .add_reaction(&comment, &user, "love", &allowed(), &mut counts)
            .unwrap();

        assert_eq!(counts.get("like"), None);
        assert_eq!(counts.get("love"), Some(&1));
        assert_eq!(counts.values().sum::<u64>(), 1);
        assert_eq!(board.active_reaction(&comment, &user), Some("love"));
    }

    #[test]
    fn test_invalid_kind_rejected() {
        let (mut board, comment, user, mut counts) = setup();

        let result = board.add_reaction(&comment, &user, "meh", &allowed(), &mut counts);
        assert!(matches!(result, Err(DiscussError::InvalidKind(_))));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_remove_reaction() {
        let (mut board, comment, user, mut counts) = setup();

        board
            .add_reaction(&comment, &user, "like", &allowed(), &mut counts)
            .unwrap();
        assert!(board.remove_reaction(&comment, &user, &mut counts));

        assert_eq!(counts.get("like"), None);
        assert_eq!(board.active_reaction(&comment, &user), None);
    }

    #[test]
    fn test_remove_without_active_is_noop() {
        let (mut board, comment, user, mut counts) = setup();

        assert!(!board.remove_reaction(&comment, &user, &mut counts));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_reactions_and_flags_are_independent() {
        let (mut board, comment, user, mut reactions) = setup();
        let mut flags = KindCounts::new();
        let flag_kinds = vec!["spam".to_string()];

        board
            .add_reaction(&comment, &user, "like", &allowed(), &mut reactions)
            .unwrap();
        board
            .add_flag(&comment, &user, "spam", &flag_kinds, &mut flags)
            .unwrap();

        assert_eq!(board.active_reaction(&comment, &user), Some("like"));
        assert_eq!(board.active_flag(&comment, &user), Some("spam"));

        // Removing the flag leaves the reaction untouched
        board.remove_flag(&comment, &user, &mut flags);
        assert_eq!(board.active_reaction(&comment, &user), Some("like"));
        assert!(flags.is_empty());
        assert_eq!(reactions.get("like"), Some(&1));
    }

    #[test]
    fn test_multiple_users_accumulate() {
        let (mut board, comment, _, mut counts) = setup();

        for i in 0..3 {
            let user = UserId::from_string(format!("user-{}", i));
            board
                .add_reaction(&comment, &user, "like", &allowed(), &mut counts)
                .unwrap();
        }

        assert_eq!(counts.get("like"), Some(&3));
        assert_eq!(board.reaction_record_count(&comment), 3);
    }

    #[test]
    fn test_forget_comment() {
        let (mut board, comment, user, mut counts) = setup();

        board
            .add_reaction(&comment, &user, "like", &allowed(), &mut counts)
            .unwrap();
        board.forget_comment(&comment);

        assert_eq!(board.active_reaction(&comment, &user), None);
        assert_eq!(board.reaction_record_count(&comment), 0);
    }

    #[test]
    fn test_board_serialization() {
        let (mut board, comment, user, mut counts) = setup();
        board
            .add_reaction(&comment, &user, "like", &allowed(), &mut counts)
            .unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let board2: ReactionBoard = serde_json::from_str(&json).unwrap();
        assert_eq!(board2.active_reaction(&comment, &user), Some("like"));
    }
}
