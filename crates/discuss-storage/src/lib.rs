//! discuss-storage - Storage backends for discuss
//!
//! This crate provides scope storage implementations for the comment store.

mod scope_store;

pub use scope_store::FileSystemStorage;
