//! discuss-core - Core library for discuss
//!
//! This crate provides the core business logic for the threaded discussion
//! store, including the comment tree engine, the write-time content pipeline,
//! reaction/flag aggregation, and the comment store facade.

pub mod error;
pub mod types;
pub mod config;
pub mod content;
pub mod tree;
pub mod reaction;
pub mod store;

pub use error::{DiscussError, Result};
pub use types::*;
