//! Hierarchical ordering metadata for comment trees

mod engine;

pub use engine::{Placement, TreeEngine};
