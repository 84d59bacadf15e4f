//! Comment store: models, validation, persistence and the public facade

mod model;
mod persistence;
mod store;
mod validator;

pub use model::{Comment, NewComment};
pub use persistence::{ScopeSnapshot, ScopeStorage, CURRENT_SCHEMA_VERSION};
pub use store::CommentStore;
pub use validator::CommentValidator;

#[cfg(test)]
pub(crate) use persistence::memory;
