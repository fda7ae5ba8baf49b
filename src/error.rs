//! Error type for host and event lookups.
//!
//! Most of the core follows a soft no-op policy: refreshing an unmounted
//! node, arithmetic on text state or rendering a missing page simply does
//! nothing. Errors only surface where a caller addresses something by name.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no host element with id `{id}`")]
    ElementNotFound { id: String },

    #[error("unknown state event `{name}`")]
    UnknownEvent { name: String },
}

impl Error {
    pub fn element_not_found(id: impl Into<String>) -> Self {
        Self::ElementNotFound { id: id.into() }
    }
}
