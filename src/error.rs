use crate::cards::street::Street;

/// crate-wide error taxonomy.
///
/// training errors abort the offending traversal unless they are
/// invariant violations, which abort the whole batch. the query
/// service recovers from Abstraction and Artifact errors by falling
/// back to its equity heuristic.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("illegal action for game state: {0}")]
    InvalidState(String),
    #[error("no centroid table loaded for {0}")]
    Abstraction(Street),
    #[error("strategy artifact unusable: {0}")]
    Artifact(String),
    #[error("invariant violation: {0}")]
    Invariant(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
