//! Error types for the rules engine and search.
//!
//! Rule violations surface immediately and abort the operation. The search
//! engine only ever propagates these; hitting one during search means the
//! rules engine or the tree is inconsistent.

/// Errors raised by card construction, pile handling and board transitions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bad rank or suit at construction.
    #[error("validation error: {0}")]
    Validation(String),

    /// A play that is not available to the acting player.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Combat or suit powers resolved without an active boss.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Drawing from a pile with nothing left to draw.
    #[error("cannot draw from empty {0}")]
    EmptyPile(&'static str),

    /// Drawing a new boss while one is still in play.
    #[error("duplicate state: {0}")]
    DuplicateState(String),

    /// Caller supplied an argument outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Search was asked for a decision in a state with no legal moves.
    #[error("no legal moves available from current state")]
    NoLegalMoves,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
