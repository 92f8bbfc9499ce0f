use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueueError>;

/// Errors reported when a precondition of a queue or cursor operation
/// does not hold. The queue is left unchanged whenever one of these is
/// returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// `pop`, `top` or `peek` was called on a queue with no elements.
    #[error("queue is empty")]
    EmptyQueue,

    /// The cursor is at the end position, at the sentinel position, or
    /// refers to an element that has since been removed.
    #[error("cursor does not refer to an element in the queue")]
    InvalidCursor,
}
