//! A first-in-first-out queue that allows elements to be removed from
//! the middle of the queue through a [`Cursor`], in addition to being
//! popped from the front.
//!
//! Internally, the queue uses a `Vec` of slots and links elements by
//! index. The position before the first element is a permanent
//! sentinel. The sentinel holds no value, so a cursor that steps back
//! past the first element lands on a position that can be detected
//! with [`Cursor::is_sentinel`] and is never readable.
//!
//! As items are removed from the queue, their slots are put on an
//! internal free list which is used by later pushes before the `Vec`
//! grows. Every element is stamped with a generation number, so a
//! cursor to a removed element is reported as
//! [`QueueError::InvalidCursor`] rather than reading whatever element
//! came to occupy the same slot.
//!
//! The queue has no internal synchronization. Sharing it between
//! threads requires an external lock.
//!
//! # Examples
//!
//! ```
//! use cursor_queue::Queue;
//!
//! let mut q = Queue::new();
//! q.push("a");
//! let mut b = q.push("b");
//! q.push("c");
//!
//! assert_eq!(Ok(Some("b")), q.remove(&mut b));
//! assert_eq!(Ok("a"), q.pop());
//! assert_eq!(Ok("c"), q.pop());
//! assert!(q.is_empty());
//! ```

mod cursor;
mod error;
mod iterators;
mod queue;
mod slot;

pub use crate::cursor::Cursor;
pub use crate::error::{QueueError, Result};
pub use crate::iterators::{Drain, Iter, IterRev};
pub use crate::queue::Queue;
