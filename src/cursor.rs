use crate::error::{QueueError, Result};
use crate::queue::Queue;

/// A position in a [`Queue`]. It is returned by [`Queue::push`],
/// [`Queue::begin`], [`Queue::end`] and [`Queue::back_cursor`], and
/// can be stepped in either direction or passed to [`Queue::remove`].
///
/// A cursor is either at an element, at the end (one past the back),
/// or at the sentinel (one before the front). Only a cursor at an
/// element can be read.
///
/// Cursors do not borrow the queue. Each one carries the generation
/// of the element it refers to, so once that element is popped or
/// removed the cursor is reported as [`QueueError::InvalidCursor`]
/// instead of reaching whatever element came to occupy its slot.
///
/// While the type system allows it, using a `Cursor` with a queue
/// other than the one that created it will result in (likely)
/// unexpected behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    focus: Focus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Focus {
    Sentinel,
    Node { ix: usize, generation: usize },
    End,
}

impl Cursor {
    pub(crate) fn new(focus: Focus) -> Self {
        Self { focus }
    }

    pub(crate) fn focus(&self) -> Focus {
        self.focus
    }

    pub(crate) fn node(&self) -> Option<(usize, usize)> {
        match self.focus {
            Focus::Node { ix, generation } => Some((ix, generation)),
            Focus::Sentinel | Focus::End => None,
        }
    }

    /// True when the cursor is one past the back of the queue.
    pub fn is_end(&self) -> bool {
        self.focus == Focus::End
    }

    /// True when the cursor is one before the front of the queue. This
    /// is where stepping backward from the front element lands.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::{Queue, QueueError};
    ///
    /// let mut q = Queue::new();
    /// let mut c = q.push(1);
    ///
    /// c.step_backward(&q).unwrap();
    /// assert!(c.is_sentinel());
    /// assert_eq!(Err(QueueError::InvalidCursor), c.read(&q));
    ///
    /// c.step_forward(&q).unwrap();
    /// assert_eq!(Ok(1), c.read(&q));
    /// ```
    pub fn is_sentinel(&self) -> bool {
        self.focus == Focus::Sentinel
    }

    /// Move the cursor towards the back of `queue`. Stepping past the
    /// back element reaches the end; the end does not move.
    ///
    /// If the element under the cursor has been removed, the cursor is
    /// left unchanged and `InvalidCursor` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let q: Queue<u8> = (1..=3).collect();
    ///
    /// let mut c = q.begin();
    /// let mut seen = Vec::new();
    /// while c != q.end() {
    ///     seen.push(c.read(&q).unwrap());
    ///     c.step_forward(&q).unwrap();
    /// }
    ///
    /// assert_eq!(vec![1, 2, 3], seen);
    /// ```
    pub fn step_forward<T>(&mut self, queue: &Queue<T>) -> Result<()> {
        *self = queue.successor(self)?;
        Ok(())
    }

    /// Move the cursor towards the front of `queue`. Stepping back from
    /// the front element reaches the sentinel; neither the sentinel nor
    /// the end moves.
    ///
    /// If the element under the cursor has been removed, the cursor is
    /// left unchanged and `InvalidCursor` is returned.
    pub fn step_backward<T>(&mut self, queue: &Queue<T>) -> Result<()> {
        *self = queue.predecessor(self)?;
        Ok(())
    }

    /// Return a reference to the element under the cursor.
    pub fn get<'q, T>(&self, queue: &'q Queue<T>) -> Result<&'q T> {
        queue.get(self)
    }

    /// Return a copy of the element under the cursor.
    pub fn read<T: Clone>(&self, queue: &Queue<T>) -> Result<T> {
        self.get(queue).map(T::clone)
    }
}
