use crate::cursor::{Cursor, Focus};
use crate::error::{QueueError, Result};
use crate::iterators::{Drain, Iter, IterRev};
use crate::slot::{Link, Node, Sentinel, Slot};
use std::fmt;
use std::iter::FromIterator;
use tracing::{debug, trace};

/// A first-in-first-out queue whose elements can also be removed from
/// the middle through a [`Cursor`].
///
/// The queue cannot be cloned. Values are moved in by [`push`] and
/// copied out by [`top`] and [`Cursor::read`], so changing a value
/// after pushing it is never observed through the queue.
///
/// [`push`]: #method.push
/// [`top`]: #method.top
pub struct Queue<T> {
    // Index of the first element on the free list.
    free_list: Option<usize>,
    // The position before the first element.
    sentinel: Sentinel,
    // The last element. The sentinel when the queue is empty.
    tail: Link,
    // The next generation number.
    next_generation: usize,
    // The number of slots currently used by elements.
    len_used: usize,
    // The number of slots currently on the free list.
    len_free: usize,
    // The memory backing every element.
    slots: Vec<Slot<T>>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Queue<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Queue<T> {
    /// Creates an empty `Queue`. No allocations are performed until
    /// values are added.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let queue: Queue<u32> = Queue::new();
    /// assert!(queue.is_empty());
    /// ```
    pub fn new() -> Queue<T> {
        Queue {
            free_list: None,
            sentinel: Sentinel::default(),
            tail: Link::Sentinel,
            next_generation: 0,
            len_used: 0,
            len_free: 0,
            slots: Vec::new(),
        }
    }

    /// Create a new `Queue` with a free list `capacity` slots deep.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let queue: Queue<u32> = Queue::with_capacity(16);
    /// assert_eq!(16, queue.len_freelist());
    /// ```
    pub fn with_capacity(capacity: usize) -> Queue<T> {
        let mut vec = Vec::with_capacity(capacity);

        let mut next = None;
        for i in 0..capacity {
            vec.push(Slot::new_free(next));
            next = Some(i);
        }

        Queue {
            free_list: next,
            sentinel: Sentinel::default(),
            tail: Link::Sentinel,
            next_generation: 0,
            len_used: 0,
            len_free: capacity,
            slots: vec,
        }
    }

    /// Reserves capacity for at least `additional` more elements. This
    /// only grows the underlying `Vec`; it does not add slots to the
    /// free list.
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional)
    }

    /// Returns how many slots the internal vector can hold without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let q: Queue<u8> = Queue::with_capacity(16);
    /// assert_eq!(16, q.capacity());
    /// ```
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// The number of elements in the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let mut q: Queue<u8> = Queue::new();
    ///
    /// q.push(1);
    /// q.push(2);
    /// assert_eq!(2, q.len());
    ///
    /// q.pop().unwrap();
    /// assert_eq!(1, q.len());
    /// ```
    pub fn len(&self) -> usize {
        self.len_used
    }

    /// True when the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        0 == self.len_used
    }

    /// The number of slots on the queue's free list.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let mut q: Queue<u8> = Queue::new();
    ///
    /// q.push(1);
    /// assert_eq!(0, q.len_freelist());
    ///
    /// q.pop().unwrap();
    /// assert_eq!(1, q.len_freelist());
    ///
    /// q.push(2);
    /// assert_eq!(0, q.len_freelist());
    /// ```
    pub fn len_freelist(&self) -> usize {
        self.len_free
    }

    /// Append `data` to the back of the queue. Returns a cursor at the
    /// new element.
    ///
    /// Cursors to elements already in the queue stay valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let mut q = Queue::new();
    /// let c = q.push(10);
    ///
    /// assert_eq!(Ok(&10), q.get(&c));
    /// assert_eq!(c, q.begin());
    /// ```
    pub fn push(&mut self, data: T) -> Cursor {
        let (new_ix, new_generation) = self.allocate(self.tail, None, data);

        // Hang the new element off the old tail, which may be the
        // sentinel.
        match self.tail {
            Link::Sentinel => self.sentinel.next = Some(new_ix),
            Link::Node(tail) => self.node_mut(tail).set_next(Some(new_ix)),
        }
        self.tail = Link::Node(new_ix);

        Cursor::new(Focus::Node {
            ix: new_ix,
            generation: new_generation,
        })
    }

    /// Remove the front element and return it.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::{Queue, QueueError};
    ///
    /// let mut q = Queue::new();
    /// q.push(10);
    /// q.push(20);
    ///
    /// assert_eq!(Ok(10), q.pop());
    /// assert_eq!(Ok(20), q.pop());
    /// assert_eq!(Err(QueueError::EmptyQueue), q.pop());
    /// ```
    pub fn pop(&mut self) -> Result<T> {
        match self.sentinel.next {
            Some(front) => {
                trace!(index = front, "popping front element");
                let (_, data, _) = self.unlink(front);
                Ok(data)
            }
            None => {
                debug!("pop rejected on an empty queue");
                Err(QueueError::EmptyQueue)
            }
        }
    }

    /// A reference to the front element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::{Queue, QueueError};
    ///
    /// let mut q = Queue::new();
    /// assert_eq!(Err(QueueError::EmptyQueue), q.peek());
    ///
    /// q.push(10);
    /// assert_eq!(Ok(&10), q.peek());
    /// ```
    pub fn peek(&self) -> Result<&T> {
        match self.sentinel.next {
            Some(front) => Ok(self.node(front).data()),
            None => Err(QueueError::EmptyQueue),
        }
    }

    /// A mutable reference to the front element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let mut q = Queue::new();
    /// q.push(10);
    ///
    /// if let Ok(v) = q.peek_mut() {
    ///     *v += 10;
    /// }
    ///
    /// assert_eq!(Ok(&20), q.peek());
    /// ```
    pub fn peek_mut(&mut self) -> Result<&mut T> {
        match self.sentinel.next {
            Some(front) => Ok(self.node_mut(front).data_mut()),
            None => Err(QueueError::EmptyQueue),
        }
    }

    /// Get a reference to the element at `cursor`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::{Queue, QueueError};
    ///
    /// let mut q = Queue::new();
    /// let c = q.push(10);
    /// assert_eq!(Ok(&10), q.get(&c));
    ///
    /// // Popping the element invalidates the cursor.
    /// q.pop().unwrap();
    /// assert_eq!(Err(QueueError::InvalidCursor), q.get(&c));
    /// ```
    pub fn get(&self, cursor: &Cursor) -> Result<&T> {
        self.resolve(cursor).map(|ix| self.node(ix).data())
    }

    /// Get a mutable reference to the element at `cursor`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let mut q = Queue::new();
    /// let c = q.push(10);
    ///
    /// if let Ok(v) = q.get_mut(&c) {
    ///     *v += 10;
    /// }
    ///
    /// assert_eq!(Ok(&20), q.get(&c));
    /// ```
    pub fn get_mut(&mut self, cursor: &Cursor) -> Result<&mut T> {
        let (ix, generation) = cursor.node().ok_or(QueueError::InvalidCursor)?;

        self.slots
            .get_mut(ix)
            .and_then(|s| s.get_used_mut())
            .and_then(|n| n.as_generation_mut(generation))
            .map(|n| n.data_mut())
            .ok_or(QueueError::InvalidCursor)
    }

    /// True when `cursor` refers to an element still in the queue.
    pub fn contains(&self, cursor: &Cursor) -> bool {
        self.resolve(cursor).is_ok()
    }

    /// Remove the element at `cursor` and return it.
    ///
    /// An end cursor is a no-op and returns `Ok(None)`. A sentinel
    /// cursor or a cursor to an element that was already removed is
    /// rejected with [`QueueError::InvalidCursor`] and the queue is
    /// left unchanged.
    ///
    /// On success the cursor is moved to a neighbour that is still in
    /// the queue:
    ///
    /// * removing the front or an interior element moves it to the
    ///   following element, or to the end when there is none;
    /// * removing the back of a queue with more than one element moves
    ///   it to the new back.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let mut q = Queue::new();
    /// q.push(1);
    /// let mut c = q.push(2);
    /// q.push(3);
    ///
    /// assert_eq!(Ok(Some(2)), q.remove(&mut c));
    /// assert_eq!(Ok(&3), q.get(&c));
    /// assert_eq!(vec![&1, &3], q.iter().collect::<Vec<_>>());
    ///
    /// let mut end = q.end();
    /// assert_eq!(Ok(None), q.remove(&mut end));
    /// assert_eq!(2, q.len());
    /// ```
    pub fn remove(&mut self, cursor: &mut Cursor) -> Result<Option<T>> {
        if cursor.is_end() {
            return Ok(None);
        }

        let ix = match self.resolve(cursor) {
            Ok(ix) => ix,
            Err(e) => {
                debug!(?cursor, "remove rejected for a cursor outside the queue");
                return Err(e);
            }
        };

        let (prev, data, next) = self.unlink(ix);

        *cursor = match (prev, next) {
            // The back was removed and something is still in front of it.
            (Link::Node(prev), None) => self.cursor_at(prev),
            (_, Some(next)) => self.cursor_at(next),
            (Link::Sentinel, None) => self.end(),
        };

        Ok(Some(data))
    }

    /// Remove every element. Cursors into the queue become invalid;
    /// the slots are kept for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let mut q: Queue<u8> = (0..4).collect();
    /// let c = q.begin();
    ///
    /// q.clear();
    ///
    /// assert!(q.is_empty());
    /// assert!(!q.contains(&c));
    /// ```
    pub fn clear(&mut self) {
        trace!(len = self.len_used, "clearing queue");

        let mut next = None;
        for (ix, slot) in self.slots.iter_mut().enumerate() {
            *slot = Slot::new_free(next);
            next = Some(ix);
        }

        self.free_list = next;
        self.len_free = self.slots.len();
        self.len_used = 0;
        self.sentinel.next = None;
        self.tail = Link::Sentinel;
    }

    /// A cursor at the front element, or the end cursor when the queue
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let mut q: Queue<u8> = Queue::new();
    /// assert_eq!(q.end(), q.begin());
    ///
    /// q.push(1);
    /// assert_eq!(Ok(1), q.begin().read(&q));
    /// ```
    pub fn begin(&self) -> Cursor {
        match self.sentinel.next {
            Some(front) => self.cursor_at(front),
            None => self.end(),
        }
    }

    /// The end cursor. It compares equal to any cursor stepped past the
    /// back of the queue and never refers to an element.
    pub fn end(&self) -> Cursor {
        Cursor::new(Focus::End)
    }

    /// A cursor at the back element, or the end cursor when the queue
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let q: Queue<u8> = (1..=3).collect();
    /// assert_eq!(Ok(3), q.back_cursor().read(&q));
    /// ```
    pub fn back_cursor(&self) -> Cursor {
        match self.tail {
            Link::Node(tail) => self.cursor_at(tail),
            Link::Sentinel => self.end(),
        }
    }

    /// Iterate over the queue from front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let q: Queue<u8> = (1..=3).collect();
    /// assert_eq!(vec![&1, &2, &3], q.iter().collect::<Vec<_>>());
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self, self.sentinel.next, self.len_used)
    }

    /// Iterate over the queue from back to front.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let q: Queue<u8> = (1..=3).collect();
    /// assert_eq!(vec![&3, &2, &1], q.iter_rev().collect::<Vec<_>>());
    /// ```
    pub fn iter_rev(&self) -> IterRev<T> {
        let back = match self.tail {
            Link::Node(tail) => Some(tail),
            Link::Sentinel => None,
        };
        IterRev::new(self, back, self.len_used)
    }

    /// A draining iterator that pops elements from the front. Elements
    /// not yet yielded when it is dropped stay in the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::Queue;
    ///
    /// let mut q: Queue<u8> = (1..=3).collect();
    ///
    /// assert_eq!(vec![1, 2, 3], q.drain().collect::<Vec<_>>());
    /// assert!(q.is_empty());
    /// assert_eq!(3, q.len_freelist());
    /// ```
    pub fn drain(&mut self) -> Drain<T> {
        Drain::new(self)
    }

    /// The cursor following `cursor`.
    pub(crate) fn successor(&self, cursor: &Cursor) -> Result<Cursor> {
        match cursor.focus() {
            Focus::End => Ok(self.end()),
            Focus::Sentinel => Ok(self.begin()),
            Focus::Node { .. } => {
                let ix = self.resolve(cursor)?;
                Ok(match self.node(ix).next() {
                    Some(next) => self.cursor_at(next),
                    None => self.end(),
                })
            }
        }
    }

    /// The cursor preceding `cursor`. The end and sentinel positions
    /// do not move.
    pub(crate) fn predecessor(&self, cursor: &Cursor) -> Result<Cursor> {
        match cursor.focus() {
            Focus::End | Focus::Sentinel => Ok(*cursor),
            Focus::Node { .. } => {
                let ix = self.resolve(cursor)?;
                Ok(match self.node(ix).prev() {
                    Link::Node(prev) => self.cursor_at(prev),
                    Link::Sentinel => Cursor::new(Focus::Sentinel),
                })
            }
        }
    }

    pub(crate) fn node(&self, ix: usize) -> &Node<T> {
        self.slots[ix]
            .get_used()
            .unwrap_or_else(|| unreachable!("linked slot {} is on the free list", ix))
    }

    fn node_mut(&mut self, ix: usize) -> &mut Node<T> {
        self.slots[ix]
            .get_used_mut()
            .unwrap_or_else(|| unreachable!("linked slot {} is on the free list", ix))
    }

    fn cursor_at(&self, ix: usize) -> Cursor {
        Cursor::new(Focus::Node {
            ix,
            generation: self.node(ix).generation(),
        })
    }

    // The slot index `cursor` refers to, if that element is still in
    // the queue.
    fn resolve(&self, cursor: &Cursor) -> Result<usize> {
        let (ix, generation) = cursor.node().ok_or(QueueError::InvalidCursor)?;

        self.slots
            .get(ix)
            .and_then(|s| s.get_used())
            .and_then(|n| n.as_generation(generation))
            .map(|_| ix)
            .ok_or(QueueError::InvalidCursor)
    }

    // Detach the element at `ix` from its neighbours and release its
    // slot. Returns the old neighbours and the element.
    fn unlink(&mut self, ix: usize) -> (Link, T, Option<usize>) {
        let (prev, data, next) = self.free(ix).take();

        match (prev, next) {
            (Link::Sentinel, next) => {
                trace!(index = ix, "unlinking front element");
                debug_assert_eq!(Some(ix), self.sentinel.next);
                self.sentinel.next = next;
                match next {
                    Some(next) => self.node_mut(next).set_prev(Link::Sentinel),
                    None => {
                        debug_assert_eq!(Link::Node(ix), self.tail);
                        self.tail = Link::Sentinel;
                    }
                }
            }
            (Link::Node(prev), None) => {
                trace!(index = ix, "unlinking back element");
                debug_assert_eq!(Link::Node(ix), self.tail);
                self.node_mut(prev).set_next(None);
                self.tail = Link::Node(prev);
            }
            (Link::Node(prev), Some(next)) => {
                trace!(index = ix, "unlinking interior element");
                self.node_mut(prev).set_next(Some(next));
                self.node_mut(next).set_prev(Link::Node(prev));
            }
        }

        (prev, data, next)
    }

    fn allocate(&mut self, prev: Link, next: Option<usize>, data: T) -> (usize, usize) {
        // A cursor is only rejected after removal because its
        // generation differs from whatever occupies the slot now, so
        // generations must never repeat.
        let generation = self.next_generation;
        self.next_generation = self
            .next_generation
            .checked_add(1)
            .expect("queue generation counter overflowed");

        self.len_used += 1;

        let s = Slot::new_used(prev, next, generation, data);

        let ix = match self.free_list {
            None => {
                self.slots.push(s);
                self.slots.len() - 1
            }
            Some(ix) => {
                debug_assert!(self.slots[ix].get_free().is_some());
                self.free_list = self.slots[ix].get_free().and_then(|f| f.next());
                self.slots[ix] = s;
                self.len_free -= 1;
                ix
            }
        };

        (ix, generation)
    }

    fn free(&mut self, ix: usize) -> Node<T> {
        debug_assert!(self.slots[ix].get_used().is_some());

        self.len_used -= 1;

        let mut v = Slot::new_free(self.free_list);
        std::mem::swap(&mut v, &mut self.slots[ix]);
        self.free_list = Some(ix);
        self.len_free += 1;

        v.into_used()
            .unwrap_or_else(|| unreachable!("released slot {} was not in use", ix))
    }
}

impl<T: Clone> Queue<T> {
    /// A copy of the front element.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_queue::{Queue, QueueError};
    ///
    /// let mut q = Queue::new();
    /// assert_eq!(Err(QueueError::EmptyQueue), q.top());
    ///
    /// q.push(String::from("front"));
    /// q.push(String::from("back"));
    /// assert_eq!(Ok(String::from("front")), q.top());
    /// assert_eq!(2, q.len());
    /// ```
    pub fn top(&self) -> Result<T> {
        self.peek().map(T::clone)
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut q = Self::new();
        q.extend(iter);
        q
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for i in iter {
            self.push(i);
        }
    }
}

impl<'a, T: Clone + 'a> Extend<&'a T> for Queue<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for i in iter {
            self.push(i.clone());
        }
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
