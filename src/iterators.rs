use crate::queue::Queue;
use crate::slot::Link;

/// An iterator over the queue starting from the front. It is
/// constructed from the [`iter`] method on `Queue`.
///
/// [`iter`]: struct.Queue.html#method.iter
pub struct Iter<'l, T> {
    target: &'l Queue<T>,
    next_index: Option<usize>,
    remaining: usize,
}

impl<'l, T> Iter<'l, T> {
    pub(crate) fn new(target: &'l Queue<T>, next_index: Option<usize>, remaining: usize) -> Self {
        Self {
            target,
            next_index,
            remaining,
        }
    }
}

impl<'l, T> Iterator for Iter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        let ix = self.next_index?;
        let r = self.target.node(ix);
        self.next_index = r.next();
        self.remaining -= 1;
        Some(r.data())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'l, T> ExactSizeIterator for Iter<'l, T> {}

/// An iterator over the queue starting from the back. It is
/// constructed from the [`iter_rev`] method on `Queue`.
///
/// [`iter_rev`]: struct.Queue.html#method.iter_rev
pub struct IterRev<'l, T> {
    target: &'l Queue<T>,
    next_index: Option<usize>,
    remaining: usize,
}

impl<'l, T> IterRev<'l, T> {
    pub(crate) fn new(target: &'l Queue<T>, next_index: Option<usize>, remaining: usize) -> Self {
        Self {
            target,
            next_index,
            remaining,
        }
    }
}

impl<'l, T> Iterator for IterRev<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        let ix = self.next_index?;
        let r = self.target.node(ix);
        self.next_index = match r.prev() {
            Link::Node(prev) => Some(prev),
            Link::Sentinel => None,
        };
        self.remaining -= 1;
        Some(r.data())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'l, T> ExactSizeIterator for IterRev<'l, T> {}

/// A draining iterator that pops the queue from the front. It is
/// constructed from the [`drain`] method on `Queue`.
///
/// [`drain`]: struct.Queue.html#method.drain
pub struct Drain<'l, T> {
    target: &'l mut Queue<T>,
}

impl<'l, T> Drain<'l, T> {
    pub(crate) fn new(target: &'l mut Queue<T>) -> Self {
        Self { target }
    }
}

impl<'l, T> Iterator for Drain<'l, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.target.is_empty() {
            None
        } else {
            self.target.pop().ok()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.target.len(), Some(self.target.len()))
    }
}

impl<'l, T> ExactSizeIterator for Drain<'l, T> {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn filter_can_find_items() {
        let mut q = Queue::new();
        q.push(10u8);
        q.push(11u8);
        q.push(12u8);

        assert_eq!(Some(&10), q.iter().find(|i| **i == 10));
        assert_eq!(Some(&11), q.iter().find(|i| **i == 11));
        assert_eq!(Some(&12), q.iter().find(|i| **i == 12));
        assert_eq!(None, q.iter().find(|i| **i == 13));
    }

    #[test]
    fn iterator_filter_can_find_duplicates() {
        let q: Queue<u8> = (10..15).collect();

        let mut s = q.iter().filter(|i| 0 == *i % 2);

        assert_eq!(Some(&10), s.next());
        assert_eq!(Some(&12), s.next());
        assert_eq!(Some(&14), s.next());
        assert_eq!(None, s.next());

        let mut s = q.iter_rev().filter(|i| 0 == *i % 2);

        assert_eq!(Some(&14), s.next());
        assert_eq!(Some(&12), s.next());
        assert_eq!(Some(&10), s.next());
        assert_eq!(None, s.next());
    }

    #[test]
    fn iters_find_everything() {
        let mut q = Queue::new();
        q.push(10u8);
        let mut c = q.push(11u8);
        q.push(12u8);

        assert_eq!(vec![&10, &11, &12], q.iter().collect::<Vec<&u8>>());
        assert_eq!(vec![&12, &11, &10], q.iter_rev().collect::<Vec<&u8>>());
        assert_eq!(3, q.iter().len());

        q.remove(&mut c).unwrap();

        assert_eq!(vec![&10, &12], q.iter().collect::<Vec<&u8>>());
        assert_eq!(vec![&12, &10], q.iter_rev().collect::<Vec<&u8>>());
        assert_eq!(2, q.iter_rev().len());
    }

    #[test]
    fn for_loop_over_reference() {
        let q: Queue<u8> = (1..=3).collect();
        let mut sum = 0;
        for v in &q {
            sum += *v;
        }
        assert_eq!(6, sum);
    }

    #[test]
    fn drain_finds_everything_and_leaves_slots_free() {
        let mut q: Queue<u8> = (10..13).collect();

        assert_eq!(0, q.len_freelist());
        assert_eq!(vec![10, 11, 12], q.drain().collect::<Vec<u8>>());
        assert_eq!(3, q.len_freelist());
        assert!(q.is_empty());
    }

    #[test]
    fn dropped_drain_keeps_the_rest() {
        let mut q: Queue<u8> = (1..=4).collect();

        {
            let mut d = q.drain();
            assert_eq!(4, d.len());
            assert_eq!(Some(1), d.next());
            assert_eq!(Some(2), d.next());
        }

        assert_eq!(vec![&3, &4], q.iter().collect::<Vec<_>>());
        assert_eq!(Ok(3), q.top());
    }
}
