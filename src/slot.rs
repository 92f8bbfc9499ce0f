/// The link from a node to whatever precedes it. The first element is
/// preceded by the sentinel, which is not stored in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Link {
    Sentinel,
    Node(usize),
}

/// The position before the first element of the queue. It never holds
/// a value.
#[derive(Debug, Default)]
pub(crate) struct Sentinel {
    // The index of the first element. None when the queue is empty.
    pub(crate) next: Option<usize>,
}

pub(crate) struct Free(FreeInner);
pub(crate) struct FreeInner {
    // The next free slot.
    next: Option<usize>,
}

impl Free {
    fn new(next: Option<usize>) -> Free {
        Free(FreeInner { next })
    }

    pub(crate) fn next(&self) -> Option<usize> {
        self.0.next
    }
}

pub(crate) struct Node<T>(NodeInner<T>);
struct NodeInner<T> {
    // The slot or sentinel before this node.
    prev: Link,
    // The index of the slot after this node.
    next: Option<usize>,
    // The generation ID for this node.
    generation: usize,
    // The contained data.
    data: T,
}

impl<T> Node<T> {
    fn new(prev: Link, next: Option<usize>, generation: usize, data: T) -> Node<T> {
        Node(NodeInner {
            prev,
            next,
            generation,
            data,
        })
    }

    pub(crate) fn prev(&self) -> Link {
        self.0.prev
    }

    pub(crate) fn set_prev(&mut self, new_prev: Link) {
        self.0.prev = new_prev;
    }

    pub(crate) fn next(&self) -> Option<usize> {
        self.0.next
    }

    pub(crate) fn set_next(&mut self, new_next: Option<usize>) {
        self.0.next = new_next;
    }

    pub(crate) fn generation(&self) -> usize {
        self.0.generation
    }

    pub(crate) fn take(self) -> (Link, T, Option<usize>) {
        let Node(NodeInner {
            prev, next, data, ..
        }) = self;
        (prev, data, next)
    }

    pub(crate) fn as_generation(&self, g: usize) -> Option<&Node<T>> {
        if self.0.generation == g {
            Some(self)
        } else {
            None
        }
    }

    pub(crate) fn as_generation_mut(&mut self, g: usize) -> Option<&mut Node<T>> {
        if self.0.generation == g {
            Some(self)
        } else {
            None
        }
    }

    pub(crate) fn data(&self) -> &T {
        &self.0.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut T {
        &mut self.0.data
    }
}

pub(crate) enum Slot<T> {
    Free(Free),
    Used(Node<T>),
}

impl<T> Slot<T> {
    pub(crate) fn new_free(next: Option<usize>) -> Slot<T> {
        Slot::Free(Free::new(next))
    }

    pub(crate) fn new_used(prev: Link, next: Option<usize>, generation: usize, data: T) -> Slot<T> {
        Slot::Used(Node::new(prev, next, generation, data))
    }

    pub(crate) fn get_used(&self) -> Option<&Node<T>> {
        if let Slot::Used(node) = self {
            Some(node)
        } else {
            None
        }
    }

    pub(crate) fn get_used_mut(&mut self) -> Option<&mut Node<T>> {
        if let Slot::Used(node) = self {
            Some(node)
        } else {
            None
        }
    }

    pub(crate) fn get_free(&self) -> Option<&Free> {
        if let Slot::Free(free) = self {
            Some(free)
        } else {
            None
        }
    }

    pub(crate) fn into_used(self) -> Option<Node<T>> {
        if let Slot::Used(node) = self {
            Some(node)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generation_gates_access() {
        let mut s = Slot::new_used(Link::Sentinel, None, 7, 'x');

        assert!(s.get_used().and_then(|n| n.as_generation(6)).is_none());
        assert_eq!(
            Some(&'x'),
            s.get_used().and_then(|n| n.as_generation(7)).map(|n| n.data())
        );

        if let Some(n) = s.get_used_mut().and_then(|n| n.as_generation_mut(7)) {
            *n.data_mut() = 'y';
        }
        assert_eq!(Some(&'y'), s.get_used().map(|n| n.data()));
    }

    #[test]
    fn take_returns_links_and_data() {
        let mut s = Slot::new_used(Link::Node(3), Some(5), 0, 10u8);
        if let Some(n) = s.get_used_mut() {
            n.set_prev(Link::Sentinel);
            n.set_next(None);
        }

        let (prev, data, next) = s.into_used().map(Node::take).unwrap();
        assert_eq!(Link::Sentinel, prev);
        assert_eq!(10, data);
        assert_eq!(None, next);
    }

    #[test]
    fn free_slots_are_not_used() {
        let s: Slot<u8> = Slot::new_free(Some(4));

        assert!(s.get_used().is_none());
        assert_eq!(Some(Some(4)), s.get_free().map(Free::next));
        assert!(s.into_used().is_none());
    }
}
