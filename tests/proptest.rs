use cursor_queue::{Queue, QueueError};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;

proptest! {
    #[test]
    fn random_interleaved_push_and_pop(
        action in proptest::collection::vec(any::<usize>(), 0..128)
    ){
        let mut q: Queue<usize> = Queue::new();
        let mut model: VecDeque<usize> = VecDeque::new();

        for a in action {
            match a & 0x03 {
                0x00 | 0x01 => {
                    q.push(a);
                    model.push_back(a);
                },
                0x02 => {
                    let expected = model.pop_front().ok_or(QueueError::EmptyQueue);
                    prop_assert_eq!(expected, q.pop());
                },
                0x03 => {
                    let expected = model.front().copied().ok_or(QueueError::EmptyQueue);
                    prop_assert_eq!(expected, q.top());
                },
                _ => unreachable!(),
            }

            prop_assert_eq!(model.len(), q.len());
            prop_assert_eq!(model.is_empty(), q.is_empty());
        }

        prop_assert_eq!(model.iter().collect::<Vec<_>>(), q.iter().collect::<Vec<_>>());
        prop_assert_eq!(model.iter().rev().collect::<Vec<_>>(), q.iter_rev().collect::<Vec<_>>());
    }
}

proptest! {
    #[test]
    fn random_remove(
        seed in any::<u64>(),
        pushes in proptest::collection::vec(any::<usize>(), 0..64),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut q = Queue::new();
        let mut cursors = Vec::new();

        for p in pushes {
            let c = q.push(p);
            cursors.push((c, p));
        }

        let mut remaining: Vec<(usize, _)> = cursors.iter().map(|(_, p)| *p).enumerate().collect();
        let mut order: Vec<usize> = (0..cursors.len()).collect();
        order.shuffle(&mut rng);

        for i in order {
            let (mut c, p) = cursors[i];
            prop_assert_eq!(Ok(Some(p)), q.remove(&mut c));

            remaining.retain(|(j, _)| *j != i);
            prop_assert_eq!(remaining.len(), q.len());
            prop_assert_eq!(
                remaining.iter().map(|(_, p)| p).collect::<Vec<_>>(),
                q.iter().collect::<Vec<_>>()
            );
            prop_assert_eq!(
                remaining.iter().rev().map(|(_, p)| p).collect::<Vec<_>>(),
                q.iter_rev().collect::<Vec<_>>()
            );
        }

        prop_assert!(q.is_empty());
        prop_assert_eq!(q.end(), q.begin());
    }
}

proptest! {
    #[test]
    fn removed_cursors_stay_invalid(
        seed in any::<u64>(),
        pushes in proptest::collection::vec(any::<u16>(), 1..64),
        repush in proptest::collection::vec(any::<u16>(), 0..64),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut q = Queue::new();
        let mut cursors: Vec<_> = pushes.iter().map(|p| q.push(*p)).collect();

        cursors.shuffle(&mut rng);
        let (removed, kept) = cursors.split_at(cursors.len() / 2);

        for c in removed {
            let mut c = *c;
            prop_assert!(q.remove(&mut c).is_ok());
        }

        // Refill the freed slots so stale cursors point at live slots.
        for p in repush {
            q.push(p);
        }

        for c in removed {
            let mut stale = *c;
            prop_assert!(!q.contains(&stale));
            prop_assert_eq!(Err(QueueError::InvalidCursor), q.get(&stale));
            prop_assert_eq!(Err(QueueError::InvalidCursor), q.remove(&mut stale));
        }

        for c in kept {
            prop_assert!(q.contains(c));
        }
    }
}

proptest! {
    #[test]
    fn cursor_walk_matches_insertion_order(
        pushes in proptest::collection::vec(any::<u32>(), 0..64),
    ) {
        let q: Queue<u32> = pushes.iter().copied().collect();

        let mut c = q.begin();
        let mut seen = Vec::new();
        for _ in 0..q.len() {
            seen.push(c.read(&q).unwrap());
            c.step_forward(&q).unwrap();
        }

        prop_assert_eq!(q.end(), c);
        prop_assert_eq!(pushes, seen);
    }
}
