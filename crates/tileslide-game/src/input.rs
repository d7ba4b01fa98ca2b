//! Buffered player input.

use std::{collections::VecDeque, num::NonZero};

use tileslide_core::TileId;

/// FIFO buffer of tile presses waiting for the in-flight motion to finish.
///
/// The queue only stores requests; deciding whether a request is still legal when it
/// reaches the front is the session's job. An optional capacity bounds the queue:
/// once full, new requests are rejected and the queued ones are kept.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<TileId>,
    capacity: Option<NonZero<usize>>,
}

impl InputQueue {
    /// Creates an unbounded queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue holding at most `capacity` requests.
    #[must_use]
    pub fn bounded(capacity: NonZero<usize>) -> Self {
        Self {
            pending: VecDeque::new(),
            capacity: Some(capacity),
        }
    }

    /// Returns the capacity, or `None` if the queue is unbounded.
    #[must_use]
    pub const fn capacity(&self) -> Option<NonZero<usize>> {
        self.capacity
    }

    /// Appends a request. Returns `false` if the queue is full and the request was
    /// rejected.
    pub fn enqueue(&mut self, tile: TileId) -> bool {
        if self
            .capacity
            .is_some_and(|capacity| self.pending.len() >= capacity.get())
        {
            return false;
        }
        self.pending.push_back(tile);
        true
    }

    /// Removes and returns the oldest request.
    pub fn pop_front(&mut self) -> Option<TileId> {
        self.pending.pop_front()
    }

    /// Returns the oldest request without removing it.
    #[must_use]
    pub fn front(&self) -> Option<TileId> {
        self.pending.front().copied()
    }

    /// Returns the number of queued requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discards every queued request and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = InputQueue::new();
        for index in [4, 1, 7] {
            assert!(queue.enqueue(TileId::new(index)));
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.front(), Some(TileId::new(4)));
        assert_eq!(queue.pop_front(), Some(TileId::new(4)));
        assert_eq!(queue.pop_front(), Some(TileId::new(1)));
        assert_eq!(queue.pop_front(), Some(TileId::new(7)));
        assert_eq!(queue.pop_front(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_duplicate_requests_are_kept() {
        let mut queue = InputQueue::new();
        assert!(queue.enqueue(TileId::new(2)));
        assert!(queue.enqueue(TileId::new(2)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_bounded_queue_rejects_newest() {
        let mut queue = InputQueue::bounded(NonZero::new(2).unwrap());
        assert!(queue.enqueue(TileId::new(0)));
        assert!(queue.enqueue(TileId::new(1)));
        assert!(!queue.enqueue(TileId::new(2)));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_front(), Some(TileId::new(0)));
        assert!(queue.enqueue(TileId::new(3)));
        assert_eq!(queue.pop_front(), Some(TileId::new(1)));
        assert_eq!(queue.pop_front(), Some(TileId::new(3)));
    }

    #[test]
    fn test_clear_reports_discarded_count() {
        let mut queue = InputQueue::new();
        queue.enqueue(TileId::new(0));
        queue.enqueue(TileId::new(1));
        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.clear(), 0);
    }
}
