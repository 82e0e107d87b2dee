//! Priority queue of data keyed by an explicit priority.

use std::cmp::Ordering;

use crate::queue::IndexedPriorityQueue;

/// A queued datum together with its priority.
#[derive(Debug, Clone)]
struct Entry<P, D> {
    priority: P,
    datum: D,
}

fn lowest_first<P: Ord, D>(a: &Entry<P, D>, b: &Entry<P, D>) -> Ordering {
    b.priority.cmp(&a.priority)
}

/// A priority queue whose entries are identified by their datum.
///
/// Lower priorities are dequeued first unless the queue was built with
/// `reverse`. At most one entry per datum is expected; [`update`](Self::update)
/// replaces an existing entry rather than adding a second one.
#[derive(Debug, Clone)]
pub struct KeyedPriorityQueue<P, D> {
    inner: IndexedPriorityQueue<Entry<P, D>>,
}

impl<P: Ord, D: PartialEq> Default for KeyedPriorityQueue<P, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ord, D: PartialEq> KeyedPriorityQueue<P, D> {
    /// Lowest-priority-first queue.
    pub fn new() -> Self {
        Self::with_reverse(false)
    }

    /// Lowest-priority-first queue, or highest-first when `reverse` is true.
    pub fn with_reverse(reverse: bool) -> Self {
        Self {
            inner: IndexedPriorityQueue::with_order(lowest_first::<P, D>, reverse),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Queue `datum` at `priority`.
    pub fn enqueue(&mut self, priority: P, datum: D) {
        self.inner.enqueue(Entry { priority, datum });
    }

    /// The next datum to be dequeued.
    pub fn peek(&self) -> Option<&D> {
        self.inner.peek().map(|e| &e.datum)
    }

    /// The next entry to be dequeued, with its priority.
    pub fn peek_entry(&self) -> Option<(&P, &D)> {
        self.inner.peek().map(|e| (&e.priority, &e.datum))
    }

    pub fn dequeue(&mut self) -> Option<D> {
        self.inner.dequeue().map(|e| e.datum)
    }

    pub fn dequeue_entry(&mut self) -> Option<(P, D)> {
        self.inner.dequeue().map(|e| (e.priority, e.datum))
    }

    /// Whether `datum` is queued.
    pub fn contains(&self, datum: &D) -> bool {
        self.inner.iter().any(|e| e.datum == *datum)
    }

    /// Priority currently attached to `datum`.
    pub fn priority_of(&self, datum: &D) -> Option<&P> {
        self.inner
            .iter()
            .find(|e| e.datum == *datum)
            .map(|e| &e.priority)
    }

    /// Drop the entry for `datum`, returning its priority.
    pub fn remove(&mut self, datum: &D) -> Option<P> {
        self.inner
            .remove_by(|e| e.datum == *datum)
            .map(|e| e.priority)
    }

    /// Re-queue `datum` at `priority`, dropping any entry it already had.
    pub fn update(&mut self, priority: P, datum: D) {
        self.remove(&datum);
        self.enqueue(priority, datum);
    }
}
