//! Array-backed binary heap with arbitrary-element removal.
//!
//! Slots are numbered from 1 so that the parent of slot `i` is `i / 2` and
//! its children are `2i` and `2i + 1`. Slot `i` is stored at `slots[i - 1]`.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `enqueue` | O(log n)   |
//! | `dequeue` | O(log n)   |
//! | `peek`    | O(1)       |
//! | `remove`  | O(n)       |
//! | `update`  | O(n)       |
//!
//! `remove` locates its target with a linear scan; the queue keeps no map from
//! element to slot.

use std::cmp::Ordering;
use std::fmt;

/// Capacity reserved by the default constructors.
pub const DEFAULT_CAPACITY: usize = 100;

/// A binary heap ordered by a caller-supplied total order.
///
/// The element that compares greatest under the order sits at the root. With
/// `reverse` set, the order is inverted and the smallest element comes first,
/// so one implementation serves as both a max-heap and a min-heap.
///
/// Element equality (`PartialEq`) is only used to find elements for
/// [`remove`](Self::remove) and [`update`](Self::update); it need not agree
/// with the ordering. Ties are broken arbitrarily.
///
/// ```
/// use pathwise_search::IndexedPriorityQueue;
///
/// let mut q = IndexedPriorityQueue::new();
/// for n in [5, 1, 9, 3] {
///     q.enqueue(n);
/// }
/// assert_eq!(q.dequeue(), Some(9));
/// assert_eq!(q.remove(&3), Some(3));
/// assert_eq!(q.dequeue(), Some(5));
/// ```
#[derive(Clone)]
pub struct IndexedPriorityQueue<T> {
    slots: Vec<T>,
    order: fn(&T, &T) -> Ordering,
    reverse: bool,
}

impl<T: Ord> IndexedPriorityQueue<T> {
    /// Max-first queue using `T`'s natural order.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, false)
    }

    /// Min-first queue using `T`'s natural order.
    pub fn reversed() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, true)
    }

    /// Natural-order queue, inverted when `reverse` is true.
    pub fn with_reverse(reverse: bool) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, reverse)
    }

    /// Natural-order queue with room for `capacity` elements.
    pub fn with_capacity(capacity: usize, reverse: bool) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            order: T::cmp,
            reverse,
        }
    }
}

impl<T: Ord> Default for IndexedPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IndexedPriorityQueue<T> {
    /// Queue ordered by `order`, inverted when `reverse` is true.
    pub fn with_order(order: fn(&T, &T) -> Ordering, reverse: bool) -> Self {
        Self {
            slots: Vec::with_capacity(DEFAULT_CAPACITY),
            order,
            reverse,
        }
    }

    /// Whether the configured order is inverted.
    #[inline]
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Iterate over the elements in slot order (root first).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    /// Insert `element`, sifting it up past every parent it outranks.
    pub fn enqueue(&mut self, element: T) {
        self.slots.push(element);
        self.sift_up(self.slots.len());
    }

    /// The highest-priority element, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.slots.first()
    }

    /// Remove and return the highest-priority element.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.slots.is_empty() {
            return None;
        }
        Some(self.remove_at(1))
    }

    /// Remove the first element (in slot order) matching `pred`.
    ///
    /// Returns the removed element, or `None` if nothing matched.
    pub fn remove_by(&mut self, pred: impl Fn(&T) -> bool) -> Option<T> {
        let slot = self.slots.iter().position(pred)? + 1;
        Some(self.remove_at(slot))
    }

    /// Compare the elements at two slots under the configured order.
    #[inline]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        let ord = (self.order)(&self.slots[a - 1], &self.slots[b - 1]);
        if self.reverse { ord.reverse() } else { ord }
    }

    #[inline]
    fn outranks(&self, a: usize, b: usize) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a - 1, b - 1);
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 1 {
            let parent = child / 2;
            if !self.outranks(child, parent) {
                break;
            }
            self.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.slots.len();
        loop {
            let left = parent * 2;
            if left > len {
                break;
            }
            let right = left + 1;
            let best = if right <= len && self.outranks(right, left) {
                right
            } else {
                left
            };
            if !self.outranks(best, parent) {
                break;
            }
            self.swap(parent, best);
            parent = best;
        }
    }

    /// Swap the last element into `slot`, pop the target and restore order.
    fn remove_at(&mut self, slot: usize) -> T {
        let last = self.slots.len();
        self.swap(slot, last);
        let Some(removed) = self.slots.pop() else {
            unreachable!("remove_at called on an empty queue");
        };
        if slot < last {
            // The moved element came from another subtree and may belong
            // above `slot` as well as below it.
            self.sift_down(slot);
            self.sift_up(slot);
        }
        removed
    }
}

impl<T: PartialEq> IndexedPriorityQueue<T> {
    /// Whether an element equal to `element` is queued.
    pub fn contains(&self, element: &T) -> bool {
        self.slots.contains(element)
    }

    /// Remove the first element equal to `element`.
    ///
    /// Returns the removed element; removing an absent element is a no-op.
    pub fn remove(&mut self, element: &T) -> Option<T> {
        self.remove_by(|e| e == element)
    }

    /// Replace any queued element equal to `element` with `element`.
    ///
    /// This is how a decreased key is applied: the stale entry is dropped and
    /// the fresh one re-enters at its new priority.
    pub fn update(&mut self, element: T) {
        self.remove(&element);
        self.enqueue(element);
    }
}

impl<T> Extend<T> for IndexedPriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.enqueue(element);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexedPriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedPriorityQueue")
            .field("slots", &self.slots)
            .field("reverse", &self.reverse)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for IndexedPriorityQueue<T> {
    /// Renders ` {a, b, c}` in slot order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(" {")?;
        for (i, element) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
impl<T> IndexedPriorityQueue<T> {
    /// No slot outranks its parent.
    pub(crate) fn is_heap(&self) -> bool {
        (2..=self.slots.len()).all(|i| !self.outranks(i, i / 2))
    }
}
