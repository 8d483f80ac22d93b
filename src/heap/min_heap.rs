use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// Comparator used by [`MinHeap::new`].
pub type OrdComparator<T> = fn(&T, &T) -> Ordering;

/// Array-backed binary min-heap ordered by a caller-supplied comparator.
///
/// Storage is 0-indexed: the children of `i` live at `2i + 1` and `2i + 2`.
/// For every non-root slot `i` with parent `p`, `compare(heap[p], heap[i])`
/// is never `Greater`, so the root is always a minimum.
///
/// ```
/// use parq::heap::MinHeap;
///
/// let mut heap = MinHeap::new();
/// for v in [10, 4, 15, 20, 25, 2, 8] {
///     heap.push(v);
/// }
/// assert_eq!(heap.pop().unwrap(), 2);
/// assert_eq!(heap.len(), 6);
/// ```
pub struct MinHeap<T, C = OrdComparator<T>> {
    heap: Vec<T>,
    compare: C,
}

impl<T: Ord> MinHeap<T> {
    /// Create an empty heap ordered by `Ord::cmp`.
    pub fn new() -> Self {
        Self::with_comparator(Ord::cmp)
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> MinHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Create an empty heap ordered by `compare`.
    ///
    /// Reversing the comparator turns this into a max-heap:
    /// `MinHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a))`.
    pub fn with_comparator(compare: C) -> Self {
        Self {
            heap: Vec::new(),
            compare,
        }
    }

    /// Create an empty heap with room for `capacity` elements.
    pub fn with_capacity_and_comparator(capacity: usize, compare: C) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Insert `value`, bubbling it up towards the root.
    pub fn push(&mut self, value: T) {
        self.heap.push(value);
        self.bubble_up(self.heap.len() - 1);
    }

    /// Remove and return the minimum element.
    ///
    /// Returns [`Error::EmptyHeap`] without touching the heap when it is empty.
    pub fn pop(&mut self) -> Result<T> {
        match self.heap.len() {
            0 => Err(Error::EmptyHeap),
            1 => self.heap.pop().ok_or(Error::EmptyHeap),
            _ => {
                let root = self.heap.swap_remove(0);
                self.bubble_down(0);
                Ok(root)
            }
        }
    }

    /// The current minimum, if any.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Drain the heap in pop order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Ok(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }

    fn bubble_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = parent(index);
            if (self.compare)(&self.heap[index], &self.heap[parent]) != Ordering::Less {
                break;
            }

            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn bubble_down(&mut self, mut index: usize) {
        let n = self.heap.len();

        loop {
            let mut smallest = index;
            let left = left(index);
            let right = right(index);

            // Strict comparisons keep the left child on ties.
            if left < n && (self.compare)(&self.heap[left], &self.heap[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < n
                && (self.compare)(&self.heap[right], &self.heap[smallest]) == Ordering::Less
            {
                smallest = right;
            }

            if smallest == index {
                break;
            }

            self.heap.swap(index, smallest);
            index = smallest;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.heap.len())
            .all(|i| (self.compare)(&self.heap[parent(i)], &self.heap[i]) != Ordering::Greater)
    }
}

impl<T: Ord> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = MinHeap::new();
        heap.extend(iter);
        heap
    }
}

impl<T: fmt::Debug, C> fmt::Debug for MinHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHeap")
            .field("len", &self.heap.len())
            .field("root", &self.heap.first())
            .finish()
    }
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline]
fn right(i: usize) -> usize {
    2 * i + 2
}

#[inline]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn drain<T, C: Fn(&T, &T) -> Ordering>(heap: &mut MinHeap<T, C>) -> Vec<T> {
        let mut out = Vec::new();
        while !heap.is_empty() {
            out.push(heap.pop().unwrap());
        }
        out
    }

    #[test]
    fn test_new_heap_is_empty() {
        let heap: MinHeap<i32> = MinHeap::new();
        assert_eq!(heap.len(), 0);
        assert!(heap.is_empty());

        let heap = MinHeap::with_comparator(|a: &String, b: &String| a.cmp(b));
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_push_grows() {
        let mut heap = MinHeap::new();
        heap.push(5);
        assert_eq!(heap.len(), 1);
        heap.push(3);
        assert_eq!(heap.len(), 2);
        heap.push(8);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Some(&3));
    }

    #[test]
    fn test_pops_in_order() {
        let mut heap = MinHeap::new();
        heap.extend([10, 4, 15, 20, 25, 2, 8]);
        assert_eq!(drain(&mut heap), vec![2, 4, 8, 10, 15, 20, 25]);
    }

    #[test]
    fn test_reverse_comparator() {
        let mut heap = MinHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
        for v in [10, 4, 15, 20, 25, 2, 8] {
            heap.push(v);
        }
        assert_eq!(drain(&mut heap), vec![25, 20, 15, 10, 8, 4, 2]);
    }

    #[test]
    fn test_string_comparator() {
        let mut heap = MinHeap::with_comparator(|a: &&str, b: &&str| a.cmp(b));
        for w in ["banana", "apple", "cherry", "date", "elderberry"] {
            heap.push(w);
        }
        assert_eq!(
            drain(&mut heap),
            vec!["apple", "banana", "cherry", "date", "elderberry"]
        );
    }

    #[test]
    fn test_pop_empty() {
        let mut heap: MinHeap<u32> = MinHeap::new();
        assert!(matches!(heap.pop(), Err(Error::EmptyHeap)));
        assert_eq!(heap.len(), 0);

        heap.push(42);
        assert_eq!(heap.pop().unwrap(), 42);
        assert!(matches!(heap.pop(), Err(Error::EmptyHeap)));
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut heap = MinHeap::new();
        heap.extend([10, 20, 5, 6, 1, 8, 12, 3, 4]);

        let popped: Vec<_> = (0..4).map(|_| heap.pop().unwrap()).collect();
        assert_eq!(popped, vec![1, 3, 4, 5]);

        heap.push(2);
        heap.push(7);
        assert_eq!(drain(&mut heap), vec![2, 6, 7, 8, 10, 12, 20]);
    }

    #[test]
    fn test_size_tracks_push_minus_pop() {
        let mut heap: MinHeap<i32> = (1..=5).collect();
        assert_eq!(heap.len(), 5);
        heap.pop().unwrap();
        assert_eq!(heap.len(), 4);
        heap.pop().unwrap();
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_duplicates_preserved() {
        let mut heap = MinHeap::new();
        heap.extend([5, 3, 5, 1, 3, 1, 5]);
        assert_eq!(drain(&mut heap), vec![1, 1, 3, 3, 5, 5, 5]);
    }

    #[test]
    fn test_random_values_sorted() {
        let mut rng = rand::thread_rng();
        let mut heap = MinHeap::new();
        for _ in 0..1000 {
            heap.push(rng.gen_range(0..1000u32));
            assert!(heap.is_valid());
        }
        assert_eq!(heap.len(), 1000);

        let sorted = heap.into_sorted_vec();
        assert_eq!(sorted.len(), 1000);
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_struct_with_priority_comparator() {
        #[derive(Debug)]
        struct Job {
            id: u32,
            priority: u32,
        }

        let mut heap = MinHeap::with_comparator(|a: &Job, b: &Job| a.priority.cmp(&b.priority));
        for (id, priority) in [(1, 3), (2, 1), (3, 5), (4, 2), (5, 1)] {
            heap.push(Job { id, priority });
        }

        let first = heap.pop().unwrap();
        let second = heap.pop().unwrap();
        assert_eq!((first.priority, second.priority), (1, 1));
        assert!([2, 5].contains(&first.id) && [2, 5].contains(&second.id));

        let third = heap.pop().unwrap();
        assert_eq!((third.id, third.priority), (4, 2));
    }

    #[test]
    fn test_equal_children_pick_left() {
        // Root 0 with two equal children; after popping, the last element
        // lands at the root and must swap with the left child.
        let mut heap = MinHeap::with_comparator(|a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
        heap.push((0, 'r'));
        heap.push((1, 'l'));
        heap.push((1, 'x'));
        heap.push((9, 'z'));

        assert_eq!(heap.pop().unwrap(), (0, 'r'));
        assert_eq!(heap.heap[0], (1, 'l'));
        assert_eq!(heap.pop().unwrap(), (1, 'l'));
    }
}
