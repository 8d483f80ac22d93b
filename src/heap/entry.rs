use std::cmp::Ordering;

/// A payload ordered only by its key.
///
/// Equality and ordering ignore `value`, which lets a plain `MinHeap<Keyed<..>>`
/// act as a distance queue for search routines.
#[derive(Debug, Clone, Copy)]
pub struct Keyed<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Keyed<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for Keyed<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Keyed<K, V> {}

impl<K: Ord, V> PartialOrd for Keyed<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for Keyed<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::MinHeap;

    #[test]
    fn test_ordering_ignores_value() {
        let a = Keyed::new(1, "far");
        let b = Keyed::new(1, "near");
        assert_eq!(a, b);
        assert!(Keyed::new(0, "x") < Keyed::new(1, "a"));
    }

    #[test]
    fn test_distance_queue() {
        let mut heap = MinHeap::new();
        heap.push(Keyed::new(4u32, (0usize, 1usize)));
        heap.push(Keyed::new(1, (2, 2)));
        heap.push(Keyed::new(3, (1, 0)));

        let (dist, point) = heap.pop().unwrap().into_parts();
        assert_eq!((dist, point), (1, (2, 2)));
        assert_eq!(heap.pop().unwrap().key, 3);
    }
}
