//! Priority queue primitives.
//!
//! [`MinHeap`] is a binary heap driven by an arbitrary comparator, so callers
//! can order domain values (distances, grid points, jobs) without writing
//! `Ord` impls. [`Keyed`] pairs a priority key with a payload for the common
//! "order by key only" case.

pub mod entry;
pub mod min_heap;

pub use entry::Keyed;
pub use min_heap::{MinHeap, OrdComparator};
