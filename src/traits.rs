//! Error taxonomy and the caller-supplied key ordering.

use std::fmt;

/// Error type for heap operations
///
/// Every failure is reported synchronously and before any observable
/// mutation: an operation that returns an error has left the heap exactly
/// as it found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap contains no elements (precondition violation, not a fault;
    /// check `is_empty` first to avoid it)
    Empty,
    /// The handle does not resolve to a live node in this heap
    /// (the element was already removed)
    InvalidHandle,
    /// The new key passed to `decrease_key` is greater than the current key
    KeyNotDecreased,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
            HeapError::KeyNotDecreased => {
                write!(f, "new key is not less than or equal to current key")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A total order over keys, supplied by the caller at heap construction.
///
/// `less(a, b)` must be a strict weak ordering. The heap only ever compares
/// keys through this trait, so the key type itself does not need to be
/// `Ord`; closures of type `Fn(&K, &K) -> bool` implement it directly.
///
/// # Example
///
/// ```rust
/// use fibarena::FibonacciHeap;
///
/// // A max-heap over u32, by inverting the natural order.
/// let mut heap = FibonacciHeap::with_comparator(|a: &u32, b: &u32| a > b);
/// heap.insert(3);
/// heap.insert(7);
/// assert_eq!(heap.find_min(), Ok(&7));
/// ```
pub trait Less<K> {
    /// Returns true iff `a` is strictly smaller than `b`.
    fn less(&self, a: &K, b: &K) -> bool;
}

impl<K, F: Fn(&K, &K) -> bool> Less<K> for F {
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// The default ordering: `Ord` on the key type.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<K: Ord> Less<K> for NaturalOrder {
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}
