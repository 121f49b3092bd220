//! Arena-backed Fibonacci heap
//!
//! This crate provides a mergeable min-priority queue with the classic
//! Fibonacci heap bounds:
//!
//! - O(1) amortized `insert`, `decrease_key`, and `merge`
//! - O(log n) amortized `pop_min` and `delete`
//!
//! The structure is a forest of heap-ordered multi-way trees whose roots are
//! linked in a circular doubly linked list. Unlike pointer-based
//! implementations, every node lives in a single [`slotmap`] arena and all
//! parent/child/sibling links are plain generational keys. Keys carry no
//! ownership, so the cyclic sibling rings need no manual teardown, and a
//! handle whose node has already been removed is detected instead of
//! dereferenced.
//!
//! # Example
//!
//! ```rust
//! use fibarena::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle = heap.insert(5);
//! heap.insert(3);
//! heap.decrease_key(handle, 1).unwrap();
//! assert_eq!(heap.find_min(), Ok(&1));
//! assert_eq!(heap.pop_min(), Ok(1));
//! assert_eq!(heap.pop_min(), Ok(3));
//! ```
//!
//! Heaps order their keys through the [`Less`] comparator trait;
//! [`FibonacciHeap::new`] uses the [`NaturalOrder`] of `K: Ord`, and
//! [`FibonacciHeap::with_comparator`] accepts any `Fn(&K, &K) -> bool`
//! strict-order closure.

mod arena;
mod list;

pub mod fibonacci;
pub mod traits;

pub use arena::NodeHandle;
pub use fibonacci::FibonacciHeap;
pub use traits::{HeapError, Less, NaturalOrder};
