//! Singly-linked lists over slot storage.
//!
//! This crate provides a forward list for latency-sensitive code: constant
//! time insertion and removal anywhere a position is held, without a heap
//! allocation per node. The key insight: nodes live in a slot storage and
//! link to each other by key, not by pointer.
//!
//! ```text
//! Storage (Arena)  - owns nodes, hands out stable keys
//! ForwardList      - owns its storage, links keys into a chain
//! Position         - copyable key of a node, the sentinel, or the end
//! ```
//!
//! Benefits:
//! - **O(1) operations**: push at either end, insert/erase after any position
//! - **Stable positions**: Removing one node never moves another
//! - **Zero allocation on hot path**: Pre-size storage, or use fixed capacity
//! - **Cache-friendly**: Nodes are packed in one slot array
//!
//! # Quick Start
//!
//! ```
//! use nexus_slist::ForwardList;
//!
//! let mut list: ForwardList<u64> = ForwardList::with_capacity(1000);
//!
//! list.push_back(2);
//! list.push_back(3);
//! list.push_front(1);
//!
//! // Positions are copyable handles
//! let pos = list.begin();
//! assert_eq!(list[pos], 1);
//!
//! // O(1) removal after any position
//! list.erase_after(pos);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 3]);
//! ```
//!
//! # Before-Begin
//!
//! A singly-linked node cannot reach its predecessor, so every structural
//! operation acts on the element *after* a position. The list exposes a
//! position before the first element so the front is not a special case:
//!
//! ```
//! use nexus_slist::ForwardList;
//!
//! let mut list: ForwardList<u64> = ForwardList::from([2, 3]);
//!
//! list.insert_after(list.before_begin(), 1);
//! assert_eq!(list.front(), Some(&1));
//!
//! list.erase_after(list.before_begin());
//! assert_eq!(list.front(), Some(&2));
//! ```
//!
//! # Storage Options
//!
//! | Storage | Capacity | Allocation | Use Case |
//! |---------|----------|------------|----------|
//! | [`Arena`] | Growable | Amortized, may reallocate | Default choice |
//! | [`BoxedStorage`] | Fixed (runtime) | Single heap alloc | Hard memory bound |
//! | `slab::Slab` | Growable | May reallocate | Existing slab users |
//!
//! Storage is split into a base trait and a growable extension:
//!
//! ```text
//! Storage<T>            - try_insert -> Result, get, remove
//!     │
//!     └── UnboundedStorage<T> - insert -> Key (infallible)
//! ```
//!
//! Every list offers `try_push_front`, `try_push_back` and `try_insert_after`,
//! which hand the value back in an [`InsertError`] when storage is full.
//! Lists over [`UnboundedStorage`] also offer the infallible `push_front`,
//! `push_back` and `insert_after`.
//!
//! # Keys
//!
//! The key type bounds the number of nodes. Two values of every key type are
//! reserved (see [`Key`]), so `ForwardList<T, u8>` holds at most 254 nodes.
//! Smaller keys mean smaller nodes.
//!
//! # Failure Safety
//!
//! Whole-list operations (`clone`, `clone_from`, `assign`, `try_clone`)
//! build their result in fresh storage before touching the destination. If
//! an element's `Clone` panics or storage runs out, the destination is left
//! exactly as it was.
//!
//! # Logging
//!
//! Storage emits [`tracing`](https://docs.rs/tracing) events on cold paths:
//! `trace` when an arena grows, `debug` when storage reports full, `warn` when
//! the allocator refuses to grow. No events are emitted on the hot path.
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab` and the
//!   `SlabForwardList` alias

#![warn(missing_docs)]

mod cmp;
pub mod cursor;
pub mod error;
pub mod key;
pub mod list;
pub mod storage;

pub use cursor::{BasicCursor, Cursor, CursorMut};
pub use error::{InsertError, InsertErrorKind, PositionError};
pub use key::Key;
pub use list::{
    BoundedForwardList, ForwardList, IntoIter, Iter, IterMut, Node, Position, Positions,
};
pub use storage::{Arena, BoxedStorage, Storage, UnboundedStorage};

#[cfg(feature = "slab")]
pub use list::SlabForwardList;
