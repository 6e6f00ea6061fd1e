//! Bounded integer identifier allocation with FIFO recycling.
//!
//! [`IdAllocator`] mints ids `0, 1, 2, …` and hands released ids back out,
//! oldest release first, before minting new ones. The configured capacity
//! sizes the internal bitset and can optionally be enforced through
//! [`IdAllocator::try_acquire`].
//!
//! ```
//! use depot_ids::IdAllocator;
//!
//! let mut ids = IdAllocator::new(1_000);
//! let a = ids.acquire();
//! let b = ids.acquire();
//! assert_eq!((a, b), (0, 1));
//!
//! ids.release(a).unwrap();
//! assert_eq!(ids.acquire(), a);
//! ```

mod active_set;
mod allocator;


pub use allocator::{AllocatorConfig, IdAllocator, IdError, InvalidReason, ReleasePolicy};
