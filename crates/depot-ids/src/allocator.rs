//! Identifier allocator with FIFO recycling.

use std::collections::VecDeque;
use std::fmt;

use crate::active_set::ActiveSet;

/// How [`IdAllocator::release`] treats ids that are not currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReleasePolicy {
    /// Ignore the call and return `Ok(())`.
    #[default]
    Lenient,
    /// Return [`IdError::InvalidIdentifier`].
    Strict,
}

/// Options for [`IdAllocator::with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AllocatorConfig {
    /// Expected number of concurrently held ids. Only a sizing hint unless
    /// `enforce_capacity` is set.
    pub capacity: usize,
    pub policy: ReleasePolicy,
    /// Make [`IdAllocator::try_acquire`] fail once `capacity` ids are held.
    pub enforce_capacity: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            policy: ReleasePolicy::Lenient,
            enforce_capacity: false,
        }
    }
}

/// Hands out small integer ids and recycles released ones.
///
/// Fresh ids are issued in increasing order starting at 0. Released ids
/// queue up and are handed out again, oldest release first, before any new
/// id is minted. An id is always in exactly one of two states once issued:
/// held or queued for reuse.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    config: AllocatorConfig,
    active: ActiveSet,
    recycled: VecDeque<u32>,
    next_fresh: u32,
}

impl IdAllocator {
    /// Create an allocator sized for `capacity` concurrent ids, with the
    /// remaining options at their defaults.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(AllocatorConfig {
            capacity,
            ..AllocatorConfig::default()
        })
    }

    /// Create an allocator from a full [`AllocatorConfig`].
    pub fn with_config(config: AllocatorConfig) -> Self {
        Self {
            config,
            active: ActiveSet::with_capacity(config.capacity),
            recycled: VecDeque::new(),
            next_fresh: 0,
        }
    }

    /// Hand out an id: the oldest released one if any, otherwise the next
    /// fresh one. Ignores the capacity limit.
    ///
    /// # Panics
    ///
    /// Panics if every `u32` has been issued and none is queued for reuse.
    pub fn acquire(&mut self) -> u32 {
        let id = match self.recycled.pop_front() {
            Some(id) => id,
            None => {
                let id = self.next_fresh;
                match self.next_fresh.checked_add(1) {
                    Some(next) => self.next_fresh = next,
                    None => panic!("failed to allocate id; id space exhausted"),
                }
                id
            }
        };
        self.active.insert(id);
        id
    }

    /// Like [`acquire`](Self::acquire), but honours
    /// [`AllocatorConfig::enforce_capacity`].
    pub fn try_acquire(&mut self) -> Result<u32, IdError> {
        if self.config.enforce_capacity && self.active.len() >= self.config.capacity {
            return Err(IdError::Exhausted {
                capacity: self.config.capacity,
            });
        }
        if self.recycled.is_empty() && self.next_fresh == u32::MAX {
            return Err(IdError::Exhausted {
                capacity: self.config.capacity,
            });
        }
        Ok(self.acquire())
    }

    /// Return `id` to the pool, queueing it behind earlier releases.
    ///
    /// Ids that were never issued or are already released are left alone;
    /// under [`ReleasePolicy::Strict`] that is reported as
    /// [`IdError::InvalidIdentifier`].
    pub fn release(&mut self, id: u32) -> Result<(), IdError> {
        let reason = if id >= self.next_fresh {
            InvalidReason::NeverIssued
        } else if self.active.remove(id) {
            self.recycled.push_back(id);
            return Ok(());
        } else {
            InvalidReason::AlreadyReleased
        };

        match self.config.policy {
            ReleasePolicy::Lenient => {
                log::debug!("ignoring release of id {id}: {reason}");
                Ok(())
            }
            ReleasePolicy::Strict => Err(IdError::InvalidIdentifier { id, reason }),
        }
    }

    /// The configured capacity hint.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn policy(&self) -> ReleasePolicy {
        self.config.policy
    }

    /// Whether `id` is currently held.
    pub fn is_active(&self, id: u32) -> bool {
        self.active.contains(id)
    }

    /// Number of ids currently held.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of released ids waiting for reuse.
    pub fn recycled_count(&self) -> usize {
        self.recycled.len()
    }

    /// Number of distinct ids ever issued; also the next fresh id.
    pub fn issued(&self) -> u32 {
        self.next_fresh
    }

    /// Held ids in increasing order.
    pub fn active_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.active.iter()
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::with_config(AllocatorConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a release was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The id is at or above the next fresh id.
    NeverIssued,
    /// The id was issued but is not currently held.
    AlreadyReleased,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeverIssued => f.write_str("never issued"),
            Self::AlreadyReleased => f.write_str("already released"),
        }
    }
}

/// Errors reported by [`IdAllocator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// A strict release named an id that is not held.
    InvalidIdentifier { id: u32, reason: InvalidReason },
    /// No id can be handed out.
    Exhausted { capacity: usize },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier { id, reason } => write!(f, "invalid id {id}: {reason}"),
            Self::Exhausted { capacity } => {
                write!(f, "no id available (capacity {capacity})")
            }
        }
    }
}

impl std::error::Error for IdError {}
