//! Random acquire/release workload for the id allocator.

use depot_ids::{IdAllocator, IdError};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Counters collected by [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChurnStats {
    pub acquired: usize,
    pub released: usize,
    /// Releases the allocator refused (strict policy only).
    pub rejected: usize,
    /// `try_acquire` calls refused because the capacity was reached.
    pub exhausted: usize,
    pub peak_active: usize,
    pub final_active: usize,
    pub issued: u32,
}

/// Drive `ids` through `ops` random operations seeded by `seed`.
///
/// Roughly half the operations acquire, most of the rest release a held id
/// and one in ten releases an id past everything issued so far.
pub fn run(ids: &mut IdAllocator, ops: usize, seed: u64) -> ChurnStats {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut held: Vec<u32> = Vec::new();
    let mut stats = ChurnStats::default();

    for _ in 0..ops {
        let roll = rng.random_range(0..10u32);
        if roll < 5 || held.is_empty() {
            match ids.try_acquire() {
                Ok(id) => {
                    held.push(id);
                    stats.acquired += 1;
                }
                Err(IdError::Exhausted { .. }) => stats.exhausted += 1,
                Err(e) => log::warn!("unexpected acquire failure: {e}"),
            }
        } else if roll < 9 {
            let id = held.swap_remove(rng.random_range(0..held.len()));
            match ids.release(id) {
                Ok(()) => stats.released += 1,
                Err(e) => log::warn!("release of held id failed: {e}"),
            }
        } else {
            let bogus = ids.issued() + rng.random_range(0..16u32);
            if let Err(e) = ids.release(bogus) {
                log::debug!("{e}");
                stats.rejected += 1;
            }
        }
        stats.peak_active = stats.peak_active.max(ids.active_count());
    }

    stats.final_active = ids.active_count();
    stats.issued = ids.issued();
    stats
}
