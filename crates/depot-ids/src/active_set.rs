//! Bitset of identifiers currently held.
//!
//! Bit `i` (across all words) is set while identifier `i` is active. The
//! word vector grows on demand, so ids past the sizing hint still fit.

/// Largest number of words reserved up front; beyond it the set grows as
/// ids are inserted.
const MAX_PRESIZE_WORDS: usize = 1 << 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ActiveSet {
    words: Vec<u64>,
    len: usize,
}

impl ActiveSet {
    /// Create a set with room for ids `0..capacity` before growing, capped
    /// at [`MAX_PRESIZE_WORDS`] words.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64).min(MAX_PRESIZE_WORDS)],
            len: 0,
        }
    }

    #[inline]
    fn split(id: u32) -> (usize, u64) {
        ((id / 64) as usize, 1u64 << (id % 64))
    }

    pub(crate) fn contains(&self, id: u32) -> bool {
        let (w, mask) = Self::split(id);
        self.words.get(w).is_some_and(|word| word & mask != 0)
    }

    /// Set the bit for `id`. Returns `false` if it was already set.
    pub(crate) fn insert(&mut self, id: u32) -> bool {
        let (w, mask) = Self::split(id);
        if w >= self.words.len() {
            self.words.resize(w + 1, 0);
        }
        let word = &mut self.words[w];
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.len += 1;
        true
    }

    /// Clear the bit for `id`. Returns `false` if it was not set.
    pub(crate) fn remove(&mut self, id: u32) -> bool {
        let (w, mask) = Self::split(id);
        match self.words.get_mut(w) {
            Some(word) if *word & mask != 0 => {
                *word &= !mask;
                self.len -= 1;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Active ids in increasing order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            (0..64u32)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| w as u32 * 64 + bit)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove() {
        let mut s = ActiveSet::with_capacity(10);
        assert!(s.insert(3));
        assert!(!s.insert(3));
        assert!(s.contains(3));
        assert_eq!(s.len(), 1);
        assert!(s.remove(3));
        assert!(!s.remove(3));
        assert!(!s.contains(3));
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn grows_past_capacity_hint() {
        let mut s = ActiveSet::with_capacity(1);
        assert!(!s.contains(200));
        assert!(s.insert(200));
        assert!(s.contains(200));
        assert!(!s.remove(1000));
    }

    #[test]
    fn huge_capacity_hint_is_capped() {
        let mut s = ActiveSet::with_capacity(usize::MAX);
        assert_eq!(s.words.len(), MAX_PRESIZE_WORDS);
        assert!(s.insert(100_000));
        assert!(s.contains(100_000));
    }

    #[test]
    fn iter_is_sorted() {
        let mut s = ActiveSet::with_capacity(128);
        for id in [70, 2, 64, 127, 0] {
            s.insert(id);
        }
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 2, 64, 70, 127]);
    }
}
