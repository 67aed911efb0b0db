//! The tiered associative index behind resource lookup.
//!
//! The store only depends on the *shape* of the index (add a value under a
//! key, get back tiered matches), never on its internal algorithm, so the
//! lookup logic stays testable against any [`TextIndex`] implementation.
//! [`MemoryIndex`] is the implementation the catalog uses: two hash maps
//! (accent-exact and accent-folded keys) plus a substring scan for the
//! partial tier.

mod memory;

pub use crate::memory::MemoryIndex;

/// The result of probing one key, split by match precedence.
///
/// `exact_accented` beats `exact_unaccented` beats `partial`; the caller
/// walks the tiers in that order and stops at the first non-empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tiered<V> {
    /// Values stored under exactly this key (NFC-compared).
    pub exact_accented: Vec<V>,
    /// Values whose key matches after accent and case folding.
    pub exact_unaccented: Vec<V>,
    /// Values whose folded key merely contains the probed key.
    pub partial: Vec<V>,
}

impl<V> Default for Tiered<V> {
    fn default() -> Self {
        Self {
            exact_accented: Vec::new(),
            exact_unaccented: Vec::new(),
            partial: Vec::new(),
        }
    }
}

impl<V> Tiered<V> {
    /// Returns `true` if every tier is empty.
    pub fn is_empty(&self) -> bool {
        self.exact_accented.is_empty() && self.exact_unaccented.is_empty() && self.partial.is_empty()
    }
}

/// The associative index capability consumed by the catalog.
pub trait TextIndex<V> {
    /// Register `value` under `key`. Empty keys are never indexed.
    fn add(&mut self, key: &str, value: V);

    /// Probe a key, returning every tier at once.
    fn lookup(&self, key: &str) -> Tiered<V>;

    /// Number of `(key, value)` registrations accepted so far.
    fn len(&self) -> usize;

    /// Returns `true` if nothing has been indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
