//! Xorshift generator for resource identifiers that have no content-derived
//! value of their own.
//!
//! Not cryptographically secure, and not meant to be: callers only need a
//! cheap stream of well-spread 64-bit values to allocate from, with collisions
//! handled by probing (see the directory loader). The default seed is fixed so
//! that tests see a deterministic sequence; call [`seed_from_time`] once at
//! startup for non-repeating sequences between runs.

use std::cell::RefCell;
use std::time::{SystemTime, UNIX_EPOCH};

// Marsaglia's original xorshift64 seed. Any nonzero value works; zero is the
// generator's fixed point and must never become the state.
const DEFAULT_SEED: u64 = 88_172_645_463_325_252;

/// A 64-bit xorshift generator (13/17/5 shift triple).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift {
    state: u64,
}

impl Default for Xorshift {
    fn default() -> Self {
        Self { state: DEFAULT_SEED }
    }
}

impl Xorshift {
    /// Create a generator from an explicit seed. A zero seed is replaced with
    /// the default seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Advance the generator and return the next value. Never returns the
    /// same value twice in a row and never returns from a zero state.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

thread_local! {
    static PROCESS_RNG: RefCell<Xorshift> = RefCell::new(Xorshift::default());
}

/// Draw the next identifier candidate from the process-wide generator.
pub fn random_u64() -> u64 {
    PROCESS_RNG.with_borrow_mut(Xorshift::next_u64)
}

/// Re-seed the process-wide generator.
pub fn seed(value: u64) {
    PROCESS_RNG.with_borrow_mut(|rng| *rng = Xorshift::new(value));
}

/// Seed the process-wide generator from the system clock. Expected once at
/// startup; tests that rely on the deterministic default should not call this.
pub fn seed_from_time() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(DEFAULT_SEED);
    seed(nanos);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sequence_is_deterministic() {
        let mut a = Xorshift::default();
        let mut b = Xorshift::default();
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn seeded_sequences_differ() {
        let mut a = Xorshift::new(1);
        let mut b = Xorshift::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn zero_seed_falls_back_to_default() {
        assert_eq!(Xorshift::new(0), Xorshift::default());
    }

    #[test]
    fn state_never_sticks_at_zero() {
        let mut rng = Xorshift::new(1);
        for _ in 0..1_000 {
            assert_ne!(rng.next_u64(), 0);
        }
    }
}
