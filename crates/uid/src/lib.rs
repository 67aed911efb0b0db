//! Resource identifier codec and generator.
//!
//! Identifiers are nonzero 64-bit values, human-rendered in little-endian
//! base-62 (see [`encode`]/[`decode`]). Resources whose content carries no
//! inherent identifier get one from a cheap xorshift generator instead
//! ([`random_u64`]), with collisions resolved by the caller.

mod base62;
pub mod error;
mod rng;

pub use crate::base62::{decode, encode};
pub use crate::rng::{Xorshift, random_u64, seed, seed_from_time};
