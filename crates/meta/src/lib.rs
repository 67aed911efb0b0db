//! The metadata text format and its supporting text utilities.
//!
//! Resources carry a small sibling text file of line-oriented `letter:value`
//! pairs, tolerant of extra whitespace and of either Latin or Greek field
//! letters ([`records`]). This crate also owns the word tokenizer that feeds
//! the word index ([`tokenize`]) and the Unicode normalization and accent
//! folding used for index keys ([`nfc`], [`fold`]).

pub mod error;
mod field;
mod record;
mod text;
mod words;

pub use crate::field::Field;
pub use crate::record::{Record, Records, records};
pub use crate::text::{fold, is_normalized, nfc};
pub use crate::words::{tokenize, truthy};
