//! The bundle container codec.
//!
//! A bundle is a single binary file, little-endian throughout: a 3-byte
//! sentinel header `[b1, b1+9, b1+1]` (where `b1` is a small random value
//! chosen at write time; a tamper check, not a cryptographic one), a
//! 3-byte entry count, that many fixed-shape TOC records
//! (`kind:u8, id:u64, size:u32, name_count:u8, (len:u8, bytes)×, offset:u64`),
//! then every entry's payload bytes concatenated in TOC order. Each `offset`
//! is the payload's absolute byte position in the file, so a reopened bundle
//! serves payloads by seeking without ever parsing them up front.

mod reader;
mod writer;

pub use self::reader::read_bundle;
pub use self::writer::write_bundle;
