//! The resource store: catalog, directory ingestion, bundle container codec,
//! and tiered lookup.
//!
//! A [`Catalog`] is populated either by walking a resource directory
//! ([`load_directory`]) or by reopening a previously written container
//! ([`read_bundle`]), and is queried read-only through [`lookup`] and
//! [`search`]. [`write_bundle`] drains a manifest of resolved resources back
//! out into a single distributable file.
//!
//! Everything here is single-threaded with blocking I/O; a catalog is not
//! safe for concurrent mutation and callers sharing one must serialize
//! writes externally.

mod bundle;
mod catalog;
pub mod consts;
pub mod error;
mod fsutil;
mod loader;
mod lookup;
mod resource;

pub use crate::bundle::{read_bundle, write_bundle};
pub use crate::catalog::Catalog;
pub use crate::loader::{LoaderOptions, load_directory};
pub use crate::lookup::{lookup, search};
pub use crate::resource::{Category, Kind, Location, Resource};
