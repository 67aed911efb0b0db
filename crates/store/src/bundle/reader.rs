//! Bundle container reader.
//!
//! Reopening is lazy: only the header and table of contents are parsed;
//! payload bytes stay on disk until [`Catalog::read_payload`] seeks to them.

use crate::catalog::Catalog;
use crate::error::{ErrorKind, Result};
use crate::resource::{Kind, Location, Resource};
use exn::{OptionExt, ResultExt};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use theke_index::TextIndex;
use tracing::instrument;

/// Open a container file and catalog every TOC entry as a bundle-resident
/// resource, indexed exactly as the directory loader indexes on-disk
/// resources (same deduplication, same word tokenization).
#[instrument(skip(catalog), fields(path = %path.display()))]
pub fn read_bundle<I: TextIndex<u64>>(catalog: &mut Catalog<I>, path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|err| ErrorKind::from_io(err, path))?;
    let mut reader = BufReader::new(file);

    let header: [u8; 3] = read_exact(&mut reader, path)?;
    let sentinel = header[0];
    if header[1] != sentinel.wrapping_add(9) || header[2] != sentinel.wrapping_add(1) {
        exn::bail!(ErrorKind::InvalidBundleFile(path.to_path_buf()));
    }
    let count_bytes: [u8; 3] = read_exact(&mut reader, path)?;
    let count = u32::from_le_bytes([count_bytes[0], count_bytes[1], count_bytes[2], 0]);

    for _ in 0..count {
        let kind_code = read_exact::<1>(&mut reader, path)?[0];
        let kind = Kind::from_code(kind_code).ok_or_raise(|| ErrorKind::InvalidBundleFile(path.to_path_buf()))?;
        let id = u64::from_le_bytes(read_exact(&mut reader, path)?);
        let size = u32::from_le_bytes(read_exact(&mut reader, path)?);
        let name_count = read_exact::<1>(&mut reader, path)?[0];
        let mut names = Vec::with_capacity(name_count as usize);
        for _ in 0..name_count {
            let len = read_exact::<1>(&mut reader, path)?[0] as usize;
            let mut bytes = vec![0u8; len];
            reader.read_exact(&mut bytes).map_err(|err| eof_as_truncation(err, path))?;
            let name =
                String::from_utf8(bytes).or_raise(|| ErrorKind::Encoding(path.display().to_string()))?;
            names.push(name);
        }
        let offset = u64::from_le_bytes(read_exact(&mut reader, path)?);

        let mut resource = Resource::new(id, kind, Location::Bundled { offset, size });
        for name in &names {
            resource.push_name(name);
        }
        catalog.insert(resource);
    }
    catalog.set_bundle_path(path.to_path_buf());
    tracing::info!(entries = count, "bundle opened");
    Ok(())
}

fn read_exact<const N: usize>(reader: &mut impl Read, path: &Path) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    reader.read_exact(&mut bytes).map_err(|err| eof_as_truncation(err, path))?;
    Ok(bytes)
}

fn eof_as_truncation(err: io::Error, path: &Path) -> ErrorKind {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => ErrorKind::TruncatedBundle(path.to_path_buf()),
        _ => ErrorKind::Io(err),
    }
}
