//! Bundle container writer.

use crate::catalog::Catalog;
use crate::consts::{MAX_BUNDLE_ENTRIES, MAX_BUNDLE_NAME_BYTES, MAX_BUNDLE_NAMES};
use crate::error::{ErrorKind, Result};
use crate::resource::{Kind, Location};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use theke_index::TextIndex;
use tracing::instrument;

struct TocEntry<'a> {
    kind: Kind,
    id: u64,
    size: u32,
    names: Vec<&'a str>,
    source: &'a Path,
    offset: u64,
}

impl TocEntry<'_> {
    /// Serialized record size: kind, id, size, name count, names, offset.
    fn encoded_len(&self) -> usize {
        1 + 8 + 4 + 1 + self.names.iter().map(|name| 1 + name.len()).sum::<usize>() + 8
    }
}

/// Drain a manifest of previously resolved resources into a container file.
///
/// Manifest entries the catalog does not hold, entries without a source path
/// (bundle-resident resources cannot be re-bundled), and entries with no
/// names are logged and skipped. Name lists longer than 254 and names longer
/// than 255 bytes are truncated with a warning. A payload larger than the
/// 32-bit size field can represent is logged as an error but still written.
#[instrument(skip(catalog, manifest), fields(entries = manifest.len(), dest = %dest.display()))]
pub fn write_bundle<I: TextIndex<u64>>(catalog: &Catalog<I>, manifest: &[u64], dest: &Path) -> Result<()> {
    let mut entries = Vec::with_capacity(manifest.len());
    for &id in manifest {
        let Some(resource) = catalog.get(id) else {
            tracing::warn!(id = %theke_uid::encode(id), "manifest entry not in catalog; skipping");
            continue;
        };
        let Location::Disk(source) = resource.location() else {
            tracing::warn!(
                id = %theke_uid::encode(id),
                "bundle-resident resource cannot be re-bundled; skipping"
            );
            continue;
        };
        if resource.names().is_empty() {
            tracing::warn!(id = %theke_uid::encode(id), "resource has no names; skipping");
            continue;
        }
        let payload_len = fs::metadata(source).map_err(|err| ErrorKind::from_io(err, source))?.len();
        if payload_len > u32::MAX as u64 {
            tracing::error!(
                id = %theke_uid::encode(id),
                size = payload_len,
                "payload exceeds the container's 32-bit size field"
            );
        }
        let mut names: Vec<&str> = resource.names().iter().map(String::as_str).collect();
        if names.len() > MAX_BUNDLE_NAMES {
            tracing::warn!(id = %theke_uid::encode(id), count = names.len(), "truncating name list");
            names.truncate(MAX_BUNDLE_NAMES);
        }
        let names = names.into_iter().map(clamp_name).collect();
        entries.push(TocEntry {
            kind: resource.kind,
            id,
            size: payload_len as u32,
            names,
            source,
            offset: 0,
        });
    }
    if entries.len() > MAX_BUNDLE_ENTRIES {
        exn::bail!(ErrorKind::TooManyResources(entries.len()));
    }

    // Payloads start right after the header, count, and TOC; each entry's
    // offset is absolute within the file.
    let toc_len: usize = entries.iter().map(TocEntry::encoded_len).sum();
    let mut offset = (3 + 3 + toc_len) as u64;
    for entry in &mut entries {
        entry.offset = offset;
        offset += u64::from(entry.size);
    }

    let file = File::create(dest).map_err(|err| ErrorKind::from_io(err, dest))?;
    let mut out = BufWriter::new(file);
    let sentinel = header_sentinel();
    out.write_all(&[sentinel, sentinel.wrapping_add(9), sentinel.wrapping_add(1)])
        .map_err(ErrorKind::Io)?;
    out.write_all(&(entries.len() as u32).to_le_bytes()[..3]).map_err(ErrorKind::Io)?;
    for entry in &entries {
        out.write_all(&[entry.kind.code()]).map_err(ErrorKind::Io)?;
        out.write_all(&entry.id.to_le_bytes()).map_err(ErrorKind::Io)?;
        out.write_all(&entry.size.to_le_bytes()).map_err(ErrorKind::Io)?;
        out.write_all(&[entry.names.len() as u8]).map_err(ErrorKind::Io)?;
        for name in &entry.names {
            out.write_all(&[name.len() as u8]).map_err(ErrorKind::Io)?;
            out.write_all(name.as_bytes()).map_err(ErrorKind::Io)?;
        }
        out.write_all(&entry.offset.to_le_bytes()).map_err(ErrorKind::Io)?;
    }
    for entry in &entries {
        let source = File::open(entry.source).map_err(|err| ErrorKind::from_io(err, entry.source))?;
        // Copy no more than the recorded size so later offsets stay valid
        // even when the 32-bit field truncated the payload length.
        let mut source = source.take(u64::from(entry.size));
        io::copy(&mut source, &mut out).map_err(ErrorKind::Io)?;
    }
    out.flush().map_err(ErrorKind::Io)?;
    tracing::info!(entries = entries.len(), size = offset, "bundle written");
    Ok(())
}

/// The random first header byte. Kept small so the `+9`/`+1` checks rarely
/// wrap; wrapping is still handled on both sides.
fn header_sentinel() -> u8 {
    (theke_uid::random_u64() % 128) as u8
}

/// Cap a name at the 255 bytes its TOC length field can record, on a char
/// boundary.
fn clamp_name(name: &str) -> &str {
    if name.len() <= MAX_BUNDLE_NAME_BYTES {
        return name;
    }
    let mut end = MAX_BUNDLE_NAME_BYTES;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    tracing::warn!(bytes = name.len(), "truncating over-long name for the container");
    &name[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;

    #[test]
    fn empty_manifest_writes_a_valid_empty_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bundle");
        let catalog = Catalog::new();
        write_bundle(&catalog, &[], &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 6);
        assert_eq!(bytes[1], bytes[0].wrapping_add(9));
        assert_eq!(bytes[2], bytes[0].wrapping_add(1));
        assert_eq!(&bytes[3..6], &[0, 0, 0]);
    }

    #[test]
    fn nameless_resources_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let payload = dir.path().join("orphan.bin");
        fs::write(&payload, b"bytes").unwrap();
        let mut catalog = Catalog::new();
        catalog.insert(Resource::new(9, Kind::Binary, Location::Disk(payload)));
        let path = dir.path().join("out.bundle");
        write_bundle(&catalog, &[9], &path).unwrap();
        // Header and zero count only.
        assert_eq!(fs::read(&path).unwrap().len(), 6);
    }

    #[test]
    fn missing_source_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::new();
        let mut resource = Resource::new(9, Kind::Binary, Location::Disk(dir.path().join("gone.bin")));
        resource.push_name("gone");
        catalog.insert(resource);
        let err = write_bundle(&catalog, &[9], &dir.path().join("out.bundle")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn clamp_name_respects_char_boundaries() {
        let long = "α".repeat(200);
        assert_eq!(long.len(), 400);
        let clamped = clamp_name(&long);
        assert!(clamped.len() <= MAX_BUNDLE_NAME_BYTES);
        assert_eq!(clamped.len() % 2, 0);
        assert!(clamped.chars().all(|ch| ch == 'α'));
    }
}
