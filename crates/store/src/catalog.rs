//! The catalog: the aggregate owning every resource and the three indices
//! over them.

use crate::error::{ErrorKind, Result};
use crate::resource::{Location, Resource};
use exn::OptionExt;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use theke_index::{MemoryIndex, TextIndex};

/// The aggregate owning all resources and their search indices.
///
/// Single-threaded and unlocked: callers sharing a catalog must serialize
/// writes externally. Dropping the catalog releases every resource and every
/// string it holds at once.
#[derive(Debug, Default)]
pub struct Catalog<I: TextIndex<u64> = MemoryIndex<u64>> {
    by_id: HashMap<u64, Resource>,
    by_name: I,
    by_word: I,
    bundle_path: Option<PathBuf>,
}

impl Catalog<MemoryIndex<u64>> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: TextIndex<u64>> Catalog<I> {
    /// Build a catalog over caller-supplied index implementations. The
    /// catalog only relies on the tiered-lookup shape, not on the indices'
    /// internal algorithm.
    pub fn with_indices(by_name: I, by_word: I) -> Self {
        Self {
            by_id: HashMap::new(),
            by_name,
            by_word,
            bundle_path: None,
        }
    }

    /// Insert a resource, indexing every name and every word of every name.
    ///
    /// Returns `false` without touching any index when the identifier is
    /// zero or already present; the first occurrence wins and the duplicate
    /// is logged and dropped.
    pub fn insert(&mut self, resource: Resource) -> bool {
        if resource.id == 0 {
            tracing::warn!("refusing to catalog a resource with identifier zero");
            return false;
        }
        if self.by_id.contains_key(&resource.id) {
            tracing::warn!(
                id = %theke_uid::encode(resource.id),
                "duplicate identifier; keeping the first occurrence"
            );
            return false;
        }
        for name in resource.names() {
            self.by_name.add(name, resource.id);
            let words = theke_meta::tokenize(name);
            if words.is_empty() {
                tracing::warn!(name, "name tokenizes to no indexable words");
            }
            for word in words {
                self.by_word.add(word, resource.id);
            }
        }
        self.by_id.insert(resource.id, resource);
        true
    }

    pub fn get(&self, id: u64) -> Option<&Resource> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterate over every cataloged resource, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.by_id.values()
    }

    pub(crate) fn by_name(&self) -> &I {
        &self.by_name
    }

    pub(crate) fn by_word(&self) -> &I {
        &self.by_word
    }

    /// The container file backing bundle-resident resources, if one has been
    /// opened on this catalog.
    pub fn bundle_path(&self) -> Option<&Path> {
        self.bundle_path.as_deref()
    }

    pub(crate) fn set_bundle_path(&mut self, path: PathBuf) {
        self.bundle_path = Some(path);
    }

    /// Read the payload bytes of one resource into a caller-owned buffer.
    ///
    /// On-disk resources are read whole; bundle-resident resources are read
    /// with a seek into the opened container, failing with
    /// [`ErrorKind::TruncatedBundle`] if the container holds fewer bytes
    /// than its table of contents declared.
    pub fn read_payload(&self, id: u64) -> Result<Vec<u8>> {
        let resource = self.by_id.get(&id).ok_or_raise(|| ErrorKind::UnknownResource(id))?;
        match resource.location() {
            Location::Disk(path) => Ok(fs::read(path).map_err(|err| ErrorKind::from_io(err, path))?),
            Location::Bundled { offset, size } => {
                let path = self.bundle_path().ok_or_raise(|| ErrorKind::NoBundleOpen)?;
                let mut file = File::open(path).map_err(|err| ErrorKind::from_io(err, path))?;
                file.seek(SeekFrom::Start(*offset)).map_err(ErrorKind::Io)?;
                let mut payload = vec![0u8; *size as usize];
                file.read_exact(&mut payload).map_err(|err| match err.kind() {
                    std::io::ErrorKind::UnexpectedEof => ErrorKind::TruncatedBundle(path.to_path_buf()),
                    _ => ErrorKind::Io(err),
                })?;
                Ok(payload)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Kind;

    fn named(id: u64, names: &[&str]) -> Resource {
        let mut resource = Resource::new(id, Kind::Audio, Location::Disk(PathBuf::from("unused")));
        for name in names {
            resource.push_name(name);
        }
        resource
    }

    #[test]
    fn insert_indexes_names_and_words() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(named(7, &["ἄρτος ζωῆς"])));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.by_name().lookup("ἄρτος ζωῆς").exact_accented, vec![7]);
        assert_eq!(catalog.by_word().lookup("ἄρτος").exact_accented, vec![7]);
        assert_eq!(catalog.by_word().lookup("ζωῆς").exact_accented, vec![7]);
    }

    #[test]
    fn duplicate_identifier_keeps_first_insertion() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(named(7, &["first"])));
        let before = catalog.by_name().len();
        assert!(!catalog.insert(named(7, &["second"])));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.by_name().len(), before);
        assert_eq!(catalog.get(7).unwrap().names(), ["first"]);
        assert!(catalog.by_name().lookup("second").is_empty());
    }

    #[test]
    fn zero_identifier_is_rejected() {
        let mut catalog = Catalog::new();
        assert!(!catalog.insert(named(0, &["anything"])));
        assert!(catalog.is_empty());
    }

    #[test]
    fn disk_payload_reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, b"payload bytes").unwrap();
        let mut catalog = Catalog::new();
        let mut resource = Resource::new(3, Kind::Binary, Location::Disk(path));
        resource.push_name("blob");
        catalog.insert(resource);
        assert_eq!(catalog.read_payload(3).unwrap(), b"payload bytes");
    }

    #[test]
    fn unknown_resource_payload_fails() {
        let catalog = Catalog::new();
        let err = catalog.read_payload(42).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownResource(42)));
    }

    #[test]
    fn bundled_payload_without_open_bundle_fails() {
        let mut catalog = Catalog::new();
        let mut resource = Resource::new(5, Kind::Png, Location::Bundled { offset: 0, size: 4 });
        resource.push_name("icon");
        catalog.insert(resource);
        let err = catalog.read_payload(5).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NoBundleOpen));
    }
}
