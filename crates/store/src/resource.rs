//! The resource entity: one content item, its kind, names, and storage
//! location.

use crate::consts::TRAILING_PUNCTUATION;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::PathBuf;
use theke_meta::{Field, nfc, records, truthy};

/// Defensive substitute for the one-in-2^64 case where a derived identifier
/// hashes to zero, which the catalog reserves as "unassigned".
const DERIVED_ZERO_SUBSTITUTE: u64 = u64::MAX;

/// Declared identifiers longer than this are truncated before decoding; a
/// data-cleanup rule for legacy metadata files that appended junk to the
/// field.
const MAX_UID_CHARS: usize = 10;

/// A resource kind; the closed set of content formats the store ingests.
///
/// `Unknown` exists only before classification and is never indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Compressed audio (`mp3`).
    Audio,
    /// PNG raster image.
    Png,
    /// JPEG raster image.
    Jpeg,
    /// GIF raster image.
    Gif,
    /// TrueType font (`ttf`).
    TrueType,
    /// OpenType font (`otf`).
    OpenType,
    /// Vector markup (`svg`).
    Svg,
    /// Tabular text (`csv`).
    Csv,
    /// Generic binary blob (`bin`).
    Binary,
    /// Not yet classified.
    Unknown,
}

// Extension table and wire codes are kept together so a new kind is one row
// here plus a category decision below.
const KINDS: &[(Kind, u8, &[&str])] = &[
    (Kind::Audio, 1, &["mp3"]),
    (Kind::Png, 2, &["png"]),
    (Kind::Jpeg, 3, &["jpg", "jpeg"]),
    (Kind::Gif, 4, &["gif"]),
    (Kind::TrueType, 5, &["ttf"]),
    (Kind::OpenType, 6, &["otf"]),
    (Kind::Svg, 7, &["svg"]),
    (Kind::Csv, 8, &["csv"]),
    (Kind::Binary, 9, &["bin"]),
];

impl Kind {
    /// Classify a filename extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        KINDS
            .iter()
            .find(|(_, _, extensions)| {
                extensions.iter().any(|known| extension.eq_ignore_ascii_case(known))
            })
            .map(|(kind, _, _)| *kind)
    }

    /// Stable one-byte wire code used in the bundle table of contents.
    pub fn code(self) -> u8 {
        KINDS
            .iter()
            .find(|(kind, _, _)| *kind == self)
            .map(|(_, code, _)| *code)
            .unwrap_or(0)
    }

    /// Inverse of [`Kind::code`]; `None` for codes outside the table.
    pub fn from_code(code: u8) -> Option<Self> {
        KINDS.iter().find(|(_, known, _)| *known == code).map(|(kind, _, _)| *kind)
    }

    /// Returns `true` for the raster image kinds.
    pub fn is_image(self) -> bool {
        matches!(self, Kind::Png | Kind::Jpeg | Kind::Gif)
    }

    /// Returns `true` for the font kinds.
    pub fn is_font(self) -> bool {
        matches!(self, Kind::TrueType | Kind::OpenType)
    }
}

/// A coarse or exact filter over resource kinds, applied during lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Everything.
    Any,
    /// Audio resources.
    Audio,
    /// All raster image kinds.
    Image,
    /// All font kinds.
    Font,
    /// Exactly one kind.
    Exact(Kind),
}

impl Category {
    /// Fixed membership table.
    pub fn matches(self, kind: Kind) -> bool {
        match self {
            Category::Any => kind != Kind::Unknown,
            Category::Audio => kind == Kind::Audio,
            Category::Image => kind.is_image(),
            Category::Font => kind.is_font(),
            Category::Exact(exact) => kind == exact,
        }
    }
}

/// Where a resource's payload bytes live. Exactly one of the two, set at load
/// time and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// An ordinary file on disk.
    Disk(PathBuf),
    /// A slice of an opened bundle container.
    Bundled {
        /// Absolute byte position of the payload in the container file.
        offset: u64,
        /// Payload length in bytes.
        size: u32,
    },
}

/// One content item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Nonzero and unique within a catalog; zero only transiently during
    /// loading, before the loader assigns one.
    pub id: u64,
    pub kind: Kind,
    /// A resource loaded without any metadata file defaults to visible;
    /// applying metadata resets this and only an explicit truthy `v` field
    /// restores it.
    pub visible: bool,
    pub date: Option<String>,
    pub copyright: Option<String>,
    pub link: Option<String>,
    names: Vec<String>,
    location: Location,
}

impl Resource {
    pub fn new(id: u64, kind: Kind, location: Location) -> Self {
        Self {
            id,
            kind,
            visible: true,
            date: None,
            copyright: None,
            link: None,
            names: Vec::new(),
            location,
        }
    }

    /// The display names, in insertion order, duplicates already removed.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Add a display name. Names are NFC-normalized and deduplicated; a name
    /// ending in tolerated trailing punctuation also registers its stripped
    /// twin, so exact lookup succeeds with or without the punctuation.
    pub fn push_name(&mut self, name: &str) {
        let name = nfc(name.trim());
        if name.is_empty() {
            return;
        }
        if !self.names.iter().any(|existing| existing == name.as_ref()) {
            self.names.push(name.clone().into_owned());
        }
        if let Some(stripped) = name.strip_suffix(TRAILING_PUNCTUATION) {
            let stripped = stripped.trim_end();
            if !stripped.is_empty() && !self.names.iter().any(|existing| existing == stripped) {
                self.names.push(stripped.to_string());
            }
        }
    }

    /// Deterministic identifier for content with a display name but no
    /// declared identifier: the first 8 little-endian bytes of
    /// `blake3(name ‖ size)`.
    pub fn derived_id(name: &str, size: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(name.as_bytes());
        hasher.update(&size.to_le_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest.as_bytes()[..8]);
        match u64::from_le_bytes(bytes) {
            0 => DERIVED_ZERO_SUBSTITUTE,
            id => id,
        }
    }

    /// Apply a metadata text to this resource, one record at a time.
    ///
    /// Repeated `sentence` fields each add a name; every other field is
    /// last-write-wins. Visibility starts false here: metadata that does not
    /// set it leaves the resource invisible, and the loader discards it.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Metadata`] for an unknown field designator, and
    /// [`ErrorKind::InvalidResourceUid`] when a declared identifier does not
    /// decode to a nonzero value.
    pub fn apply_metadata(&mut self, text: &str) -> Result<()> {
        self.visible = false;
        for record in records(text) {
            let (field, value) = record.require_known().map_err(ErrorKind::metadata)?;
            match field {
                Field::Uid => self.id = decode_declared_uid(value)?,
                Field::Date => self.date = Some(value.to_string()),
                Field::Copyright => self.copyright = Some(value.to_string()),
                Field::Link => self.link = Some(value.to_string()),
                Field::Sentence => self.push_name(value),
                Field::Visible => self.visible = truthy(value),
            }
        }
        Ok(())
    }
}

/// Decode a declared identifier field, applying the legacy truncation rule:
/// values longer than [`MAX_UID_CHARS`] characters keep only their first
/// [`MAX_UID_CHARS`].
pub(crate) fn decode_declared_uid(value: &str) -> Result<u64> {
    let end = value
        .char_indices()
        .nth(MAX_UID_CHARS)
        .map(|(index, _)| index)
        .unwrap_or(value.len());
    let id = theke_uid::decode(&value[..end])
        .or_raise(|| ErrorKind::InvalidResourceUid(value.to_string()))?;
    if id == 0 {
        exn::bail!(ErrorKind::InvalidResourceUid(value.to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn on_disk(kind: Kind) -> Resource {
        Resource::new(0, kind, Location::Disk(PathBuf::from("unused")))
    }

    #[rstest]
    #[case("mp3", Some(Kind::Audio))]
    #[case("MP3", Some(Kind::Audio))]
    #[case("jpeg", Some(Kind::Jpeg))]
    #[case("jpg", Some(Kind::Jpeg))]
    #[case("svg", Some(Kind::Svg))]
    #[case("txt", None)]
    #[case("tar.gz", None)]
    fn extension_classification(#[case] extension: &str, #[case] expected: Option<Kind>) {
        assert_eq!(Kind::from_extension(extension), expected);
    }

    #[test]
    fn wire_codes_round_trip() {
        for (kind, _, _) in super::KINDS {
            assert_eq!(Kind::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(Kind::from_code(0), None);
        assert_eq!(Kind::from_code(200), None);
    }

    #[rstest]
    #[case(Category::Any, Kind::Csv, true)]
    #[case(Category::Any, Kind::Unknown, false)]
    #[case(Category::Audio, Kind::Audio, true)]
    #[case(Category::Audio, Kind::Png, false)]
    #[case(Category::Image, Kind::Gif, true)]
    #[case(Category::Image, Kind::Svg, false)]
    #[case(Category::Font, Kind::OpenType, true)]
    #[case(Category::Font, Kind::Binary, false)]
    #[case(Category::Exact(Kind::Svg), Kind::Svg, true)]
    #[case(Category::Exact(Kind::Svg), Kind::Csv, false)]
    fn category_membership(#[case] category: Category, #[case] kind: Kind, #[case] expected: bool) {
        assert_eq!(category.matches(kind), expected);
    }

    #[test]
    fn trailing_punctuation_twin_is_stored() {
        let mut resource = on_disk(Kind::Audio);
        resource.push_name("ἄρτος.");
        assert_eq!(resource.names(), ["ἄρτος.", "ἄρτος"]);
    }

    #[test]
    fn twin_is_skipped_when_already_present() {
        let mut resource = on_disk(Kind::Audio);
        resource.push_name("ἄρτος");
        resource.push_name("ἄρτος·");
        assert_eq!(resource.names(), ["ἄρτος", "ἄρτος·"]);
    }

    #[test]
    fn lone_punctuation_has_no_twin() {
        let mut resource = on_disk(Kind::Audio);
        resource.push_name(";");
        assert_eq!(resource.names(), [";"]);
    }

    #[test]
    fn names_are_deduplicated_and_ordered() {
        let mut resource = on_disk(Kind::Png);
        resource.push_name("alpha");
        resource.push_name("beta");
        resource.push_name("alpha");
        assert_eq!(resource.names(), ["alpha", "beta"]);
    }

    #[test]
    fn metadata_scenario_visible_and_date() {
        let mut resource = on_disk(Kind::Png);
        resource.apply_metadata("v:y\nd:1010\n").unwrap();
        assert!(resource.visible);
        assert_eq!(resource.date.as_deref(), Some("1010"));
    }

    #[test]
    fn metadata_scenario_copyright_and_uid() {
        let mut resource = on_disk(Kind::Png);
        resource.apply_metadata("c:bob\ni:12ab").unwrap();
        assert_eq!(resource.copyright.as_deref(), Some("bob"));
        assert_eq!(resource.id, theke_uid::decode("12ab").unwrap());
    }

    #[test]
    fn metadata_without_visibility_hides_the_resource() {
        let mut resource = on_disk(Kind::Png);
        assert!(resource.visible);
        resource.apply_metadata("d:1010\n").unwrap();
        assert!(!resource.visible);
    }

    #[test]
    fn repeated_sentences_accumulate_and_fields_overwrite() {
        let mut resource = on_disk(Kind::Audio);
        resource
            .apply_metadata("s:first name\ns:second name\nd:1010\nd:1020\nv:1\n")
            .unwrap();
        assert_eq!(resource.names(), ["first name", "second name"]);
        assert_eq!(resource.date.as_deref(), Some("1020"));
        assert!(resource.visible);
    }

    #[test]
    fn long_uid_is_truncated_to_ten_characters() {
        let mut resource = on_disk(Kind::Png);
        // Only the first ten characters participate in decoding.
        let full = "BAAAAAAAAAzzzz";
        resource.apply_metadata(&format!("i:{full}\n")).unwrap();
        assert_eq!(resource.id, theke_uid::decode("BAAAAAAAAA").unwrap());
    }

    #[rstest]
    #[case("i:\n")]
    #[case("i:A\n")]
    #[case("i:!!\n")]
    fn zero_or_undecodable_uid_fails(#[case] text: &str) {
        let mut resource = on_disk(Kind::Png);
        let err = resource.apply_metadata(text).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidResourceUid(_)));
    }

    #[test]
    fn unknown_field_is_fatal_for_resources() {
        let mut resource = on_disk(Kind::Png);
        let err = resource.apply_metadata("x:junk\n").unwrap_err();
        assert!(matches!(&*err, ErrorKind::Metadata(_)));
    }

    #[test]
    fn derived_ids_are_deterministic_and_size_sensitive() {
        let a = Resource::derived_id("ἄρτος", 100);
        assert_eq!(a, Resource::derived_id("ἄρτος", 100));
        assert_ne!(a, Resource::derived_id("ἄρτος", 101));
        assert_ne!(a, Resource::derived_id("οἶνος", 100));
        assert_ne!(a, 0);
    }
}
