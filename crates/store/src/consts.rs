//! Fixed constants of the store: file classification, the metadata sibling
//! convention, and container limits.

/// Filename suffixes longer than this are not treated as extensions; the
/// entry is skipped during classification.
pub const MAX_EXTENSION_LEN: usize = 6;

/// Extension of the sibling metadata file sharing a resource's stem.
pub const METADATA_EXTENSION: &str = "txt";

/// Trailing punctuation tolerated by name storage and lookup. A name ending
/// in one of these also gets a stripped twin, and a query ending in one of
/// these falls back to the stripped form.
pub const TRAILING_PUNCTUATION: &[char] = &['.', '·', ',', '!', ':', ';'];

/// Default `~`-prefix markers accepted on audio filenames. Deployments can
/// extend this set through configuration.
pub const DEFAULT_AUDIO_MARKERS: &[&str] = &["live", "studio", "session"];

/// A bundle TOC entry stores its name count in one byte, with one slot
/// reserved, so a resource contributes at most this many names.
pub const MAX_BUNDLE_NAMES: usize = 254;

/// A TOC name length is one byte, capping each name at this many UTF-8 bytes.
pub const MAX_BUNDLE_NAME_BYTES: usize = u8::MAX as usize;

/// The 3-byte entry count caps a bundle at this many resources.
pub const MAX_BUNDLE_ENTRIES: usize = 0xFF_FFFF;

/// How many random identifiers the loader tries before giving up on
/// allocation. The probe is expected to succeed on the first attempt; the
/// bound exists to turn a pathological directory into a hard error instead of
/// a livelock.
pub const UID_PROBE_ATTEMPTS: usize = 64;
