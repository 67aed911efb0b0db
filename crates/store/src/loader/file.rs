//! Per-kind loading rules for a single classified file.

use crate::consts::METADATA_EXTENSION;
use crate::error::{ErrorKind, Result};
use crate::fsutil;
use crate::loader::LoaderOptions;
use crate::resource::{Kind, Location, Resource};
use exn::{OptionExt, ResultExt};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Load one classified file into a [`Resource`], or `Ok(None)` when the file
/// is rejected non-fatally: an audio entry with an unrecognized marker, or a
/// resource left invisible by its metadata.
///
/// Identifier sourcing per kind: audio and fonts leave the identifier at
/// zero for the caller's random allocation; vector and tabular files decode
/// it from the filename stem; images and binaries take it from the sibling
/// metadata file, falling back to a content-derived hash when the metadata
/// exists but declares none.
pub(crate) fn load_file(
    dir: &Path,
    path: &Path,
    stem: &str,
    kind: Kind,
    options: &LoaderOptions,
) -> Result<Option<Resource>> {
    let mut resource = Resource::new(0, kind, Location::Disk(path.to_path_buf()));
    match kind {
        Kind::Audio => {
            let Some(name) = audio_name(stem, &options.audio_markers) else {
                tracing::warn!(file = %path.display(), "audio filename has no usable name; rejecting");
                return Ok(None);
            };
            resource.push_name(&name);
            let meta_path = metadata_path(dir, stem);
            let text = read_metadata(&meta_path)?.ok_or_raise(|| ErrorKind::MetadataMissing(meta_path.clone()))?;
            resource.apply_metadata(&text)?;
        },
        Kind::TrueType | Kind::OpenType => {
            resource.push_name(stem);
        },
        Kind::Svg | Kind::Csv => {
            resource.id = crate::resource::decode_declared_uid(stem)?;
            resource.push_name(stem);
            if let Some(text) = read_metadata(&metadata_path(dir, stem))? {
                resource.apply_metadata(&text)?;
            }
        },
        Kind::Png | Kind::Jpeg | Kind::Gif | Kind::Binary => {
            resource.push_name(stem);
            if let Some(text) = read_metadata(&metadata_path(dir, stem))? {
                resource.apply_metadata(&text)?;
                if resource.id == 0 {
                    let size = fs::metadata(path).map_err(|err| ErrorKind::from_io(err, path))?.len();
                    resource.id = Resource::derived_id(stem, size);
                }
            }
        },
        Kind::Unknown => return Ok(None),
    }
    if !resource.visible {
        tracing::debug!(file = %path.display(), "resource is not visible; discarding");
        return Ok(None);
    }
    Ok(Some(resource))
}

/// The sibling metadata file sharing a resource's stem.
fn metadata_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.{METADATA_EXTENSION}"))
}

/// Extract the display name from an audio filename stem.
///
/// Trailing digits (take numbers and the like) and whitespace are stripped;
/// a `~`-delimited prefix must be one of the known marker strings or the
/// file is rejected.
fn audio_name(stem: &str, markers: &[String]) -> Option<String> {
    let stem = stem.trim_end_matches(|ch: char| ch.is_ascii_digit()).trim_end();
    match stem.split_once('~') {
        Some((marker, name)) => {
            if !markers.iter().any(|known| known == marker) {
                return None;
            }
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        },
        None => (!stem.is_empty()).then(|| stem.to_string()),
    }
}

/// Read a sibling metadata file, distinguishing "absent" (a normal state,
/// `Ok(None)`) from every other failure.
///
/// Metadata whose on-disk text is not NFC-normalized is rewritten in place,
/// best-effort: the rewrite failing is logged and the normalized text is
/// still the one returned.
fn read_metadata(path: &Path) -> Result<Option<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => exn::bail!(ErrorKind::from_io(err, path)),
    };
    let text = String::from_utf8(bytes).or_raise(|| ErrorKind::Encoding(path.display().to_string()))?;
    if theke_meta::is_normalized(&text) {
        return Ok(Some(text));
    }
    let normalized = theke_meta::nfc(&text).into_owned();
    tracing::info!(file = %path.display(), "rewriting metadata file in NFC form");
    if let Err(err) = fsutil::write_atomic(path, normalized.as_bytes()) {
        tracing::warn!(file = %path.display(), error = %err, "metadata rewrite failed; continuing");
    }
    Ok(Some(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn markers() -> Vec<String> {
        LoaderOptions::default().audio_markers
    }

    #[rstest]
    #[case("Ψαλμός", Some("Ψαλμός"))]
    #[case("Ψαλμός 03", Some("Ψαλμός"))]
    #[case("live~Ψαλμός", Some("Ψαλμός"))]
    #[case("studio~Ψαλμός 12", Some("Ψαλμός"))]
    #[case("bootleg~Ψαλμός", None)]
    #[case("42", None)]
    #[case("live~", None)]
    fn audio_names(#[case] stem: &str, #[case] expected: Option<&str>) {
        assert_eq!(audio_name(stem, &markers()).as_deref(), expected);
    }

    #[test]
    fn absent_metadata_is_a_normal_state() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_metadata(&dir.path().join("missing.txt")).unwrap(), None);
    }

    #[test]
    fn metadata_that_is_not_utf8_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = read_metadata(&path).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Encoding(_)));
    }

    #[test]
    fn normalized_metadata_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.txt");
        fs::write(&path, "s:ἄρτος\n").unwrap();
        assert_eq!(read_metadata(&path).unwrap().as_deref(), Some("s:ἄρτος\n"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "s:ἄρτος\n");
    }
}
