//! Directory ingestion: walk a folder, classify files by extension, apply
//! per-kind loading rules, and populate the catalog's indices.

mod file;

use crate::catalog::Catalog;
use crate::consts::{DEFAULT_AUDIO_MARKERS, MAX_EXTENSION_LEN, METADATA_EXTENSION, UID_PROBE_ATTEMPTS};
use crate::error::{ErrorKind, Result};
use crate::resource::Kind;
use std::fs;
use std::path::Path;
use theke_index::TextIndex;
use tracing::instrument;

/// Tunables for directory ingestion.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// The marker strings accepted as a `~`-delimited prefix on audio
    /// filenames. Files with any other prefix are rejected.
    pub audio_markers: Vec<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            audio_markers: DEFAULT_AUDIO_MARKERS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Ingest every classifiable file of a directory into the catalog.
///
/// Returns `Ok(false)` when the directory cannot be opened at all: a missing
/// resource directory is an expected first-run condition, not an error. Every
/// other failure (classification, metadata decode, identifier allocation) is
/// a typed error.
///
/// Non-fatal conditions are logged and skipped: filenames that are not
/// NFC-normalized (processed anyway), unknown or missing extensions, audio
/// files with an unrecognized marker, resources left invisible by their
/// metadata, and duplicate identifiers (first occurrence wins).
#[instrument(skip(catalog, options), fields(dir = %dir.display()))]
pub fn load_directory<I: TextIndex<u64>>(
    catalog: &mut Catalog<I>,
    dir: &Path,
    options: &LoaderOptions,
) -> Result<bool> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::info!(error = %err, "resource directory cannot be opened; nothing to load");
            return Ok(false);
        },
    };
    for entry in entries {
        let entry = entry.map_err(ErrorKind::Io)?;
        if !entry.file_type().map_err(ErrorKind::Io)?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            exn::bail!(ErrorKind::Encoding(file_name.to_string_lossy().into_owned()));
        };
        if !theke_meta::is_normalized(name) {
            tracing::warn!(file = name, "filename is not NFC-normalized");
        }
        let Some((stem, kind)) = classify(name) else {
            continue;
        };
        let path = dir.join(name);
        let Some(mut resource) = file::load_file(dir, &path, stem, kind, options)? else {
            continue;
        };
        if resource.id == 0 {
            resource.id = allocate_uid(dir)?;
        }
        if catalog.get(resource.id).is_some() {
            tracing::warn!(
                file = name,
                id = %theke_uid::encode(resource.id),
                "duplicate identifier; dropping this file"
            );
            continue;
        }
        catalog.insert(resource);
    }
    Ok(true)
}

/// Split a filename into `(stem, kind)`, or `None` when the entry should be
/// skipped: no extension, an extension over six characters, or an extension
/// outside the kind table (which includes the metadata sibling extension).
fn classify(name: &str) -> Option<(&str, Kind)> {
    let (stem, extension) = name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() || extension.len() > MAX_EXTENSION_LEN {
        return None;
    }
    let kind = Kind::from_extension(extension)?;
    Some((stem, kind))
}

/// Allocate a random identifier that no metadata stub in the directory has
/// claimed, so independent loader runs never hand out the same identifier.
///
/// An inability to probe the directory is fatal, and so is exhausting the
/// attempt budget.
fn allocate_uid(dir: &Path) -> Result<u64> {
    for _ in 0..UID_PROBE_ATTEMPTS {
        let candidate = theke_uid::random_u64();
        if candidate == 0 {
            continue;
        }
        let encoded = theke_uid::encode(candidate);
        let stub = dir.join(format!("{encoded}.{METADATA_EXTENSION}"));
        match stub.try_exists() {
            Ok(false) => return Ok(candidate),
            Ok(true) => {
                tracing::warn!(uid = encoded, "identifier already reserved in directory; retrying");
            },
            Err(err) => exn::bail!(ErrorKind::from_io(err, &stub)),
        }
    }
    exn::bail!(ErrorKind::UidAllocation(dir.to_path_buf()))
}
