//! Configuration loading for the theke resource store.
//!
//! Sources are merged in precedence order: built-in defaults, then
//! `theke.toml` in the platform configuration directory (or an explicitly
//! named file), then `THEKE_`-prefixed environment variables. A missing
//! default configuration file is a normal state, not an error.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use theke_store::LoaderOptions;
use theke_store::consts::DEFAULT_AUDIO_MARKERS;

/// Name of the configuration file looked up in the platform config
/// directory.
const CONFIG_FILE: &str = "theke.toml";

/// Environment variable prefix for overrides, e.g. `THEKE_LIBRARY_DIR`.
const ENV_PREFIX: &str = "THEKE_";

/// Top-level store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory walked by the directory loader.
    #[serde(default = "default_library_dir")]
    pub library_dir: PathBuf,
    /// Default location for the bundle container.
    #[serde(default)]
    pub bundle_path: Option<PathBuf>,
    /// Marker strings accepted as a `~`-delimited prefix on audio filenames.
    #[serde(default = "default_audio_markers")]
    pub audio_markers: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            library_dir: default_library_dir(),
            bundle_path: None,
            audio_markers: default_audio_markers(),
        }
    }
}

fn default_library_dir() -> PathBuf {
    PathBuf::from("resources")
}

fn default_audio_markers() -> Vec<String> {
    DEFAULT_AUDIO_MARKERS.iter().map(ToString::to_string).collect()
}

impl StoreConfig {
    /// Load configuration from the default locations.
    pub fn load() -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(StoreConfig::default()));
        if let Some(dirs) = ProjectDirs::from("", "", "theke") {
            let file = dirs.config_dir().join(CONFIG_FILE);
            tracing::debug!(file = %file.display(), "merging configuration file if present");
            figment = figment.admerge(Toml::file(file));
        }
        figment
            .admerge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|err| exn::Exn::from(ErrorKind::Invalid(err)))
    }

    /// Load configuration from an explicitly named file, which must exist,
    /// still honoring environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        Figment::from(Serialized::defaults(StoreConfig::default()))
            .admerge(Toml::file_exact(path))
            .admerge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|err| exn::Exn::from(ErrorKind::Invalid(err)))
    }

    /// Loader tunables derived from this configuration.
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            audio_markers: self.audio_markers.clone(),
        }
    }
}
