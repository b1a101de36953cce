// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Startup configuration read from a TOML file.
//!
//! Every field is optional; anything left out falls back to the constants
//! in `settings.rs`.
//!
//! ```toml
//! storage_dir = "/home/me/.letterpath"
//! text = "hello"
//! font_family = "Georgia"
//! throttle_ms = 30
//! min_font_size = 3.0
//! ```

use crate::session::SessionOptions;
use crate::settings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where presets, favorites, and the saved style live
    pub storage_dir: Option<PathBuf>,
    /// Overrides the saved repeat text
    pub text: Option<String>,
    /// Overrides the saved font family
    pub font_family: Option<String>,
    pub throttle_ms: u64,
    pub min_font_size: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: None,
            text: None,
            font_family: None,
            throttle_ms: settings::placement::THROTTLE_MS,
            min_font_size: settings::placement::MIN_FONT_SIZE,
        }
    }
}

impl Config {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Config::load`], but a missing file (or no path) gives the
    /// defaults. A file that exists and fails to parse is still an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Storage directory, defaulting to `~/.letterpath`
    pub fn storage_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage_dir {
            return dir.clone();
        }
        let base = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        base.join(settings::storage::DIR_NAME)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            throttle_ms: self.throttle_ms,
            min_font_size: self.min_font_size,
        }
    }
}
