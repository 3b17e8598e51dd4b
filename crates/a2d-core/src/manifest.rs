//! Chrome extension manifest reading.
//!
//! Only the two fields desktop integration cares about are modelled; anything
//! else in `manifest.json` is ignored.

use crate::error::{A2dError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

/// The subset of `manifest.json` used for desktop entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtensionManifest {
    /// Size label (`"128"`) to icon path relative to the extension directory.
    #[serde(default)]
    pub icons: BTreeMap<String, String>,
    #[serde(default)]
    pub offline_enabled: bool,
}

impl ExtensionManifest {
    /// Parse manifest JSON text.
    pub fn from_json(path: &Path, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| A2dError::ManifestMalformed {
            path: path.to_path_buf(),
            message: e.to_string(),
            source: Some(e),
        })
    }

    /// Declared icons as `(pixel size, relative path)`, smallest first.
    ///
    /// Labels that are not positive integers cannot name a hicolor size
    /// directory and are skipped.
    pub fn icon_sizes(&self) -> Vec<(u32, &str)> {
        let mut sizes: Vec<(u32, &str)> = self
            .icons
            .iter()
            .filter_map(|(label, file)| match label.trim().parse::<u32>() {
                Ok(size) if size > 0 => Some((size, file.as_str())),
                _ => {
                    warn!("Ignoring icon with invalid size label {:?}", label);
                    None
                }
            })
            .collect();
        sizes.sort_unstable();
        sizes
    }
}

/// Load and parse a manifest file.
pub fn read_manifest(path: &Path) -> Result<ExtensionManifest> {
    let json = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => A2dError::ManifestMissing {
            path: path.to_path_buf(),
        },
        _ => A2dError::io_context("read manifest", path, e),
    })?;

    ExtensionManifest::from_json(path, &json)
}
