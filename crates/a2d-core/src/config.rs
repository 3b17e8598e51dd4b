//! Centralized configuration for Apps2Desktop.
//!
//! Constant tables for on-disk layout and naming, plus [`XdgDirs`], the pair of
//! base directories every derived path hangs off.

use crate::error::{A2dError, Result};
use std::path::{Path, PathBuf};

/// Directory and file names inside the XDG base directories.
pub struct PathsConfig;

impl PathsConfig {
    pub const APPLICATIONS_DIR_NAME: &'static str = "applications";
    pub const ICONS_DIR_NAME: &'static str = "icons";
    pub const ICON_THEME_NAME: &'static str = "hicolor";
    pub const ICON_APPS_DIR_NAME: &'static str = "apps";
    pub const MANIFEST_FILENAME: &'static str = "manifest.json";
    pub const CHROME_EXTENSIONS_SUBPATH: &'static str = "google-chrome/Default/Extensions";
    pub const CHROMIUM_EXTENSIONS_SUBPATH: &'static str = "chromium/Default/Extensions";
}

/// Names and fixed values written into generated desktop entries.
pub struct NamingConfig;

impl NamingConfig {
    /// Marker every generated entry name starts with.
    pub const GENERATOR_MARKER: &'static str = "a2d-";
    pub const DESKTOP_EXTENSION: &'static str = ".desktop";
    pub const ICON_EXTENSION: &'static str = ".png";
    pub const WM_CLASS_FALLBACK_PREFIX: &'static str = "crx_";
    pub const CATEGORIES: &'static str = "NETWORK";
    pub const DISPLAY_PREFIX_SEPARATOR: &'static str = " - ";
    /// Entries launching through `xdg-open` never reference a browser binary.
    pub const XDG_OPEN_MARKER: &'static str = "xdg-open";
}

/// Process environment consulted while resolving the running browser.
pub struct EnvConfig;

impl EnvConfig {
    pub const CHROME_WRAPPER: &'static str = "CHROME_WRAPPER";
    pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";
    pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
    pub const SELF_EXE_LINK: &'static str = "/proc/self/exe";
    /// Substring of the wrapper path that identifies Chromium.
    pub const CHROMIUM_WRAPPER_MARKER: &'static str = "chromium";
}

/// User data and config base directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdgDirs {
    /// `$XDG_DATA_HOME`, usually `~/.local/share`.
    pub data_dir: PathBuf,
    /// `$XDG_CONFIG_HOME`, usually `~/.config`.
    pub config_dir: PathBuf,
}

impl XdgDirs {
    /// Use explicit base directories.
    pub fn new(data_dir: impl Into<PathBuf>, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            config_dir: config_dir.into(),
        }
    }

    /// Resolve the base directories from the process environment.
    ///
    /// Relative `XDG_*` values are ignored, as the basedir spec requires.
    pub fn from_env() -> Result<Self> {
        let data_dir = env_dir(EnvConfig::XDG_DATA_HOME)
            .or_else(dirs::data_dir)
            .ok_or_else(|| A2dError::Config {
                message: "Could not determine user data directory".to_string(),
            })?;
        let config_dir = env_dir(EnvConfig::XDG_CONFIG_HOME)
            .or_else(dirs::config_dir)
            .ok_or_else(|| A2dError::Config {
                message: "Could not determine user config directory".to_string(),
            })?;

        Ok(Self::new(data_dir, config_dir))
    }

    /// Apply command-line overrides on top of an existing pair.
    pub fn with_overrides(self, data_dir: Option<&Path>, config_dir: Option<&Path>) -> Self {
        Self {
            data_dir: data_dir.map(Path::to_path_buf).unwrap_or(self.data_dir),
            config_dir: config_dir.map(Path::to_path_buf).unwrap_or(self.config_dir),
        }
    }
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.is_absolute())
}
