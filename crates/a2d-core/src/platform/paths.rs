//! XDG path utilities.
//!
//! This module provides the directories desktop entries and icons are
//! installed into, and the browser profile directory extensions live in.

use crate::browser::BrowserVariant;
use crate::config::{PathsConfig, XdgDirs};
use std::path::{Path, PathBuf};

/// Get the desktop entries directory.
///
/// `$XDG_DATA_HOME/applications`
pub fn apps_dir(dirs: &XdgDirs) -> PathBuf {
    dirs.data_dir.join(PathsConfig::APPLICATIONS_DIR_NAME)
}

/// Get the user's hicolor icon theme root.
///
/// `$XDG_DATA_HOME/icons/hicolor`
pub fn icon_theme_dir(dirs: &XdgDirs) -> PathBuf {
    dirs.data_dir
        .join(PathsConfig::ICONS_DIR_NAME)
        .join(PathsConfig::ICON_THEME_NAME)
}

/// Get the `apps` directory for one icon size inside a theme root.
///
/// `<theme>/<size>x<size>/apps`
pub fn icon_size_dir(theme_dir: &Path, size: u32) -> PathBuf {
    theme_dir
        .join(format!("{size}x{size}"))
        .join(PathsConfig::ICON_APPS_DIR_NAME)
}

/// Get the directory holding all installed extensions of a browser variant.
///
/// # Variant Behavior
/// - **Chrome**: `$XDG_CONFIG_HOME/google-chrome/Default/Extensions`
/// - **Chromium**: `$XDG_CONFIG_HOME/chromium/Default/Extensions`
pub fn extensions_root(dirs: &XdgDirs, variant: BrowserVariant) -> PathBuf {
    dirs.config_dir.join(variant.extensions_subpath())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs() -> XdgDirs {
        XdgDirs::new("/home/u/.local/share", "/home/u/.config")
    }

    #[test]
    fn test_apps_dir() {
        assert_eq!(
            apps_dir(&dirs()),
            PathBuf::from("/home/u/.local/share/applications")
        );
    }

    #[test]
    fn test_icon_size_dir() {
        let theme = icon_theme_dir(&dirs());
        assert_eq!(
            icon_size_dir(&theme, 128),
            PathBuf::from("/home/u/.local/share/icons/hicolor/128x128/apps")
        );
    }

    #[test]
    fn test_extensions_root_per_variant() {
        assert_eq!(
            extensions_root(&dirs(), BrowserVariant::Chrome),
            PathBuf::from("/home/u/.config/google-chrome/Default/Extensions")
        );
        assert_eq!(
            extensions_root(&dirs(), BrowserVariant::Chromium),
            PathBuf::from("/home/u/.config/chromium/Default/Extensions")
        );
    }
}
