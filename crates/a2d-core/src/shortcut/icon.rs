//! Icon installation for generated entries.
//!
//! Handles:
//! - Linking an extension's bundled icons into the user's hicolor theme
//! - Removing those links from every size directory
//! - Icon cache invalidation (theme root mtime bump)

use crate::config::{NamingConfig, PathsConfig};
use crate::error::{A2dError, Result};
use crate::manifest::ExtensionManifest;
use crate::platform;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Icon installer bound to one icon theme root.
#[derive(Debug, Clone)]
pub struct IconInstaller {
    /// User's icon theme directory (`$XDG_DATA_HOME/icons/hicolor`).
    icon_theme_dir: PathBuf,
}

impl IconInstaller {
    pub fn new(icon_theme_dir: impl AsRef<Path>) -> Self {
        Self {
            icon_theme_dir: icon_theme_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the icon link for `name` at `size`.
    pub fn icon_path(&self, name: &str, size: u32) -> PathBuf {
        platform::icon_size_dir(&self.icon_theme_dir, size)
            .join(format!("{}{}", name, NamingConfig::ICON_EXTENSION))
    }

    /// Link every icon the manifest declares.
    ///
    /// A link that cannot be created is logged and skipped so the remaining
    /// sizes are still installed.
    ///
    /// # Returns
    ///
    /// The links that were created.
    pub fn install(
        &self,
        name: &str,
        extension_dir: &Path,
        manifest: &ExtensionManifest,
    ) -> Vec<PathBuf> {
        let mut installed = Vec::new();

        for (size, relative) in manifest.icon_sizes() {
            let src = extension_dir.join(relative);
            match self.install_at_size(name, &src, size) {
                Ok(dest) => installed.push(dest),
                Err(e) => warn!("Failed to install {}px icon for {}: {}", size, name, e),
            }
        }

        installed
    }

    fn install_at_size(&self, name: &str, src: &Path, size: u32) -> Result<PathBuf> {
        let icon_dir = platform::icon_size_dir(&self.icon_theme_dir, size);

        fs::create_dir_all(&icon_dir)
            .map_err(|e| A2dError::io_context("create icon directory", &icon_dir, e))?;

        let dest = self.icon_path(name, size);
        // A leftover link from an interrupted update would make symlink() fail.
        platform::remove_if_present(&dest)?;
        platform::create_symlink(src, &dest)?;

        debug!("Linked icon {:?} -> {:?}", dest, src);
        Ok(dest)
    }

    /// Remove the icon links for `name` from every size directory.
    ///
    /// # Returns
    ///
    /// How many links were removed.
    pub fn remove(&self, name: &str) -> Result<usize> {
        let size_dirs = match fs::read_dir(&self.icon_theme_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("No icon theme at {:?}: {}", self.icon_theme_dir, e);
                return Ok(0);
            }
        };

        let file_name = format!("{}{}", name, NamingConfig::ICON_EXTENSION);
        let mut removed = 0;

        for size_dir in size_dirs.filter_map(|e| e.ok()) {
            let icon_path = size_dir
                .path()
                .join(PathsConfig::ICON_APPS_DIR_NAME)
                .join(&file_name);

            match platform::remove_if_present(&icon_path) {
                Ok(true) => {
                    debug!("Removed icon {:?}", icon_path);
                    removed += 1;
                }
                Ok(false) => {}
                Err(e) => warn!("Failed to remove icon {:?}: {}", icon_path, e),
            }
        }

        Ok(removed)
    }

    /// Bump the theme root mtime so icon caches get rebuilt.
    pub fn invalidate_cache(&self) -> Result<()> {
        if !self.icon_theme_dir.is_dir() {
            debug!("Icon theme {:?} absent, nothing to refresh", self.icon_theme_dir);
            return Ok(());
        }

        platform::touch_modified(&self.icon_theme_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn manifest(icons: &[(&str, &str)]) -> ExtensionManifest {
        ExtensionManifest {
            icons: icons
                .iter()
                .map(|(size, file)| (size.to_string(), file.to_string()))
                .collect::<BTreeMap<_, _>>(),
            offline_enabled: false,
        }
    }

    #[test]
    fn test_install_links_each_size() {
        let temp_dir = TempDir::new().unwrap();
        let extension_dir = temp_dir.path().join("ext");
        let installer = IconInstaller::new(temp_dir.path().join("hicolor"));

        let installed = installer.install(
            "a2d-abc",
            &extension_dir,
            &manifest(&[("128", "icon128.png"), ("16", "icon16.png")]),
        );

        assert_eq!(installed.len(), 2);
        let link = installer.icon_path("a2d-abc", 128);
        assert_eq!(
            link,
            temp_dir.path().join("hicolor/128x128/apps/a2d-abc.png")
        );
        assert_eq!(fs::read_link(&link).unwrap(), extension_dir.join("icon128.png"));
    }

    #[test]
    fn test_install_replaces_stale_link() {
        let temp_dir = TempDir::new().unwrap();
        let installer = IconInstaller::new(temp_dir.path().join("hicolor"));
        let m = manifest(&[("48", "a.png")]);

        installer.install("a2d-abc", &temp_dir.path().join("v1"), &m);
        installer.install("a2d-abc", &temp_dir.path().join("v2"), &m);

        assert_eq!(
            fs::read_link(installer.icon_path("a2d-abc", 48)).unwrap(),
            temp_dir.path().join("v2").join("a.png")
        );
    }

    #[test]
    fn test_remove_clears_every_size_only_for_name() {
        let temp_dir = TempDir::new().unwrap();
        let installer = IconInstaller::new(temp_dir.path().join("hicolor"));
        let m = manifest(&[("16", "a.png"), ("48", "b.png")]);

        installer.install("a2d-abc", temp_dir.path(), &m);
        installer.install("a2d-other", temp_dir.path(), &m);

        assert_eq!(installer.remove("a2d-abc").unwrap(), 2);
        assert!(fs::symlink_metadata(installer.icon_path("a2d-abc", 16)).is_err());
        assert!(fs::symlink_metadata(installer.icon_path("a2d-other", 16)).is_ok());
    }

    #[test]
    fn test_remove_without_theme_dir() {
        let temp_dir = TempDir::new().unwrap();
        let installer = IconInstaller::new(temp_dir.path().join("missing"));

        assert_eq!(installer.remove("a2d-abc").unwrap(), 0);
        assert!(installer.invalidate_cache().is_ok());
    }
}
