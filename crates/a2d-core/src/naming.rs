//! Derivation of generated names and on-disk paths for an app id.
//!
//! Identity is purely path-derived: `app_id` plus the resolved prefix decide
//! where an entry lives, so no separate registry is kept.

use crate::browser::Environment;
use crate::config::{NamingConfig, XdgDirs};
use crate::platform;
use std::fs;
use std::path::PathBuf;

/// Name and path derivation bound to one resolved environment.
#[derive(Debug, Clone, Copy)]
pub struct AppNaming<'a> {
    dirs: &'a XdgDirs,
    env: &'a Environment,
}

impl<'a> AppNaming<'a> {
    pub fn new(dirs: &'a XdgDirs, env: &'a Environment) -> Self {
        Self { dirs, env }
    }

    /// `a2d-<app_id>[-<Prefix>]`, also used as the icon name.
    pub fn generated_app_name(&self, app_id: &str) -> String {
        match self.env.prefix {
            Some(prefix) => format!("{}{}-{}", NamingConfig::GENERATOR_MARKER, app_id, prefix),
            None => format!("{}{}", NamingConfig::GENERATOR_MARKER, app_id),
        }
    }

    pub fn desktop_filename(&self, app_id: &str) -> String {
        format!(
            "{}{}",
            self.generated_app_name(app_id),
            NamingConfig::DESKTOP_EXTENSION
        )
    }

    pub fn desktop_path(&self, app_id: &str) -> PathBuf {
        platform::apps_dir(self.dirs).join(self.desktop_filename(app_id))
    }

    /// Menu name, `"<Prefix> - <app_name>"` when a prefix is in effect.
    pub fn display_name(&self, app_name: &str) -> String {
        match self.env.prefix {
            Some(prefix) => format!(
                "{}{}{}",
                prefix,
                NamingConfig::DISPLAY_PREFIX_SEPARATOR,
                app_name
            ),
            None => app_name.to_string(),
        }
    }

    /// `<extensions root>/<app_id>`, the parent of the versioned directories.
    pub fn extension_root(&self, app_id: &str) -> PathBuf {
        self.env.extensions_root(self.dirs).join(app_id)
    }

    /// The unpacked extension directory of an app.
    ///
    /// Browsers nest the files under a version directory (`1.2_0`) and keep the
    /// previous one around while an update settles. The directory named after
    /// `app_version` wins; without one the first in name order is used.
    pub fn extension_directory(&self, app_id: &str, app_version: &str) -> Option<PathBuf> {
        let root = self.extension_root(app_id);
        let mut versions: Vec<PathBuf> = fs::read_dir(&root)
            .ok()?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        versions.sort();

        let version_prefix = format!("{app_version}_");
        let matching = versions.iter().position(|p| {
            p.file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with(&version_prefix))
        });

        match matching {
            Some(index) => Some(versions.swap_remove(index)),
            None => versions.into_iter().next(),
        }
    }
}
