//! High-level desktop entry management.
//!
//! Per app id the entry moves between three states: absent, present and
//! visible, present and hidden. `add` creates or rebuilds it, `remove` deletes
//! it with its icons, and `set_enabled` flips `Hidden`.

use super::desktop_entry::{DesktopEntry, KeyFile, DESKTOP_GROUP, KEY_APP_VERSION, KEY_HIDDEN};
use super::icon::IconInstaller;
use crate::browser::Environment;
use crate::config::{NamingConfig, PathsConfig, XdgDirs};
use crate::error::{A2dError, Result};
use crate::manifest;
use crate::models::{AddOutcome, AppIdentity, EntryState, ExtensionInfo, SyncReport};
use crate::naming::AppNaming;
use crate::platform;
use crate::wm_class;
use std::cell::OnceCell;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Desktop entry manager for one user's XDG directories.
///
/// The browser environment is resolved on the first operation and reused for
/// the lifetime of the manager, so every path it derives stays stable.
pub struct DesktopEntryManager {
    dirs: XdgDirs,
    environment: OnceCell<Environment>,
    icons: IconInstaller,
}

impl DesktopEntryManager {
    /// Create a manager that resolves the environment lazily.
    pub fn new(dirs: XdgDirs) -> Self {
        let icons = IconInstaller::new(platform::icon_theme_dir(&dirs));
        Self {
            dirs,
            environment: OnceCell::new(),
            icons,
        }
    }

    /// Create a manager with an already resolved environment.
    pub fn with_environment(dirs: XdgDirs, environment: Environment) -> Self {
        let manager = Self::new(dirs);
        let _ = manager.environment.set(environment);
        manager
    }

    /// The process environment, resolving it on first use.
    pub fn environment(&self) -> Result<&Environment> {
        if let Some(environment) = self.environment.get() {
            return Ok(environment);
        }

        let resolved = Environment::resolve(&self.dirs)?;
        Ok(self.environment.get_or_init(|| resolved))
    }

    /// Name and path derivation for the resolved environment.
    pub fn naming(&self) -> Result<AppNaming<'_>> {
        Ok(AppNaming::new(&self.dirs, self.environment()?))
    }

    /// Create or rebuild the entry of an app.
    ///
    /// An existing entry carrying the requested `X-App-Version` is left alone
    /// and reported as [`A2dError::EntryAlreadyCurrent`]. The manifest is read
    /// before anything on disk changes, so a broken manifest never costs the
    /// app its current entry.
    pub fn add(&self, app: &AppIdentity) -> Result<AddOutcome> {
        let environment = self.environment()?;
        let naming = AppNaming::new(&self.dirs, environment);
        let desktop_path = naming.desktop_path(&app.app_id);

        let existing = entry_exists(&desktop_path);
        if existing {
            // An unreadable entry (a dangling link, say) is rebuilt like an outdated one.
            let installed_version = match read_key_file(&desktop_path) {
                Ok(key_file) => key_file
                    .get(DESKTOP_GROUP, KEY_APP_VERSION)
                    .map(str::to_string),
                Err(e) => {
                    warn!("Replacing unreadable entry for {}: {}", app.app_id, e);
                    None
                }
            };

            if installed_version.as_deref() == Some(app.app_version.as_str()) {
                return Err(A2dError::EntryAlreadyCurrent {
                    app_id: app.app_id.clone(),
                    version: app.app_version.clone(),
                });
            }

            debug!(
                "Entry for {} is at {:?}, rebuilding for {}",
                app.app_id, installed_version, app.app_version
            );
        }

        let extension_dir =
            naming
                .extension_directory(&app.app_id, &app.app_version)
                .ok_or_else(|| A2dError::ExtensionDirNotFound {
                    app_id: app.app_id.clone(),
                })?;
        let manifest =
            manifest::read_manifest(&extension_dir.join(PathsConfig::MANIFEST_FILENAME))?;

        if existing {
            self.remove_files(&naming, &app.app_id)?;
        }

        let generated_name = naming.generated_app_name(&app.app_id);
        let exec = if app.launch_url.is_empty() {
            format!("{} --app-id={}", environment.browser.executable, app.app_id)
        } else {
            format!("{} --app={}", environment.browser.executable, app.launch_url)
        };

        let entry = DesktopEntry::builder()
            .name(naming.display_name(&app.app_name))
            .exec(exec)
            .startup_wm_class(wm_class::startup_wm_class(&app.app_id, &app.launch_url))
            .categories(NamingConfig::CATEGORIES)
            .icon(&generated_name)
            .terminal(false)
            .hidden(!app.enabled)
            .offline_enabled(manifest.offline_enabled)
            .app_version(&app.app_version)
            .build();

        entry.write_to_file(&desktop_path)?;

        let icons = self.icons.install(&generated_name, &extension_dir, &manifest);
        if let Err(e) = self.icons.invalidate_cache() {
            warn!("Failed to refresh icon cache: {}", e);
        }

        let outcome = if existing {
            AddOutcome::Updated
        } else {
            AddOutcome::Created
        };

        info!(
            "Added {} ({}) version {}: {:?}, {} icon(s)",
            app.app_name,
            app.app_id,
            app.app_version,
            outcome,
            icons.len()
        );

        Ok(outcome)
    }

    /// Delete the entry of an app and all of its icon links.
    pub fn remove(&self, app_id: &str) -> Result<()> {
        let naming = self.naming()?;

        if !entry_exists(&naming.desktop_path(app_id)) {
            return Err(A2dError::EntryNotFound {
                app_id: app_id.to_string(),
            });
        }

        let removed = self.remove_files(&naming, app_id)?;
        if removed > 0 {
            if let Err(e) = self.icons.invalidate_cache() {
                warn!("Failed to refresh icon cache: {}", e);
            }
        }

        info!("Removed entry for {}", app_id);
        Ok(())
    }

    /// Delete the entry file and icon links, returning how many links went.
    fn remove_files(&self, naming: &AppNaming<'_>, app_id: &str) -> Result<usize> {
        let desktop_path = naming.desktop_path(app_id);

        fs::remove_file(&desktop_path)
            .map_err(|e| A2dError::io_context("remove desktop entry", &desktop_path, e))?;

        let removed = self.icons.remove(&naming.generated_app_name(app_id))?;
        debug!("Removed {:?} and {} icon link(s)", desktop_path, removed);

        Ok(removed)
    }

    /// Show (`enabled`) or hide the entry of an app in menus.
    ///
    /// Only `Hidden` is rewritten; every other line, translated names
    /// included, is kept as is.
    pub fn set_enabled(&self, app_id: &str, enabled: bool) -> Result<()> {
        let desktop_path = self.naming()?.desktop_path(app_id);

        if !entry_exists(&desktop_path) {
            return Err(A2dError::EntryNotFound {
                app_id: app_id.to_string(),
            });
        }

        let mut key_file = read_key_file(&desktop_path)?;
        key_file.set_bool(DESKTOP_GROUP, KEY_HIDDEN, !enabled);
        platform::atomic_write(&desktop_path, &key_file.to_string())?;

        info!(
            "{} entry for {}",
            if enabled { "Enabled" } else { "Disabled" },
            app_id
        );
        Ok(())
    }

    /// Report what is on disk for an app.
    pub fn entry_state(&self, app_id: &str) -> Result<EntryState> {
        let desktop_path = self.naming()?.desktop_path(app_id);

        if !entry_exists(&desktop_path) {
            return Ok(EntryState {
                app_id: app_id.to_string(),
                exists: false,
                hidden: None,
                version: None,
            });
        }

        let key_file = read_key_file(&desktop_path)?;
        Ok(EntryState {
            app_id: app_id.to_string(),
            exists: true,
            hidden: key_file.get_bool(DESKTOP_GROUP, KEY_HIDDEN),
            version: key_file
                .get(DESKTOP_GROUP, KEY_APP_VERSION)
                .map(str::to_string),
        })
    }

    /// Add every app of a `chrome.management.getAll()` listing.
    ///
    /// This is the start-up pass the browser extension runs; items that are
    /// not apps are skipped.
    pub fn sync(&self, items: &[ExtensionInfo]) -> SyncReport {
        let mut report = SyncReport::default();

        for item in items {
            if !item.is_app {
                report.skipped.push(item.id.clone());
                continue;
            }

            match self.add(&item.to_identity()) {
                Ok(_) => report.added.push(item.id.clone()),
                Err(e) if e.is_expected() => report.skipped.push(item.id.clone()),
                Err(e) => {
                    warn!("Failed to add {} ({}): {}", item.name, item.id, e);
                    report.failed.push(item.id.clone());
                }
            }
        }

        info!(
            "Synced {} item(s): {} added, {} skipped, {} failed",
            items.len(),
            report.added.len(),
            report.skipped.len(),
            report.failed.len()
        );

        report
    }
}

fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn read_key_file(path: &Path) -> Result<KeyFile> {
    let content = fs::read_to_string(path).map_err(|e| A2dError::io_with_path(e, path))?;
    Ok(KeyFile::parse(&content))
}
