//! The four verbs exposed to the browser-side caller.
//!
//! Callers only ever see a boolean. Failures are logged here and never
//! escape: expected no-ops at debug, everything else at warn.

use crate::error::Result;
use crate::models::AppIdentity;
use crate::shortcut::DesktopEntryManager;
use tracing::{debug, warn};

/// Scripting contract of the desktop integration.
pub trait Apps2Desktop {
    /// Create the entry of an app, or rebuild it when `app_version` changed.
    fn add(
        &self,
        app_name: &str,
        app_id: &str,
        app_version: &str,
        launch_url: &str,
        enabled: bool,
    ) -> bool;

    /// Delete the entry and icons of an app. False when there was none.
    fn remove(&self, app_id: &str) -> bool;

    /// Show the entry in menus.
    fn enable(&self, app_id: &str) -> bool;

    /// Hide the entry from menus.
    fn disable(&self, app_id: &str) -> bool;
}

impl Apps2Desktop for DesktopEntryManager {
    fn add(
        &self,
        app_name: &str,
        app_id: &str,
        app_version: &str,
        launch_url: &str,
        enabled: bool,
    ) -> bool {
        let app = AppIdentity {
            app_id: app_id.to_string(),
            app_name: app_name.to_string(),
            app_version: app_version.to_string(),
            launch_url: launch_url.to_string(),
            enabled,
        };
        verb_outcome("add", app_id, DesktopEntryManager::add(self, &app))
    }

    fn remove(&self, app_id: &str) -> bool {
        verb_outcome("remove", app_id, DesktopEntryManager::remove(self, app_id))
    }

    fn enable(&self, app_id: &str) -> bool {
        verb_outcome("enable", app_id, self.set_enabled(app_id, true))
    }

    fn disable(&self, app_id: &str) -> bool {
        verb_outcome("disable", app_id, self.set_enabled(app_id, false))
    }
}

fn verb_outcome<T>(verb: &str, app_id: &str, result: Result<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) if e.is_expected() => {
            debug!("{} {}: {}", verb, app_id, e);
            false
        }
        Err(e) => {
            warn!("{} {} failed: {}", verb, app_id, e);
            false
        }
    }
}
