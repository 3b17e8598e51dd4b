//! Value types passed across the verb boundary.

use serde::{Deserialize, Serialize};

/// One app as described by the caller on every `add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    pub app_id: String,
    pub app_name: String,
    pub app_version: String,
    /// Empty for packaged apps, which launch by id.
    pub launch_url: String,
    pub enabled: bool,
}

/// An installed item as reported by `chrome.management.getAll()`.
///
/// Only apps get desktop entries; extensions and themes are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub app_launch_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub is_app: bool,
}

fn default_enabled() -> bool {
    true
}

impl ExtensionInfo {
    pub fn to_identity(&self) -> AppIdentity {
        AppIdentity {
            app_id: self.id.clone(),
            app_name: self.name.clone(),
            app_version: self.version.clone(),
            launch_url: self.app_launch_url.clone(),
            enabled: self.enabled,
        }
    }
}

/// What a successful `add` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// No entry existed before.
    Created,
    /// An outdated entry was replaced.
    Updated,
}

/// On-disk state of one app's entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryState {
    pub app_id: String,
    pub exists: bool,
    pub hidden: Option<bool>,
    pub version: Option<String>,
}

/// Tally of a bulk sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Entries created or updated.
    pub added: Vec<String>,
    /// Non-apps and entries already current.
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}
