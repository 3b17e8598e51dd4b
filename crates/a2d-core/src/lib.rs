//! Apps2Desktop - mirrors installed Chrome apps into the Linux desktop menu.
//!
//! Every app gets a freedesktop `.desktop` entry under
//! `$XDG_DATA_HOME/applications` and links to its bundled icons in the user's
//! hicolor theme. Entries are kept in step with the browser through four verbs:
//! `add`, `remove`, `enable` and `disable`.
//!
//! When both Chrome and Chromium generate entries, names carry a
//! `-Chrome`/`-Chromium` suffix so the two never overwrite each other.
//!
//! # Example
//!
//! ```rust,ignore
//! use apps2desktop::{Apps2Desktop, DesktopEntryManager, XdgDirs};
//!
//! fn main() -> apps2desktop::Result<()> {
//!     let manager = DesktopEntryManager::new(XdgDirs::from_env()?);
//!
//!     // The typed `add`/`remove` of the manager shadow the verbs.
//!     let added = Apps2Desktop::add(&manager, "Gmail", "pjkljhegncpnkpknbcohdijeoejaedia",
//!                                   "8.1", "https://mail.google.com/mail/", true);
//!     if added {
//!         manager.disable("pjkljhegncpnkpknbcohdijeoejaedia");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod manifest;
pub mod models;
pub mod naming;
pub mod platform;
pub mod shortcut;
pub mod wm_class;

mod api;

// Re-export commonly used types
pub use api::Apps2Desktop;
pub use browser::{BrowserVariant, Environment, RunningBrowser};
pub use config::XdgDirs;
pub use error::{A2dError, Result};
pub use manifest::{read_manifest, ExtensionManifest};
pub use models::{AddOutcome, AppIdentity, EntryState, ExtensionInfo, SyncReport};
pub use naming::AppNaming;
pub use shortcut::{DesktopEntry, DesktopEntryManager, IconInstaller, KeyFile};
pub use wm_class::{derive_wm_class, startup_wm_class};
