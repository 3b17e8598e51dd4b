//! Desktop entry and icon management for installed apps.
//!
//! Provides functionality for:
//! - Rendering and editing .desktop files in `$XDG_DATA_HOME/applications`
//! - Linking extension icons into the user's hicolor theme
//! - Creating, updating, hiding and removing an app's entry
//!
//! # Platform Support
//!
//! Linux only (XDG Desktop Entry Specification).
//!
//! # Example
//!
//! ```rust,ignore
//! use apps2desktop::{AppIdentity, DesktopEntryManager, XdgDirs};
//!
//! fn main() -> apps2desktop::Result<()> {
//!     let manager = DesktopEntryManager::new(XdgDirs::from_env()?);
//!
//!     let outcome = manager.add(&AppIdentity {
//!         app_id: "pjkljhegncpnkpknbcohdijeoejaedia".into(),
//!         app_name: "Gmail".into(),
//!         app_version: "8.1".into(),
//!         launch_url: "https://mail.google.com/mail/".into(),
//!         enabled: true,
//!     })?;
//!     println!("Entry {:?}", outcome);
//!
//!     Ok(())
//! }
//! ```

mod desktop_entry;
mod icon;
mod manager;

pub use desktop_entry::{
    DesktopEntry, DesktopEntryBuilder, KeyFile, DESKTOP_GROUP, KEY_APP_VERSION, KEY_HIDDEN,
};
pub use icon::IconInstaller;
pub use manager::DesktopEntryManager;
