//! Platform layer for the XDG desktop integration.
//!
//! All knowledge of where things live on disk and how files are touched sits
//! here rather than in the desktop entry logic:
//! - `paths` - XDG directory layout (applications, icon theme, browser profiles)
//! - `fs` - atomic writes, symlinks and modification-time bumps
//!
//! # Supported Platforms
//!
//! - **Linux** and other XDG desktops: full support
//! - Anything without symlinks: icon installation reports `SymlinkFailed`

pub mod fs;
pub mod paths;

pub use fs::{atomic_write, create_symlink, remove_if_present, touch_modified};
pub use paths::{apps_dir, extensions_root, icon_size_dir, icon_theme_dir};
