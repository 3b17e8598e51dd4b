//! Running-browser detection and name-prefix resolution.
//!
//! Chrome and Chromium share app ids, so when both have generated entries the
//! entries of each browser carry a `-Chrome`/`-Chromium` suffix. Which browser
//! we run under and whether a suffix is needed are resolved once per process
//! and captured in an [`Environment`].

use crate::config::{EnvConfig, NamingConfig, PathsConfig, XdgDirs};
use crate::error::{A2dError, Result};
use crate::platform;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Browser flavour that launched the host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserVariant {
    Chrome,
    Chromium,
}

impl BrowserVariant {
    /// Name used in entry file names and as the menu name prefix.
    pub fn display_name(&self) -> &'static str {
        match self {
            BrowserVariant::Chrome => "Chrome",
            BrowserVariant::Chromium => "Chromium",
        }
    }

    /// Extension directory relative to the user config directory.
    pub fn extensions_subpath(&self) -> &'static str {
        match self {
            BrowserVariant::Chrome => PathsConfig::CHROME_EXTENSIONS_SUBPATH,
            BrowserVariant::Chromium => PathsConfig::CHROMIUM_EXTENSIONS_SUBPATH,
        }
    }
}

impl fmt::Display for BrowserVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The browser executable desktop entries will launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningBrowser {
    pub variant: BrowserVariant,
    /// Path written verbatim into `Exec=`.
    pub executable: String,
}

impl RunningBrowser {
    /// Build from the launcher wrapper path, if the launcher exported one.
    ///
    /// Without a wrapper the process is assumed to be a Chromium build started
    /// directly, and `fallback_executable` is used.
    pub fn from_wrapper(wrapper: Option<String>, fallback_executable: String) -> Self {
        match wrapper.filter(|w| !w.is_empty()) {
            Some(wrapper) => {
                let variant = if wrapper.contains(EnvConfig::CHROMIUM_WRAPPER_MARKER) {
                    BrowserVariant::Chromium
                } else {
                    BrowserVariant::Chrome
                };
                Self {
                    variant,
                    executable: wrapper,
                }
            }
            None => Self {
                variant: BrowserVariant::Chromium,
                executable: fallback_executable,
            },
        }
    }

    /// Resolve from `$CHROME_WRAPPER`, falling back to our own executable.
    pub fn resolve() -> Result<Self> {
        Self::resolve_from(
            std::env::var(EnvConfig::CHROME_WRAPPER).ok(),
            Path::new(EnvConfig::SELF_EXE_LINK),
        )
    }

    /// Resolve from an explicit wrapper value and self-executable link.
    ///
    /// An unreadable `exe_link` falls back to [`std::env::current_exe`].
    pub fn resolve_from(wrapper: Option<String>, exe_link: &Path) -> Result<Self> {
        if wrapper.as_deref().is_some_and(|w| !w.is_empty()) {
            return Ok(Self::from_wrapper(wrapper, String::new()));
        }

        let exe = fs::read_link(exe_link)
            .or_else(|_| std::env::current_exe())
            .map_err(|e| A2dError::Config {
                message: format!("Could not determine running executable: {e}"),
            })?;

        Ok(Self::from_wrapper(None, exe.to_string_lossy().into_owned()))
    }
}

/// Scan existing desktop entries and decide whether generated names need a
/// browser suffix.
///
/// - An entry (not launched through `xdg-open`) whose content references our
///   executable settles the question: the prefix is our variant if that entry's
///   file name carries the variant name, otherwise none.
/// - Failing that, any previously generated `a2d-` entry means the other
///   browser may own unsuffixed names, so our variant is used.
///
/// Files are visited in name order; unreadable files are skipped.
pub fn resolve_prefix(apps_dir: &Path, browser: &RunningBrowser) -> Option<BrowserVariant> {
    let mut names: Vec<String> = match fs::read_dir(apps_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(e) => {
            debug!("No desktop entries to scan in {}: {}", apps_dir.display(), e);
            return None;
        }
    };
    names.sort();

    let mut found_generated = false;

    for name in names {
        let Ok(content) = fs::read_to_string(apps_dir.join(&name)) else {
            continue;
        };

        if name.contains(NamingConfig::GENERATOR_MARKER) {
            found_generated = true;
        }

        if content.contains(NamingConfig::XDG_OPEN_MARKER) {
            continue;
        }

        if !browser.executable.is_empty() && content.contains(&browser.executable) {
            let prefix = name
                .contains(browser.variant.display_name())
                .then_some(browser.variant);
            debug!("Entry {} references {}, prefix: {:?}", name, browser.executable, prefix);
            return prefix;
        }
    }

    found_generated.then_some(browser.variant)
}

/// Process-wide context resolved on the first verb call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub browser: RunningBrowser,
    pub prefix: Option<BrowserVariant>,
}

impl Environment {
    pub fn new(browser: RunningBrowser, prefix: Option<BrowserVariant>) -> Self {
        Self { browser, prefix }
    }

    /// Detect the running browser, then scan for the prefix requirement.
    pub fn resolve(dirs: &XdgDirs) -> Result<Self> {
        let browser = RunningBrowser::resolve()?;
        let prefix = resolve_prefix(&platform::apps_dir(dirs), &browser);

        debug!(
            "Running {} ({}), name prefix: {:?}",
            browser.variant, browser.executable, prefix
        );

        Ok(Self::new(browser, prefix))
    }

    /// Where this browser keeps its unpacked extensions.
    pub fn extensions_root(&self, dirs: &XdgDirs) -> PathBuf {
        platform::extensions_root(dirs, self.browser.variant)
    }
}
