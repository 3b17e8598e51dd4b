//! Desktop entry (.desktop file) generation and editing.
//!
//! Implements the subset of the XDG Desktop Entry Specification needed for
//! app launchers: [`DesktopEntry`] renders a fresh entry, [`KeyFile`] edits an
//! existing one without disturbing keys it does not touch.

use std::fmt::Write as FmtWrite;
use std::path::Path;

use crate::error::Result;
use crate::platform;
use tracing::debug;

/// Group holding every key of a launcher entry.
pub const DESKTOP_GROUP: &str = "Desktop Entry";
pub const KEY_HIDDEN: &str = "Hidden";
pub const KEY_APP_VERSION: &str = "X-App-Version";

/// A generated launcher entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Entry type (always "Application" here).
    pub entry_type: String,
    /// Entry name (shown in menus).
    pub name: String,
    /// Executable command.
    pub exec: String,
    /// StartupWMClass for window matching.
    pub startup_wm_class: String,
    /// Categories value, written verbatim.
    pub categories: String,
    /// Icon theme name.
    pub icon: String,
    /// Whether to run in a terminal.
    pub terminal: bool,
    /// Whether the entry is hidden from menus (disabled app).
    pub hidden: bool,
    /// Whether the app works offline (`X-Offline-Enabled`).
    pub offline_enabled: bool,
    /// App version the entry was generated for (`X-App-Version`).
    pub app_version: String,
}

impl Default for DesktopEntry {
    fn default() -> Self {
        Self {
            entry_type: "Application".to_string(),
            name: String::new(),
            exec: String::new(),
            startup_wm_class: String::new(),
            categories: String::new(),
            icon: String::new(),
            terminal: false,
            hidden: false,
            offline_enabled: false,
            app_version: String::new(),
        }
    }
}

impl DesktopEntry {
    /// Create a new desktop entry builder.
    pub fn builder() -> DesktopEntryBuilder {
        DesktopEntryBuilder::new()
    }

    /// Generate the .desktop file content.
    pub fn to_string(&self) -> String {
        let mut content = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(content, "[{}]", DESKTOP_GROUP);
        let _ = writeln!(content, "Type={}", self.entry_type);
        let _ = writeln!(content, "Name={}", self.name);
        let _ = writeln!(content, "Exec={}", self.exec);
        let _ = writeln!(content, "StartupWMClass={}", self.startup_wm_class);
        let _ = writeln!(content, "Categories={}", self.categories);
        let _ = writeln!(content, "Icon={}", self.icon);
        let _ = writeln!(content, "Terminal={}", self.terminal);
        let _ = writeln!(content, "{}={}", KEY_HIDDEN, self.hidden);
        let _ = writeln!(content, "X-Offline-Enabled={}", self.offline_enabled);
        let _ = writeln!(content, "{}={}", KEY_APP_VERSION, self.app_version);

        content
    }

    /// Write the desktop entry to a file.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        platform::atomic_write(path, &self.to_string())?;
        debug!("Wrote desktop entry to {:?}", path);
        Ok(())
    }
}

/// Builder for desktop entries.
pub struct DesktopEntryBuilder {
    entry: DesktopEntry,
}

impl DesktopEntryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entry: DesktopEntry::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entry.name = name.into();
        self
    }

    pub fn exec(mut self, exec: impl Into<String>) -> Self {
        self.entry.exec = exec.into();
        self
    }

    pub fn startup_wm_class(mut self, wm_class: impl Into<String>) -> Self {
        self.entry.startup_wm_class = wm_class.into();
        self
    }

    pub fn categories(mut self, categories: impl Into<String>) -> Self {
        self.entry.categories = categories.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.entry.icon = icon.into();
        self
    }

    pub fn terminal(mut self, terminal: bool) -> Self {
        self.entry.terminal = terminal;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.entry.hidden = hidden;
        self
    }

    pub fn offline_enabled(mut self, offline_enabled: bool) -> Self {
        self.entry.offline_enabled = offline_enabled;
        self
    }

    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.entry.app_version = version.into();
        self
    }

    /// Build the desktop entry.
    pub fn build(self) -> DesktopEntry {
        self.entry
    }
}

impl Default for DesktopEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Group(String),
    Entry { key: String, raw: String },
    Other(String),
}

/// Line-preserving key file editor.
///
/// Untouched lines (comments, other groups, localized keys such as
/// `Name[de]`) are written back exactly as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFile {
    lines: Vec<Line>,
}

impl KeyFile {
    pub fn parse(content: &str) -> Self {
        let lines = content
            .lines()
            .map(|line| {
                let trimmed = line.trim();
                if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
                    Line::Group(trimmed[1..trimmed.len() - 1].to_string())
                } else if trimmed.starts_with('#') || trimmed.is_empty() {
                    Line::Other(line.to_string())
                } else if let Some((key, _)) = line.split_once('=') {
                    Line::Entry {
                        key: key.trim().to_string(),
                        raw: line.to_string(),
                    }
                } else {
                    Line::Other(line.to_string())
                }
            })
            .collect();

        Self { lines }
    }

    /// Look up a key inside a group; the first occurrence wins.
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        let mut current: Option<&str> = None;
        for line in &self.lines {
            match line {
                Line::Group(name) => current = Some(name.as_str()),
                Line::Entry { key: k, raw } if current == Some(group) && k.as_str() == key => {
                    return raw.split_once('=').map(|(_, value)| value.trim());
                }
                _ => {}
            }
        }
        None
    }

    /// Set a key, replacing it in place or appending it to its group.
    ///
    /// A missing group is appended at the end of the file.
    pub fn set(&mut self, group: &str, key: &str, value: &str) {
        let new_raw = format!("{key}={value}");
        let mut current: Option<String> = None;
        let mut insert_at: Option<usize> = None;

        for (index, line) in self.lines.iter_mut().enumerate() {
            match line {
                Line::Group(name) => current = Some(name.clone()),
                Line::Entry { key: k, raw } if current.as_deref() == Some(group) => {
                    if k.as_str() == key {
                        *raw = new_raw;
                        return;
                    }
                    insert_at = Some(index + 1);
                }
                _ => {}
            }
            if current.as_deref() == Some(group) && insert_at.is_none() {
                insert_at = Some(index + 1);
            }
        }

        let entry = Line::Entry {
            key: key.to_string(),
            raw: new_raw,
        };

        match insert_at {
            Some(index) => self.lines.insert(index, entry),
            None => {
                if !self.lines.is_empty() {
                    self.lines.push(Line::Other(String::new()));
                }
                self.lines.push(Line::Group(group.to_string()));
                self.lines.push(entry);
            }
        }
    }

    pub fn set_bool(&mut self, group: &str, key: &str, value: bool) {
        self.set(group, key, if value { "true" } else { "false" });
    }

    pub fn get_bool(&self, group: &str, key: &str) -> Option<bool> {
        match self.get(group, key)? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Render the file, one trailing newline.
    pub fn to_string(&self) -> String {
        let mut content = String::new();
        for line in &self.lines {
            match line {
                Line::Group(name) => {
                    let _ = writeln!(content, "[{}]", name);
                }
                Line::Entry { raw, .. } | Line::Other(raw) => {
                    let _ = writeln!(content, "{}", raw);
                }
            }
        }
        content
    }
}
