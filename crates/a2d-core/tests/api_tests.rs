//! Integration tests for the Apps2Desktop verbs.
//!
//! Every test runs against temporary XDG roots with a pre-resolved Chrome
//! environment, so nothing reads the real home directory or `$CHROME_WRAPPER`.

use apps2desktop::{
    Apps2Desktop, BrowserVariant, DesktopEntryManager, Environment, ExtensionInfo, KeyFile,
    RunningBrowser, XdgDirs,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const APP_ID: &str = "aohghmighlieiainnegkcijnfilokake";
const CHROME_EXE: &str = "/opt/google/chrome/google-chrome";

struct TestEnv {
    temp_dir: TempDir,
    manager: DesktopEntryManager,
}

impl TestEnv {
    fn new(prefix: Option<BrowserVariant>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dirs = XdgDirs::new(temp_dir.path().join("data"), temp_dir.path().join("config"));
        let environment = Environment::new(
            RunningBrowser {
                variant: BrowserVariant::Chrome,
                executable: CHROME_EXE.to_string(),
            },
            prefix,
        );

        Self {
            manager: DesktopEntryManager::with_environment(dirs, environment),
            temp_dir,
        }
    }

    fn extension_dir(&self) -> PathBuf {
        self.temp_dir
            .path()
            .join("config/google-chrome/Default/Extensions")
            .join(APP_ID)
            .join("1.0_0")
    }

    fn install_extension(&self, manifest: &str) -> PathBuf {
        let dir = self.extension_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("manifest.json"), manifest).unwrap();
        dir
    }

    fn desktop_path(&self, file_name: &str) -> PathBuf {
        self.temp_dir.path().join("data/applications").join(file_name)
    }

    fn icon_link(&self, size: u32, name: &str) -> PathBuf {
        self.temp_dir
            .path()
            .join(format!("data/icons/hicolor/{size}x{size}/apps/{name}.png"))
    }

    fn add(&self, version: &str) -> bool {
        Apps2Desktop::add(&self.manager, "Docs", APP_ID, version, "", true)
    }
}

fn link_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn entry_value(path: &Path, key: &str) -> Option<String> {
    let key_file = KeyFile::parse(&fs::read_to_string(path).unwrap());
    key_file.get("Desktop Entry", key).map(str::to_string)
}

#[test]
fn test_add_then_remove_leaves_nothing_behind() {
    let env = TestEnv::new(None);
    env.install_extension(r#"{"icons": {"16": "icon16.png", "128": "icon128.png"}}"#);
    let desktop = env.desktop_path(&format!("a2d-{APP_ID}.desktop"));

    assert!(env.add("1.0"));
    assert!(desktop.exists());
    assert!(link_exists(&env.icon_link(16, &format!("a2d-{APP_ID}"))));
    assert!(link_exists(&env.icon_link(128, &format!("a2d-{APP_ID}"))));

    assert!(Apps2Desktop::remove(&env.manager, APP_ID));
    assert!(!desktop.exists());
    assert!(!link_exists(&env.icon_link(16, &format!("a2d-{APP_ID}"))));
    assert!(!link_exists(&env.icon_link(128, &format!("a2d-{APP_ID}"))));

    assert!(!Apps2Desktop::remove(&env.manager, APP_ID));
}

#[test]
fn test_add_links_exactly_the_declared_icon() {
    let env = TestEnv::new(None);
    let extension_dir = env.install_extension(r#"{"icons": {"128": "icon128.png"}}"#);

    assert!(env.add("1.0"));

    let link = env.icon_link(128, &format!("a2d-{APP_ID}"));
    assert_eq!(fs::read_link(&link).unwrap(), extension_dir.join("icon128.png"));

    let size_dirs: Vec<_> = fs::read_dir(env.temp_dir.path().join("data/icons/hicolor"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .collect();
    assert_eq!(size_dirs.len(), 1);
}

#[test]
fn test_add_with_malformed_manifest_writes_nothing() {
    let env = TestEnv::new(None);
    env.install_extension("{ \"icons\": ");

    assert!(!env.add("1.0"));
    assert!(!env.desktop_path(&format!("a2d-{APP_ID}.desktop")).exists());
    assert!(!env.temp_dir.path().join("data/icons").exists());
}

#[test]
fn test_add_without_manifest_fails() {
    let env = TestEnv::new(None);
    fs::create_dir_all(env.extension_dir()).unwrap();

    assert!(!env.add("1.0"));
    assert!(!env.desktop_path(&format!("a2d-{APP_ID}.desktop")).exists());
}

#[test]
fn test_second_add_with_same_version_leaves_entry_untouched() {
    let env = TestEnv::new(None);
    env.install_extension("{}");
    let desktop = env.desktop_path(&format!("a2d-{APP_ID}.desktop"));

    assert!(env.add("1.0"));

    let past = SystemTime::now() - Duration::from_secs(3600);
    fs::File::options()
        .write(true)
        .open(&desktop)
        .unwrap()
        .set_modified(past)
        .unwrap();
    let before = fs::metadata(&desktop).unwrap().modified().unwrap();

    assert!(!env.add("1.0"));

    let after = fs::metadata(&desktop).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_add_with_new_version_rebuilds_entry() {
    let env = TestEnv::new(None);
    env.install_extension("{}");
    let desktop = env.desktop_path(&format!("a2d-{APP_ID}.desktop"));

    assert!(env.add("1.0"));
    assert!(env.add("1.1"));

    assert_eq!(entry_value(&desktop, "X-App-Version").as_deref(), Some("1.1"));
}

#[test]
fn test_entry_without_version_marker_is_migrated() {
    let env = TestEnv::new(None);
    env.install_extension(r#"{"offline_enabled": true}"#);
    let desktop = env.desktop_path(&format!("a2d-{APP_ID}.desktop"));
    fs::create_dir_all(desktop.parent().unwrap()).unwrap();
    fs::write(
        &desktop,
        format!("[Desktop Entry]\nType=Application\nName=Docs\nExec={CHROME_EXE} --app-id={APP_ID}\n"),
    )
    .unwrap();

    assert!(env.add("1.0"));

    assert_eq!(entry_value(&desktop, "X-App-Version").as_deref(), Some("1.0"));
    assert_eq!(entry_value(&desktop, "X-Offline-Enabled").as_deref(), Some("true"));
}

#[test]
fn test_enable_and_disable_are_idempotent() {
    let env = TestEnv::new(None);
    env.install_extension("{}");
    let desktop = env.desktop_path(&format!("a2d-{APP_ID}.desktop"));
    assert!(env.add("1.0"));

    assert!(env.manager.enable(APP_ID));
    let once = fs::read_to_string(&desktop).unwrap();
    assert!(env.manager.enable(APP_ID));
    assert_eq!(fs::read_to_string(&desktop).unwrap(), once);

    assert!(env.manager.disable(APP_ID));
    assert_eq!(entry_value(&desktop, "Hidden").as_deref(), Some("true"));
    assert!(env.manager.disable(APP_ID));
    assert_eq!(entry_value(&desktop, "Hidden").as_deref(), Some("true"));
}

#[test]
fn test_disable_keeps_translated_names() {
    let env = TestEnv::new(None);
    env.install_extension("{}");
    let desktop = env.desktop_path(&format!("a2d-{APP_ID}.desktop"));
    assert!(env.add("1.0"));

    let translated = fs::read_to_string(&desktop).unwrap() + "Name[fr]=Documents\n";
    fs::write(&desktop, &translated).unwrap();

    assert!(env.manager.disable(APP_ID));

    let content = fs::read_to_string(&desktop).unwrap();
    assert!(content.contains("Name[fr]=Documents"));
    assert_eq!(content, translated.replace("Hidden=false", "Hidden=true"));
}

#[test]
fn test_verbs_on_missing_entry_fail() {
    let env = TestEnv::new(None);

    assert!(!env.manager.enable(APP_ID));
    assert!(!env.manager.disable(APP_ID));
    assert!(!Apps2Desktop::remove(&env.manager, APP_ID));
}

#[test]
fn test_prefixed_names() {
    let env = TestEnv::new(Some(BrowserVariant::Chrome));
    env.install_extension(r#"{"icons": {"48": "icon48.png"}}"#);

    assert!(Apps2Desktop::add(
        &env.manager,
        "Docs",
        APP_ID,
        "1.0",
        "https://docs.google.com/",
        false
    ));

    let desktop = env.desktop_path(&format!("a2d-{APP_ID}-Chrome.desktop"));
    assert_eq!(entry_value(&desktop, "Name").as_deref(), Some("Chrome - Docs"));
    assert_eq!(
        entry_value(&desktop, "Exec").as_deref(),
        Some("/opt/google/chrome/google-chrome --app=https://docs.google.com/")
    );
    assert_eq!(
        entry_value(&desktop, "StartupWMClass").as_deref(),
        Some("docs.google.com")
    );
    assert_eq!(entry_value(&desktop, "Hidden").as_deref(), Some("true"));
    assert!(link_exists(&env.icon_link(48, &format!("a2d-{APP_ID}-Chrome"))));
}

#[test]
fn test_sync_adds_only_apps() {
    let env = TestEnv::new(None);
    env.install_extension("{}");

    let items: Vec<ExtensionInfo> = serde_json::from_str(&format!(
        r#"[
            {{"id": "{APP_ID}", "name": "Docs", "version": "1.0", "enabled": true, "isApp": true}},
            {{"id": "theme", "name": "Theme", "version": "2", "enabled": true, "isApp": false}}
        ]"#
    ))
    .unwrap();

    let report = env.manager.sync(&items);

    assert_eq!(report.added, vec![APP_ID.to_string()]);
    assert_eq!(report.skipped, vec!["theme".to_string()]);
    assert!(report.failed.is_empty());
    assert!(env.desktop_path(&format!("a2d-{APP_ID}.desktop")).exists());
}
