use std::cell::Cell;
use std::collections::HashSet;
use std::path::PathBuf;

use montag_lib::config::manager::{ConfigurationManager, CONFIGURATION_KEY};
use montag_lib::config::model::{Configuration, WebPage};
use montag_lib::config::store::{JsonFileStore, PreferenceStore};
use montag_lib::error::AppError;
use montag_lib::services::login_item::helper::{
    LaunchAtLoginHelper, LoginItemOutcome, LoginItemService, LAUNCH_AT_LOGIN_KEY,
};
use montag_lib::shortcuts::key::{ModifierMask, ShortcutKey};
use montag_lib::shortcuts::registry::{InterceptionPath, ShortcutBackend, ShortcutRegistry};
use serde_json::{json, Value};
use uuid::Uuid;

struct TempPrefs {
    dir: PathBuf,
}

impl TempPrefs {
    fn new() -> Self {
        Self {
            dir: std::env::temp_dir().join(format!("montag_it_{}", Uuid::new_v4())),
        }
    }

    fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.dir.join("preferences.json"))
    }
}

impl Drop for TempPrefs {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

#[test]
fn configuration_survives_a_restart() {
    let prefs = TempPrefs::new();

    let mut manager = ConfigurationManager::new(Box::new(prefs.store()));
    manager.set_open_at_startup(true);
    manager.set_global_shortcut(Some(ShortcutKey::new(
        0x28,
        ModifierMask::COMMAND | ModifierMask::SHIFT,
    )));
    manager.set_webpages([
        WebPage::new("Calendar", "https://calendar.example.com"),
        WebPage::new("Notes", "https://notes.example.com/today"),
        WebPage::new("Search", "https://duckduckgo.com"),
    ]);
    manager.save_configuration().unwrap();

    let restarted = ConfigurationManager::new(Box::new(prefs.store()));
    assert_eq!(restarted.configuration(), manager.configuration());
    assert_eq!(restarted.global_shortcut().unwrap().to_string(), "⌘⇧K");
}

#[test]
fn wrong_page_count_falls_back_to_defaults() {
    let prefs = TempPrefs::new();
    prefs
        .store()
        .write(
            CONFIGURATION_KEY,
            json!({
                "openAtStartup": true,
                "webpages": [{ "title": "Only", "url": "https://example.com" }]
            }),
        )
        .unwrap();

    let manager = ConfigurationManager::new(Box::new(prefs.store()));
    assert_eq!(manager.configuration(), &Configuration::default());
}

#[test]
fn configuration_and_login_flag_share_one_file() {
    let prefs = TempPrefs::new();
    let store = prefs.store();
    let manager = ConfigurationManager::new(Box::new(prefs.store()));
    manager.save_configuration().unwrap();

    let helper = LaunchAtLoginHelper::new(FakeLoginItem::default(), &store);
    assert_eq!(helper.set_launch_at_login(true), LoginItemOutcome::Registered);

    assert_eq!(store.read(LAUNCH_AT_LOGIN_KEY).unwrap(), Some(Value::Bool(true)));
    assert!(store.read(CONFIGURATION_KEY).unwrap().is_some());
}

#[derive(Default)]
struct FakeLoginItem {
    registered: Cell<bool>,
}

impl LoginItemService for FakeLoginItem {
    fn is_registered(&self) -> Result<bool, AppError> {
        Ok(self.registered.get())
    }

    fn register(&self) -> Result<(), AppError> {
        self.registered.set(true);
        Ok(())
    }

    fn unregister(&self) -> Result<(), AppError> {
        self.registered.set(false);
        Ok(())
    }
}

/// Tracks live handlers the way the OS would, refusing duplicates.
#[derive(Default)]
struct LiveHandlers {
    live: HashSet<(InterceptionPath, ShortcutKey)>,
}

impl ShortcutBackend for LiveHandlers {
    fn install(&mut self, path: InterceptionPath, chord: ShortcutKey) -> Result<(), AppError> {
        if self.live.iter().any(|(p, _)| *p == path) {
            return Err(AppError::Shortcut(format!("{:?} already has a handler", path)));
        }
        self.live.insert((path, chord));
        Ok(())
    }

    fn uninstall(&mut self, path: InterceptionPath) -> Result<(), AppError> {
        self.live.retain(|(p, _)| *p != path);
        Ok(())
    }
}

#[test]
fn saved_shortcut_reregisters_without_accumulating_handlers() {
    let prefs = TempPrefs::new();
    let mut manager = ConfigurationManager::new(Box::new(prefs.store()));
    let mut registry = ShortcutRegistry::new(LiveHandlers::default());

    for key_code in [0x23, 0x0B, 0x23] {
        manager.set_global_shortcut(Some(ShortcutKey::new(key_code, ModifierMask::COMMAND)));
        manager.save_configuration().unwrap();

        let report = registry.register(manager.global_shortcut());
        assert!(report.failed.is_empty(), "{:?}", report.failed);
        assert_eq!(registry.active_chord(), manager.global_shortcut());
        assert_eq!(registry.installed_paths().len(), InterceptionPath::ALL.len());
    }
}
