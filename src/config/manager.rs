use super::model::{Configuration, WebPage, PAGE_COUNT};
use super::store::PreferenceStore;
use crate::error::AppError;
use crate::shortcuts::key::ShortcutKey;

/// Preference key the configuration blob lives under.
pub const CONFIGURATION_KEY: &str = "MontagAppConfiguration";

/// Owns the single in-process configuration and its backing store.
pub struct ConfigurationManager {
    store: Box<dyn PreferenceStore>,
    config: Configuration,
}

impl ConfigurationManager {
    /// Creates the manager and loads whatever is stored, falling back to defaults.
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        let mut manager = Self {
            store,
            config: Configuration::default(),
        };
        manager.load_configuration();
        manager
    }

    /// Replaces the in-memory record with the stored one. Missing or
    /// undecodable data is logged and leaves the current values in place.
    pub fn load_configuration(&mut self) {
        match self.store.read(CONFIGURATION_KEY) {
            Ok(Some(value)) => match serde_json::from_value::<Configuration>(value) {
                Ok(config) => self.config = config,
                Err(e) => log::error!("Failed to load configuration: {}", e),
            },
            Ok(None) => log::info!("No saved configuration, using defaults"),
            Err(e) => log::error!("Failed to read preferences: {}", e),
        }
    }

    pub fn save_configuration(&self) -> Result<(), AppError> {
        let value = serde_json::to_value(&self.config)?;
        self.store.write(CONFIGURATION_KEY, value)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    pub fn open_at_startup(&self) -> bool {
        self.config.open_at_startup
    }

    pub fn set_open_at_startup(&mut self, enabled: bool) {
        self.config.open_at_startup = enabled;
    }

    pub fn global_shortcut(&self) -> Option<ShortcutKey> {
        self.config.global_shortcut
    }

    pub fn set_global_shortcut(&mut self, shortcut: Option<ShortcutKey>) {
        self.config.global_shortcut = shortcut;
    }

    pub fn webpages(&self) -> &[WebPage; PAGE_COUNT] {
        &self.config.webpages
    }

    pub fn webpage(&self, index: usize) -> Option<&WebPage> {
        self.config.webpages.get(index)
    }

    pub fn set_webpages(&mut self, webpages: [WebPage; PAGE_COUNT]) {
        self.config.webpages = webpages;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::store::MemoryStore;
    use crate::shortcuts::key::ModifierMask;
    use serde_json::json;

    #[test]
    fn empty_store_yields_defaults() {
        let manager = ConfigurationManager::new(Box::new(MemoryStore::default()));
        assert_eq!(manager.configuration(), &Configuration::default());
    }

    #[test]
    fn save_then_load_round_trips_every_field() {
        let store = MemoryStore::default();
        let mut manager = ConfigurationManager::new(Box::new(store.clone()));
        manager.set_open_at_startup(true);
        manager.set_global_shortcut(Some(ShortcutKey::new(
            0x31,
            ModifierMask::OPTION | ModifierMask::CONTROL,
        )));
        manager.set_webpages([
            WebPage::new("Mail", "https://mail.example.com"),
            WebPage::new("", ""),
            WebPage::new("Ünïcode ✓", "https://example.com/?q=a&b=\"c\""),
        ]);
        manager.save_configuration().unwrap();

        let reloaded = ConfigurationManager::new(Box::new(store));
        assert_eq!(reloaded.configuration(), manager.configuration());
    }

    #[test]
    fn cleared_shortcut_survives_a_save() {
        let store = MemoryStore::default();
        let mut manager = ConfigurationManager::new(Box::new(store.clone()));
        manager.set_global_shortcut(None);
        manager.save_configuration().unwrap();

        let reloaded = ConfigurationManager::new(Box::new(store));
        assert_eq!(reloaded.global_shortcut(), None);
    }

    #[test]
    fn undecodable_blob_falls_back_to_defaults() {
        let store = MemoryStore::default();
        store
            .write(CONFIGURATION_KEY, json!({ "openAtStartup": "yes" }))
            .unwrap();

        let manager = ConfigurationManager::new(Box::new(store));
        assert_eq!(manager.configuration(), &Configuration::default());
    }

    #[test]
    fn webpage_lookup_is_bounds_checked() {
        let manager = ConfigurationManager::new(Box::new(MemoryStore::default()));
        assert!(manager.webpage(2).is_some());
        assert!(manager.webpage(3).is_none());
    }
}
