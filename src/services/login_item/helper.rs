use serde_json::Value;

use crate::config::manager::ConfigurationManager;
use crate::config::store::PreferenceStore;
use crate::error::AppError;

/// Preference key mirroring the OS login-item state.
pub const LAUNCH_AT_LOGIN_KEY: &str = "LaunchAtLoginEnabled";

/// OS service that starts the app at login.
#[cfg_attr(test, mockall::automock)]
pub trait LoginItemService {
    fn is_registered(&self) -> Result<bool, AppError>;
    fn register(&self) -> Result<(), AppError>;
    fn unregister(&self) -> Result<(), AppError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginItemOutcome {
    Unchanged,
    Registered,
    Unregistered,
    /// The OS refused the change; the user has to add the app by hand.
    PermissionNeeded(String),
}

pub struct LaunchAtLoginHelper<'a, S: LoginItemService> {
    service: S,
    store: &'a dyn PreferenceStore,
}

impl<'a, S: LoginItemService> LaunchAtLoginHelper<'a, S> {
    pub fn new(service: S, store: &'a dyn PreferenceStore) -> Self {
        Self { service, store }
    }

    fn stored_preference(&self) -> bool {
        match self.store.read(LAUNCH_AT_LOGIN_KEY) {
            Ok(Some(Value::Bool(enabled))) => enabled,
            Ok(_) => false,
            Err(e) => {
                log::warn!("Failed to read {}: {}", LAUNCH_AT_LOGIN_KEY, e);
                false
            }
        }
    }

    fn remember(&self, enabled: bool) {
        if let Err(e) = self.store.write(LAUNCH_AT_LOGIN_KEY, Value::Bool(enabled)) {
            log::error!("Failed to save {}: {}", LAUNCH_AT_LOGIN_KEY, e);
        }
    }

    /// Registers or unregisters the login item. Calls into the OS only when
    /// the live state differs from the request.
    pub fn set_launch_at_login(&self, enabled: bool) -> LoginItemOutcome {
        let current = match self.service.is_registered() {
            Ok(current) => current,
            Err(e) => {
                log::warn!("Login item status unavailable: {}", e);
                !enabled
            }
        };

        if current == enabled {
            self.remember(enabled);
            return LoginItemOutcome::Unchanged;
        }

        let result = if enabled {
            self.service.register()
        } else {
            self.service.unregister()
        };

        match result {
            Ok(()) => {
                log::info!(
                    "Successfully {} app for launch at login",
                    if enabled { "registered" } else { "unregistered" }
                );
                self.remember(enabled);
                if enabled {
                    LoginItemOutcome::Registered
                } else {
                    LoginItemOutcome::Unregistered
                }
            }
            Err(e) => {
                log::error!("Error managing launch at login: {}", e);
                LoginItemOutcome::PermissionNeeded(e.to_string())
            }
        }
    }

    /// Live login-item state. The stored preference is brought in line with
    /// it; when the OS cannot be queried the stored preference is returned.
    pub fn is_launch_at_login_enabled(&self) -> bool {
        match self.service.is_registered() {
            Ok(enabled) => {
                if self.stored_preference() != enabled {
                    self.remember(enabled);
                }
                enabled
            }
            Err(e) => {
                log::warn!("Login item status unavailable: {}", e);
                self.stored_preference()
            }
        }
    }
}

/// Reads the live login-item state and copies it into the saved
/// open-at-login flag, so a removal made in System Settings is not undone by
/// the next save.
pub fn sync_open_at_startup<S: LoginItemService>(
    service: S,
    manager: &mut ConfigurationManager,
) -> bool {
    let enabled = LaunchAtLoginHelper::new(service, manager.store()).is_launch_at_login_enabled();
    if manager.open_at_startup() != enabled {
        log::info!("Open at login changed outside Montag, now {}", enabled);
        manager.set_open_at_startup(enabled);
        if let Err(e) = manager.save_configuration() {
            log::error!("Failed to save open-at-login state: {}", e);
        }
    }
    enabled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::manager::CONFIGURATION_KEY;
    use crate::config::store::MemoryStore;

    fn stored(store: &MemoryStore) -> Option<Value> {
        store.read(LAUNCH_AT_LOGIN_KEY).unwrap()
    }

    #[test]
    fn enabling_registers_once() {
        let store = MemoryStore::default();
        let mut service = MockLoginItemService::new();
        service.expect_is_registered().times(1).returning(|| Ok(false));
        service.expect_register().times(1).returning(|| Ok(()));
        service.expect_unregister().never();

        let helper = LaunchAtLoginHelper::new(service, &store);
        assert_eq!(helper.set_launch_at_login(true), LoginItemOutcome::Registered);
        assert_eq!(stored(&store), Some(Value::Bool(true)));
    }

    #[test]
    fn already_registered_skips_the_os_call() {
        let store = MemoryStore::default();
        let mut service = MockLoginItemService::new();
        service.expect_is_registered().returning(|| Ok(true));
        service.expect_register().never();

        let helper = LaunchAtLoginHelper::new(service, &store);
        assert_eq!(helper.set_launch_at_login(true), LoginItemOutcome::Unchanged);
        assert_eq!(stored(&store), Some(Value::Bool(true)));
    }

    #[test]
    fn disabling_unregisters() {
        let store = MemoryStore::default();
        let mut service = MockLoginItemService::new();
        service.expect_is_registered().returning(|| Ok(true));
        service.expect_unregister().times(1).returning(|| Ok(()));

        let helper = LaunchAtLoginHelper::new(service, &store);
        assert_eq!(helper.set_launch_at_login(false), LoginItemOutcome::Unregistered);
        assert_eq!(stored(&store), Some(Value::Bool(false)));
    }

    #[test]
    fn refusal_reports_permission_needed_and_keeps_preference() {
        let store = MemoryStore::default();
        let mut service = MockLoginItemService::new();
        service.expect_is_registered().returning(|| Ok(false));
        service
            .expect_register()
            .returning(|| Err(AppError::LoginItem("Operation not permitted".into())));

        let helper = LaunchAtLoginHelper::new(service, &store);
        match helper.set_launch_at_login(true) {
            LoginItemOutcome::PermissionNeeded(reason) => {
                assert!(reason.contains("Operation not permitted"))
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn status_query_syncs_stored_preference() {
        let store = MemoryStore::default();
        store.write(LAUNCH_AT_LOGIN_KEY, Value::Bool(true)).unwrap();
        let mut service = MockLoginItemService::new();
        service.expect_is_registered().returning(|| Ok(false));

        let helper = LaunchAtLoginHelper::new(service, &store);
        assert!(!helper.is_launch_at_login_enabled());
        assert_eq!(stored(&store), Some(Value::Bool(false)));
    }

    #[test]
    fn status_falls_back_to_stored_preference() {
        let store = MemoryStore::default();
        store.write(LAUNCH_AT_LOGIN_KEY, Value::Bool(true)).unwrap();
        let mut service = MockLoginItemService::new();
        service
            .expect_is_registered()
            .returning(|| Err(AppError::LoginItem("unavailable".into())));

        let helper = LaunchAtLoginHelper::new(service, &store);
        assert!(helper.is_launch_at_login_enabled());
    }

    #[test]
    fn removal_in_system_settings_clears_open_at_startup() {
        let mut manager = ConfigurationManager::new(Box::new(MemoryStore::default()));
        manager.set_open_at_startup(true);
        let mut service = MockLoginItemService::new();
        service.expect_is_registered().returning(|| Ok(false));
        service.expect_register().never();

        assert!(!sync_open_at_startup(service, &mut manager));
        assert!(!manager.open_at_startup());
        let saved = manager.store().read(CONFIGURATION_KEY).unwrap().unwrap();
        assert_eq!(saved["openAtStartup"], Value::Bool(false));
    }

    #[test]
    fn registration_made_elsewhere_sets_open_at_startup() {
        let mut manager = ConfigurationManager::new(Box::new(MemoryStore::default()));
        let mut service = MockLoginItemService::new();
        service.expect_is_registered().returning(|| Ok(true));

        assert!(sync_open_at_startup(service, &mut manager));
        assert!(manager.open_at_startup());
    }
}
