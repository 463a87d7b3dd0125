pub mod commands;
pub mod helper;

use tauri::{AppHandle, Manager, Runtime};
use tauri_plugin_autostart::ManagerExt;

use crate::error::AppError;
use crate::state::app_state::{lock, AppState};
use helper::{LaunchAtLoginHelper, LoginItemOutcome, LoginItemService};

/// Login item backed by the autostart plugin's launch agent.
pub struct AutostartService<'a, R: Runtime> {
    app: &'a AppHandle<R>,
}

impl<'a, R: Runtime> AutostartService<'a, R> {
    pub fn new(app: &'a AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> LoginItemService for AutostartService<'_, R> {
    fn is_registered(&self) -> Result<bool, AppError> {
        self.app
            .autolaunch()
            .is_enabled()
            .map_err(|e| AppError::LoginItem(e.to_string()))
    }

    fn register(&self) -> Result<(), AppError> {
        self.app
            .autolaunch()
            .enable()
            .map_err(|e| AppError::LoginItem(e.to_string()))
    }

    fn unregister(&self) -> Result<(), AppError> {
        self.app
            .autolaunch()
            .disable()
            .map_err(|e| AppError::LoginItem(e.to_string()))
    }
}

/// Applies the login-item setting and asks the user to finish the job in
/// System Settings when the OS refuses.
pub fn apply(app: &AppHandle, enabled: bool) -> LoginItemOutcome {
    let outcome = {
        let state = app.state::<AppState>();
        let config = lock(&state.config);
        let helper = LaunchAtLoginHelper::new(AutostartService::new(app), config.store());
        helper.set_launch_at_login(enabled)
    };

    if let LoginItemOutcome::PermissionNeeded(_) = &outcome {
        crate::services::permissions::show_login_item_alert(app);
    }
    outcome
}

/// Live login-item state, copied into the saved configuration.
pub fn is_enabled(app: &AppHandle) -> bool {
    let state = app.state::<AppState>();
    let mut config = lock(&state.config);
    helper::sync_open_at_startup(AutostartService::new(app), &mut config)
}
