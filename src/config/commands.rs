use tauri::{AppHandle, Emitter};

use super::model::{Configuration, WebPage, PAGE_COUNT};
use crate::error::AppError;
use crate::events;
use crate::services::login_item;
use crate::state::app_state::{lock, AppState};

#[tauri::command]
pub fn get_configuration(state: tauri::State<'_, AppState>) -> Configuration {
    lock(&state.config).configuration().clone()
}

/// Saves the page list, then re-applies everything derived from the
/// configuration and closes the preferences window.
#[tauri::command]
pub fn save_preferences(
    webpages: Vec<WebPage>,
    app: AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<Configuration, AppError> {
    let webpages: [WebPage; PAGE_COUNT] = webpages.try_into().map_err(|pages: Vec<WebPage>| {
        AppError::Config(format!("Expected {} pages, got {}", PAGE_COUNT, pages.len()))
    })?;

    let (config, open_at_startup) = {
        let mut manager = lock(&state.config);
        manager.set_webpages(webpages);
        manager.save_configuration()?;
        (manager.configuration().clone(), manager.open_at_startup())
    };
    log::info!("Preferences saved");

    login_item::apply(&app, open_at_startup);
    crate::shortcuts::register_from_config(&app);
    crate::tray::refresh_menus(&app);
    if let Err(e) = crate::popover::window::reload_selected(&app) {
        log::error!("Failed to reload page: {}", e);
    }
    app.emit(events::CONFIG_CHANGED, &config)?;
    crate::preferences::window::close(&app);
    Ok(config)
}

/// Applies the login-item change right away and persists the flag.
#[tauri::command]
pub fn set_open_at_startup(
    enabled: bool,
    app: AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    lock(&state.config).set_open_at_startup(enabled);
    login_item::apply(&app, enabled);
    lock(&state.config).save_configuration()
}
