use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::{AppHandle, Manager};

use super::{page_item_id, PREFERENCES_ID, QUIT_ID};
use crate::error::AppError;
use crate::state::app_state::{lock, AppState};

pub const TRAY_ID: &str = "montag-tray";

/// Build the status-item menu: one entry per page, then Preferences and Quit.
fn build_menu(app: &AppHandle) -> Result<Menu<tauri::Wry>, AppError> {
    let titles: Vec<String> = {
        let state = app.state::<AppState>();
        let config = lock(&state.config);
        config.webpages().iter().map(|page| page.title.clone()).collect()
    };

    let menu = Menu::new(app)?;
    for (index, title) in titles.iter().enumerate() {
        let accelerator = format!("CmdOrCtrl+{}", index + 1);
        let item = MenuItem::with_id(app, page_item_id(index), title, true, Some(accelerator))?;
        menu.append(&item)?;
    }

    menu.append(&PredefinedMenuItem::separator(app)?)?;
    menu.append(&MenuItem::with_id(
        app,
        PREFERENCES_ID,
        "Preferences…",
        true,
        Some("CmdOrCtrl+,"),
    )?)?;
    menu.append(&PredefinedMenuItem::separator(app)?)?;
    menu.append(&MenuItem::with_id(app, QUIT_ID, "Quit", true, Some("CmdOrCtrl+Q"))?)?;
    Ok(menu)
}

/// Build and configure the status-bar icon. A left click toggles the
/// popover; the menu opens on right click.
pub fn setup_tray(app: &AppHandle) -> Result<(), AppError> {
    let menu = build_menu(app)?;

    let icon_bytes = include_bytes!("../../icons/tray-icon.png");
    let icon = tauri::image::Image::from_bytes(icon_bytes)?;

    TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .icon_as_template(true)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .tooltip("Montag")
        .on_tray_icon_event(|tray, event| {
            tauri_plugin_positioner::on_tray_event(tray.app_handle(), &event);

            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                if let Err(e) = crate::popover::window::toggle_from_tray(tray.app_handle()) {
                    log::error!("Failed to toggle popover: {}", e);
                }
            }
        })
        .build(app)?;

    log::info!("Tray icon created");
    Ok(())
}

/// Re-creates the menu so page titles follow the saved configuration.
pub fn rebuild(app: &AppHandle) -> Result<(), AppError> {
    let Some(tray) = app.tray_by_id(TRAY_ID) else {
        return Ok(());
    };
    tray.set_menu(Some(build_menu(app)?))?;
    Ok(())
}
