use tauri::menu::{Menu, MenuItem, PredefinedMenuItem, Submenu};
use tauri::{AppHandle, Manager};

use super::{page_item_id, PREFERENCES_ID, QUIT_ID};
use crate::bridge::edit::EditCommand;
use crate::error::AppError;
use crate::state::app_state::{lock, AppState};

/// Application main menu. Besides About/Preferences/Quit it carries the Edit
/// accelerators webviews rely on and the page shortcuts.
fn build(app: &AppHandle) -> Result<Menu<tauri::Wry>, AppError> {
    let app_menu = Submenu::with_items(
        app,
        "Montag",
        true,
        &[
            &PredefinedMenuItem::about(app, Some("About Montag"), None)?,
            &PredefinedMenuItem::separator(app)?,
            &MenuItem::with_id(app, PREFERENCES_ID, "Preferences…", true, Some("CmdOrCtrl+,"))?,
            &PredefinedMenuItem::separator(app)?,
            &MenuItem::with_id(app, QUIT_ID, "Quit Montag", true, Some("CmdOrCtrl+Q"))?,
        ],
    )?;

    let edit_menu = Submenu::new(app, "Edit", true)?;
    for command in EditCommand::ALL {
        if command == EditCommand::Cut || command == EditCommand::SelectAll {
            edit_menu.append(&PredefinedMenuItem::separator(app)?)?;
        }
        edit_menu.append(&MenuItem::with_id(
            app,
            command.id(),
            command.title(),
            true,
            Some(command.accelerator()),
        )?)?;
    }

    let titles: Vec<String> = {
        let state = app.state::<AppState>();
        let config = lock(&state.config);
        config.webpages().iter().map(|page| page.title.clone()).collect()
    };
    let view_menu = Submenu::new(app, "View", true)?;
    for (index, title) in titles.iter().enumerate() {
        let accelerator = format!("CmdOrCtrl+{}", index + 1);
        view_menu.append(&MenuItem::with_id(
            app,
            page_item_id(index),
            title,
            true,
            Some(accelerator),
        )?)?;
    }

    Ok(Menu::with_items(app, &[&app_menu, &edit_menu, &view_menu])?)
}

/// Installs (or replaces) the application main menu.
pub fn install(app: &AppHandle) -> Result<(), AppError> {
    app.set_menu(build(app)?)?;
    Ok(())
}
