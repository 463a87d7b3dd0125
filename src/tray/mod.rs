pub mod app_menu;
pub mod menu;

use tauri::menu::MenuEvent;
use tauri::AppHandle;

use crate::bridge::edit::{self, EditCommand};

pub const PREFERENCES_ID: &str = "preferences";
pub const QUIT_ID: &str = "quit";
const PAGE_ITEM_PREFIX: &str = "page_";

pub fn page_item_id(index: usize) -> String {
    format!("{}{}", PAGE_ITEM_PREFIX, index)
}

fn parse_page_item_id(id: &str) -> Option<usize> {
    id.strip_prefix(PAGE_ITEM_PREFIX)?.parse().ok()
}

/// Rebuilds both menus after the page titles changed.
pub fn refresh_menus(app: &AppHandle) {
    if let Err(e) = menu::rebuild(app) {
        log::error!("Failed to rebuild tray menu: {}", e);
    }
    if let Err(e) = app_menu::install(app) {
        log::error!("Failed to rebuild application menu: {}", e);
    }
}

/// Handles events from the tray menu and the application menu alike.
pub fn handle_menu_event(app: &AppHandle, event: MenuEvent) {
    let id = event.id().as_ref();

    if let Some(command) = EditCommand::from_id(id) {
        if let Err(e) = edit::perform(app, command) {
            log::error!("{:?} failed: {}", command, e);
        }
        return;
    }

    if let Some(index) = parse_page_item_id(id) {
        let result = crate::popover::window::select_page(app, index)
            .and_then(|()| crate::popover::window::reveal(app));
        if let Err(e) = result {
            log::error!("Failed to open page {}: {}", index + 1, e);
        }
        return;
    }

    match id {
        PREFERENCES_ID => {
            if let Err(e) = crate::preferences::window::open(app) {
                log::error!("Failed to open preferences: {}", e);
            }
        }
        QUIT_ID => app.exit(0),
        _ => log::debug!("Unhandled menu item '{}'", id),
    }
}
