use serde::Serialize;
use tauri::AppHandle;

use crate::error::AppError;
use crate::state::app_state::{lock, AppState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarState {
    pub titles: Vec<String>,
    pub selected_page: usize,
}

#[tauri::command]
pub fn get_toolbar_state(state: tauri::State<'_, AppState>) -> ToolbarState {
    let titles = lock(&state.config)
        .webpages()
        .iter()
        .map(|page| page.title.clone())
        .collect();
    ToolbarState {
        titles,
        selected_page: lock(&state.popover).selected_page(),
    }
}

#[tauri::command]
pub fn toggle_popover(app: AppHandle) -> Result<(), AppError> {
    super::window::toggle(&app)
}

#[tauri::command]
pub fn select_page(index: usize, app: AppHandle) -> Result<(), AppError> {
    super::window::select_page(&app, index)
}

#[tauri::command]
pub fn open_preferences(app: AppHandle) -> Result<(), AppError> {
    crate::preferences::window::open(&app)
}
