use tauri::AppHandle;
use tauri_plugin_clipboard_manager::ClipboardExt;

use super::dialogs::PageDialog;
use crate::error::AppError;

/// Receives the selection read by the copy script. Empty text leaves the
/// clipboard untouched.
#[tauri::command]
pub fn bridge_store_clipboard(text: String, app: AppHandle) -> Result<(), AppError> {
    if text.is_empty() {
        return Ok(());
    }
    app.clipboard()
        .write_text(text)
        .map_err(|e| AppError::Clipboard(e.to_string()))
}

// Dialog commands are async so the modal panel runs off the main thread.

#[tauri::command]
pub async fn bridge_alert(message: String, app: AppHandle) {
    PageDialog::Alert { message }.run(&app);
}

#[tauri::command]
pub async fn bridge_confirm(message: String, app: AppHandle) -> bool {
    PageDialog::Confirm { message }.run(&app)
}

#[tauri::command]
pub async fn bridge_prompt(
    message: String,
    default_text: Option<String>,
    app: AppHandle,
) -> Option<String> {
    let dialog = PageDialog::Prompt {
        message,
        default_text,
    };
    let accepted = dialog.run(&app);
    dialog.prompt_answer(accepted)
}
