use tauri::AppHandle;

#[tauri::command]
pub fn is_launch_at_login_enabled(app: AppHandle) -> bool {
    super::is_enabled(&app)
}
