pub mod commands;

use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_shell::ShellExt;

const LOGIN_ITEMS_SETTINGS_URL: &str =
    "x-apple.systempreferences:com.apple.LoginItems-Settings.extension";

/// Checks accessibility trust with the OS prompt enabled and explains the
/// remediation when the app is not trusted yet.
pub fn ensure_accessibility(app: &AppHandle) {
    if crate::platform::is_accessibility_trusted(true) {
        return;
    }

    log::warn!("Accessibility access missing; global shortcut works only while focused");
    app.dialog()
        .message(
            "To use global shortcuts, Montag needs accessibility permissions. Please go to \
             System Settings > Privacy & Security > Accessibility and add Montag to the list \
             of allowed apps.",
        )
        .title("Accessibility Permissions Required")
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::Ok)
        .show(|_| {});
}

/// Offers to open the Login Items pane after the OS refused a login-item change.
pub fn show_login_item_alert(app: &AppHandle) {
    let handle = app.clone();
    app.dialog()
        .message(
            "To set this app to open at login, you need to add it to Login Items in System Settings.",
        )
        .title("Permission Needed")
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::OkCancelCustom(
            "Open Settings".into(),
            "Cancel".into(),
        ))
        .show(move |open| {
            if !open {
                return;
            }
            #[allow(deprecated)]
            if let Err(e) = handle.shell().open(LOGIN_ITEMS_SETTINGS_URL, None) {
                log::error!("Failed to open Login Items settings: {}", e);
            }
        });
}
