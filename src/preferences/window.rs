use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder, WindowEvent};

use crate::error::AppError;
use crate::state::app_state::{lock, AppState};

pub const PREFERENCES_LABEL: &str = "preferences";

/// Open (or focus) the preferences window
pub fn open(app: &AppHandle) -> Result<(), AppError> {
    if let Some(window) = app.get_webview_window(PREFERENCES_LABEL) {
        window.show()?;
        window.set_focus()?;
        return Ok(());
    }

    {
        let state = app.state::<AppState>();
        let shortcut = lock(&state.config).global_shortcut();
        lock(&state.recorder).reset(shortcut);
    }

    let window = WebviewWindowBuilder::new(
        app,
        PREFERENCES_LABEL,
        WebviewUrl::App("preferences.html".into()),
    )
    .title("Preferences")
    .inner_size(520.0, 560.0)
    .resizable(false)
    .minimizable(false)
    .always_on_top(true)
    .center()
    .focused(true)
    .build()?;

    // Closing mid-recording must not leave the shortcut suspended.
    let handle = app.clone();
    window.on_window_event(move |event| {
        if let WindowEvent::Destroyed = event {
            let was_recording = lock(&handle.state::<AppState>().recorder).cancel();
            if was_recording {
                crate::shortcuts::register_from_config(&handle);
            }
        }
    });

    window.set_focus()?;
    log::info!("Preferences window opened");
    Ok(())
}

pub fn close(app: &AppHandle) {
    if let Some(window) = app.get_webview_window(PREFERENCES_LABEL) {
        if let Err(e) = window.close() {
            log::error!("Failed to close preferences: {}", e);
        }
    }
}
