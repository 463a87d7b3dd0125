use serde::Deserialize;
use tauri::{AppHandle, Emitter};

use super::key::{key_code_for_dom_code, ModifierMask};
use super::recorder::{RecordOutcome, RecorderStatus};
use crate::events;
use crate::state::app_state::{lock, AppState};

/// A key press as reported by a DOM `keydown` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPress {
    pub code: String,
    #[serde(default)]
    pub meta_key: bool,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub shift_key: bool,
}

impl KeyPress {
    fn modifiers(&self) -> ModifierMask {
        ModifierMask::from_keys(self.meta_key, self.alt_key, self.ctrl_key, self.shift_key)
    }
}

fn publish(app: &AppHandle, status: &RecorderStatus) {
    let _ = app.emit(events::SHORTCUT_RECORDING, status);
}

#[tauri::command]
pub fn get_shortcut_status(state: tauri::State<'_, AppState>) -> RecorderStatus {
    lock(&state.recorder).status()
}

/// Starts recording. The live chord is suspended so pressing it records it
/// instead of toggling the popover.
#[tauri::command]
pub fn begin_shortcut_recording(app: AppHandle, state: tauri::State<'_, AppState>) -> RecorderStatus {
    super::suspend(&app);
    let status = {
        let mut recorder = lock(&state.recorder);
        recorder.begin();
        recorder.status()
    };
    publish(&app, &status);
    status
}

#[tauri::command]
pub fn record_shortcut_key(
    press: KeyPress,
    app: AppHandle,
    state: tauri::State<'_, AppState>,
) -> RecorderStatus {
    let Some(key_code) = key_code_for_dom_code(&press.code) else {
        log::debug!("Ignoring unmapped key '{}' while recording", press.code);
        return lock(&state.recorder).status();
    };

    let (outcome, status) = {
        let mut recorder = lock(&state.recorder);
        let outcome = recorder.handle_key(key_code, press.modifiers());
        (outcome, recorder.status())
    };

    match outcome {
        RecordOutcome::Recorded(chord) => {
            log::info!("Recorded shortcut {}", chord);
            lock(&state.config).set_global_shortcut(Some(chord));
            super::register_from_config(&app);
        }
        RecordOutcome::Cancelled => {
            super::register_from_config(&app);
        }
        RecordOutcome::Ignored => {}
    }

    publish(&app, &status);
    status
}

#[tauri::command]
pub fn cancel_shortcut_recording(app: AppHandle, state: tauri::State<'_, AppState>) -> RecorderStatus {
    let (was_recording, status) = {
        let mut recorder = lock(&state.recorder);
        (recorder.cancel(), recorder.status())
    };
    if was_recording {
        super::register_from_config(&app);
    }
    publish(&app, &status);
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_decodes_dom_field_names() {
        let press: KeyPress = serde_json::from_value(serde_json::json!({
            "code": "KeyK",
            "metaKey": true,
            "shiftKey": true
        }))
        .unwrap();

        assert_eq!(press.code, "KeyK");
        assert_eq!(press.modifiers(), ModifierMask::COMMAND | ModifierMask::SHIFT);
    }
}
