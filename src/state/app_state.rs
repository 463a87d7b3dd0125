use std::sync::{Mutex, MutexGuard, PoisonError};

use tauri::AppHandle;

use crate::config::manager::ConfigurationManager;
use crate::popover::state::PopoverState;
use crate::shortcuts::backend::TauriShortcutBackend;
use crate::shortcuts::recorder::ShortcutRecorder;
use crate::shortcuts::registry::{ShortcutRegistry, TriggerGate};

/// Global application state managed by Tauri
pub struct AppState {
    pub config: Mutex<ConfigurationManager>,
    pub popover: Mutex<PopoverState>,
    pub recorder: Mutex<ShortcutRecorder>,
    pub shortcuts: Mutex<ShortcutRegistry<TauriShortcutBackend>>,
    pub trigger_gate: Mutex<TriggerGate>,
}

impl AppState {
    pub fn new(app: &AppHandle, config: ConfigurationManager) -> Self {
        let recorder = ShortcutRecorder::new(config.global_shortcut());
        Self {
            config: Mutex::new(config),
            popover: Mutex::new(PopoverState::default()),
            recorder: Mutex::new(recorder),
            shortcuts: Mutex::new(ShortcutRegistry::new(TauriShortcutBackend::new(app.clone()))),
            trigger_gate: Mutex::new(TriggerGate::default()),
        }
    }
}

/// Locks a state mutex; a panic in another handler does not wedge the app.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
