pub mod backend;
pub mod commands;
pub mod key;
pub mod recorder;
pub mod registry;

use std::time::Instant;

use tauri::{AppHandle, Emitter, Manager};

use crate::events;
use crate::state::app_state::{lock, AppState};
use registry::{InterceptionPath, RegistrationReport};

/// (Re)installs the configured chord on every interception path.
pub fn register_from_config(app: &AppHandle) -> RegistrationReport {
    let state = app.state::<AppState>();
    let chord = lock(&state.config).global_shortcut();
    let report = lock(&state.shortcuts).register(chord);

    if report.installed.contains(&InterceptionPath::GlobalMonitor) {
        crate::services::permissions::ensure_accessibility(app);
    }
    report
}

/// Tears down every path without touching the stored chord.
pub fn suspend(app: &AppHandle) {
    let state = app.state::<AppState>();
    lock(&state.shortcuts).unregister_all();
}

/// Entry point for a chord press arriving on any path.
pub fn handle_trigger(app: &AppHandle, path: InterceptionPath) {
    let state = app.state::<AppState>();
    if !lock(&state.trigger_gate).admit(Instant::now()) {
        log::debug!("Dropped duplicate shortcut trigger from {:?}", path);
        return;
    }

    log::info!("Shortcut triggered via {:?}", path);
    let _ = app.emit(events::SHORTCUT_TRIGGERED, path);
    if let Err(e) = crate::popover::window::toggle(app) {
        log::error!("Failed to toggle popover: {}", e);
    }
}
