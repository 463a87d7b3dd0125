use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use super::key::ShortcutKey;
use super::registry::{InterceptionPath, ShortcutBackend};
use crate::error::AppError;

#[cfg(target_os = "macos")]
use crate::platform::macos::event_monitor::{EventMonitor, MonitorScope};

/// Installs interception paths through Tauri: the global-shortcut plugin for
/// the system hotkey and `NSEvent` monitors for the two observer paths.
///
/// Install and uninstall must run on the main thread.
pub struct TauriShortcutBackend {
    app: AppHandle,
    system_hotkey: Option<Shortcut>,
    #[cfg(target_os = "macos")]
    local_monitor: Option<EventMonitor>,
    #[cfg(target_os = "macos")]
    global_monitor: Option<EventMonitor>,
}

impl TauriShortcutBackend {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            system_hotkey: None,
            #[cfg(target_os = "macos")]
            local_monitor: None,
            #[cfg(target_os = "macos")]
            global_monitor: None,
        }
    }

    fn install_system_hotkey(&mut self, chord: ShortcutKey) -> Result<(), AppError> {
        let shortcut = chord.to_shortcut()?;
        self.app
            .global_shortcut()
            .on_shortcut(shortcut, |app, _shortcut, event| {
                if event.state == ShortcutState::Pressed {
                    super::handle_trigger(app, InterceptionPath::SystemHotkey);
                }
            })
            .map_err(|e| AppError::Shortcut(format!("Failed to register {}: {}", chord, e)))?;
        self.system_hotkey = Some(shortcut);
        Ok(())
    }

    fn uninstall_system_hotkey(&mut self) -> Result<(), AppError> {
        let Some(shortcut) = self.system_hotkey.take() else {
            return Ok(());
        };
        let manager = self.app.global_shortcut();
        if manager.is_registered(shortcut) {
            manager
                .unregister(shortcut)
                .map_err(|e| AppError::Shortcut(e.to_string()))?;
        }
        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn install_monitor(&mut self, path: InterceptionPath, chord: ShortcutKey) -> Result<(), AppError> {
        let scope = match path {
            InterceptionPath::LocalMonitor => MonitorScope::Local,
            _ => MonitorScope::Global,
        };
        let app = self.app.clone();
        let monitor = EventMonitor::install(scope, chord, move || super::handle_trigger(&app, path))
            .ok_or_else(|| AppError::Shortcut(format!("NSEvent refused the {:?} monitor", scope)))?;

        match scope {
            MonitorScope::Local => self.local_monitor = Some(monitor),
            MonitorScope::Global => self.global_monitor = Some(monitor),
        }
        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    fn install_monitor(&mut self, path: InterceptionPath, _chord: ShortcutKey) -> Result<(), AppError> {
        Err(AppError::Shortcut(format!("{:?} is only available on macOS", path)))
    }

    fn uninstall_monitor(&mut self, path: InterceptionPath) {
        #[cfg(target_os = "macos")]
        match path {
            InterceptionPath::LocalMonitor => drop(self.local_monitor.take()),
            _ => drop(self.global_monitor.take()),
        }
        #[cfg(not(target_os = "macos"))]
        let _ = path;
    }
}

impl ShortcutBackend for TauriShortcutBackend {
    fn install(&mut self, path: InterceptionPath, chord: ShortcutKey) -> Result<(), AppError> {
        match path {
            InterceptionPath::SystemHotkey => self.install_system_hotkey(chord),
            InterceptionPath::LocalMonitor | InterceptionPath::GlobalMonitor => {
                self.install_monitor(path, chord)
            }
        }
    }

    fn uninstall(&mut self, path: InterceptionPath) -> Result<(), AppError> {
        match path {
            InterceptionPath::SystemHotkey => self.uninstall_system_hotkey(),
            InterceptionPath::LocalMonitor | InterceptionPath::GlobalMonitor => {
                self.uninstall_monitor(path);
                Ok(())
            }
        }
    }
}
