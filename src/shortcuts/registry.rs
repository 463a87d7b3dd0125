//! Bookkeeping for the three ways a chord press reaches the app.
//!
//! Every registration tears down whatever is installed before installing the
//! new chord, so at most one chord is ever live and each path holds at most
//! one handler.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::key::ShortcutKey;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InterceptionPath {
    /// In-process key filter; only sees events while the app is focused.
    LocalMonitor,
    /// System-wide observer; sees events while unfocused, cannot swallow them.
    GlobalMonitor,
    /// OS hotkey; swallows the chord everywhere.
    SystemHotkey,
}

impl InterceptionPath {
    pub const ALL: [InterceptionPath; 3] = [
        InterceptionPath::LocalMonitor,
        InterceptionPath::GlobalMonitor,
        InterceptionPath::SystemHotkey,
    ];
}

#[cfg_attr(test, mockall::automock)]
pub trait ShortcutBackend {
    fn install(&mut self, path: InterceptionPath, chord: ShortcutKey) -> Result<(), AppError>;
    fn uninstall(&mut self, path: InterceptionPath) -> Result<(), AppError>;
}

#[derive(Debug, Default, Serialize)]
pub struct RegistrationReport {
    pub chord: Option<ShortcutKey>,
    pub installed: Vec<InterceptionPath>,
    pub failed: Vec<(InterceptionPath, String)>,
}

pub struct ShortcutRegistry<B> {
    backend: B,
    active: Option<ShortcutKey>,
    installed: Vec<InterceptionPath>,
}

impl<B: ShortcutBackend> ShortcutRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            active: None,
            installed: Vec::new(),
        }
    }

    pub fn active_chord(&self) -> Option<ShortcutKey> {
        self.active
    }

    pub fn installed_paths(&self) -> &[InterceptionPath] {
        &self.installed
    }

    /// Replaces the live chord. `None` just clears everything.
    pub fn register(&mut self, chord: Option<ShortcutKey>) -> RegistrationReport {
        self.unregister_all();

        let mut report = RegistrationReport {
            chord,
            ..Default::default()
        };
        let Some(chord) = chord else {
            return report;
        };

        log::info!(
            "Registering shortcut {} (key code {}, modifiers {:#x})",
            chord,
            chord.key_code,
            chord.modifiers.bits()
        );

        for path in InterceptionPath::ALL {
            match self.backend.install(path, chord) {
                Ok(()) => {
                    self.installed.push(path);
                    report.installed.push(path);
                }
                Err(e) => {
                    log::warn!("Failed to install {:?} for {}: {}", path, chord, e);
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        if !self.installed.is_empty() {
            self.active = Some(chord);
        }
        report
    }

    /// Removes every installed path. Safe to call repeatedly.
    pub fn unregister_all(&mut self) {
        for path in self.installed.drain(..) {
            if let Err(e) = self.backend.uninstall(path) {
                log::warn!("Failed to uninstall {:?}: {}", path, e);
            }
        }
        self.active = None;
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

/// Drops triggers that arrive right after an admitted one, so a press seen
/// by several paths toggles only once.
#[derive(Debug)]
pub struct TriggerGate {
    window: Duration,
    last: Option<Instant>,
}

impl TriggerGate {
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(250);

    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

impl Default for TriggerGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}
