use serde::Serialize;

use super::key::{is_modifier_key, ModifierMask, ShortcutKey};

const KEY_CODE_ESCAPE: u16 = 0x35;

/// Captures one chord from the preferences page.
///
/// The page forwards key presses while recording; bare modifier presses are
/// ignored and a bare Escape cancels.
#[derive(Debug, Default)]
pub struct ShortcutRecorder {
    recording: bool,
    shortcut: Option<ShortcutKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded(ShortcutKey),
    Cancelled,
    Ignored,
}

/// Snapshot sent to the preferences page.
#[derive(Debug, Clone, Serialize)]
pub struct RecorderStatus {
    pub recording: bool,
    pub label: String,
    pub shortcut: Option<ShortcutKey>,
}

impl ShortcutRecorder {
    pub fn new(shortcut: Option<ShortcutKey>) -> Self {
        Self {
            recording: false,
            shortcut,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn shortcut(&self) -> Option<ShortcutKey> {
        self.shortcut
    }

    /// Re-seeds the displayed chord, e.g. after the preferences window reopens.
    pub fn reset(&mut self, shortcut: Option<ShortcutKey>) {
        self.recording = false;
        self.shortcut = shortcut;
    }

    pub fn begin(&mut self) {
        self.recording = true;
    }

    pub fn handle_key(&mut self, key_code: u16, modifiers: ModifierMask) -> RecordOutcome {
        if !self.recording || is_modifier_key(key_code) {
            return RecordOutcome::Ignored;
        }
        if key_code == KEY_CODE_ESCAPE && modifiers.is_empty() {
            self.recording = false;
            return RecordOutcome::Cancelled;
        }

        let chord = ShortcutKey::new(key_code, modifiers);
        self.shortcut = Some(chord);
        self.recording = false;
        RecordOutcome::Recorded(chord)
    }

    /// Stops recording and keeps the previous chord. Returns whether a
    /// recording was actually in progress.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.recording, false)
    }

    pub fn label(&self) -> String {
        if self.recording {
            return "Recording... Press keys".to_string();
        }
        match self.shortcut {
            Some(chord) => chord.to_string(),
            None => "Click to record shortcut".to_string(),
        }
    }

    pub fn status(&self) -> RecorderStatus {
        RecorderStatus {
            recording: self.recording,
            label: self.label(),
            shortcut: self.shortcut,
        }
    }
}
