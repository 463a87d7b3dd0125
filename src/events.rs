/// Event name constants for Tauri backend -> frontend communication
pub const CONFIG_CHANGED: &str = "config:changed";
pub const PAGE_SELECTED: &str = "page:selected";
pub const SHORTCUT_RECORDING: &str = "shortcut:recording";
pub const SHORTCUT_TRIGGERED: &str = "shortcut:triggered";
