use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Authorized,
    Denied,
}

impl From<bool> for PermissionStatus {
    fn from(trusted: bool) -> Self {
        if trusted {
            PermissionStatus::Authorized
        } else {
            PermissionStatus::Denied
        }
    }
}

/// Accessibility trust as seen right now. Never prompts.
#[tauri::command]
pub fn check_accessibility_permission() -> PermissionStatus {
    crate::platform::is_accessibility_trusted(false).into()
}
