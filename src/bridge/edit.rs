use tauri::{AppHandle, Manager, Webview};
use tauri_plugin_clipboard_manager::ClipboardExt;

use super::scripts;
use crate::error::AppError;
use crate::popover::window::{PAGE_LABEL, POPOVER_LABEL};
use crate::preferences::window::PREFERENCES_LABEL;

/// Edit menu commands carried out inside a webview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
}

impl EditCommand {
    pub const ALL: [EditCommand; 6] = [
        EditCommand::Undo,
        EditCommand::Redo,
        EditCommand::Cut,
        EditCommand::Copy,
        EditCommand::Paste,
        EditCommand::SelectAll,
    ];

    pub fn id(self) -> &'static str {
        match self {
            EditCommand::Undo => "edit_undo",
            EditCommand::Redo => "edit_redo",
            EditCommand::Cut => "edit_cut",
            EditCommand::Copy => "edit_copy",
            EditCommand::Paste => "edit_paste",
            EditCommand::SelectAll => "edit_select_all",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            EditCommand::Undo => "Undo",
            EditCommand::Redo => "Redo",
            EditCommand::Cut => "Cut",
            EditCommand::Copy => "Copy",
            EditCommand::Paste => "Paste",
            EditCommand::SelectAll => "Select All",
        }
    }

    pub fn accelerator(self) -> &'static str {
        match self {
            EditCommand::Undo => "CmdOrCtrl+Z",
            EditCommand::Redo => "Shift+CmdOrCtrl+Z",
            EditCommand::Cut => "CmdOrCtrl+X",
            EditCommand::Copy => "CmdOrCtrl+C",
            EditCommand::Paste => "CmdOrCtrl+V",
            EditCommand::SelectAll => "CmdOrCtrl+A",
        }
    }

    /// Script for every command except paste, which needs the clipboard text.
    fn script(self) -> String {
        match self {
            EditCommand::Undo => scripts::UNDO.to_string(),
            EditCommand::Redo => scripts::REDO.to_string(),
            EditCommand::Cut => format!("{}\n{}", scripts::COPY_SELECTION, scripts::DELETE_SELECTION),
            EditCommand::Copy => scripts::COPY_SELECTION.to_string(),
            EditCommand::SelectAll => scripts::SELECT_ALL.to_string(),
            EditCommand::Paste => String::new(),
        }
    }
}

fn is_focused(app: &AppHandle, label: &str) -> bool {
    app.get_window(label)
        .and_then(|window| window.is_focused().ok())
        .unwrap_or(false)
}

fn focused_webview(app: &AppHandle) -> Option<Webview> {
    if is_focused(app, POPOVER_LABEL) {
        app.get_webview(PAGE_LABEL)
    } else if is_focused(app, PREFERENCES_LABEL) {
        app.get_webview(PREFERENCES_LABEL)
    } else {
        None
    }
}

/// Runs `command` in whichever of our webviews has focus, then masks the
/// alert tone.
pub fn perform(app: &AppHandle, command: EditCommand) -> Result<(), AppError> {
    let Some(webview) = focused_webview(app) else {
        log::debug!("No focused webview for {:?}", command);
        return Ok(());
    };

    let script = match command {
        EditCommand::Paste => {
            let text = app
                .clipboard()
                .read_text()
                .map_err(|e| AppError::Clipboard(e.to_string()))?;
            scripts::paste_script(&text)
        }
        other => other.script(),
    };

    webview.eval(&script)?;
    webview.eval(scripts::SILENCE_BEEP)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_ids_resolve_back_to_commands() {
        for command in EditCommand::ALL {
            assert_eq!(EditCommand::from_id(command.id()), Some(command));
        }
        assert_eq!(EditCommand::from_id("page_0"), None);
    }

    #[test]
    fn cut_copies_before_deleting() {
        let script = EditCommand::Cut.script();
        let copy = script.find("bridge_store_clipboard").unwrap();
        let delete = script.find("execCommand('delete')").unwrap();
        assert!(copy < delete);
    }
}
