//! Native panels for `alert`, `confirm` and `prompt` raised by remote pages.

use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

/// Replaces the page's dialog functions with calls into the bridge commands.
pub const DIALOG_SCRIPT: &str = include_str!("dialogs.js");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDialog {
    Alert {
        message: String,
    },
    Confirm {
        message: String,
    },
    /// The dialog plugin has no text field, so the default text is shown and
    /// accepting answers with it.
    Prompt {
        message: String,
        default_text: Option<String>,
    },
}

impl PageDialog {
    pub fn title(&self) -> &'static str {
        match self {
            PageDialog::Alert { .. } => "Alert",
            PageDialog::Confirm { .. } => "Confirm",
            PageDialog::Prompt { .. } => "Prompt",
        }
    }

    pub fn body(&self) -> String {
        match self {
            PageDialog::Alert { message } | PageDialog::Confirm { message } => message.clone(),
            PageDialog::Prompt {
                message,
                default_text: Some(text),
            } if !text.is_empty() => format!("{}\n\n{}", message, text),
            PageDialog::Prompt { message, .. } => message.clone(),
        }
    }

    fn buttons(&self) -> MessageDialogButtons {
        match self {
            PageDialog::Alert { .. } => MessageDialogButtons::Ok,
            _ => MessageDialogButtons::OkCancel,
        }
    }

    /// What `prompt()` resolves to: the default text when accepted (empty if
    /// none was given), `null` when cancelled.
    pub fn prompt_answer(&self, accepted: bool) -> Option<String> {
        match self {
            PageDialog::Prompt { default_text, .. } if accepted => {
                Some(default_text.clone().unwrap_or_default())
            }
            _ => None,
        }
    }

    /// Runs the panel modally. Must not be called on the main thread.
    pub fn run(&self, app: &AppHandle) -> bool {
        log::debug!("Page {} dialog", self.title());
        app.dialog()
            .message(self.body())
            .title(self.title())
            .kind(MessageDialogKind::Info)
            .buttons(self.buttons())
            .blocking_show()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(default_text: Option<&str>) -> PageDialog {
        PageDialog::Prompt {
            message: "Name?".into(),
            default_text: default_text.map(String::from),
        }
    }

    #[test]
    fn titles_follow_the_dialog_kind() {
        let alert = PageDialog::Alert { message: "Saved".into() };
        let confirm = PageDialog::Confirm { message: "Delete?".into() };
        assert_eq!(alert.title(), "Alert");
        assert_eq!(confirm.title(), "Confirm");
        assert_eq!(prompt(None).title(), "Prompt");
        assert_eq!(confirm.body(), "Delete?");
    }

    #[test]
    fn prompt_body_shows_the_default_text() {
        assert_eq!(prompt(Some("Ada")).body(), "Name?\n\nAda");
        assert_eq!(prompt(Some("")).body(), "Name?");
        assert_eq!(prompt(None).body(), "Name?");
    }

    #[test]
    fn prompt_answers_with_default_text_or_null() {
        assert_eq!(prompt(Some("Ada")).prompt_answer(true), Some("Ada".into()));
        assert_eq!(prompt(None).prompt_answer(true), Some(String::new()));
        assert_eq!(prompt(Some("Ada")).prompt_answer(false), None);
    }

    #[test]
    fn only_prompts_produce_text() {
        let confirm = PageDialog::Confirm { message: "Sure?".into() };
        assert_eq!(confirm.prompt_answer(true), None);
    }

    #[test]
    fn dialog_script_overrides_all_three_functions() {
        for name in ["window.alert", "window.confirm", "window.prompt"] {
            assert!(DIALOG_SCRIPT.contains(name), "{} not overridden", name);
        }
        for command in ["bridge_alert", "bridge_confirm", "bridge_prompt"] {
            assert!(DIALOG_SCRIPT.contains(command), "{} not invoked", command);
        }
    }
}
