use serde::{Deserialize, Serialize};

use crate::shortcuts::key::ShortcutKey;

/// Number of pinned pages; a page's index is its identity.
pub const PAGE_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPage {
    pub title: String,
    pub url: String,
}

impl WebPage {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// The page URL, or `None` when it does not parse.
    pub fn parsed_url(&self) -> Option<tauri::Url> {
        tauri::Url::parse(self.url.trim()).ok()
    }
}

/// The whole persisted settings record. Saved wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub open_at_startup: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_shortcut: Option<ShortcutKey>,
    pub webpages: [WebPage; PAGE_COUNT],
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            open_at_startup: false,
            global_shortcut: Some(ShortcutKey::DEFAULT),
            webpages: [
                WebPage::new("Page 1", "https://example.com"),
                WebPage::new("Page 2", "https://example.org"),
                WebPage::new("Page 3", "https://example.net"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::key::ModifierMask;

    #[test]
    fn default_has_three_example_pages_and_command_p() {
        let config = Configuration::default();
        assert!(!config.open_at_startup);
        assert_eq!(config.global_shortcut, Some(ShortcutKey::DEFAULT));
        assert_eq!(config.webpages[0].url, "https://example.com");
        assert_eq!(config.webpages[2].title, "Page 3");
    }

    #[test]
    fn decodes_camel_case_blob() {
        let json = r#"{
            "openAtStartup": true,
            "globalShortcut": { "keyCode": 12, "modifiers": 1179648 },
            "webpages": [
                { "title": "Mail", "url": "https://mail.example.com" },
                { "title": "Docs", "url": "https://docs.example.com" },
                { "title": "Chat", "url": "https://chat.example.com" }
            ]
        }"#;
        let config: Configuration = serde_json::from_str(json).unwrap();

        assert!(config.open_at_startup);
        assert_eq!(
            config.global_shortcut,
            Some(ShortcutKey::new(12, ModifierMask::COMMAND | ModifierMask::SHIFT))
        );
        assert_eq!(config.webpages[1].title, "Docs");
    }

    #[test]
    fn missing_shortcut_means_none() {
        let json = r#"{
            "openAtStartup": false,
            "webpages": [
                { "title": "a", "url": "https://a.test" },
                { "title": "b", "url": "https://b.test" },
                { "title": "c", "url": "https://c.test" }
            ]
        }"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.global_shortcut, None);
    }

    #[test]
    fn page_count_other_than_three_is_rejected() {
        let json = r#"{
            "openAtStartup": false,
            "webpages": [ { "title": "only", "url": "https://only.test" } ]
        }"#;
        assert!(serde_json::from_str::<Configuration>(json).is_err());
    }

    #[test]
    fn unparseable_url_yields_none() {
        assert!(WebPage::new("bad", "not a url").parsed_url().is_none());
        assert!(WebPage::new("ok", " https://example.com ").parsed_url().is_some());
    }
}
