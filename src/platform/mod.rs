//! Thin OS bindings that Tauri and its plugins do not cover.

#[cfg(target_os = "macos")]
pub mod macos;

/// Accessibility trust; platforms without a TCC equivalent are always trusted.
pub fn is_accessibility_trusted(prompt: bool) -> bool {
    #[cfg(target_os = "macos")]
    {
        macos::accessibility::is_process_trusted(prompt)
    }
    #[cfg(not(target_os = "macos"))]
    {
        let _ = prompt;
        true
    }
}

/// Swipe navigation and pinch zoom for a webview showing remote pages.
pub fn enable_navigation_gestures<R: tauri::Runtime>(webview: &tauri::Webview<R>) {
    #[cfg(target_os = "macos")]
    {
        let result = webview.with_webview(|platform| unsafe {
            macos::webview::enable_gestures(platform.inner() as cocoa::base::id);
        });
        if let Err(e) = result {
            log::warn!("Failed to enable navigation gestures: {}", e);
        }
    }
    #[cfg(not(target_os = "macos"))]
    {
        let _ = webview;
    }
}
