const COMMANDS: &[&str] = &[
    "get_configuration",
    "save_preferences",
    "set_open_at_startup",
    "is_launch_at_login_enabled",
    "get_shortcut_status",
    "begin_shortcut_recording",
    "record_shortcut_key",
    "cancel_shortcut_recording",
    "toggle_popover",
    "select_page",
    "open_preferences",
    "get_toolbar_state",
    "bridge_store_clipboard",
    "bridge_alert",
    "bridge_confirm",
    "bridge_prompt",
    "check_accessibility_permission",
];

fn main() {
    tauri_build::try_build(
        tauri_build::Attributes::new()
            .app_manifest(tauri_build::AppManifest::new().commands(COMMANDS)),
    )
    .expect("failed to run tauri-build");

    #[cfg(target_os = "macos")]
    {
        println!("cargo:rustc-link-lib=framework=AppKit");
        println!("cargo:rustc-link-lib=framework=ApplicationServices");
        println!("cargo:rustc-link-lib=framework=WebKit");
    }
}
