pub mod bridge;
pub mod config;
pub mod error;
pub mod events;
pub mod platform;
pub mod popover;
pub mod preferences;
pub mod services;
pub mod shortcuts;
pub mod state;
pub mod tray;

use tauri::{Manager, RunEvent};
use tauri_plugin_autostart::MacosLauncher;

use config::manager::ConfigurationManager;
use config::store::JsonFileStore;
use state::app_state::{lock, AppState};

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

pub fn run() {
    init_logging();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .plugin(tauri_plugin_clipboard_manager::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_os::init())
        .plugin(tauri_plugin_autostart::init(MacosLauncher::LaunchAgent, None))
        .plugin(tauri_plugin_positioner::init())
        .setup(|app| {
            // Hide from dock: this is a menu bar app
            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            let store = JsonFileStore::default_location()?;
            log::info!("Preferences at {}", store.path().display());
            let config = ConfigurationManager::new(Box::new(store));
            let open_at_startup = config.open_at_startup();
            app.manage(AppState::new(app.handle(), config));

            tray::app_menu::install(app.handle())?;
            tray::menu::setup_tray(app.handle())?;
            popover::window::create(app.handle())?;
            shortcuts::register_from_config(app.handle());

            if open_at_startup {
                services::login_item::apply(app.handle(), true);
            }

            Ok(())
        })
        .on_menu_event(tray::handle_menu_event)
        .invoke_handler(tauri::generate_handler![
            config::commands::get_configuration,
            config::commands::save_preferences,
            config::commands::set_open_at_startup,
            services::login_item::commands::is_launch_at_login_enabled,
            services::permissions::commands::check_accessibility_permission,
            shortcuts::commands::get_shortcut_status,
            shortcuts::commands::begin_shortcut_recording,
            shortcuts::commands::record_shortcut_key,
            shortcuts::commands::cancel_shortcut_recording,
            popover::commands::toggle_popover,
            popover::commands::select_page,
            popover::commands::open_preferences,
            popover::commands::get_toolbar_state,
            bridge::commands::bridge_store_clipboard,
            bridge::commands::bridge_alert,
            bridge::commands::bridge_confirm,
            bridge::commands::bridge_prompt,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app, event| match event {
        // Closing the last window must not quit a menu bar app; only an
        // explicit exit carries a code.
        RunEvent::ExitRequested { code: None, api, .. } => api.prevent_exit(),
        RunEvent::Exit => {
            let state = app.state::<AppState>();
            lock(&state.shortcuts).unregister_all();
            if let Err(e) = lock(&state.config).save_configuration() {
                log::error!("Failed to save configuration on exit: {}", e);
            }
            log::info!("Montag exiting");
        }
        _ => {}
    });
}
