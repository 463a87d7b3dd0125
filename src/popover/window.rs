use std::time::{Duration, Instant};

use tauri::webview::{NewWindowResponse, PageLoadEvent, WebviewBuilder};
use tauri::window::WindowBuilder;
use tauri::{AppHandle, Emitter, LogicalPosition, LogicalSize, Manager, WebviewUrl, Window, WindowEvent};
use tauri_plugin_positioner::{Position, WindowExt};
use tauri_plugin_shell::ShellExt;

use super::state::PopoverTransition;
use crate::bridge::dialogs::DIALOG_SCRIPT;
use crate::bridge::scripts::{FOCUS_FIRST_INPUT, KEYBOARD_SCRIPT};
use crate::config::model::{WebPage, PAGE_COUNT};
use crate::error::AppError;
use crate::events;
use crate::state::app_state::{lock, AppState};

pub const POPOVER_LABEL: &str = "popover";
pub const PAGE_LABEL: &str = "page";
pub const TOOLBAR_LABEL: &str = "toolbar";

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 880.0;
const TOOLBAR_HEIGHT: f64 = 38.0;

/// Lets the page finish rendering before focus is moved into it.
const FOCUS_DELAY: Duration = Duration::from_millis(300);

/// Safari-compatible user agent carrying the host OS version.
pub fn user_agent(os_version: &str) -> String {
    format!(
        "Montag/1.0 Mozilla/5.0 (Macintosh; Intel Mac OS X {}) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/15.0 Safari/605.1.15",
        os_version.replace('.', "_")
    )
}

/// Where a link asking for a new window or tab ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewWindowRoute {
    /// Web links replace the current page.
    SamePage(tauri::Url),
    /// Mail and phone links go to the system handler.
    External(tauri::Url),
}

pub fn route_new_window(url: tauri::Url) -> Option<NewWindowRoute> {
    match url.scheme() {
        "http" | "https" => Some(NewWindowRoute::SamePage(url)),
        "mailto" | "tel" => Some(NewWindowRoute::External(url)),
        _ => None,
    }
}

fn open_new_window_request(app: &AppHandle, url: tauri::Url) {
    match route_new_window(url.clone()) {
        Some(NewWindowRoute::SamePage(url)) => {
            let result = app
                .get_webview(PAGE_LABEL)
                .ok_or_else(|| AppError::Window("Page webview not found".into()))
                .and_then(|page| page.navigate(url).map_err(AppError::from));
            if let Err(e) = result {
                log::error!("Failed to open link in page: {}", e);
            }
        }
        Some(NewWindowRoute::External(url)) => {
            #[allow(deprecated)]
            if let Err(e) = app.shell().open(url.as_str(), None) {
                log::error!("Failed to open {}: {}", url, e);
            }
        }
        None => log::debug!("Ignoring new window for {}", url),
    }
}

fn popover_window(app: &AppHandle) -> Result<Window, AppError> {
    app.get_window(POPOVER_LABEL)
        .ok_or_else(|| AppError::Window("Popover window not found".into()))
}

/// Builds the hidden popover window with its toolbar and page webviews.
pub fn create(app: &AppHandle) -> Result<(), AppError> {
    let state = app.state::<AppState>();
    let configured = {
        let config = lock(&state.config);
        let index = lock(&state.popover).selected_page();
        config.webpage(index).and_then(WebPage::parsed_url)
    };
    let initial_url = match configured {
        Some(url) => url,
        None => tauri::Url::parse("about:blank").map_err(|e| AppError::Window(e.to_string()))?,
    };

    let window = WindowBuilder::new(app, POPOVER_LABEL)
        .title("Montag")
        .inner_size(WIDTH, HEIGHT)
        .resizable(false)
        .decorations(false)
        .always_on_top(true)
        .skip_taskbar(true)
        .visible(false)
        .build()?;

    window.add_child(
        WebviewBuilder::new(TOOLBAR_LABEL, WebviewUrl::App("toolbar.html".into())),
        LogicalPosition::new(0.0, 0.0),
        LogicalSize::new(WIDTH, TOOLBAR_HEIGHT),
    )?;

    let ua = user_agent(&tauri_plugin_os::version().to_string());
    let links = app.clone();
    let page = window.add_child(
        WebviewBuilder::new(PAGE_LABEL, WebviewUrl::External(initial_url))
            .initialization_script(KEYBOARD_SCRIPT)
            .initialization_script(DIALOG_SCRIPT)
            .user_agent(&ua)
            .on_new_window(move |url, _features| {
                open_new_window_request(&links, url);
                NewWindowResponse::Deny
            })
            .on_page_load(|webview, payload| {
                if payload.event() == PageLoadEvent::Finished {
                    log::debug!("Loaded {}", payload.url());
                    if let Err(e) = webview.eval(FOCUS_FIRST_INPUT) {
                        log::warn!("Failed to focus first input: {}", e);
                    }
                }
            }),
        LogicalPosition::new(0.0, TOOLBAR_HEIGHT),
        LogicalSize::new(WIDTH, HEIGHT - TOOLBAR_HEIGHT),
    )?;
    crate::platform::enable_navigation_gestures(&page);

    let handle = app.clone();
    window.on_window_event(move |event| {
        if let WindowEvent::Focused(false) = event {
            dismiss(&handle);
        }
    });

    log::info!("Popover window created");
    Ok(())
}

/// Transient behaviour: losing focus closes the popover.
fn dismiss(app: &AppHandle) {
    let state = app.state::<AppState>();
    if !lock(&state.popover).dismiss(Instant::now()) {
        return;
    }
    if let Ok(window) = popover_window(app) {
        if let Err(e) = window.hide() {
            log::error!("Failed to hide popover: {}", e);
        }
    }
}

fn show(app: &AppHandle) -> Result<(), AppError> {
    let window = popover_window(app)?;
    if let Err(e) = window.move_window(Position::TrayCenter) {
        log::debug!("Tray position unknown ({}), anchoring top right", e);
        if let Err(e) = window.move_window(Position::TopRight) {
            log::warn!("Failed to position popover: {}", e);
        }
    }
    window.show()?;
    window.set_focus()?;
    schedule_focus_first_input(app);
    Ok(())
}

fn hide(app: &AppHandle) -> Result<(), AppError> {
    popover_window(app)?.hide()?;
    Ok(())
}

fn apply(app: &AppHandle, transition: PopoverTransition) -> Result<(), AppError> {
    match transition {
        PopoverTransition::Show => show(app),
        PopoverTransition::Hide => hide(app),
    }
}

/// Shows the popover if hidden, hides it otherwise.
pub fn toggle(app: &AppHandle) -> Result<(), AppError> {
    let transition = lock(&app.state::<AppState>().popover).toggle();
    log::debug!("Popover {:?}", transition);
    apply(app, transition)
}

/// Tray clicks first blur the popover; that click must not reopen it.
pub fn toggle_from_tray(app: &AppHandle) -> Result<(), AppError> {
    let state = app.state::<AppState>();
    if lock(&state.popover).take_recent_dismissal(Instant::now()) {
        log::debug!("Ignoring tray click that dismissed the popover");
        return Ok(());
    }
    toggle(app)
}

/// Opens the popover if it is hidden.
pub fn reveal(app: &AppHandle) -> Result<(), AppError> {
    let state = app.state::<AppState>();
    let transition = {
        let mut popover = lock(&state.popover);
        if popover.is_shown() {
            return Ok(());
        }
        popover.toggle()
    };
    apply(app, transition)
}

fn schedule_focus_first_input(app: &AppHandle) {
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(FOCUS_DELAY).await;
        if let Some(page) = app.get_webview(PAGE_LABEL) {
            if let Err(e) = page.eval(FOCUS_FIRST_INPUT) {
                log::warn!("Failed to focus first input: {}", e);
            }
        }
    });
}

fn load_page(app: &AppHandle, page: &WebPage) -> Result<(), AppError> {
    let Some(url) = page.parsed_url() else {
        log::warn!("Not loading '{}': invalid URL '{}'", page.title, page.url);
        return Ok(());
    };
    let webview = app
        .get_webview(PAGE_LABEL)
        .ok_or_else(|| AppError::Window("Page webview not found".into()))?;
    log::info!("Loading {}", url);
    webview.navigate(url)?;
    Ok(())
}

/// Switches the page webview to the configured page at `index`.
/// Out-of-range indices are ignored.
pub fn select_page(app: &AppHandle, index: usize) -> Result<(), AppError> {
    let state = app.state::<AppState>();
    if !lock(&state.popover).select_page(index, PAGE_COUNT) {
        log::debug!("Ignoring selection of page {}", index);
        return Ok(());
    }
    let page = lock(&state.config).webpage(index).cloned();
    if let Some(page) = page {
        load_page(app, &page)?;
    }
    app.emit(events::PAGE_SELECTED, index)?;
    Ok(())
}

/// Reloads the selected page after the page list was saved.
pub fn reload_selected(app: &AppHandle) -> Result<(), AppError> {
    let index = lock(&app.state::<AppState>().popover).selected_page();
    select_page(app, index)
}
