pub mod accessibility;
pub mod event_monitor;
pub mod webview;
