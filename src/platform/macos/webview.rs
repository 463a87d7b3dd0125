use cocoa::base::{id, YES};
use objc::{msg_send, sel, sel_impl};

/// Turns on swipe back/forward navigation and pinch magnification.
///
/// # Safety
/// `webview` must point to a live `WKWebView` and be used on the main thread.
pub unsafe fn enable_gestures(webview: id) {
    let _: () = msg_send![webview, setAllowsBackForwardNavigationGestures: YES];
    let _: () = msg_send![webview, setAllowsMagnification: YES];
}
