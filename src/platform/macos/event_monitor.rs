//! `NSEvent` key-down monitors.
//!
//! A local monitor sees key events dispatched to this app and may swallow them
//! by returning `nil`. A global monitor sees key events bound for other apps
//! (only once accessibility access is granted) and cannot alter them.

use block::ConcreteBlock;
use cocoa::base::{id, nil};
use objc::{class, msg_send, sel, sel_impl};

use crate::shortcuts::key::ShortcutKey;

const NS_EVENT_MASK_KEY_DOWN: u64 = 1 << 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorScope {
    Local,
    Global,
}

/// A live monitor; removed from `NSEvent` when dropped.
pub struct EventMonitor {
    handle: id,
    scope: MonitorScope,
}

// Monitors are created and dropped on the main thread only; the handle is
// merely carried through state that Tauri requires to be `Send`.
unsafe impl Send for EventMonitor {}

unsafe fn key_event_parts(event: id) -> (u16, u64) {
    let key_code: u16 = msg_send![event, keyCode];
    let flags: u64 = msg_send![event, modifierFlags];
    (key_code, flags)
}

impl EventMonitor {
    /// Installs a key-down monitor that calls `on_match` when `chord` is pressed.
    ///
    /// Must be called on the main thread.
    pub fn install<F>(scope: MonitorScope, chord: ShortcutKey, on_match: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let handle: id = unsafe {
            match scope {
                MonitorScope::Local => {
                    let block = ConcreteBlock::new(move |event: id| -> id {
                        let (key_code, flags) = key_event_parts(event);
                        if chord.matches(key_code, flags) {
                            on_match();
                            nil
                        } else {
                            event
                        }
                    })
                    .copy();
                    msg_send![
                        class!(NSEvent),
                        addLocalMonitorForEventsMatchingMask: NS_EVENT_MASK_KEY_DOWN
                        handler: &*block
                    ]
                }
                MonitorScope::Global => {
                    let block = ConcreteBlock::new(move |event: id| {
                        let (key_code, flags) = key_event_parts(event);
                        if chord.matches(key_code, flags) {
                            on_match();
                        }
                    })
                    .copy();
                    msg_send![
                        class!(NSEvent),
                        addGlobalMonitorForEventsMatchingMask: NS_EVENT_MASK_KEY_DOWN
                        handler: &*block
                    ]
                }
            }
        };

        if handle == nil {
            return None;
        }
        unsafe {
            let _: id = msg_send![handle, retain];
        }
        log::debug!("Installed {:?} key monitor for {}", scope, chord);
        Some(Self { handle, scope })
    }
}

impl Drop for EventMonitor {
    fn drop(&mut self) {
        unsafe {
            let _: () = msg_send![class!(NSEvent), removeMonitor: self.handle];
            let _: () = msg_send![self.handle, release];
        }
        log::debug!("Removed {:?} key monitor", self.scope);
    }
}
