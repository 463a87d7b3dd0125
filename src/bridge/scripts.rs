//! Scripts evaluated inside the page webview.

/// Injected at document start of every page load.
pub const KEYBOARD_SCRIPT: &str = include_str!("keyboard.js");

/// Focuses the first visible, enabled, writable text field.
pub const FOCUS_FIRST_INPUT: &str = r#"(function () {
  var inputs = document.querySelectorAll('input[type="text"], input[type="search"], input[type="email"], input[type="url"], input[type="tel"], input[type="number"], input:not([type]), textarea');
  for (var i = 0; i < inputs.length; i++) {
    var input = inputs[i];
    if (input.offsetParent !== null && !input.disabled && !input.readOnly) {
      input.focus();
      return true;
    }
  }
  return false;
})();"#;

pub const SILENCE_BEEP: &str = "if (window.silenceBeep) { window.silenceBeep(); }";

/// Hands the current selection to `bridge_store_clipboard`.
pub const COPY_SELECTION: &str = r#"(function () {
  var el = document.activeElement;
  var text = '';
  if (el && (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA')) {
    text = el.value.substring(el.selectionStart, el.selectionEnd);
  } else if (window.getSelection) {
    text = window.getSelection().toString();
  }
  if (text && window.__TAURI_INTERNALS__) {
    window.__TAURI_INTERNALS__.invoke('bridge_store_clipboard', { text: text });
  }
})();"#;

pub const DELETE_SELECTION: &str = r#"(function () {
  var el = document.activeElement;
  if (el && (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA')) {
    var start = el.selectionStart;
    var value = el.value;
    el.value = value.substring(0, start) + value.substring(el.selectionEnd);
    el.selectionStart = el.selectionEnd = start;
    el.dispatchEvent(new Event('input', { bubbles: true }));
  } else {
    document.execCommand('delete');
  }
})();"#;

pub const SELECT_ALL: &str = r#"(function () {
  var el = document.activeElement;
  if (el && el.select) {
    el.select();
  } else {
    window.getSelection().selectAllChildren(el || document.body);
  }
})();"#;

pub const UNDO: &str = "document.execCommand('undo');";
pub const REDO: &str = "document.execCommand('redo');";

/// Escapes `text` for use inside a single- or double-quoted JS literal.
pub fn escape_js_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Inserts `text` at the caret of the focused field, falling back to
/// `insertText` and finally the browser's own paste.
pub fn paste_script(text: &str) -> String {
    format!(
        r#"(function () {{
  var text = "{}";
  var el = document.activeElement;
  if (el && (el.tagName === 'INPUT' || el.tagName === 'TEXTAREA')) {{
    var start = el.selectionStart;
    var value = el.value;
    el.value = value.substring(0, start) + text + value.substring(el.selectionEnd);
    el.selectionStart = el.selectionEnd = start + text.length;
    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
  }} else if (document.queryCommandSupported('insertText')) {{
    document.execCommand('insertText', false, text);
  }} else {{
    document.execCommand('paste');
  }}
}})();"#,
        escape_js_string(text)
    )
}
