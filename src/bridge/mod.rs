//! Clipboard, keyboard and dialog bridging into remote pages.

pub mod commands;
pub mod dialogs;
pub mod edit;
pub mod scripts;
