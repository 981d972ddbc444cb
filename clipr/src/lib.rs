//! # clipr - Single-Slot Clipboard for File Managers
//!
//! Holds at most one pending source path together with a copy/move mode.
//! Paste is split into planning (pure) and completion (state transition), so
//! the caller decides whether the filesystem work succeeded before the
//! clipboard is cleared.
//!
//! ## Key Features
//! - Last-mark-wins single slot
//! - Paste planning that computes `destination / basename(source)`
//! - Failed pastes keep the item for a retry

pub mod clipboard;
pub mod error;
pub mod item;
pub mod operations;

// Re-export main types for easy use
pub use clipboard::Clipboard;
pub use error::{ClipError, ClipResult};
pub use item::{ClipboardItem, ClipboardOperation};
pub use operations::{FileOperation, PasteOperation};
