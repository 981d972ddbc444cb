use crate::error::{ClipError, ClipResult};
use crate::item::{ClipboardItem, ClipboardOperation};
use crate::operations::PasteOperation;
use std::path::{Path, PathBuf};

/// Single-slot clipboard.
///
/// `mark` overwrites whatever is held (last mark wins). A paste is planned
/// with [`Clipboard::plan_paste`], executed by the caller, and only then
/// committed with [`Clipboard::complete_paste`]. A failed paste simply never
/// calls `complete_paste`, so the item stays held for a retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Clipboard {
    #[default]
    Empty,
    Holding(ClipboardItem),
}

impl Clipboard {
    pub const fn new() -> Self {
        Self::Empty
    }

    /// Hold `path` for a future copy or move paste.
    pub fn mark(&mut self, path: PathBuf, operation: ClipboardOperation) -> ClipResult<()> {
        let item: ClipboardItem = ClipboardItem::new(path, operation)?;
        *self = Self::Holding(item);

        Ok(())
    }

    /// Compute the paste for `dest_dir` without changing state.
    pub fn plan_paste(&self, dest_dir: &Path) -> ClipResult<PasteOperation> {
        match self {
            Self::Empty => Err(ClipError::NothingToPaste),
            Self::Holding(item) => PasteOperation::new(item, dest_dir),
        }
    }

    /// Transition to `Empty` after `op` succeeded.
    ///
    /// Returns false (and keeps the current item) when the clipboard was
    /// re-marked with a different item in the meantime.
    pub fn complete_paste(&mut self, op: &PasteOperation) -> bool {
        let matches_held = matches!(
            self,
            Self::Holding(item)
                if item.source_path == op.source_path && item.operation == op.operation_type
        );

        if matches_held {
            *self = Self::Empty;
        }

        matches_held
    }

    pub fn item(&self) -> Option<&ClipboardItem> {
        match self {
            Self::Empty => None,
            Self::Holding(item) => Some(item),
        }
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.item().map(ClipboardItem::source)
    }

    pub fn operation(&self) -> Option<ClipboardOperation> {
        self.item().map(|item| item.operation)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
