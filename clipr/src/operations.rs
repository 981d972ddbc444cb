use crate::error::{ClipError, ClipResult};
use crate::item::{ClipboardItem, ClipboardOperation};
use std::path::{Path, PathBuf};

/// A planned paste: where the held item goes and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOperation {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub operation_type: ClipboardOperation,
    pub file_operation: FileOperation,
}

impl PasteOperation {
    pub fn new(item: &ClipboardItem, dest_dir: &Path) -> ClipResult<Self> {
        let file_name = item
            .source_path
            .file_name()
            .ok_or_else(|| ClipError::invalid_path(&item.source_path))?;

        let destination_path = dest_dir.join(file_name);

        let file_operation = match item.operation {
            ClipboardOperation::Copy => FileOperation::Copy {
                source: item.source_path.clone(),
                dest: destination_path.clone(),
            },
            ClipboardOperation::Move => FileOperation::Move {
                source: item.source_path.clone(),
                dest: destination_path.clone(),
            },
        };

        Ok(Self {
            source_path: item.source_path.clone(),
            destination_path,
            operation_type: item.operation,
            file_operation,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    Copy { source: PathBuf, dest: PathBuf },
    Move { source: PathBuf, dest: PathBuf },
}

impl FileOperation {
    pub fn source_path(&self) -> &Path {
        match self {
            FileOperation::Copy { source, .. } | FileOperation::Move { source, .. } => source,
        }
    }

    pub fn dest_path(&self) -> &Path {
        match self {
            FileOperation::Copy { dest, .. } | FileOperation::Move { dest, .. } => dest,
        }
    }

    pub fn operation_name(&self) -> &'static str {
        match self {
            FileOperation::Copy { .. } => "Copy",
            FileOperation::Move { .. } => "Move",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_is_dest_dir_plus_basename() {
        let item = ClipboardItem::new(PathBuf::from("/tmp/src/report.pdf"), ClipboardOperation::Move).unwrap();
        let op = PasteOperation::new(&item, Path::new("/srv/archive")).unwrap();

        assert_eq!(op.destination_path, PathBuf::from("/srv/archive/report.pdf"));
        assert_eq!(op.file_operation.operation_name(), "Move");
        assert_eq!(op.file_operation.source_path(), Path::new("/tmp/src/report.pdf"));
        assert_eq!(op.file_operation.dest_path(), op.destination_path.as_path());
    }
}
