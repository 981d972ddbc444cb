//! Directory session engine: browse one directory at a time and create,
//! rename, delete, copy and move its entries, with a single-slot clipboard.

pub mod error;
pub use error::{SessionError, SessionResult};

pub mod config;

pub mod logging;
pub use logging::Logger;

pub mod fs {
    pub mod entry_record;
    pub use entry_record::{DirectoryEntryRecord, EntryKind};

    pub mod dir_scanner;
    pub use dir_scanner::{DirectorySnapshot, EntrySort};
}

pub mod operators {
    pub mod file_system_operator;
    pub use file_system_operator::{FileSystemOperation, FileSystemOperator, OperationReport};
}

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod action_dispatcher;
    pub use action_dispatcher::{ActionDispatcher, Outcome};

    pub mod navigation;

    pub mod traits;
    pub use traits::{Host, PromptKind};
}

pub mod model {
    pub mod session;
    pub use session::Session;
}

pub mod view {
    pub mod listing;
    pub use listing::Listing;
}

pub mod host {
    pub mod command_parser;

    pub mod launcher;
    pub use launcher::Launcher;

    pub mod repl;
    pub use repl::Repl;

    pub mod terminal;
    pub use terminal::TerminalHost;
}

pub use model::Session;
