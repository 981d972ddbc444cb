//! Interactive loop: read a command, dispatch it, print the result.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::config::Config;
use crate::controller::Action;
use crate::controller::action_dispatcher::{ActionDispatcher, Outcome};
use crate::error::SessionError;
use crate::fs::dir_scanner::EntrySort;
use crate::host::command_parser::{self, Command, HELP};
use crate::host::terminal::TerminalHost;
use crate::model::session::Session;
use crate::view::listing::Listing;

enum Flow {
    Continue,
    Quit,
}

pub struct Repl<R, W> {
    session: Session,
    host: TerminalHost<R, W>,
    sort: EntrySort,
    show_hidden: bool,
    date_format: String,
    /// Snapshot indices behind the row numbers of the last printed table.
    rows: Vec<usize>,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(session: Session, host: TerminalHost<R, W>, config: &Config) -> Self {
        Self {
            session,
            host,
            sort: EntrySort::default(),
            show_hidden: config.show_hidden,
            date_format: config.date_format.clone(),
            rows: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn host(&self) -> &TerminalHost<R, W> {
        &self.host
    }

    /// Runs until `quit` or end of input. Only terminal I/O errors end it
    /// early; session errors are printed and the loop goes on.
    pub fn run(&mut self) -> io::Result<()> {
        self.print_listing()?;

        loop {
            let prompt: String = format!("{}> ", self.session.location().display());
            let Some(line) = self.host.read_line(&prompt)? else {
                break;
            };

            if line.trim().is_empty() {
                continue;
            }

            let command: Command = match command_parser::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    self.host.say(format_args!("Error: {e}"))?;
                    continue;
                }
            };

            debug!(?command, "Command parsed");

            if let Flow::Quit = self.execute(command)? {
                break;
            }
        }

        info!("Session loop finished");
        Ok(())
    }

    fn execute(&mut self, command: Command) -> io::Result<Flow> {
        let action: Action = match command {
            Command::Quit => return Ok(Flow::Quit),

            Command::Help => {
                self.host.say(HELP)?;
                return Ok(Flow::Continue);
            }

            Command::List { json: false } => {
                self.print_listing()?;
                return Ok(Flow::Continue);
            }

            Command::List { json: true } => {
                self.print_json()?;
                return Ok(Flow::Continue);
            }

            Command::Sort(sort) => {
                self.sort = sort;
                self.print_listing()?;
                return Ok(Flow::Continue);
            }

            Command::ToggleHidden => {
                self.show_hidden = !self.show_hidden;
                self.print_listing()?;
                return Ok(Flow::Continue);
            }

            Command::ShowClipboard => {
                self.print_clipboard()?;
                return Ok(Flow::Continue);
            }

            Command::ChangeDir(path) => Action::Navigate(path),
            Command::Up => Action::GoParent,
            Command::Refresh => Action::Refresh,
            Command::Mkdir(name) => Action::CreateDirectory(name),
            Command::Paste => Action::Paste,

            Command::Open(row) => match self.row_index(row)? {
                Some(index) => Action::Activate(index),
                None => return Ok(Flow::Continue),
            },
            Command::Remove(row) => match self.row_index(row)? {
                Some(index) => Action::Delete(index),
                None => return Ok(Flow::Continue),
            },
            Command::Copy(row) => match self.row_index(row)? {
                Some(index) => Action::Copy(index),
                None => return Ok(Flow::Continue),
            },
            Command::Cut(row) => match self.row_index(row)? {
                Some(index) => Action::Cut(index),
                None => return Ok(Flow::Continue),
            },
            Command::Rename(row, new_name) => match self.row_index(row)? {
                Some(index) => Action::Rename { index, new_name },
                None => return Ok(Flow::Continue),
            },
        };

        let result = ActionDispatcher::new(&mut self.session, &mut self.host).dispatch(action);

        match result {
            Ok(outcome) => {
                let relist: bool = !matches!(
                    outcome,
                    Outcome::Opened { .. } | Outcome::Marked { .. } | Outcome::Cancelled | Outcome::AtRoot
                );

                if !matches!(outcome, Outcome::Navigated { .. }) {
                    self.host.say(&outcome)?;
                }
                if relist {
                    self.print_listing()?;
                }
            }
            Err(e) => self.host.say(format_args!("Error: {e}"))?,
        }

        Ok(Flow::Continue)
    }

    /// Snapshot index behind a 1-based row number; prints the error otherwise.
    fn row_index(&mut self, row: usize) -> io::Result<Option<usize>> {
        let index: Option<usize> = row.checked_sub(1).and_then(|r| self.rows.get(r)).copied();

        if index.is_none() {
            let err = SessionError::InvalidSelection {
                index: row,
                len: self.rows.len(),
            };
            self.host.say(format_args!("Error: {err}"))?;
        }

        Ok(index)
    }

    fn print_listing(&mut self) -> io::Result<()> {
        let listing = Listing::new(self.session.snapshot(), self.sort, self.show_hidden);
        let table: String = listing.render_table(&self.date_format);
        self.rows = listing.indices();

        self.host.write_raw(&table)
    }

    fn print_json(&mut self) -> io::Result<()> {
        let listing = Listing::new(self.session.snapshot(), self.sort, self.show_hidden);
        let json: String = listing.render_json().map_err(io::Error::other)?;

        self.host.say(json)
    }

    fn print_clipboard(&mut self) -> io::Result<()> {
        match self.session.clipboard().item() {
            Some(item) => self.host.say(format_args!(
                "{} {} ({} of {}, marked {}s ago)",
                item.operation_tag(),
                item.display_name(),
                item.operation,
                item.source().display(),
                item.marked_at.elapsed().as_secs()
            )),
            None => self.host.say("Clipboard is empty"),
        }
    }
}
