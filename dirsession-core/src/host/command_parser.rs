//! Parse one line typed at the session prompt.
//!
//! Entry numbers are the 1-based row numbers of the last printed listing;
//! mapping them onto snapshot indices is the REPL's job.

use crate::fs::dir_scanner::EntrySort;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { json: bool },
    Sort(EntrySort),
    ToggleHidden,
    ChangeDir(PathBuf),
    Up,
    Open(usize),
    Mkdir(Option<String>),
    Rename(usize, Option<String>),
    Remove(usize),
    Copy(usize),
    Cut(usize),
    Paste,
    Refresh,
    ShowClipboard,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not an entry number")]
    BadNumber(String),

    #[error("{0}")]
    BadSort(String),
}

pub const HELP: &str = "\
Commands (N is a row number from the last listing):
  ls [--json]        list the current directory
  sort MODE          name|size|date, add _desc to reverse
  hidden             show or hide dotfiles
  cd PATH            go to PATH (relative, absolute, or ~)
  up                 go to the parent directory
  open N             enter a folder or open a file
  mkdir [NAME]       create a folder
  rename N [NAME]    rename an entry
  rm N               delete an entry (asks first)
  cp N / mv N        mark an entry for copy / move
  paste              paste the marked entry here
  refresh            re-read the directory
  clip               show the clipboard
  help               this text
  quit               leave";

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line: &str = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command: Command = match word {
        "" => return Err(ParseError::Empty),

        "ls" | "list" => match rest {
            "" => Command::List { json: false },
            "--json" | "-j" => Command::List { json: true },
            other => return Err(ParseError::UnknownCommand(format!("ls {other}"))),
        },

        "sort" => Command::Sort(required(rest, "sort", "a mode")?.parse().map_err(ParseError::BadSort)?),
        "hidden" => Command::ToggleHidden,

        // The rest of the line is the path, spaces included.
        "cd" => Command::ChangeDir(PathBuf::from(required(rest, "cd", "a path")?)),
        "up" | ".." => Command::Up,

        "open" => Command::Open(number(rest, "open")?),
        "mkdir" => Command::Mkdir(optional(rest)),

        "rename" | "ren" => {
            let (n, name) = match rest.split_once(char::is_whitespace) {
                Some((n, name)) => (n, optional(name.trim())),
                None => (rest, None),
            };
            Command::Rename(number(n, "rename")?, name)
        }

        "rm" | "del" => Command::Remove(number(rest, "rm")?),
        "cp" | "copy" => Command::Copy(number(rest, "cp")?),
        "mv" | "cut" => Command::Cut(number(rest, "mv")?),
        "paste" => Command::Paste,
        "refresh" => Command::Refresh,
        "clip" => Command::ShowClipboard,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,

        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(command)
}

fn required<'a>(rest: &'a str, command: &'static str, argument: &'static str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument { command, argument });
    }

    Ok(rest)
}

fn optional(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Row numbers start at 1.
fn number(rest: &str, command: &'static str) -> Result<usize, ParseError> {
    let raw: &str = required(rest, command, "an entry number")?;

    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::BadNumber(raw.to_string())),
    }
}
