//! src/view/listing.rs
//!
//! Text and JSON renderings of a [`DirectorySnapshot`]. Rows are numbered
//! from 1 in display order; [`Listing::indices`] gives the snapshot index
//! behind each row.

use crate::fs::dir_scanner::{DirectorySnapshot, EntrySort};
use crate::fs::entry_record::DirectoryEntryRecord;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

const HEADER: [&str; 4] = ["Name", "Type", "Size", "Modified"];

/// One ordered, filtered view over a snapshot.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    snapshot: &'a DirectorySnapshot,
    rows: Vec<(usize, &'a DirectoryEntryRecord)>,
}

#[derive(Serialize)]
struct JsonListing<'a> {
    location: &'a Path,
    entries: Vec<&'a DirectoryEntryRecord>,
}

impl<'a> Listing<'a> {
    pub fn new(snapshot: &'a DirectorySnapshot, sort: EntrySort, show_hidden: bool) -> Self {
        let rows: Vec<(usize, &DirectoryEntryRecord)> = snapshot
            .sorted(sort)
            .into_iter()
            .filter(|(_, e)| show_hidden || !e.is_hidden())
            .collect();

        Self { snapshot, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Snapshot indices in display order.
    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|(i, _)| *i).collect()
    }

    /// Four-column table headed by the location.
    pub fn render_table(&self, date_format: &str) -> String {
        let cells: Vec<[String; 4]> = self
            .rows
            .iter()
            .map(|(_, e)| {
                [
                    e.name.to_string(),
                    e.type_label().to_string(),
                    e.size_human(),
                    e.format_modified(date_format),
                ]
            })
            .collect();

        let mut widths: [usize; 4] = HEADER.map(str::len);
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let number_width: usize = self.rows.len().max(1).to_string().len();
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.snapshot.location().display());
        let _ = writeln!(
            out,
            "{:>nw$}  {:<w0$}  {:<w1$}  {:>w2$}  {}",
            "#",
            HEADER[0],
            HEADER[1],
            HEADER[2],
            HEADER[3],
            nw = number_width,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );

        for (row, [name, kind, size, modified]) in cells.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>nw$}  {:<w0$}  {:<w1$}  {:>w2$}  {}",
                row + 1,
                name,
                kind,
                size,
                modified,
                nw = number_width,
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
            );
        }

        if self.rows.is_empty() {
            out.push_str("(empty)\n");
        }

        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&JsonListing {
            location: self.snapshot.location(),
            entries: self.rows.iter().map(|(_, e)| *e).collect(),
        })
    }
}
