use crate::size::human_readable_size;
use crate::types::FileEntry;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Table};
use std::io;
use std::path::Path;

/// Width of the size column in the deletion listings.
const LISTING_SIZE_WIDTH: usize = 10;

pub fn print_header(
    out: &mut impl io::Write,
    root: &Path,
    top_n: usize,
    recursive: bool,
) -> io::Result<()> {
    writeln!(
        out,
        "Searching for top {} largest files in '{}'{}...",
        top_n,
        root.display(),
        if recursive { " recursively" } else { "" }
    )
}

#[must_use]
pub fn no_files_line(root: &Path, recursive: bool) -> String {
    format!(
        "No files found in '{}'{} or the directory is empty/inaccessible.",
        root.display(),
        if recursive { " or its subdirectories" } else { "" }
    )
}

fn size_column(size: u64, human_readable: bool) -> String {
    if human_readable {
        human_readable_size(size)
    } else {
        format!("{size} bytes")
    }
}

#[must_use]
pub fn ranked_table(entries: &[FileEntry], human_readable: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec![
        Cell::new("Size").add_attribute(Attribute::Bold),
        Cell::new("Path").add_attribute(Attribute::Bold),
    ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(size_column(entry.size, human_readable)),
            Cell::new(entry.path.display()),
        ]);
    }
    table
}

/// Totals cover the listed entries only, not everything the scan visited.
#[must_use]
pub fn total_line(entries: &[FileEntry]) -> String {
    let total: u64 = entries.iter().map(|e| e.size).sum();
    format!(
        "Total size of these {} listed files: {} ({} bytes)",
        entries.len(),
        human_readable_size(total),
        total
    )
}

pub fn print_ranked_list(
    out: &mut impl io::Write,
    entries: &[FileEntry],
    human_readable: bool,
) -> io::Result<()> {
    writeln!(
        out,
        "\n{}",
        format!("Top {} largest files found:", entries.len()).cyan()
    )?;
    writeln!(out, "{}", ranked_table(entries, human_readable))?;
    writeln!(out, "\n{}", total_line(entries).green())
}

/// Indexed listing shown when the deletion workflow starts.
#[must_use]
pub fn deletion_listing(entries: &[FileEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "  [{}] {:<width$} {}\n",
                i + 1,
                human_readable_size(entry.size),
                entry.path.display(),
                width = LISTING_SIZE_WIDTH
            )
        })
        .collect()
}

#[must_use]
pub fn selection_listing<'a>(entries: impl IntoIterator<Item = &'a FileEntry>) -> String {
    entries
        .into_iter()
        .map(|entry| {
            format!(
                "  {:<width$} {}\n",
                human_readable_size(entry.size),
                entry.path.display(),
                width = LISTING_SIZE_WIDTH
            )
        })
        .collect()
}
