use crate::error::{DeleteError, WorkflowError};
use crate::prompt::{self, DeleteMode, LineReader, Selection};
use crate::report;
use crate::size::human_readable_size;
use crate::types::{DeletionOutcome, FileEntry};
use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const PROCEED_PROMPT: &str = "Do you want to delete any of these files? (yes/no): ";
const MODE_PROMPT: &str = "Delete (a)ll listed, (s)elect specific files, or (c)ancel? (a/s/c): ";
const SELECT_PROMPT: &str = "Enter numbers of files to delete (e.g., 1 3 4) or 'done': ";

/// Removes a single file from disk.
pub trait FileRemover {
    fn remove(&mut self, path: &Path) -> io::Result<()>;
}

impl<T: FileRemover + ?Sized> FileRemover for &mut T {
    fn remove(&mut self, path: &Path) -> io::Result<()> {
        (**self).remove(path)
    }
}

pub struct FsRemover;

impl FileRemover for FsRemover {
    fn remove(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    AwaitProceed,
    AwaitMode,
    ConfirmAll,
    ExecuteAll,
    SelectIndices,
    ConfirmSelected(Vec<usize>),
    ExecuteSelected(Vec<usize>),
    Done,
}

/// Interactive deletion of a ranked file list. Every prompt re-asks until it
/// gets a usable answer; a confirmed batch runs to completion, reporting and
/// skipping each failed removal.
pub struct DeletionWorkflow<'a, R, D, W> {
    entries: &'a [FileEntry],
    reader: R,
    remover: D,
    out: W,
    outcome: DeletionOutcome,
    opted_in: bool,
}

impl<'a, R, D, W> DeletionWorkflow<'a, R, D, W>
where
    R: LineReader,
    D: FileRemover,
    W: Write,
{
    pub fn new(entries: &'a [FileEntry], reader: R, remover: D, out: W) -> Self {
        Self {
            entries,
            reader,
            remover,
            out,
            outcome: DeletionOutcome::default(),
            opted_in: false,
        }
    }

    /// Drive the workflow to completion and return what was actually removed.
    pub fn run(mut self) -> Result<DeletionOutcome, WorkflowError> {
        if self.entries.is_empty() {
            return Ok(self.outcome);
        }

        writeln!(self.out, "\n{}", "--- File Deletion ---".cyan())?;
        writeln!(self.out, "The following files were listed:")?;
        write!(self.out, "{}", report::deletion_listing(self.entries))?;

        let mut step = Step::AwaitProceed;
        while step != Step::Done {
            log::debug!("deletion step: {step:?}");
            step = match step {
                Step::AwaitProceed => self.await_proceed()?,
                Step::AwaitMode => self.await_mode()?,
                Step::ConfirmAll => self.confirm_all()?,
                Step::ExecuteAll => {
                    let all: Vec<usize> = (0..self.entries.len()).collect();
                    writeln!(self.out, "Proceeding to delete {} file(s)...", all.len())?;
                    self.execute(&all)?;
                    Step::Done
                }
                Step::SelectIndices => self.select_indices()?,
                Step::ConfirmSelected(indices) => self.confirm_selected(indices)?,
                Step::ExecuteSelected(indices) => {
                    writeln!(
                        self.out,
                        "Proceeding to delete {} selected file(s)...",
                        indices.len()
                    )?;
                    self.execute(&indices)?;
                    Step::Done
                }
                Step::Done => Step::Done,
            };
        }

        self.finish()
    }

    fn await_proceed(&mut self) -> Result<Step, WorkflowError> {
        if self.ask_yes_no(PROCEED_PROMPT)? {
            self.opted_in = true;
            Ok(Step::AwaitMode)
        } else {
            writeln!(self.out, "No files will be deleted.")?;
            Ok(Step::Done)
        }
    }

    fn await_mode(&mut self) -> Result<Step, WorkflowError> {
        loop {
            let answer = prompt::ask(&mut self.reader, MODE_PROMPT)?;
            match prompt::parse_mode(&answer) {
                Ok(DeleteMode::Cancel) => {
                    writeln!(self.out, "Deletion cancelled.")?;
                    return Ok(Step::Done);
                }
                Ok(DeleteMode::All) => return Ok(Step::ConfirmAll),
                Ok(DeleteMode::Select) => return Ok(Step::SelectIndices),
                Err(e) => writeln!(self.out, "{}", e.to_string().yellow())?,
            }
        }
    }

    fn confirm_all(&mut self) -> Result<Step, WorkflowError> {
        let question = format!(
            "Are you sure you want to attempt to delete ALL {} listed files? \
             This action will proceed without individual file confirmations. (yes/no): ",
            self.entries.len()
        );
        if self.ask_yes_no(&question)? {
            Ok(Step::ExecuteAll)
        } else {
            writeln!(self.out, "Deletion of all files cancelled.")?;
            Ok(Step::AwaitMode)
        }
    }

    fn select_indices(&mut self) -> Result<Step, WorkflowError> {
        loop {
            let answer = prompt::ask(&mut self.reader, SELECT_PROMPT)?;
            match prompt::parse_selection(&answer, self.entries.len()) {
                Ok(Selection::Finished) => {
                    writeln!(self.out, "No files selected for deletion.")?;
                    return Ok(Step::Done);
                }
                Ok(Selection::Indices(indices)) if indices.is_empty() => {
                    writeln!(self.out, "No valid files selected.")?;
                    return Ok(Step::AwaitMode);
                }
                Ok(Selection::Indices(indices)) => return Ok(Step::ConfirmSelected(indices)),
                Err(e) => writeln!(self.out, "{}", e.to_string().yellow())?,
            }
        }
    }

    fn confirm_selected(&mut self, indices: Vec<usize>) -> Result<Step, WorkflowError> {
        let entries = self.entries;
        let listing = report::selection_listing(indices.iter().map(|&i| &entries[i]));
        writeln!(self.out, "\nSelected files for deletion:")?;
        write!(self.out, "{listing}")?;

        let question = format!(
            "Confirm deletion of these {} selected files? \
             This action will proceed without individual file confirmations. (yes/no): ",
            indices.len()
        );
        if self.ask_yes_no(&question)? {
            Ok(Step::ExecuteSelected(indices))
        } else {
            writeln!(self.out, "Deletion of selected files cancelled.")?;
            Ok(Step::Done)
        }
    }

    fn ask_yes_no(&mut self, question: &str) -> Result<bool, WorkflowError> {
        loop {
            let answer = prompt::ask(&mut self.reader, question)?;
            match prompt::parse_yes_no(&answer) {
                Ok(yes) => return Ok(yes),
                Err(e) => writeln!(self.out, "{}", e.to_string().yellow())?,
            }
        }
    }

    /// Remove each indexed entry in order. A failure is reported and the
    /// batch moves on.
    fn execute(&mut self, indices: &[usize]) -> Result<(), WorkflowError> {
        let entries = self.entries;
        for entry in indices.iter().map(|&i| &entries[i]) {
            match self.remover.remove(&entry.path) {
                Ok(()) => {
                    self.outcome.record(entry);
                    writeln!(self.out, "{} {}", "Deleted:".green(), entry.path.display())?;
                }
                Err(source) => {
                    let err = DeleteError {
                        path: entry.path.clone(),
                        source,
                    };
                    log::warn!("{err}");
                    writeln!(self.out, "{}", err.to_string().red())?;
                }
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<DeletionOutcome, WorkflowError> {
        if self.outcome.deleted_count > 0 {
            writeln!(
                self.out,
                "\n{}",
                format!(
                    "Summary: Successfully deleted {} file(s), freeing {}.",
                    self.outcome.deleted_count,
                    human_readable_size(self.outcome.bytes_freed)
                )
                .green()
            )?;
        } else if self.opted_in {
            writeln!(self.out, "\nNo files were ultimately deleted in this session.")?;
        }
        self.out.flush()?;
        Ok(self.outcome)
    }
}
