mod deletion;
mod error;
mod prompt;
mod report;
mod scanner;
mod size;
mod types;

use clap::Parser;
use colored::Colorize;
use prompt::LineReader;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Find the biggest files in the current or specified directory. \
             Optionally, offers to delete them.",
    long_about = None
)]
struct Args {
    /// Number of biggest files to display
    #[arg(long, short = 'n', default_value_t = 10)]
    number: usize,

    /// Directory to search
    #[arg(long, short = 'd', default_value = ".")]
    directory: PathBuf,

    /// Display file sizes in human-readable format (KB, MB, GB)
    #[arg(long, short = 'H')]
    human_readable: bool,

    /// Search recursively into subdirectories
    #[arg(long, short = 'r')]
    recursive: bool,

    /// After listing files, prompt for interactive deletion.
    /// USE WITH CAUTION. Confirmations are group-level.
    #[arg(long)]
    delete: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(&args, prompt::StdinReader::stdin(), &mut io::stdout()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            ExitCode::FAILURE
        }
    }
}

/// Scan, report, and optionally hand the list to the deletion workflow.
/// Returns the process exit status.
fn run(args: &Args, reader: impl LineReader, out: &mut impl Write) -> io::Result<u8> {
    let display_root = scanner::resolve_root(&args.directory)
        .unwrap_or_else(|e| e.path().to_path_buf());
    report::print_header(out, &display_root, args.number, args.recursive)?;

    let mut status = 0;
    let entries = match scanner::scan_largest(&args.directory, args.number, args.recursive) {
        Ok(result) => {
            for err in &result.errors {
                eprintln!("{}", err.to_string().red());
            }
            result.entries
        }
        Err(e) => {
            writeln!(out, "{} {e}", "Error:".red())?;
            status = 1;
            Vec::new()
        }
    };

    if entries.is_empty() {
        writeln!(out, "{}", report::no_files_line(&display_root, args.recursive))?;
        return Ok(status);
    }

    report::print_ranked_list(out, &entries, args.human_readable)?;

    if !args.delete {
        writeln!(out, "\nTo enable deletion, run again with the --delete flag.")?;
        return Ok(status);
    }

    let workflow = deletion::DeletionWorkflow::new(&entries, reader, deletion::FsRemover, &mut *out);
    match workflow.run() {
        Ok(outcome) => {
            log::info!(
                "deleted {} file(s), {} bytes freed",
                outcome.deleted_count,
                outcome.bytes_freed
            );
            Ok(status)
        }
        Err(e) => {
            eprintln!("\n{} {e}", "Aborting deletion:".red());
            Ok(1)
        }
    }
}
