use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("'{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),
}

impl ScanError {
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::NotADirectory(path) => path,
        }
    }
}

#[derive(Error, Debug)]
pub enum StatCause {
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A single entry that could not be inspected during a scan.
#[derive(Error, Debug)]
#[error("Error accessing {}: {source}", path.display())]
pub struct StatError {
    pub path: PathBuf,
    #[source]
    pub source: StatCause,
}

#[derive(Error, Debug)]
#[error("Error deleting {}: {source}", path.display())]
pub struct DeleteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Malformed answer at a prompt. The message is shown before re-prompting.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input. Please enter 'yes' or 'no'.")]
    NotYesNo,

    #[error("Invalid choice. Please enter 'a', 's', or 'c'.")]
    UnknownMode,

    #[error("Invalid input '{0}'. Please enter space-separated numbers or 'done'.")]
    NotANumber(String),

    #[error("Error: Index {index} is out of range (1-{len}).")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("input stream closed before the deletion workflow finished")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_error_display() {
        let err = StatError {
            path: PathBuf::from("/data/dangling"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory").into(),
        };
        assert_eq!(
            err.to_string(),
            "Error accessing /data/dangling: No such file or directory"
        );
    }

    #[test]
    fn test_scan_error_keeps_path() {
        let err = ScanError::NotADirectory(PathBuf::from("/data/file.txt"));
        assert_eq!(err.path(), Path::new("/data/file.txt"));
        assert_eq!(err.to_string(), "'/data/file.txt' is not a directory.");
    }
}
