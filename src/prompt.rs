use crate::error::{InputError, WorkflowError};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

/// Source of interactive answers. `Ok(None)` means the input is exhausted.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

impl<T: LineReader + ?Sized> LineReader for &mut T {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }
}

/// Console reader: prints the prompt on stdout and blocks on `input`.
/// Bytes that are not UTF-8 are replaced rather than rejected, so a garbled
/// answer is re-prompted like any other unrecognised one.
pub struct StdinReader<B> {
    input: B,
}

impl StdinReader<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<B: BufRead> StdinReader<B> {
    pub fn new(input: B) -> Self {
        Self { input }
    }
}

impl<B: BufRead> LineReader for StdinReader<B> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Read one answer, treating end of input as fatal for the workflow.
pub fn ask(reader: &mut impl LineReader, prompt: &str) -> Result<String, WorkflowError> {
    reader
        .read_line(prompt)?
        .map(|line| line.trim().to_string())
        .ok_or(WorkflowError::InputClosed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    All,
    Select,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The `done` sentinel: leave without choosing anything.
    Finished,
    /// Zero-based indices, unique and ascending. Empty when the line was blank.
    Indices(Vec<usize>),
}

pub fn parse_yes_no(answer: &str) -> Result<bool, InputError> {
    match answer.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}

pub fn parse_mode(answer: &str) -> Result<DeleteMode, InputError> {
    match answer.trim().to_lowercase().as_str() {
        "a" => Ok(DeleteMode::All),
        "s" => Ok(DeleteMode::Select),
        "c" => Ok(DeleteMode::Cancel),
        _ => Err(InputError::UnknownMode),
    }
}

/// Parse a whitespace-separated list of 1-based indices against a list of
/// `len` entries. The whole line is rejected on the first bad token; nothing
/// is partially applied.
pub fn parse_selection(answer: &str, len: usize) -> Result<Selection, InputError> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("done") {
        return Ok(Selection::Finished);
    }

    let numbers = answer
        .split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| InputError::NotANumber(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(&index) = numbers.iter().find(|&&i| i == 0 || i > len) {
        return Err(InputError::OutOfRange { index, len });
    }

    let unique: BTreeSet<usize> = numbers.into_iter().map(|i| i - 1).collect();
    Ok(Selection::Indices(unique.into_iter().collect()))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::LineReader;
    use std::collections::VecDeque;
    use std::io;

    /// Replays canned answers and records every prompt it was asked.
    pub struct ScriptedReader {
        answers: VecDeque<String>,
        pub prompts: Vec<String>,
    }

    impl ScriptedReader {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| format!("{a}\n")).collect(),
                prompts: Vec::new(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }
    }

    impl LineReader for ScriptedReader {
        fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.answers.pop_front())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedReader;
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_yes_no_accepts_short_forms_and_case() {
        assert_eq!(parse_yes_no("y"), Ok(true));
        assert_eq!(parse_yes_no(" YES "), Ok(true));
        assert_eq!(parse_yes_no("n"), Ok(false));
        assert_eq!(parse_yes_no("No"), Ok(false));
        assert_eq!(parse_yes_no("maybe"), Err(InputError::NotYesNo));
        assert_eq!(parse_yes_no(""), Err(InputError::NotYesNo));
    }

    #[test]
    fn test_mode_letters() {
        assert_eq!(parse_mode("a"), Ok(DeleteMode::All));
        assert_eq!(parse_mode("S"), Ok(DeleteMode::Select));
        assert_eq!(parse_mode("c"), Ok(DeleteMode::Cancel));
        assert_eq!(parse_mode("all"), Err(InputError::UnknownMode));
    }

    #[test]
    fn test_selection_dedups_and_sorts() {
        assert_eq!(
            parse_selection("2 2 5", 5),
            Ok(Selection::Indices(vec![1, 4]))
        );
        assert_eq!(
            parse_selection("  4 1\t3 ", 5),
            Ok(Selection::Indices(vec![0, 2, 3]))
        );
    }

    #[test]
    fn test_selection_rejects_whole_line() {
        assert_eq!(
            parse_selection("1 9", 5),
            Err(InputError::OutOfRange { index: 9, len: 5 })
        );
        assert_eq!(
            parse_selection("0", 5),
            Err(InputError::OutOfRange { index: 0, len: 5 })
        );
        assert_eq!(
            parse_selection("1 two 3", 5),
            Err(InputError::NotANumber("two".to_string()))
        );
        assert_eq!(
            parse_selection("-1", 5),
            Err(InputError::NotANumber("-1".to_string()))
        );
    }

    #[test]
    fn test_selection_sentinel_and_blank() {
        assert_eq!(parse_selection("DONE", 3), Ok(Selection::Finished));
        assert_eq!(parse_selection("   ", 3), Ok(Selection::Indices(vec![])));
    }

    #[test]
    fn test_out_of_range_message() {
        let err = InputError::OutOfRange { index: 9, len: 5 };
        assert_eq!(err.to_string(), "Error: Index 9 is out of range (1-5).");
    }

    #[test]
    fn test_ask_trims_and_fails_on_eof() {
        let mut reader = ScriptedReader::new(&["  yes  "]);
        assert_eq!(ask(&mut reader, "? ").unwrap(), "yes");
        assert!(matches!(ask(&mut reader, "? "), Err(WorkflowError::InputClosed)));
        assert_eq!(reader.prompts, vec!["? ", "? "]);
    }

    #[test]
    fn test_console_reader_replaces_invalid_utf8() {
        let mut reader = StdinReader::new(Cursor::new(b"\xff\xfe\nn\n".to_vec()));

        let garbled = ask(&mut reader, "? ").unwrap();
        assert!(garbled.contains('\u{FFFD}'));
        assert_eq!(parse_yes_no(&garbled), Err(InputError::NotYesNo));

        assert_eq!(ask(&mut reader, "? ").unwrap(), "n");
        assert!(matches!(ask(&mut reader, "? "), Err(WorkflowError::InputClosed)));
    }
}
