//! Line sources for the menu loop
//!
//! A terminal gets a `rustyline` editor with hints and history. Anything
//! else (pipes, redirected files, tests) reads plain lines.

use anyhow::Result;
use std::io::BufRead;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::Helper;

use super::menu::MenuChoice;

/// One read from the user
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Line(String),
    /// Ctrl+C
    Interrupted,
    /// Ctrl+D or end of piped input
    Eof,
}

/// Where the controller reads its answers from
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input>;

    /// Whether `read_line` draws the prompt itself. When false the
    /// controller prints it.
    fn shows_prompt(&self) -> bool {
        false
    }
}

/// Plain buffered lines, no editing
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderInput<R> {
    /// Bytes that are not valid UTF-8 become U+FFFD, so a garbled line is
    /// just an unrecognised answer.
    fn read_line(&mut self, _prompt: &str) -> Result<Input> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(Input::Eof);
        }
        let line = String::from_utf8_lossy(&buf);
        let trimmed = line.trim_end_matches(['\n', '\r']);
        Ok(Input::Line(trimmed.to_string()))
    }
}

/// Words offered on Tab at the sort prompts
const COMPLETION_WORDS: &[&str] = &["name", "age", "grade", "asc", "desc"];

/// Menu hints and sort-word completion
struct MenuHelper;

impl Completer for MenuHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let partial = line[..pos].to_lowercase();
        if partial.is_empty() {
            return Ok((pos, Vec::new()));
        }

        let matches = COMPLETION_WORDS
            .iter()
            .filter(|w| w.starts_with(&partial) && w.len() > partial.len())
            .map(|w| Pair {
                display: w.to_string(),
                replacement: w[partial.len()..].to_string(),
            })
            .collect();
        Ok((pos, matches))
    }
}

impl Hinter for MenuHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if line.is_empty() || pos < line.len() {
            return None;
        }
        MenuChoice::parse(line).map(|choice| format!("  {}", choice.label()))
    }
}

impl Validator for MenuHelper {
    fn validate(&self, _ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Highlighter for MenuHelper {}

impl Helper for MenuHelper {}

/// Interactive terminal input
pub struct EditorInput {
    editor: rustyline::Editor<MenuHelper, rustyline::history::DefaultHistory>,
}

impl EditorInput {
    pub fn new() -> Result<Self> {
        let config = rustyline::Config::builder()
            .completion_type(rustyline::CompletionType::List)
            .edit_mode(rustyline::EditMode::Emacs)
            .auto_add_history(false)
            .build();

        let mut editor = rustyline::Editor::with_config(config)?;
        editor.set_helper(Some(MenuHelper));
        Ok(Self { editor })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(err.into()),
        }
    }

    fn shows_prompt(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_input_strips_line_endings() {
        let mut input = ReaderInput::new(Cursor::new("1\r\n Alice \n"));
        assert_eq!(input.read_line("> ").unwrap(), Input::Line("1".into()));
        assert_eq!(input.read_line("> ").unwrap(), Input::Line(" Alice ".into()));
        assert_eq!(input.read_line("> ").unwrap(), Input::Eof);
    }

    #[test]
    fn test_reader_input_decodes_invalid_utf8_lossily() {
        let mut input = ReaderInput::new(Cursor::new(b"\xff\xfe\n8\n".to_vec()));
        assert_eq!(input.read_line("> ").unwrap(), Input::Line("\u{FFFD}\u{FFFD}".into()));
        assert_eq!(input.read_line("> ").unwrap(), Input::Line("8".into()));
    }

    #[test]
    fn test_reader_input_does_not_show_prompt() {
        let input = ReaderInput::new(Cursor::new(""));
        assert!(!input.shows_prompt());
    }

    #[test]
    fn test_hint_names_menu_entry() {
        let helper = MenuHelper;
        let history = rustyline::history::DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);
        assert_eq!(helper.hint("5", 1, &ctx), Some("  Delete Student".to_string()));
        assert_eq!(helper.hint("9", 1, &ctx), None);
    }

    #[test]
    fn test_complete_sort_words() {
        let helper = MenuHelper;
        let history = rustyline::history::DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);
        let (_, matches) = helper.complete("gr", 2, &ctx).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].replacement, "ade");

        let (_, matches) = helper.complete("a", 1, &ctx).unwrap();
        let shown: Vec<_> = matches.iter().map(|p| p.display.as_str()).collect();
        assert_eq!(shown, ["age", "asc"]);
    }
}
