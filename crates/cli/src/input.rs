//! Operator input.
//!
//! One command per line; blank lines are ignored and words are case-insensitive.

use std::path::PathBuf;

use pipedash_core::Action;
use pipedash_core::link::Command;
use thiserror::Error;

/// Help text printed for `help` and after a parse failure.
pub const USAGE: &str = "\
commands:
  advance | step    execute one cycle
  run               execute until the simulator halts
  reset             reinitialize the simulator
  load <path>       assemble and load a program file
  mem <line>        move the memory window to <line>
  refresh           redraw without sending a command
  help              show this text
  quit              exit";

/// A parsed operator line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Submit an action to the coordinator.
    Act(Action),
    /// Read a program file and submit a load command.
    Load(PathBuf),
    /// Print the command list.
    Help,
    /// Leave the session.
    Quit,
}

/// Why an operator line was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The first word is not a command.
    #[error("unknown command `{0}`")]
    Unknown(String),
    /// A command that takes an argument was given none.
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    /// The memory line is not a non-negative integer.
    #[error("invalid memory line `{0}`")]
    BadLine(String),
    /// A command that takes no arguments was given some.
    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),
}

/// Parses one operator line.
///
/// # Returns
///
/// `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the malformed line.
pub fn parse(line: &str) -> Result<Option<Directive>, ParseError> {
    let line = line.trim();
    let Some((word, rest)) = split_word(line) else {
        return Ok(None);
    };

    let bare = |name: &'static str, directive: Directive| {
        if rest.is_empty() {
            Ok(Some(directive))
        } else {
            Err(ParseError::UnexpectedArgument(name))
        }
    };

    match word.to_ascii_lowercase().as_str() {
        "advance" | "step" => bare("advance", Directive::Act(Command::Advance.into())),
        "run" => bare("run", Directive::Act(Command::Run.into())),
        "reset" => bare("reset", Directive::Act(Command::Reset.into())),
        "refresh" => bare("refresh", Directive::Act(Action::Refresh)),
        "help" | "?" => bare("help", Directive::Help),
        "quit" | "exit" => bare("quit", Directive::Quit),
        "load" if rest.is_empty() => Err(ParseError::MissingArgument("load")),
        "load" => Ok(Some(Directive::Load(PathBuf::from(rest)))),
        "mem" if rest.is_empty() => Err(ParseError::MissingArgument("mem")),
        "mem" => rest
            .parse::<u32>()
            .map(|n| Some(Directive::Act(Action::SetWindow(n))))
            .map_err(|_| ParseError::BadLine(rest.to_string())),
        _ => Err(ParseError::Unknown(word.to_string())),
    }
}

fn split_word(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    Some(
        line.split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim())),
    )
}
