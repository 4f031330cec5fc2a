//! Line-oriented commands standing in for mouse clicks and redraws.
//!
//! One command per line:
//! - `insert X Y` (left click)
//! - `remove X Y` (right click)
//! - `draw [PATH]`, `dump`, `scatter N [SEED]`, `clear`, `stats`

use quadtree::Point;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing a command line.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument `{arg}` for {command}")]
    MissingArgument { command: &'static str, arg: &'static str },

    #[error("Invalid number for `{arg}`: {value}")]
    InvalidNumber { arg: &'static str, value: String },

    #[error("Unexpected trailing input: {0}")]
    Trailing(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert(Point),
    Remove(Point),
    /// Write an SVG, to the configured output unless a path is given.
    Draw(Option<PathBuf>),
    Dump,
    Scatter { count: usize, seed: Option<u64> },
    Clear,
    Stats,
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.split('#').next().unwrap_or_default().trim();
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "insert" | "i" => Command::Insert(point_args("insert", &mut words)?),
            "remove" | "r" => Command::Remove(point_args("remove", &mut words)?),
            "draw" => Command::Draw(words.next().map(PathBuf::from)),
            "dump" => Command::Dump,
            "scatter" => {
                let count = number("scatter", "N", words.next())?;
                let seed = words.next().map(|s| parse_num("SEED", s)).transpose()?;
                Command::Scatter { count, seed }
            }
            "clear" => Command::Clear,
            "stats" => Command::Stats,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(CommandError::Trailing(rest.join(" ")));
        }
        Ok(Some(command))
    }
}

fn point_args<'a>(
    command: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Point, CommandError> {
    let x = number(command, "X", words.next())?;
    let y = number(command, "Y", words.next())?;
    Ok(Point::new(x, y))
}

fn number<T: std::str::FromStr>(
    command: &'static str,
    arg: &'static str,
    word: Option<&str>,
) -> Result<T, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument { command, arg })?;
    parse_num(arg, word)
}

fn parse_num<T: std::str::FromStr>(arg: &'static str, word: &str) -> Result<T, CommandError> {
    word.parse().map_err(|_| CommandError::InvalidNumber {
        arg,
        value: word.to_string(),
    })
}
