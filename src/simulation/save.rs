//! Flat, line-oriented save file.
//!
//! ```text
//! kingdom name
//! total population
//! gold
//! army size
//! army morale
//! outstanding loan
//! message count
//! one message per line
//! ```

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::simulation::{MAX_MESSAGE_LENGTH, MESSAGE_CAPACITY};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot access save file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("save file line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Everything a save file carries.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRecord {
    pub name: String,
    pub population: i32,
    pub gold: f64,
    pub army_size: i32,
    pub army_morale: i32,
    pub loan: f64,
    pub messages: Vec<String>,
}

impl SaveRecord {
    pub fn encode(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", self.name);
        let _ = writeln!(out, "{}", self.population);
        let _ = writeln!(out, "{}", self.gold);
        let _ = writeln!(out, "{}", self.army_size);
        let _ = writeln!(out, "{}", self.army_morale);
        let _ = writeln!(out, "{}", self.loan);
        let _ = writeln!(out, "{}", self.messages.len());
        for message in &self.messages {
            let _ = writeln!(out, "{message}");
        }
        out
    }

    pub fn decode(text: &str) -> Result<Self, SaveError> {
        let mut lines = Lines::new(text);
        let name = lines.next_line()?.to_string();
        let population = lines.parse("population")?;
        let gold: f64 = lines.parse("gold")?;
        let army_size = lines.parse("army size")?;
        let army_morale = lines.parse("army morale")?;
        let loan: f64 = lines.parse("loan")?;
        let count: usize = lines.parse("message count")?;
        if count > MESSAGE_CAPACITY {
            return Err(lines.malformed(format!(
                "{count} messages exceed the capacity of {MESSAGE_CAPACITY}"
            )));
        }
        if !gold.is_finite() || gold < 0.0 || !loan.is_finite() || loan < 0.0 {
            return Err(lines.malformed("gold and loan must be non-negative".to_string()));
        }

        let mut messages = Vec::with_capacity(count);
        for _ in 0..count {
            let message = lines.next_line()?;
            if message.chars().count() > MAX_MESSAGE_LENGTH {
                return Err(lines.malformed(format!(
                    "message longer than {MAX_MESSAGE_LENGTH} characters"
                )));
            }
            messages.push(message.to_string());
        }

        Ok(Self {
            name,
            population,
            gold,
            army_size,
            army_morale,
            loan,
            messages,
        })
    }

    /// Overwrites whatever was at `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), SaveError> {
        fs::write(path, self.encode()).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read_from(path: &Path) -> Result<Self, SaveError> {
        let text = fs::read_to_string(path).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&text)
    }
}

struct Lines<'a> {
    inner: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<&'a str, SaveError> {
        self.line += 1;
        self.inner
            .next()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .ok_or_else(|| self.malformed("unexpected end of file".to_string()))
    }

    fn parse<T: FromStr>(&mut self, field: &str) -> Result<T, SaveError> {
        let raw = self.next_line()?;
        raw.trim()
            .parse()
            .map_err(|_| self.malformed(format!("invalid {field}: {raw:?}")))
    }

    fn malformed(&self, reason: String) -> SaveError {
        SaveError::Malformed {
            line: self.line,
            reason,
        }
    }
}
