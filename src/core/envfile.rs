//! Line-preserving `.env` file operations.
//!
//! `EnvFile` keeps every line of the source file: comments, blank lines, and
//! anything unparseable pass through verbatim on write-back, and quoted
//! values remember their quote style so a rewrite applies the same quotes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name → value mapping produced from an env file.
pub type EnvMap = BTreeMap<String, String>;

/// Quote style of a parsed value, re-applied on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    None,
    Double,
    Single,
}

impl Quote {
    fn apply(self, value: &str) -> String {
        match self {
            Quote::None => value.to_string(),
            Quote::Double => format!("\"{}\"", value),
            Quote::Single => format!("'{}'", value),
        }
    }
}

enum Line {
    /// Comment, blank line, or anything without a `KEY=VALUE` shape.
    Verbatim(String),
    Pair {
        key: String,
        value: String,
        quote: Quote,
    },
}

/// A parsed `.env`-style file.
pub struct EnvFile {
    lines: Vec<Line>,
    path: PathBuf,
}

impl EnvFile {
    /// Load and parse an env file.
    ///
    /// # Errors
    ///
    /// Returns `Error::EnvFileNotFound` if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::EnvFileNotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        let mut parsed = Self::parse(&contents);
        parsed.path = path.to_path_buf();
        Ok(parsed)
    }

    /// Parse env file contents.
    pub fn parse(contents: &str) -> Self {
        let lines = contents.lines().map(parse_line).collect();
        EnvFile {
            lines,
            path: PathBuf::new(),
        }
    }

    /// Path this file was loaded from (empty for `parse`).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of `KEY=VALUE` entries.
    pub fn len(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, Line::Pair { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect the `KEY=VALUE` entries into an `EnvMap`.
    ///
    /// Later duplicates of a key win, matching plain sequential assignment.
    pub fn vars(&self) -> EnvMap {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Pair { key, value, .. } => Some((key.clone(), value.clone())),
                Line::Verbatim(_) => None,
            })
            .collect()
    }

    /// Rewrite pair values in place, preserving all other lines.
    ///
    /// The closure receives `(key, value)` and returns the replacement
    /// value, or `None` to leave the entry untouched. Returns the number of
    /// replaced values.
    pub fn map_values<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&str, &str) -> Option<String>,
    {
        let mut changed = 0;
        for line in &mut self.lines {
            if let Line::Pair { key, value, .. } = line {
                if let Some(replacement) = f(key, value) {
                    *value = replacement;
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Render back to file content, re-applying recorded quote styles.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Verbatim(raw) => out.push_str(raw),
                Line::Pair { key, value, quote } => {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(&quote.apply(value));
                }
            }
            out.push('\n');
        }
        out
    }

    /// Write the rendered content to a file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

fn parse_line(raw: &str) -> Line {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Verbatim(raw.to_string());
    }

    let Some((key, value)) = trimmed.split_once('=') else {
        return Line::Verbatim(raw.to_string());
    };

    let key = key.trim().to_string();
    let value = value.trim();

    let (value, quote) = if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        (&value[1..value.len() - 1], Quote::Double)
    } else if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        (&value[1..value.len() - 1], Quote::Single)
    } else {
        (value, Quote::None)
    };

    Line::Pair {
        key,
        value: value.to_string(),
        quote,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_quotes_and_whitespace() {
        let file = EnvFile::parse("A = 1\nB=\"two\"\nC='three'\n");
        let vars = file.vars();
        assert_eq!(vars["A"], "1");
        assert_eq!(vars["B"], "two");
        assert_eq!(vars["C"], "three");
    }

    #[test]
    fn comments_and_blanks_survive_render() {
        let src = "# header\n\nKEY=value\n   # indented comment\n";
        let file = EnvFile::parse(src);
        assert_eq!(file.render(), src);
    }

    #[test]
    fn later_duplicate_key_wins() {
        let file = EnvFile::parse("X=first\nX=second\n");
        assert_eq!(file.vars()["X"], "second");
    }

    #[test]
    fn lines_without_equals_pass_through() {
        let src = "not a pair\nKEY=value\n";
        let file = EnvFile::parse(src);
        assert_eq!(file.len(), 1);
        assert_eq!(file.render(), src);
    }

    #[test]
    fn map_values_keeps_quote_style() {
        let mut file = EnvFile::parse("A=\"one\"\nB='two'\nC=three\n");
        let changed = file.map_values(|_, _| Some("X".to_string()));
        assert_eq!(changed, 3);
        assert_eq!(file.render(), "A=\"X\"\nB='X'\nC=X\n");
    }
}
