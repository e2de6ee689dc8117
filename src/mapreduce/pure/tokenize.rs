//! Pure word tokenization
//!
//! Turns raw text into a lazy sequence of lowercase tokens. Text is lowercased
//! before matching, so characters whose lowercase form is an ASCII letter
//! (such as the Kelvin sign) count as letters. The same
//! [`WordCharset`] must be used by every path of a pipeline invocation,
//! otherwise the sequential and concurrent results are not comparable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static ALPHABETIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+").expect("Invalid regex pattern"));
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("Invalid regex pattern"));

/// Which characters make up a word
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WordCharset {
    /// Maximal runs of ASCII letters
    #[default]
    Alphabetic,
    /// Maximal runs of Unicode word characters (letters, digits, underscore)
    Word,
}

impl WordCharset {
    fn pattern(self) -> &'static Regex {
        match self {
            WordCharset::Alphabetic => &*ALPHABETIC,
            WordCharset::Word => &*WORD,
        }
    }
}

impl fmt::Display for WordCharset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordCharset::Alphabetic => write!(f, "alphabetic"),
            WordCharset::Word => write!(f, "word"),
        }
    }
}

impl FromStr for WordCharset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alphabetic" | "alpha" => Ok(WordCharset::Alphabetic),
            "word" | "alphanumeric" => Ok(WordCharset::Word),
            other => Err(format!(
                "unknown word charset '{}', expected 'alphabetic' or 'word'",
                other
            )),
        }
    }
}

/// Lazy token iterator over an owned, lowercased copy of the input
struct Tokens {
    text: String,
    pos: usize,
    pattern: &'static Regex,
}

impl Iterator for Tokens {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        // Both patterns need at least one character, so `pos` always advances
        let found = self.pattern.find_at(&self.text, self.pos)?;
        self.pos = found.end();
        Some(found.as_str().to_string())
    }
}

/// Pure: Lazily extract lowercase tokens from `text`
///
/// Empty or token-free input yields an empty sequence.
pub fn tokenize(text: &str, charset: WordCharset) -> impl Iterator<Item = String> {
    Tokens {
        text: text.to_lowercase(),
        pos: 0,
        pattern: charset.pattern(),
    }
}

/// Pure: Total number of tokens across all lines
pub fn token_count<S: AsRef<str>>(lines: &[S], charset: WordCharset) -> u64 {
    lines
        .iter()
        .map(|line| {
            let lowered = line.as_ref().to_lowercase();
            charset.pattern().find_iter(&lowered).count() as u64
        })
        .sum()
}
