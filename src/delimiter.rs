// static regex patterns are guaranteed to compile
#![allow(clippy::expect_used)]

use std::{borrow::Cow, fmt::Display, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Any accepted token, plus the whitespace hugging it.
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:;|\||//)\s*").expect("static regex: separator"));

/// Column delimiters a user may pick for pasted text.
///
/// Whichever one is selected, every line accepts all of them: see [normalize_line].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delimiter {
    #[default]
    #[serde(rename = ";")]
    Semicolon,
    #[serde(rename = "|")]
    Pipe,
    #[serde(rename = "//")]
    DoubleSlash,
}

impl Delimiter {
    pub const ALL: [Delimiter; 3] = [Self::Semicolon, Self::Pipe, Self::DoubleSlash];
    /// What every accepted token is folded to before a line is split.
    pub const CANONICAL: char = ';';

    pub fn token(self) -> &'static str {
        match self {
            Self::Semicolon => ";",
            Self::Pipe => "|",
            Self::DoubleSlash => "//",
        }
    }

    /// Label shown in the settings select.
    pub fn label(self) -> &'static str {
        match self {
            Self::Semicolon => ";  (Ponto e Vírgula)",
            Self::Pipe => "|  (Pipe)",
            Self::DoubleSlash => "//  (Barras Duplas)",
        }
    }
}

impl Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("[error/delimiter]: \"{0}\" is not an accepted delimiter\n[help] use one of ; | //")]
pub struct UnknownDelimiter(pub String);

impl FromStr for Delimiter {
    type Err = UnknownDelimiter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.token() == s)
            .ok_or_else(|| UnknownDelimiter(s.to_string()))
    }
}

/// Folds every `;`, `|` and `//` in `line` to [Delimiter::CANONICAL],
/// dropping whitespace around it.
///
/// ```
/// use anki_paste::delimiter::normalize_line;
/// assert_eq!(normalize_line("a | b // c ; d"), "a;b;c;d");
/// ```
pub fn normalize_line(line: &str) -> Cow<'_, str> {
    SEPARATOR.replace_all(line, ";")
}
