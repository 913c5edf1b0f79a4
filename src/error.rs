use std::fmt::Display;

use getset::{CopyGetters, Getters};
use thiserror::Error;

use crate::{model::supported_models, notes::NoteRecordBuilderError, request::AnkiRequestBuilderError};

pub type ImportResult<T> = Result<T, ImportError>;
pub type ParseResult<T> = Result<T, ParseError>;

/// Raised before any line is looked at.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("[error/missing-selection]: a deck and a note type must be selected before parsing\n[help] choose both and paste the text again")]
    MissingSelection,
    #[error("[error/unknown-model]: \"{0}\" has no known field configuration\n[help] supported note types: {supported}", supported = supported_models().join(", "))]
    UnknownModel(String),
}

impl ConfigurationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSelection => "missing-selection",
            Self::UnknownModel(_) => "unknown-model",
        }
    }
}

/// How many columns a note type accepts on one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldCount {
    Exactly(usize),
    /// required fields, or required fields plus the tags column
    Either(usize, usize),
}

impl FieldCount {
    pub fn accepts(self, found: usize) -> bool {
        match self {
            Self::Exactly(n) => found == n,
            Self::Either(min, max) => (min..=max).contains(&found),
        }
    }
}

impl Display for FieldCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "{n}"),
            Self::Either(min, max) => write!(f, "{min} or {max}"),
        }
    }
}

/// A line whose column count does not fit its note type.
///
/// Carries everything the importer needs to tell the user which line to fix
/// and what it should look like.
#[derive(Clone, Debug, PartialEq, Eq, Error, Getters, CopyGetters)]
#[error("[error/format] line {line}: invalid format for note type \"{model_name}\"\n  [expected]: {expected} fields ({expected_fields})\n  [found]: {found}\n  [line]: {raw_line}\n[help] correct the line and parse again")]
pub struct FormatError {
    #[getset(get_copy = "pub")]
    line: usize,
    #[getset(get = "pub")]
    raw_line: String,
    #[getset(get = "pub")]
    model_name: String,
    /// Field names joined by the delimiter the user selected.
    #[getset(get = "pub")]
    expected_fields: String,
    #[getset(get_copy = "pub")]
    expected: FieldCount,
    #[getset(get_copy = "pub")]
    found: usize,
}

impl FormatError {
    pub(crate) fn new(
        line: usize,
        raw_line: &str,
        model_name: &str,
        expected_fields: String,
        expected: FieldCount,
        found: usize,
    ) -> Self {
        Self {
            line,
            raw_line: raw_line.to_string(),
            model_name: model_name.to_string(),
            expected_fields,
            expected,
            found,
        }
    }
}

/// The only two ways [crate::parse] can fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),
    #[error("{0}")]
    Format(#[from] FormatError),
}

#[derive(Debug, Error)]
pub enum BuilderErrors {
    #[error("{0}")]
    Note(#[from] NoteRecordBuilderError),
    #[error("{0}")]
    Request(#[from] AnkiRequestBuilderError),
}

impl From<NoteRecordBuilderError> for ImportError {
    fn from(value: NoteRecordBuilderError) -> Self {
        Self::Builder(BuilderErrors::Note(value))
    }
}
impl From<AnkiRequestBuilderError> for ImportError {
    fn from(value: AnkiRequestBuilderError) -> Self {
        Self::Builder(BuilderErrors::Request(value))
    }
}
impl From<ConfigurationError> for ImportError {
    fn from(value: ConfigurationError) -> Self {
        Self::Parse(ParseError::Configuration(value))
    }
}
impl From<FormatError> for ImportError {
    fn from(value: FormatError) -> Self {
        Self::Parse(ParseError::Format(value))
    }
}

/// import error
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("[error/builder]: {0}")]
    Builder(#[from] BuilderErrors),
    #[error("[error/anki-connect]: {0}")]
    AnkiConnect(String),
    #[error("no data found")]
    NoDataFound,
    #[error("[error/nothing-to-import]: no valid flashcard line was found\n[help] paste at least one line in the expected format")]
    NothingToImport,
    #[error("[error/nothing-selected]: every card was excluded from the import\n[help] include at least one card in the preview")]
    NothingSelected,
    #[error("[error/serde_json(internal)]: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl ImportError {
    #[inline(always)]
    #[track_caller]
    pub fn pretty_panic(&self) -> ! {
        panic!("<PANIC>\n {self}")
    }
}
