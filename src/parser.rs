//! Pasted text to [PreviewCard]s.
//!
//! # Format
//! One note per line, columns in the note type's field order, an optional last
//! column of tags separated by commas and/or spaces:
//! ```text
//! Qual a capital da França?;Paris;geografia,europa
//! Qual a capital da Itália? | Roma
//!
//! Qual a capital de Portugal? // Lisboa // geografia europa
//! ```
//! Any of `;`, `|` and `//` separates columns on any line, whatever delimiter the
//! user selected. There is no escaping: `\;` still splits.

// static regex patterns are guaranteed to compile
#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    delimiter::{normalize_line, Delimiter},
    error::{ConfigurationError, FormatError, ParseError, ParseResult},
    model::{model_format, ModelFormatConfig},
    notes::{NoteRecord, PreviewCard},
};

static TAG_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("static regex: tag boundary"));

/// Parses pasted text into one [PreviewCard] per non-blank line.
///
/// Deck and note type are checked before any line. The first malformed line
/// fails the whole call; use [parse_lenient] to collect every bad line instead.
///
/// `anki_delimiter` is the delimiter configured on the Anki side. It is part of
/// the caller's settings and does not change how lines are split.
///
/// # Examples
///
/// ```
/// use anki_paste::{parse, Delimiter};
///
/// let cards = parse(
///     "Qual a capital da França?;Paris;geografia,europa",
///     "Default",
///     "Básico",
///     Delimiter::Semicolon,
///     Delimiter::Semicolon,
/// ).unwrap();
/// assert_eq!(cards[0].back_preview(), "Paris");
/// ```
pub fn parse(
    raw_text: &str,
    deck_name: &str,
    model_name: &str,
    input_delimiter: Delimiter,
    _anki_delimiter: Delimiter,
) -> ParseResult<Vec<PreviewCard>> {
    let config = resolve_selection(deck_name, model_name)?;
    debug!(deck = deck_name, model = model_name, "parsing pasted text");

    let cards = candidate_lines(raw_text)
        .map(|(line_no, line)| parse_line(line_no, line, deck_name, config, input_delimiter))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| debug!(line = e.line(), "rejected line"))?;

    debug!(cards = cards.len(), "parsed pasted text");
    Ok(cards)
}

/// Result of [parse_lenient]: the lines that parsed and every line that didn't.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub cards: Vec<PreviewCard>,
    pub errors: Vec<FormatError>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Back to the all-or-nothing contract of [parse]: the first bad line wins.
    pub fn into_cards(self) -> ParseResult<Vec<PreviewCard>> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ParseError::Format(err)),
            None => Ok(self.cards),
        }
    }
}

/// Like [parse], but keeps going past malformed lines so they can all be shown at once.
///
/// Deck and note type problems are still returned as an error.
pub fn parse_lenient(
    raw_text: &str,
    deck_name: &str,
    model_name: &str,
    input_delimiter: Delimiter,
    _anki_delimiter: Delimiter,
) -> ParseResult<ParseReport> {
    let config = resolve_selection(deck_name, model_name)?;

    let mut report = ParseReport::default();
    for (line_no, line) in candidate_lines(raw_text) {
        match parse_line(line_no, line, deck_name, config, input_delimiter) {
            Ok(card) => report.cards.push(card),
            Err(err) => {
                debug!(line = line_no, "rejected line");
                report.errors.push(err);
            }
        }
    }

    debug!(
        cards = report.cards.len(),
        errors = report.errors.len(),
        "parsed pasted text leniently"
    );
    Ok(report)
}

/// Splits a tags column on runs of commas and/or whitespace.
///
/// Empty tokens are dropped, repeats keep their first position.
pub fn tokenize_tags(raw: &str) -> IndexSet<String> {
    TAG_BOUNDARY
        .split(raw.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn resolve_selection(
    deck_name: &str,
    model_name: &str,
) -> Result<&'static ModelFormatConfig, ConfigurationError> {
    if deck_name.is_empty() || model_name.is_empty() {
        return Err(ConfigurationError::MissingSelection);
    }
    model_format(model_name).ok_or_else(|| ConfigurationError::UnknownModel(model_name.to_string()))
}

/// Non-blank lines of the trimmed text with their 1-based line numbers.
fn candidate_lines(raw_text: &str) -> impl Iterator<Item = (usize, &str)> {
    raw_text
        .trim()
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn parse_line(
    line_no: usize,
    line: &str,
    deck_name: &str,
    config: &ModelFormatConfig,
    input_delimiter: Delimiter,
) -> Result<PreviewCard, FormatError> {
    let normalized = normalize_line(line.trim());
    let parts: Vec<&str> = normalized.split(Delimiter::CANONICAL).collect();

    let expected = config.expected_count();
    if !expected.accepts(parts.len()) {
        return Err(FormatError::new(
            line_no,
            line,
            config.name(),
            config.expected_format(input_delimiter),
            expected,
            parts.len(),
        ));
    }

    let required = config.required_field_count();
    let fields: IndexMap<String, String> = config
        .field_names()
        .iter()
        .zip(&parts)
        .map(|(name, value)| (name.to_string(), value.trim().to_string()))
        .collect();
    let tags = match parts.get(required) {
        Some(raw_tags) if config.tags_optional() => tokenize_tags(raw_tags),
        _ => IndexSet::new(),
    };
    trace!(line = line_no, fields = fields.len(), tags = tags.len(), "accepted line");

    let note = NoteRecord::from_parts(deck_name, config.name(), fields, tags);
    Ok(PreviewCard::new(line_no, note, config))
}
