//! Turns pasted delimited text into notes for AnkiConnect's `addNotes`.
//!
//! ```
//! use anki_paste::{parse, Delimiter};
//!
//! let text = "Qual a capital da França?;Paris;geografia,europa\n\nCapital da Itália? | Roma";
//! let cards = parse(text, "Default", "Básico", Delimiter::Semicolon, Delimiter::Semicolon).unwrap();
//! assert_eq!(cards.len(), 2);
//! assert_eq!(cards[1].sequence_id(), 3);
//! assert_eq!(cards[1].note().field("Verso"), Some("Roma"));
//! ```
//!
//! Nothing here performs I/O: [request] only shapes AnkiConnect payloads, and
//! [settings] only reads and writes JSON handed to it.

pub mod delimiter;
pub mod error;
pub mod model;
pub mod notes;
pub mod parser;
pub mod prompt;
pub mod request;
pub mod session;
pub mod settings;
#[cfg(test)]
mod test_utils;

pub use delimiter::Delimiter;
pub use error::{ConfigurationError, FieldCount, FormatError, ImportError, ImportResult, ParseError};
pub use model::{model_format, supported_models, ModelFormatConfig};
pub use notes::{NoteRecord, NoteRecordBuilder, PreviewCard};
pub use parser::{parse, parse_lenient, tokenize_tags, ParseReport};
pub use prompt::{build_prompt, CardStyle, PromptOptions};
pub use request::{AnkiRequest, AnkiResponse, ImportSummary};
pub use session::ImportSession;
pub use settings::ImportSettings;
