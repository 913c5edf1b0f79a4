use getset::Getters;
use tracing::debug;

use crate::{
    error::{ImportError, ImportResult},
    notes::{NoteRecord, PreviewCard},
    parser::parse,
    request::{AnkiRequest, AnkiResponse, ImportSummary},
    settings::ImportSettings,
};

/// Holds the preview between parsing pasted text and sending it to Anki.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct ImportSession {
    deck_name: String,
    cards: Vec<PreviewCard>,
}

impl ImportSession {
    /// Parses `text` with the delimiters from `settings`.
    ///
    /// Fails like [parse], and with [ImportError::NothingToImport] when the text
    /// holds no line at all.
    pub fn prepare(
        text: &str,
        deck_name: &str,
        model_name: &str,
        settings: &ImportSettings,
    ) -> ImportResult<Self> {
        let cards = parse(
            text,
            deck_name,
            model_name,
            settings.field_delimiter,
            settings.anki_delimiter,
        )?;
        if cards.is_empty() {
            return Err(ImportError::NothingToImport);
        }
        debug!(cards = cards.len(), deck = deck_name, "import session prepared");
        Ok(Self {
            deck_name: deck_name.to_string(),
            cards,
        })
    }

    pub fn card(&self, sequence_id: usize) -> Option<&PreviewCard> {
        self.cards.iter().find(|c| c.sequence_id() == sequence_id)
    }

    fn card_mut(&mut self, sequence_id: usize) -> Option<&mut PreviewCard> {
        self.cards.iter_mut().find(|c| c.sequence_id() == sequence_id)
    }

    /// Flips whether a card is imported. Returns `false` if there is no such card.
    pub fn toggle(&mut self, sequence_id: usize) -> bool {
        self.card_mut(sequence_id)
            .map(|card| {
                card.toggle_import();
            })
            .is_some()
    }

    /// Returns `false` if there is no such card.
    pub fn set_included(&mut self, sequence_id: usize, include: bool) -> bool {
        self.card_mut(sequence_id)
            .map(|card| {
                card.set_include_in_import(include);
            })
            .is_some()
    }

    pub fn included_count(&self) -> usize {
        self.included().count()
    }

    fn included(&self) -> impl Iterator<Item = &PreviewCard> {
        self.cards.iter().filter(|c| c.include_in_import())
    }

    /// Notes of the included cards, in preview order.
    pub fn selected_notes(&self) -> ImportResult<Vec<NoteRecord>> {
        let notes: Vec<NoteRecord> = self.included().map(|c| c.note().clone()).collect();
        if notes.is_empty() {
            return Err(ImportError::NothingSelected);
        }
        Ok(notes)
    }

    /// The `addNotes` request for the included cards.
    pub fn add_notes_request(&self) -> ImportResult<AnkiRequest> {
        let notes = self.selected_notes()?;
        AnkiRequest::add_notes(&notes)
    }

    /// Reads the `addNotes` response body sent back for [ImportSession::add_notes_request].
    pub fn summarize(&self, response_json: &str) -> ImportResult<ImportSummary> {
        let results = AnkiResponse::<Vec<Option<i64>>>::from_json(response_json)?.into_result()?;
        let sequence_ids: Vec<usize> = self.included().map(PreviewCard::sequence_id).collect();
        let summary = ImportSummary::from_results(&results, &sequence_ids);
        debug!(
            imported = summary.successful(),
            total = summary.total(),
            "add notes response read"
        );
        Ok(summary)
    }
}
