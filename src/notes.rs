use derive_builder::Builder;
use getset::{CopyGetters, Getters, Setters};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::model::ModelFormatConfig;

/// `NoteRecord` is a single note as AnkiConnect's `addNotes` expects it:
///
/// ```json
/// { "deckName": "Default", "modelName": "Básico",
///   "fields": { "Frente": "...", "Verso": "..." }, "tags": ["geografia"] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(build_fn(validate = "Self::validate"))]
#[getset(get = "pub")]
pub struct NoteRecord {
    #[builder(setter(into))]
    deck_name: String,
    #[builder(setter(into))]
    model_name: String,
    #[builder(setter(custom))]
    fields: IndexMap<String, String>,
    /// Insertion ordered, no duplicates, no empty tags.
    #[builder(setter(custom))]
    #[builder(default)]
    #[serde(default)]
    tags: IndexSet<String>,
}

impl NoteRecord {
    /// Used by the parser, which has already checked deck, model and fields.
    pub(crate) fn from_parts(
        deck_name: &str,
        model_name: &str,
        fields: IndexMap<String, String>,
        tags: IndexSet<String>,
    ) -> Self {
        Self {
            deck_name: deck_name.to_string(),
            model_name: model_name.to_string(),
            fields,
            tags,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl NoteRecordBuilder {
    pub fn field(&mut self, field_name: &str, value: &str) -> &mut Self {
        let fields = self.fields.get_or_insert_with(IndexMap::new);
        fields.insert(field_name.into(), value.into());
        self
    }

    /// Adds `(field_name, content)` pairs, replacing fields already set under the same name.
    pub fn extend_fields(
        &mut self,
        append: impl IntoIterator<Item = (String, String)>,
    ) -> &mut Self {
        let Some(fields) = &mut self.fields else {
            self.fields = Some(append.into_iter().collect());
            return self;
        };
        fields.extend(append);
        self
    }

    /// Adds a tag. Surrounding whitespace is trimmed; empty and repeated tags are ignored.
    pub fn tag(&mut self, tag: &str) -> &mut Self {
        let tag = tag.trim();
        let tags = self.tags.get_or_insert_with(IndexSet::new);
        if !tag.is_empty() {
            tags.insert(tag.to_string());
        }
        self
    }

    pub fn tags<'a>(&mut self, tags: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for tag in tags {
            self.tag(tag);
        }
        self
    }

    fn validate(&self) -> Result<(), String> {
        if matches!(&self.deck_name, Some(deck) if deck.trim().is_empty()) {
            return Err("deck_name must not be empty".into());
        }
        if matches!(&self.model_name, Some(model) if model.trim().is_empty()) {
            return Err("model_name must not be empty".into());
        }
        if matches!(&self.fields, Some(fields) if fields.is_empty()) {
            return Err("fields must contain at least one field".into());
        }
        Ok(())
    }
}

/// One accepted line of pasted text, as shown in the import preview.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Getters, CopyGetters, Setters)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCard {
    /// 1-based line number in the pasted text. Blank lines leave gaps.
    #[getset(get_copy = "pub")]
    sequence_id: usize,
    #[getset(get = "pub")]
    front_preview: String,
    #[getset(get = "pub")]
    back_preview: String,
    #[getset(get = "pub")]
    tags: IndexSet<String>,
    #[getset(get_copy = "pub", set = "pub")]
    include_in_import: bool,
    #[getset(get = "pub")]
    note: NoteRecord,
}

impl PreviewCard {
    pub(crate) fn new(sequence_id: usize, note: NoteRecord, config: &ModelFormatConfig) -> Self {
        let preview = |idx: usize| {
            config
                .field_names()
                .get(idx)
                .and_then(|name| note.field(name))
                .unwrap_or_default()
                .to_string()
        };
        Self {
            sequence_id,
            front_preview: preview(0),
            back_preview: preview(1),
            tags: note.tags.clone(),
            include_in_import: true,
            note,
        }
    }

    /// Flips [PreviewCard::include_in_import] and returns the new value.
    pub fn toggle_import(&mut self) -> bool {
        self.include_in_import = !self.include_in_import;
        self.include_in_import
    }

    pub fn into_note(self) -> NoteRecord {
        self.note
    }
}
