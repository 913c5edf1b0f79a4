//! AnkiConnect request and response envelopes.
//!
//! Only the payload shapes live here; sending them is up to the caller.

use std::borrow::Cow;

use derive_builder::Builder;
use getset::{CopyGetters, Getters};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    error::{ImportError, ImportResult},
    notes::NoteRecord,
};

/// Protocol version the importer speaks.
pub const ANKICONNECT_VERSION: u8 = 5;
/// Default endpoint for callers that send the payloads; nothing here connects to it.
pub const ANKICONNECT_URL: &str = "http://127.0.0.1:8765";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddNotesParams {
    pub notes: Vec<NoteRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldNamesParams {
    pub model_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    AddNotes(AddNotesParams),
    ModelFieldNames(ModelFieldNamesParams),
}

/// `{ "action": .., "version": .., "params": .. }`; `params` is left out when there are none.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Builder, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct AnkiRequest {
    #[builder(setter(custom))]
    #[getset(get = "pub")]
    action: String,
    #[builder(default = "ANKICONNECT_VERSION")]
    #[getset(get_copy = "pub")]
    version: u8,
    #[builder(default)]
    #[getset(get = "pub")]
    params: Option<Params>,
}

impl AnkiRequestBuilder {
    pub fn action(&mut self, action: Cow<str>) -> &mut Self {
        self.action = Some(action.into_owned());
        self
    }
}

impl AnkiRequest {
    fn without_params(action: &str) -> ImportResult<Self> {
        let payload = AnkiRequestBuilder::default().action(action.into()).build()?;
        Ok(payload)
    }

    /// `version`: used as a connectivity check.
    pub fn check_version() -> ImportResult<Self> {
        Self::without_params("version")
    }

    pub fn deck_names() -> ImportResult<Self> {
        Self::without_params("deckNames")
    }

    pub fn model_names() -> ImportResult<Self> {
        Self::without_params("modelNames")
    }

    pub fn model_field_names(model_name: &str) -> ImportResult<Self> {
        let params = Params::ModelFieldNames(ModelFieldNamesParams {
            model_name: model_name.to_string(),
        });
        let payload = AnkiRequestBuilder::default()
            .action("modelFieldNames".into())
            .params(Some(params))
            .build()?;
        Ok(payload)
    }

    pub fn add_notes(notes: &[NoteRecord]) -> ImportResult<Self> {
        let params = Params::AddNotes(AddNotesParams {
            notes: notes.to_vec(),
        });
        let payload = AnkiRequestBuilder::default()
            .action("addNotes".into())
            .params(Some(params))
            .build()?;
        Ok(payload)
    }

    pub fn to_json(&self) -> ImportResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// # Example Result
/// ```json
/// {
///    "result": [1483959289817, null],
///    "error": null
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnkiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T: DeserializeOwned> AnkiResponse<T> {
    pub fn from_json(body: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn into_result(self) -> ImportResult<T> {
        if let Some(err) = self.error {
            return Err(ImportError::AnkiConnect(err));
        }
        self.result.ok_or(ImportError::NoDataFound)
    }
}

/// What came back from an `addNotes` call, matched to the cards that were sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Getters, CopyGetters)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    #[getset(get = "pub")]
    note_ids: Vec<i64>,
    /// Sequence ids of the cards AnkiConnect did not create.
    #[getset(get = "pub")]
    failed: Vec<usize>,
    #[getset(get_copy = "pub")]
    total: usize,
}

impl ImportSummary {
    /// `results[i]` answers `sequence_ids[i]`; a missing entry counts as a failure.
    pub fn from_results(results: &[Option<i64>], sequence_ids: &[usize]) -> Self {
        let mut note_ids = Vec::new();
        let mut failed = Vec::new();
        for (idx, id) in sequence_ids.iter().enumerate() {
            match results.get(idx).copied().flatten() {
                Some(note_id) => note_ids.push(note_id),
                None => failed.push(*id),
            }
        }
        Self {
            note_ids,
            failed,
            total: sequence_ids.len(),
        }
    }

    pub fn successful(&self) -> usize {
        self.note_ids.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn message(&self, deck_name: &str) -> String {
        format!(
            "{} of {} flashcards imported into deck \"{deck_name}\".",
            self.successful(),
            self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{import_unwrap, parse_basic};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn plain_actions_omit_params() {
        let req = import_unwrap(AnkiRequest::deck_names());
        let value: Value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({ "action": "deckNames", "version": 5 }));
        assert_eq!(import_unwrap(AnkiRequest::model_names()).action(), "modelNames");
        assert_eq!(import_unwrap(AnkiRequest::check_version()).version(), ANKICONNECT_VERSION);
        assert_eq!(ANKICONNECT_URL, "http://127.0.0.1:8765");
    }

    #[test]
    fn model_field_names_payload() {
        let req = import_unwrap(AnkiRequest::model_field_names("Básico"));
        let value: Value = serde_json::from_str(&import_unwrap(req.to_json())).unwrap();
        assert_eq!(
            value,
            json!({
                "action": "modelFieldNames",
                "version": 5,
                "params": { "modelName": "Básico" },
            })
        );
    }

    #[test]
    fn add_notes_payload() {
        let notes: Vec<NoteRecord> = parse_basic("a;b;t1 t2")
            .into_iter()
            .map(|c| c.into_note())
            .collect();
        let req = import_unwrap(AnkiRequest::add_notes(&notes));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "action": "addNotes",
                "version": 5,
                "params": { "notes": [{
                    "deckName": "Default",
                    "modelName": "Básico",
                    "fields": { "Frente": "a", "Verso": "b" },
                    "tags": ["t1", "t2"],
                }]},
            })
        );
        let back: AnkiRequest = serde_json::from_value(value).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn builder_requires_an_action() {
        let err = AnkiRequestBuilder::default().build().unwrap_err();
        let err = ImportError::from(err);
        assert!(err.to_string().starts_with("[error/builder]"));
    }

    #[test]
    fn response_error_wins() {
        let res = AnkiResponse::<Vec<String>>::from_json(
            r#"{"result": null, "error": "collection is not available"}"#,
        )
        .unwrap();
        let err = res.into_result().unwrap_err();
        assert!(matches!(err, ImportError::AnkiConnect(msg) if msg == "collection is not available"));
    }

    #[test]
    fn response_without_result() {
        let res = AnkiResponse::<Vec<String>>::from_json(r#"{"error": null}"#).unwrap();
        assert!(matches!(res.into_result(), Err(ImportError::NoDataFound)));
    }

    #[test]
    fn response_with_result() {
        let res = AnkiResponse::<Vec<String>>::from_json(
            r#"{"result": ["Default", "Idiomas"], "error": null}"#,
        )
        .unwrap();
        assert_eq!(res.into_result().unwrap(), vec!["Default", "Idiomas"]);
    }

    #[test]
    fn malformed_response_is_a_serde_error() {
        let err = AnkiResponse::<Vec<i64>>::from_json("not json").unwrap_err();
        assert!(matches!(err, ImportError::SerdeJson(_)));
    }

    #[test]
    fn summary_counts_null_ids_as_failures() {
        let summary = ImportSummary::from_results(&[Some(11), None, Some(13)], &[1, 3, 4]);
        assert_eq!(summary.successful(), 2);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.failed(), &vec![3]);
        assert!(!summary.is_complete());
        assert_eq!(
            summary.message("Default"),
            "2 of 3 flashcards imported into deck \"Default\"."
        );

        let short = ImportSummary::from_results(&[Some(1)], &[1, 2]);
        assert_eq!(short.failed(), &vec![2]);
    }
}
