use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{delimiter::Delimiter, error::FieldCount};

/// `ModelFormatConfig` describes how one note type is laid out on a pasted line.
///
/// It contains the following fields:
/// - `name`: The note type name as it exists in the user's collection.
/// - `field_names`: The note fields, in column order.
/// - `tags_optional`: Whether one extra trailing column of tags is allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFormatConfig {
    name: &'static str,
    field_names: &'static [&'static str],
    tags_optional: bool,
}

static MODEL_FORMATS: [ModelFormatConfig; 4] = [
    ModelFormatConfig {
        name: "Básico",
        field_names: &["Frente", "Verso"],
        tags_optional: true,
    },
    ModelFormatConfig {
        name: "Básico (digite a resposta)",
        field_names: &["Frente", "Verso"],
        tags_optional: true,
    },
    ModelFormatConfig {
        name: "Básico (e cartão invertido)",
        field_names: &["Frente", "Verso"],
        tags_optional: true,
    },
    ModelFormatConfig {
        name: "Omissão de Palavras",
        field_names: &["Texto", "Verso Extra"],
        tags_optional: true,
    },
];

static BY_NAME: LazyLock<IndexMap<&'static str, &'static ModelFormatConfig>> =
    LazyLock::new(|| MODEL_FORMATS.iter().map(|m| (m.name, m)).collect());

/// Looks up the layout of a note type. Names are matched exactly.
pub fn model_format(name: &str) -> Option<&'static ModelFormatConfig> {
    BY_NAME.get(name).copied()
}

/// Every note type the parser knows, in table order.
pub fn supported_models() -> Vec<&'static str> {
    BY_NAME.keys().copied().collect()
}

impl ModelFormatConfig {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_names(&self) -> &'static [&'static str] {
        self.field_names
    }

    pub fn tags_optional(&self) -> bool {
        self.tags_optional
    }

    pub fn required_field_count(&self) -> usize {
        self.field_names.len()
    }

    /// Required fields plus the tags column, if any.
    pub fn max_field_count(&self) -> usize {
        self.required_field_count() + usize::from(self.tags_optional)
    }

    pub fn expected_count(&self) -> FieldCount {
        let required = self.required_field_count();
        if self.tags_optional {
            FieldCount::Either(required, self.max_field_count())
        } else {
            FieldCount::Exactly(required)
        }
    }

    /// The column layout as the user should type it, e.g. `Frente|Verso|[Tags]`.
    pub fn expected_format(&self, delimiter: Delimiter) -> String {
        let mut columns = self.field_names.to_vec();
        if self.tags_optional {
            columns.push("[Tags]");
        }
        columns.join(delimiter.token())
    }

    /// Configured field names that `remote_fields` lacks.
    ///
    /// `remote_fields` is what `modelFieldNames` reports for this note type; a
    /// non-empty result means the user's collection renamed or removed a field
    /// and notes built from this layout would be rejected.
    pub fn missing_fields<S: AsRef<str>>(&self, remote_fields: &[S]) -> Vec<&'static str> {
        self.field_names
            .iter()
            .copied()
            .filter(|name| !remote_fields.iter().any(|r| r.as_ref() == *name))
            .collect()
    }
}
