use serde::{Deserialize, Serialize};

use crate::{
    delimiter::Delimiter,
    error::{ConfigurationError, ImportResult},
    model::model_format,
};

/// User preferences the importer reads on every parse.
///
/// Where they are stored is the caller's business; this type only knows how to
/// read and write them as JSON. Missing keys fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportSettings {
    pub default_deck: String,
    pub default_model: String,
    /// Note types offered in the importer form.
    pub allowed_models: Vec<String>,
    /// Delimiter the user types in pasted text.
    pub field_delimiter: Delimiter,
    /// Delimiter configured on the Anki side.
    pub anki_delimiter: Delimiter,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            default_deck: "Default".to_string(),
            default_model: "Básico".to_string(),
            allowed_models: vec![
                "Básico".to_string(),
                "Básico (e cartão invertido)".to_string(),
                "Omissão de Palavras".to_string(),
            ],
            field_delimiter: Delimiter::Semicolon,
            anki_delimiter: Delimiter::Semicolon,
        }
    }
}

impl ImportSettings {
    pub fn from_json_str(json: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> ImportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every model named here must have a known field layout.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        std::iter::once(&self.default_model)
            .chain(&self.allowed_models)
            .find(|name| model_format(name).is_none())
            .map_or(Ok(()), |name| Err(ConfigurationError::UnknownModel(name.clone())))
    }
}
