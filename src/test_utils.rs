use crate::{
    delimiter::Delimiter,
    error::ImportResult,
    notes::PreviewCard,
    parser::parse,
    settings::ImportSettings,
};

pub const DECK: &str = "Default";

/// Parses `text` as `Básico` notes with `;`, panicking with the formatted error.
pub fn parse_basic(text: &str) -> Vec<PreviewCard> {
    pretty_unwrap(parse(
        text,
        DECK,
        "Básico",
        Delimiter::Semicolon,
        Delimiter::Semicolon,
    ))
}

pub fn settings() -> ImportSettings {
    ImportSettings::default()
}

pub fn pretty_unwrap<T, E: std::error::Error>(res: Result<T, E>) -> T {
    match res {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

pub fn import_unwrap<T>(res: ImportResult<T>) -> T {
    match res {
        Ok(v) => v,
        Err(e) => e.pretty_panic(),
    }
}
