use crate::alphabet::{Alphabet, PartitionKey};
use crate::error::{DictError, Result};
use crate::model::Language;

/// Trims a required text parameter. Blank counts as missing.
pub fn require<'a>(value: &'a str, name: &'static str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DictError::MissingParameter(name));
    }
    Ok(trimmed)
}

/// Resolves a language parameter. A blank value is a missing parameter; an
/// unknown one is `None`, which callers treat as "nothing matches".
pub fn language_param(value: &str) -> Result<Option<Language>> {
    let value = require(value, "language")?;
    Ok(Language::parse(value))
}

/// The partition a word with this Bishnupriya text must live in.
pub fn storage_key<'a>(alphabet: &'a Alphabet, bpy: &str) -> Result<&'a PartitionKey> {
    let bpy = require(bpy, "bpy")?;
    alphabet.derive_key(bpy).ok_or_else(|| {
        DictError::InvalidInput(format!(
            "\"{}\" does not start with a letter of the alphabet",
            bpy
        ))
    })
}

/// Case-insensitive substring test. `needle` must already be lowercase.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
