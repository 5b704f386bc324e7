use crate::alphabet::PartitionKey;
use crate::error::{DictError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Fields that only make sense while a word awaits moderation.
/// `fileName` and `letter` were annotations older tooling wrote back by accident.
pub const SUBMISSION_FIELDS: [&str; 4] = ["status", "addedAt", "fileName", "letter"];

/// Fields a patch may never overwrite on a stored word.
const PROTECTED_FIELDS: [&str; 3] = ["id", "status", "addedAt"];

/// The three languages every word is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "bpy")]
    Bishnupriya,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// The partitioning language.
    pub const PRIMARY: Language = Language::Bishnupriya;

    pub const ALL: [Language; 3] = [Language::Bishnupriya, Language::Bengali, Language::English];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Bishnupriya => "bpy",
            Language::Bengali => "bn",
            Language::English => "en",
        }
    }

    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }

    /// Accepts the short codes and the older long names. Unknown values are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bpy" | "bishnupriya" => Some(Language::Bishnupriya),
            "bn" | "bengali" => Some(Language::Bengali),
            "en" | "english" => Some(Language::English),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DictError;

    fn from_str(s: &str) -> Result<Self> {
        Language::parse(s).ok_or_else(|| {
            DictError::InvalidInput(format!(
                "Unsupported language \"{}\" (expected one of: bpy, bn, en)",
                s
            ))
        })
    }
}

/// Moderation state of a word. Only `pending` means anything to the
/// dictionary; any other stored value is carried through as found.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryStatus {
    Pending,
    Other(Value),
}

impl From<Value> for EntryStatus {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("pending") => EntryStatus::Pending,
            _ => EntryStatus::Other(value),
        }
    }
}

impl From<EntryStatus> for Value {
    fn from(status: EntryStatus) -> Self {
        match status {
            EntryStatus::Pending => Value::String("pending".to_string()),
            EntryStatus::Other(value) => value,
        }
    }
}

/// A dictionary word.
///
/// Only the three text fields and the `cat` tags are interpreted; every other
/// enrichment field (phonetics, synonyms, grammar, usage, ...) rides along in
/// `extra` untouched.
///
/// Reading never rejects a word over a field value. A `null` text reads as
/// empty; a text, `addedAt` or `status` of the wrong type is kept verbatim
/// (in `extra` or [`EntryStatus::Other`]) and written back unchanged. Text
/// fields the stored record did not have are not added on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawEntry", into = "RawEntry")]
pub struct Entry {
    /// Empty until assigned. Every entry handed out by the store has one.
    pub id: String,
    pub bpy: String,
    pub bn: String,
    pub en: String,
    pub status: Option<EntryStatus>,
    /// RFC 3339 submission time, pending words only.
    pub added_at: Option<String>,
    pub extra: Map<String, Value>,
    presence: TextPresence,
}

/// Which text fields the stored record carried.
#[derive(Debug, Clone, Copy, Default)]
struct TextPresence {
    bpy: bool,
    bn: bool,
    en: bool,
}

impl TextPresence {
    const ALL: TextPresence = TextPresence {
        bpy: true,
        bn: true,
        en: true,
    };
}

/// Wire form of [`Entry`]: every known field optional and untyped.
#[derive(Serialize, Deserialize)]
struct RawEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bpy: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bn: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    en: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<Value>,
    #[serde(default, rename = "addedAt", skip_serializing_if = "Option::is_none")]
    added_at: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// A string value becomes the field; anything else is parked in `extra`.
fn read_string(value: Option<Value>, field: &str, extra: &mut Map<String, Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            extra.insert(field.to_string(), other);
            None
        }
        None => None,
    }
}

fn write_text(
    text: String,
    present: bool,
    field: &str,
    extra: &mut Map<String, Value>,
) -> Option<Value> {
    let parked = extra.remove(field);
    if present || !text.is_empty() {
        Some(Value::String(text))
    } else {
        parked
    }
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        let mut extra = raw.extra;
        let bpy = read_string(raw.bpy, "bpy", &mut extra);
        let bn = read_string(raw.bn, "bn", &mut extra);
        let en = read_string(raw.en, "en", &mut extra);
        let added_at = read_string(raw.added_at, "addedAt", &mut extra);
        Entry {
            // Non-string ids are treated as missing and get backfilled
            id: match raw.id {
                Some(Value::String(s)) => s,
                _ => String::new(),
            },
            presence: TextPresence {
                bpy: bpy.is_some(),
                bn: bn.is_some(),
                en: en.is_some(),
            },
            bpy: bpy.unwrap_or_default(),
            bn: bn.unwrap_or_default(),
            en: en.unwrap_or_default(),
            status: raw.status.map(EntryStatus::from),
            added_at,
            extra,
        }
    }
}

impl From<Entry> for RawEntry {
    fn from(entry: Entry) -> Self {
        let mut extra = entry.extra;
        extra.remove("id");
        let status = match entry.status {
            Some(status) => {
                extra.remove("status");
                Some(Value::from(status))
            }
            None => extra.remove("status"),
        };
        let added_at = match entry.added_at {
            Some(at) => {
                extra.remove("addedAt");
                Some(Value::String(at))
            }
            None => extra.remove("addedAt"),
        };
        RawEntry {
            id: (!entry.id.is_empty()).then(|| Value::String(entry.id)),
            bpy: write_text(entry.bpy, entry.presence.bpy, "bpy", &mut extra),
            bn: write_text(entry.bn, entry.presence.bn, "bn", &mut extra),
            en: write_text(entry.en, entry.presence.en, "en", &mut extra),
            status,
            added_at,
            extra,
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.bpy == other.bpy
            && self.bn == other.bn
            && self.en == other.en
            && self.status == other.status
            && self.added_at == other.added_at
            && self.extra == other.extra
    }
}

impl Entry {
    pub fn new(bpy: impl Into<String>, bn: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            bpy: bpy.into(),
            bn: bn.into(),
            en: en.into(),
            status: None,
            added_at: None,
            extra: Map::new(),
            presence: TextPresence::ALL,
        }
    }

    pub fn with_extra(mut self, field: &str, value: Value) -> Self {
        self.extra.insert(field.to_string(), value);
        self
    }

    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::Bishnupriya => &self.bpy,
            Language::Bengali => &self.bn,
            Language::English => &self.en,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == Some(EntryStatus::Pending)
    }

    /// Category tags from the `cat` array. Non-string items are skipped.
    pub fn categories(&self) -> Vec<&str> {
        match self.extra.get("cat") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Drops moderation bookkeeping so the word can live in the canonical set.
    pub fn strip_submission_fields(&mut self) {
        self.status = None;
        self.added_at = None;
        for field in SUBMISSION_FIELDS {
            self.extra.remove(field);
        }
    }

    /// Shallow merge of `patch` over this entry. `id`, `status` and `addedAt`
    /// are never taken from the patch. Texts must be strings; `null` clears.
    pub fn patched(&self, patch: &Map<String, Value>) -> Result<Entry> {
        for field in ["bpy", "bn", "en"] {
            if let Some(value) = patch.get(field) {
                if !(value.is_string() || value.is_null()) {
                    return Err(DictError::InvalidInput(format!(
                        "Patch field \"{}\" must be a string",
                        field
                    )));
                }
            }
        }

        let mut merged = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (field, value) in patch {
            if PROTECTED_FIELDS.contains(&field.as_str()) {
                continue;
            }
            if value.is_null() {
                merged.remove(field);
            } else {
                merged.insert(field.clone(), value.clone());
            }
        }

        let mut entry: Entry = serde_json::from_value(Value::Object(merged))?;
        entry.id = self.id.clone();
        entry.status = self.status.clone();
        entry.added_at = self.added_at.clone();
        Ok(entry)
    }
}

/// An entry paired with the partition it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedEntry {
    pub key: PartitionKey,
    pub entry: Entry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn language_parses_codes_and_legacy_names() {
        assert_eq!(Language::parse("bpy"), Some(Language::Bishnupriya));
        assert_eq!(Language::parse("Bengali"), Some(Language::Bengali));
        assert_eq!(Language::parse(" en "), Some(Language::English));
        assert_eq!(Language::parse("fr"), None);
        assert!("fr".parse::<Language>().is_err());
        assert!(Language::Bishnupriya.is_primary());
        assert!(!Language::English.is_primary());
    }

    #[test]
    fn entry_keeps_unknown_fields() {
        let raw = json!({
            "id": "abc",
            "bpy": "কলম",
            "bn": "কলম",
            "en": "pen",
            "synonyms": ["লেখনী"],
            "grammar": {"partOfSpeech": ["noun"]}
        });
        let entry: Entry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(entry.id, "abc");
        assert_eq!(entry.extra.len(), 2);
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let entry: Entry = serde_json::from_value(json!({"bpy": "কলম"})).unwrap();
        assert_eq!(entry.bn, "");
        assert_eq!(entry.en, "");
        assert!(entry.id.is_empty());
    }

    #[test]
    fn non_string_id_is_treated_as_missing() {
        let entry: Entry = serde_json::from_value(json!({"id": 7, "bpy": "কলম"})).unwrap();
        assert!(entry.id.is_empty());
        assert!(!entry.extra.contains_key("id"));
    }

    #[test]
    fn unassigned_id_is_not_serialized() {
        let entry = Entry::new("কলম", "কলম", "pen");
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("status").is_none());
    }

    #[test]
    fn reads_categories() {
        let entry = Entry::new("কলম", "", "pen").with_extra("cat", json!(["noun", 3, "tool"]));
        assert_eq!(entry.categories(), vec!["noun", "tool"]);
        assert!(Entry::new("a", "", "").categories().is_empty());
    }

    #[test]
    fn strips_submission_fields() {
        let mut entry: Entry = serde_json::from_value(json!({
            "id": "p1",
            "bpy": "কলম",
            "status": "pending",
            "addedAt": "2024-01-01T00:00:00.000Z",
            "fileName": "ক.json",
            "letter": "ক",
            "cat": ["noun"]
        }))
        .unwrap();
        assert!(entry.is_pending());

        entry.strip_submission_fields();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({"id": "p1", "bpy": "কলম", "cat": ["noun"]})
        );
    }

    #[test]
    fn absent_texts_are_not_written_back() {
        let raw = json!({"id": "k1", "bpy": "কলম"});
        let entry: Entry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(entry.bn, "");
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);

        let mut filled = entry.clone();
        filled.en = "pen".into();
        assert_eq!(
            serde_json::to_value(&filled).unwrap(),
            json!({"id": "k1", "bpy": "কলম", "en": "pen"})
        );
    }

    #[test]
    fn explicit_empty_texts_survive() {
        let raw = json!({"id": "k1", "bpy": "কলম", "bn": "", "en": ""});
        let entry: Entry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn null_text_reads_as_empty() {
        let entry: Entry =
            serde_json::from_value(json!({"id": "k1", "bpy": "কলম", "bn": null})).unwrap();
        assert_eq!(entry.bn, "");
        assert_eq!(entry.text(Language::Bengali), "");
    }

    #[test]
    fn odd_field_values_are_kept_verbatim() {
        let raw = json!({
            "id": "k1",
            "bpy": "কলম",
            "en": 5,
            "status": "approved",
            "addedAt": 1700000000
        });
        let entry: Entry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(entry.en, "");
        assert!(!entry.is_pending());
        assert_eq!(entry.status, Some(EntryStatus::Other(json!("approved"))));
        assert_eq!(entry.added_at, None);
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn text_set_later_replaces_parked_value() {
        let mut entry: Entry = serde_json::from_value(json!({"bpy": "কলম", "en": 5})).unwrap();
        entry.en = "pen".into();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, json!({"bpy": "কলম", "en": "pen"}));
    }

    #[test]
    fn patch_merges_shallowly_and_protects_identity() {
        let mut entry = Entry::new("কলম", "কলম", "pen").with_extra("cat", json!(["noun"]));
        entry.id = "keep-me".into();

        let patch = json!({"id": "stolen", "en": "quill", "status": "pending", "cat": ["tool"]});
        let patched = entry.patched(patch.as_object().unwrap()).unwrap();

        assert_eq!(patched.id, "keep-me");
        assert_eq!(patched.en, "quill");
        assert_eq!(patched.bpy, "কলম");
        assert_eq!(patched.status, None);
        assert_eq!(patched.categories(), vec!["tool"]);
    }

    #[test]
    fn patch_with_wrong_type_is_invalid_input() {
        let entry = Entry::new("কলম", "", "");
        let patch = json!({"bpy": 42});
        let err = entry.patched(patch.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, DictError::InvalidInput(_)));
    }

    #[test]
    fn null_in_patch_clears_a_field() {
        let entry = Entry::new("কলম", "কলম", "pen").with_extra("cat", json!(["noun"]));
        let patch = json!({"en": null, "cat": null});
        let patched = entry.patched(patch.as_object().unwrap()).unwrap();
        assert_eq!(patched.en, "");
        assert!(patched.categories().is_empty());
        let value = serde_json::to_value(&patched).unwrap();
        assert_eq!(value, json!({"bpy": "কলম", "bn": "কলম"}));
    }
}
