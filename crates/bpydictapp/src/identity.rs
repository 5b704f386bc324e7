//! Word identities.
//!
//! Stored words normally carry an `id`. Words loaded without one get a
//! deterministic id derived from their text, partition file and position, so
//! reloading an unchanged partition always yields the same ids. The scheme
//! matches ids already handed out for existing data files:
//!
//! ```text
//! sha1("{bpy}|{bn}|{en}|{key}.json|{ordinal}")[..12]   (lowercase hex)
//! ```
//!
//! New words (admin create, public submission) get a random v4 UUID instead.

use crate::alphabet::PartitionKey;
use crate::model::Entry;
use sha1::{Digest, Sha1};
use uuid::Uuid;

pub const BACKFILL_ID_LEN: usize = 12;

pub fn backfill_id(entry: &Entry, key: &PartitionKey, ordinal: usize) -> String {
    let seed = format!(
        "{}|{}|{}|{}|{}",
        entry.bpy,
        entry.bn,
        entry.en,
        key.file_name(),
        ordinal
    );
    let mut encoded = hex::encode(Sha1::digest(seed.as_bytes()));
    encoded.truncate(BACKFILL_ID_LEN);
    encoded
}

/// Assigns ids to every entry that lacks one. Returns how many were assigned.
pub fn backfill_ids(entries: &mut [Entry], key: &PartitionKey) -> usize {
    let mut assigned = 0;
    for (ordinal, entry) in entries.iter_mut().enumerate() {
        if entry.id.is_empty() {
            entry.id = backfill_id(entry, key, ordinal);
            assigned += 1;
        }
    }
    assigned
}

pub fn fresh_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn ka() -> PartitionKey {
        Alphabet::default().key("ক").cloned().unwrap()
    }

    #[test]
    fn backfill_matches_existing_ids() {
        let entry = Entry::new("কলম", "কলম", "pen");
        assert_eq!(backfill_id(&entry, &ka(), 0), "359052fa7a59");
        assert_eq!(backfill_id(&entry, &ka(), 1), "48e04552bee5");
    }

    #[test]
    fn backfill_only_touches_missing_ids() {
        let mut entries = vec![Entry::new("কলম", "কলম", "pen"), Entry::new("কল", "", "")];
        entries[1].id = "explicit".into();

        let assigned = backfill_ids(&mut entries, &ka());
        assert_eq!(assigned, 1);
        assert_eq!(entries[0].id, "359052fa7a59");
        assert_eq!(entries[1].id, "explicit");
    }

    #[test]
    fn backfill_is_deterministic() {
        let mut a = vec![Entry::new("কলম", "", ""), Entry::new("কল", "", "")];
        let mut b = a.clone();
        backfill_ids(&mut a, &ka());
        backfill_ids(&mut b, &ka());
        assert_eq!(a, b);
        assert_ne!(a[0].id, a[1].id);
    }

    #[test]
    fn fresh_ids_are_unique_hex() {
        let a = fresh_id();
        let b = fresh_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
