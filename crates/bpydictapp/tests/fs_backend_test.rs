use bpydictapp::alphabet::{Alphabet, PartitionKey};
use bpydictapp::error::DictError;
use bpydictapp::model::Entry;
use bpydictapp::store::fs_backend::FsBackend;
use bpydictapp::store::partition_store::PartitionStore;
use bpydictapp::store::{Dataset, PartitionBackend};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, PartitionStore<FsBackend>) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    backend.init().unwrap();
    (dir, PartitionStore::with_backend(backend))
}

fn key(letter: &str) -> PartitionKey {
    Alphabet::default().key(letter).cloned().unwrap()
}

const BARE_FIXTURE: &str = r#"[
  {
    "id": "k1",
    "bpy": "কলম",
    "bn": "কলম",
    "en": "pen",
    "cat": [
      "noun"
    ],
    "pronunciation": "kɔlɔm"
  },
  {
    "id": "k2",
    "bpy": "কল",
    "bn": "নল",
    "en": "tap"
  }
]"#;

const WRAPPED_FIXTURE: &str = r#"{
  "letter": "ক",
  "words": [
    {
      "id": "k1",
      "bpy": "কলম",
      "bn": "কলম",
      "en": "pen"
    }
  ]
}"#;

const SPARSE_FIXTURE: &str = r#"[
  {
    "id": "k1",
    "bpy": "কলম"
  },
  {
    "id": "k2",
    "bpy": "কল",
    "en": "tap",
    "status": "approved",
    "synonyms": []
  },
  {
    "id": "k3",
    "bpy": "কথা",
    "bn": 7,
    "addedAt": 1700000000
  }
]"#;

#[test]
fn test_fs_backend_layout() {
    let (dir, store) = setup();
    store
        .mutate(Dataset::Canonical, &key("ক"), |file| {
            file.entries_mut().push(Entry::new("কলম", "", ""));
            Ok(())
        })
        .unwrap();
    store
        .mutate(Dataset::Pending, &key("ক"), |file| {
            file.entries_mut().push(Entry::new("কল", "", ""));
            Ok(())
        })
        .unwrap();

    assert!(dir.path().join("alphabets").join("ক.json").is_file());
    assert!(dir.path().join("usersData").join("ক.json").is_file());
}

#[test]
fn test_fs_backend_custom_dataset_dirs() {
    let dir = TempDir::new().unwrap();
    let backend =
        FsBackend::new(dir.path().to_path_buf()).with_dataset_dirs("approved", "queue");
    backend.init().unwrap();
    backend
        .write_partition(Dataset::Pending, &key("ক"), "[]")
        .unwrap();
    assert!(dir.path().join("queue").join("ক.json").is_file());
    assert!(dir.path().join("approved").is_dir());
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, store) = setup();
    for word in ["কলম", "কল", "কথা"] {
        store
            .mutate(Dataset::Canonical, &key("ক"), |file| {
                file.entries_mut().push(Entry::new(word, "", ""));
                Ok(())
            })
            .unwrap();
    }

    let entries = fs::read_dir(dir.path().join("alphabets")).unwrap();
    for entry in entries {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
    assert_eq!(store.load(Dataset::Canonical, &key("ক")).len(), 3);
}

#[test]
fn test_round_trip_bare_is_byte_identical() {
    let (dir, store) = setup();
    let path = dir.path().join("alphabets").join("ক.json");
    fs::write(&path, BARE_FIXTURE).unwrap();

    let file = store
        .load_for_update(Dataset::Canonical, &key("ক"))
        .unwrap();
    store.save(Dataset::Canonical, &key("ক"), &file).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), BARE_FIXTURE);
}

#[test]
fn test_round_trip_wrapped_is_byte_identical() {
    let (dir, store) = setup();
    let path = dir.path().join("usersData").join("ক.json");
    fs::write(&path, WRAPPED_FIXTURE).unwrap();

    let file = store.load_for_update(Dataset::Pending, &key("ক")).unwrap();
    store.save(Dataset::Pending, &key("ক"), &file).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), WRAPPED_FIXTURE);
}

#[test]
fn test_round_trip_keeps_missing_and_odd_fields_as_found() {
    let (dir, store) = setup();
    let path = dir.path().join("alphabets").join("ক.json");
    fs::write(&path, SPARSE_FIXTURE).unwrap();

    let file = store
        .load_for_update(Dataset::Canonical, &key("ক"))
        .unwrap();
    assert_eq!(file.entries().len(), 3);
    assert_eq!(file.entries()[0].bn, "");
    assert_eq!(file.entries()[2].bn, "");
    store.save(Dataset::Canonical, &key("ক"), &file).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), SPARSE_FIXTURE);
}

#[test]
fn test_null_text_does_not_cost_the_partition() {
    let (dir, store) = setup();
    let path = dir.path().join("alphabets").join("ক.json");
    fs::write(
        &path,
        r#"[{"id":"k1","bpy":"কলম","bn":null,"en":"pen"},{"id":"k2","bpy":"কল","bn":"নল","en":"tap"}]"#,
    )
    .unwrap();

    assert_eq!(store.load(Dataset::Canonical, &key("ক")).len(), 2);
    store
        .mutate(Dataset::Canonical, &key("ক"), |file| {
            let mut word = Entry::new("কথা", "", "");
            word.id = "k3".into();
            file.entries_mut().push(word);
            Ok(())
        })
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let words = value.as_array().expect("bare shape kept");
    let ids: Vec<&str> = words.iter().filter_map(|w| w["id"].as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids, vec!["k1", "k2", "k3"]);
    assert_eq!(words[0]["en"], "pen");
}

#[test]
fn test_identity_stable_across_loads() {
    let (dir, store) = setup();
    let path = dir.path().join("alphabets").join("ক.json");
    let raw = r#"[{"bpy":"কলম","bn":"কলম","en":"pen"},{"bpy":"কল"},{"bpy":"কলম","bn":"কলম","en":"pen"}]"#;
    fs::write(&path, raw).unwrap();

    let first: Vec<String> = store
        .load(Dataset::Canonical, &key("ক"))
        .into_iter()
        .map(|e| e.id)
        .collect();
    let second: Vec<String> = store
        .load(Dataset::Canonical, &key("ক"))
        .into_iter()
        .map(|e| e.id)
        .collect();

    assert_eq!(first, second);
    assert_eq!(first[0], "359052fa7a59");
    // same text at another position gets another id
    assert_ne!(first[0], first[2]);
    // loading never writes
    assert_eq!(fs::read_to_string(&path).unwrap(), raw);
}

#[test]
fn test_backfilled_ids_persist_on_next_write() {
    let (dir, store) = setup();
    let path = dir.path().join("alphabets").join("ক.json");
    fs::write(&path, r#"[{"bpy":"কলম","bn":"কলম","en":"pen"}]"#).unwrap();

    store
        .mutate(Dataset::Canonical, &key("ক"), |file| {
            file.entries_mut().insert(0, Entry::new("কল", "", ""));
            Ok(())
        })
        .unwrap();

    // The original word kept the id it was first seen with, despite moving
    let words = store.load(Dataset::Canonical, &key("ক"));
    assert_eq!(words[1].id, "359052fa7a59");
    assert!(fs::read_to_string(&path).unwrap().contains("359052fa7a59"));
}

#[test]
fn test_malformed_partition_fails_forward() {
    let (dir, store) = setup();
    let path = dir.path().join("alphabets").join("ক.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(store.load(Dataset::Canonical, &key("ক")).is_empty());
    assert!(matches!(
        store.read_file(Dataset::Canonical, &key("ক")),
        Err(DictError::MalformedPartition { .. })
    ));

    store
        .mutate(Dataset::Canonical, &key("ক"), |file| {
            file.entries_mut().push(Entry::new("কলম", "", ""));
            Ok(())
        })
        .unwrap();
    assert_eq!(store.load(Dataset::Canonical, &key("ক")).len(), 1);
}

#[test]
fn test_missing_root_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("not-there");
    let store = PartitionStore::with_backend(FsBackend::new(root.clone()));

    assert!(!store.is_available());
    assert!(store.load(Dataset::Canonical, &key("ক")).is_empty());
    let err = store
        .mutate(Dataset::Canonical, &key("ক"), |_| Ok(()))
        .unwrap_err();
    assert!(matches!(err, DictError::StorageUnavailable(_)));
    assert!(!root.exists());
}

#[test]
fn test_list_partition_names_skips_other_files() {
    let (dir, store) = setup();
    let canonical = dir.path().join("alphabets");
    fs::write(canonical.join("ক.json"), "[]").unwrap();
    fs::write(canonical.join("notes.txt"), "hi").unwrap();
    fs::create_dir(canonical.join("backup.json")).unwrap();

    let names = store
        .backend()
        .list_partition_names(Dataset::Canonical)
        .unwrap();
    assert_eq!(names, vec!["ক"]);
}
