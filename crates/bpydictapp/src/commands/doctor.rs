use crate::commands::CmdMessage;
use crate::error::{DictError, Result};
use crate::index::LexicalIndex;
use crate::store::{Dataset, PartitionBackend};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionProblem {
    pub dataset: Dataset,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MisplacedWord {
    pub dataset: Dataset,
    pub partition: String,
    pub id: String,
    pub bpy: String,
    /// Where the word belongs, if anywhere.
    pub expected: Option<String>,
}

/// Read-only consistency report. Nothing is repaired.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    /// Partitions that will read as empty and be replaced on the next write.
    pub malformed: Vec<PartitionProblem>,
    /// Files whose name is not a partition key. They are never read.
    pub stray: Vec<PartitionProblem>,
    pub misplaced: Vec<MisplacedWord>,
    /// Ids held by more than one canonical word.
    pub duplicate_ids: Vec<String>,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
            && self.stray.is_empty()
            && self.misplaced.is_empty()
            && self.duplicate_ids.is_empty()
    }

    pub fn messages(&self) -> Vec<CmdMessage> {
        if self.is_clean() {
            return vec![CmdMessage::success("No inconsistencies found.")];
        }

        let mut messages = vec![CmdMessage::warning("Inconsistencies found:")];
        for p in &self.malformed {
            messages.push(CmdMessage::warning(format!(
                "  - Malformed {} partition {}: {} (will be overwritten on next write)",
                p.dataset, p.name, p.reason
            )));
        }
        for p in &self.stray {
            messages.push(CmdMessage::info(format!(
                "  - Stray {} file {}.json: {}",
                p.dataset, p.name, p.reason
            )));
        }
        for m in &self.misplaced {
            let expected = m.expected.as_deref().unwrap_or("no partition");
            messages.push(CmdMessage::info(format!(
                "  - {} word {} ({}) is in {} but belongs in {}",
                m.dataset, m.id, m.bpy, m.partition, expected
            )));
        }
        for id in &self.duplicate_ids {
            messages.push(CmdMessage::warning(format!(
                "  - Duplicate canonical id {}",
                id
            )));
        }
        messages
    }
}

pub fn run<B: PartitionBackend>(index: &LexicalIndex<B>) -> Result<DoctorReport> {
    let store = index.store();
    let alphabet = index.alphabet();
    let mut report = DoctorReport::default();
    let mut id_counts: HashMap<String, usize> = HashMap::new();

    for dataset in Dataset::ALL {
        for name in store.backend().list_partition_names(dataset)? {
            let key = match alphabet.key(&name) {
                Some(key) if key.as_str() == name => key,
                Some(key) => {
                    report.stray.push(PartitionProblem {
                        dataset,
                        name,
                        reason: format!("use the decomposed spelling {}", key),
                    });
                    continue;
                }
                None => {
                    report.stray.push(PartitionProblem {
                        dataset,
                        name,
                        reason: "not a letter of the alphabet".to_string(),
                    });
                    continue;
                }
            };

            let file = match store.read_file(dataset, key) {
                Ok(Some(file)) => file,
                Ok(None) => continue,
                Err(DictError::MalformedPartition { reason, .. }) => {
                    report.malformed.push(PartitionProblem {
                        dataset,
                        name,
                        reason,
                    });
                    continue;
                }
                Err(e) => {
                    report.malformed.push(PartitionProblem {
                        dataset,
                        name,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            for word in file.entries() {
                let expected = alphabet.derive_key(&word.bpy);
                if expected != Some(key) {
                    report.misplaced.push(MisplacedWord {
                        dataset,
                        partition: key.to_string(),
                        id: word.id.clone(),
                        bpy: word.bpy.clone(),
                        expected: expected.map(|k| k.to_string()),
                    });
                }
                if dataset == Dataset::Canonical {
                    *id_counts.entry(word.id.clone()).or_default() += 1;
                }
            }
        }
    }

    report.duplicate_ids = id_counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id)
        .collect();
    report.duplicate_ids.sort();
    Ok(report)
}
