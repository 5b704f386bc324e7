use crate::alphabet::PartitionKey;
use crate::error::Result;
use crate::index::LexicalIndex;
use crate::store::{Dataset, PartitionBackend};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlphabetCount {
    pub letter: PartitionKey,
    pub count: usize,
}

/// Dashboard numbers. Canonical words are the approved ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_words: usize,
    pub total_alphabets: usize,
    pub pending_words: usize,
    pub approved_words: usize,
    /// Most used `cat` tags, by count then name.
    pub categories: Vec<CategoryCount>,
    pub alphabet_counts: Vec<AlphabetCount>,
}

pub fn run<B: PartitionBackend>(index: &LexicalIndex<B>, top_categories: usize) -> Result<StatsReport> {
    let mut alphabet_counts = Vec::with_capacity(index.alphabet().len());
    let mut tags: HashMap<String, usize> = HashMap::new();
    let mut total_words = 0;

    for key in index.list_partition_keys() {
        let words = index.store().load(Dataset::Canonical, key);
        total_words += words.len();
        for word in &words {
            for tag in word.categories() {
                *tags.entry(tag.to_string()).or_default() += 1;
            }
        }
        alphabet_counts.push(AlphabetCount {
            letter: key.clone(),
            count: words.len(),
        });
    }

    let pending_words = index
        .scan(Dataset::Pending)
        .iter()
        .filter(|k| k.entry.is_pending())
        .count();

    let mut categories: Vec<CategoryCount> = tags
        .into_iter()
        .map(|(name, count)| CategoryCount { name, count })
        .collect();
    categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    categories.truncate(top_categories);

    Ok(StatsReport {
        total_words,
        total_alphabets: index.alphabet().len(),
        pending_words,
        approved_words: total_words,
        categories,
        alphabet_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemEnv;

    #[test]
    fn counts_words_tags_and_queue() {
        let env = MemEnv::new();
        env.plant(
            Dataset::Canonical,
            "ক",
            r#"[{"id":"1","bpy":"কলম","cat":["noun","tool"]},{"id":"2","bpy":"কল","cat":["noun"]}]"#,
        );
        env.plant(
            Dataset::Canonical,
            "ম",
            r#"[{"id":"3","bpy":"মা","cat":["family","noun"]}]"#,
        );
        env.plant(
            Dataset::Pending,
            "ক",
            r#"[{"id":"p1","bpy":"কথা","status":"pending"},{"id":"p2","bpy":"কই"}]"#,
        );

        let stats = run(&env.index(), 10).unwrap();
        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.approved_words, 3);
        assert_eq!(stats.total_alphabets, 50);
        assert_eq!(stats.pending_words, 1);
        assert_eq!(
            stats.categories,
            vec![
                CategoryCount { name: "noun".into(), count: 3 },
                CategoryCount { name: "family".into(), count: 1 },
                CategoryCount { name: "tool".into(), count: 1 },
            ]
        );
        assert_eq!(stats.alphabet_counts.len(), 50);
        assert_eq!(stats.alphabet_counts[11].count, 2);
    }

    #[test]
    fn keeps_only_top_categories() {
        let env = MemEnv::new();
        env.plant(
            Dataset::Canonical,
            "ক",
            r#"[{"id":"1","bpy":"ক","cat":["a","b","c"]},{"id":"2","bpy":"ক","cat":["c"]}]"#,
        );
        let stats = run(&env.index(), 2).unwrap();
        let names: Vec<&str> = stats.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
    }

    #[test]
    fn serializes_dashboard_field_names() {
        let env = MemEnv::new();
        let value = serde_json::to_value(run(&env.index(), 10).unwrap()).unwrap();
        assert!(value.get("totalWords").is_some());
        assert!(value.get("pendingWords").is_some());
    }
}
