use crate::alphabet::Alphabet;
use crate::index::LexicalIndex;
use crate::store::mem_backend::MemBackend;
use crate::store::partition_store::PartitionStore;
use crate::store::Dataset;

/// An in-memory store plus the alphabet commands run against.
pub struct MemEnv {
    pub store: PartitionStore<MemBackend>,
    pub alphabet: Alphabet,
}

impl Default for MemEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl MemEnv {
    pub fn new() -> Self {
        Self::with_alphabet(Alphabet::default())
    }

    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self {
            store: PartitionStore::with_backend(MemBackend::new()),
            alphabet,
        }
    }

    /// Writes raw partition text directly into the backend.
    pub fn plant(&self, dataset: Dataset, name: &str, content: &str) {
        self.store.backend().insert_raw(dataset, name, content);
    }

    pub fn index(&self) -> LexicalIndex<'_, MemBackend> {
        LexicalIndex::new(&self.store, &self.alphabet)
    }
}
