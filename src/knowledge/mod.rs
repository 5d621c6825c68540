pub mod loader;
pub mod models;

pub use loader::{KnowledgeBaseError, KnowledgeBaseLoader};
pub use models::DiseaseRecord;

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;


/// Read-only disease catalog keyed by lower-cased name, iterated in source order.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<(String, DiseaseRecord)>,
    index: HashMap<String, usize>,
}

impl KnowledgeBase {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the base by key; a repeated name replaces the earlier record in place.
    pub fn from_records(records: impl IntoIterator<Item = DiseaseRecord>) -> Self {
        let mut kb = Self::default();
        for record in records {
            let key = record.key();
            match kb.index.get(&key) {
                Some(&position) => {
                    debug!("Duplicate disease '{}' replaces earlier entry", key);
                    kb.entries[position].1 = record;
                }
                None => {
                    kb.index.insert(key.clone(), kb.entries.len());
                    kb.entries.push((key, record));
                }
            }
        }
        kb
    }

    pub fn from_json_str(raw: &str) -> Result<Self, KnowledgeBaseError> {
        loader::parse_catalog(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeBaseError> {
        KnowledgeBaseLoader::new(path.as_ref()).load()
    }

    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        KnowledgeBaseLoader::new(path.as_ref()).load_or_empty()
    }

    pub fn get(&self, name: &str) -> Option<&DiseaseRecord> {
        self.index
            .get(&name.to_lowercase())
            .map(|&position| &self.entries[position].1)
    }

    /// Yields `(key, record)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiseaseRecord)> {
        self.entries
            .iter()
            .map(|(key, record)| (key.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
