use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use super::models::{DiseaseCatalog, DiseaseRecord};
use super::KnowledgeBase;

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed disease catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct KnowledgeBaseLoader {
    path: PathBuf,
}

impl KnowledgeBaseLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<KnowledgeBase, KnowledgeBaseError> {
        info!("Loading disease catalog from {}", self.path.display());

        let raw = std::fs::read_to_string(&self.path).map_err(|source| KnowledgeBaseError::Io {
            path: self.path.clone(),
            source,
        })?;
        let knowledge_base = parse_catalog(&raw)?;

        info!("Loaded {} diseases", knowledge_base.len());
        Ok(knowledge_base)
    }

    /// Like [`load`](Self::load), but a missing or corrupt catalog yields an empty base.
    pub fn load_or_empty(&self) -> KnowledgeBase {
        match self.load() {
            Ok(knowledge_base) => knowledge_base,
            Err(e) => {
                error!("Failed to load medical disease data: {}", e);
                KnowledgeBase::empty()
            }
        }
    }
}

/// Fails only when the document itself is not JSON. Entries that are not objects are skipped.
pub(crate) fn parse_catalog(raw: &str) -> Result<KnowledgeBase, KnowledgeBaseError> {
    let catalog: DiseaseCatalog = serde_json::from_str(raw)?;

    let records = catalog
        .diseases
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            match serde_json::from_value::<DiseaseRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping disease entry {}: {}", position, e);
                    None
                }
            }
        });

    Ok(KnowledgeBase::from_records(records))
}
