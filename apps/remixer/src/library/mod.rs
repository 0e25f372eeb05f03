//! Prompt library storage.
//!
//! The library is read once at startup and rewritten in full on every change.
//! Storage sits behind `PromptRepository` so the medium can change without
//! touching page logic.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::models::prompt::Prompt;

/// Storage key for the saved prompt collection.
pub const STORAGE_KEY: &str = "savedPrompts";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored prompts are not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Read-all / write-all store for user prompts. The built-in prompt is never
/// passed through here.
pub trait PromptRepository: Send {
    /// Returns the stored collection, or an empty one if nothing is stored.
    fn load_all(&self) -> Result<Vec<Prompt>, RepositoryError>;

    /// Replaces the stored collection with `prompts`.
    fn save_all(&self, prompts: &[Prompt]) -> Result<(), RepositoryError>;
}

fn decode(raw: &str) -> Result<Vec<Prompt>, RepositoryError> {
    Ok(serde_json::from_str(raw)?)
}

fn encode(prompts: &[Prompt]) -> Result<String, RepositoryError> {
    Ok(serde_json::to_string(prompts)?)
}

// ────────────────────────────────────────────────────────────────────────────
// JsonFileRepository
// ────────────────────────────────────────────────────────────────────────────

/// Stores the collection as a JSON array in `<data_dir>/savedPrompts.json`.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PromptRepository for JsonFileRepository {
    fn load_all(&self) -> Result<Vec<Prompt>, RepositoryError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save_all(&self, prompts: &[Prompt]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, encode(prompts)?)?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryRepository
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the encoded collection in memory. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    raw: Arc<Mutex<Option<String>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with an arbitrary stored value.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The currently stored value, exactly as written.
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().map(|slot| slot.clone()).unwrap_or_default()
    }
}

impl PromptRepository for MemoryRepository {
    fn load_all(&self) -> Result<Vec<Prompt>, RepositoryError> {
        match self.raw() {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    fn save_all(&self, prompts: &[Prompt]) -> Result<(), RepositoryError> {
        let encoded = encode(prompts)?;
        if let Ok(mut slot) = self.raw.lock() {
            *slot = Some(encoded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Prompt> {
        vec![
            Prompt {
                id: "a".to_string(),
                name: "Formal".to_string(),
                content: "Rewrite formally:".to_string(),
            },
            Prompt {
                id: "b".to_string(),
                name: "Haiku".to_string(),
                content: "Turn this into a haiku:".to_string(),
            },
        ]
    }

    #[test]
    fn test_file_repository_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nested"));
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_file_repository_overwrites_whole_collection() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nested"));

        repo.save_all(&sample()).unwrap();
        repo.save_all(&sample()[1..]).unwrap();

        assert_eq!(repo.load_all().unwrap(), sample()[1..].to_vec());
        assert!(repo.path().ends_with("savedPrompts.json"));
    }

    #[test]
    fn test_file_repository_reports_malformed_data() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        fs::write(repo.path(), "{not json").unwrap();

        assert!(matches!(
            repo.load_all(),
            Err(RepositoryError::Malformed(_))
        ));
    }

    #[test]
    fn test_memory_repository_stores_json_array() {
        let repo = MemoryRepository::new();
        assert!(repo.load_all().unwrap().is_empty());

        repo.save_all(&sample()[..1]).unwrap();
        assert_eq!(
            repo.raw().unwrap(),
            r#"[{"id":"a","name":"Formal","content":"Rewrite formally:"}]"#
        );

        let shared = repo.clone();
        assert_eq!(shared.load_all().unwrap(), sample()[..1].to_vec());
    }
}
