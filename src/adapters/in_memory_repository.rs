//! In-memory weight table repository for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, bot::WeightTable, error::Error, ports::WeightTableRepository};

/// In-memory repository for testing.
///
/// Stores serialized tables in a shared map keyed by path. All clones share
/// the same underlying storage.
///
/// # Examples
///
/// ```
/// use dropfour::adapters::InMemoryRepository;
/// use dropfour::bot::WeightTable;
/// use dropfour::ports::WeightTableRepository;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&WeightTable::new(), Path::new("table"))?;
/// let loaded = repo.load(Path::new("table"))?;
/// assert!(loaded.is_empty());
/// # Ok::<(), dropfour::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.storage.lock().map_err(|_| Error::LockPoisoned {
            context: "access in-memory repository".to_string(),
        })
    }

    /// Number of tables currently stored.
    pub fn count(&self) -> Result<usize> {
        Ok(self.storage()?.len())
    }

    pub fn clear(&self) -> Result<()> {
        self.storage()?.clear();
        Ok(())
    }

    pub fn contains(&self, path: &Path) -> Result<bool> {
        let key = path.to_string_lossy().to_string();
        Ok(self.storage()?.contains_key(&key))
    }
}

impl WeightTableRepository for InMemoryRepository {
    fn save(&self, table: &WeightTable, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec(table).map_err(|e| Error::SerializationContext {
            operation: "serialize weight table for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage()?.insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<WeightTable> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage()?;

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load weight table from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize weight table from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}
