//! MessagePack implementation of the weight table repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, bot::WeightTable, error::Error, ports::WeightTableRepository};

/// MessagePack-based weight table repository.
///
/// # Examples
///
/// ```no_run
/// use dropfour::adapters::MsgPackRepository;
/// use dropfour::bot::WeightTable;
/// use dropfour::ports::WeightTableRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let table = WeightTable::new();
///
/// repo.save(&table, Path::new("weights.msgpack"))?;
/// let loaded = repo.load(Path::new("weights.msgpack"))?;
/// # Ok::<(), dropfour::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl WeightTableRepository for MsgPackRepository {
    fn save(&self, table: &WeightTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, table).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize weight table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        log::debug!("saved {} weight entries to {path:?}", table.len());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<WeightTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let table: WeightTable = rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize weight table from MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        log::debug!("loaded {} weight entries from {path:?}", table.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{bot::WeightStore, connect4::Board};

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("weights.msgpack");

        let mut table = WeightTable::new();
        table.adjust(&Board::new(), 3, 17.0).unwrap();
        table
            .adjust(&Board::from_moves(&[3, 3]).unwrap(), 2, -0.1)
            .unwrap();

        let repo = MsgPackRepository::new();
        repo.save(&table, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let repo = MsgPackRepository::new();
        let result = repo.load(&temp_dir.path().join("missing.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_garbage_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.msgpack");
        std::fs::write(&path, b"not a weight table").unwrap();
        let result = MsgPackRepository::new().load(&path);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }
}
