//! Per-board column weight storage

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    connect4::{Board, BoardKey, COLUMNS},
};

/// One preference weight per column
pub type ColumnWeights = [f64; COLUMNS];

/// Weights of a board key seen for the first time
pub const DEFAULT_WEIGHTS: ColumnWeights = [0.0; COLUMNS];

/// Storage that move selection and reinforcement read and write through.
///
/// Each `adjust` call is a complete read-modify-write of one column weight;
/// implementations shared between threads must make it atomic per key.
pub trait WeightStore {
    /// Weights for `board`, initializing the entry to [`DEFAULT_WEIGHTS`] if missing.
    fn column_weights(&mut self, board: &Board) -> Result<ColumnWeights>;

    /// Weights for `board` without creating an entry.
    fn peek(&self, board: &Board) -> Option<ColumnWeights>;

    /// Add `delta` to the weight of `column` on `board`.
    fn adjust(&mut self, board: &Board, column: usize, delta: f64) -> Result<()>;

    /// Forget every learned weight.
    fn clear(&mut self) -> Result<()>;
}

/// Mapping from canonical board keys to column weights
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    weights: HashMap<BoardKey, ColumnWeights>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weights for `board`, created as all zeros on first access.
    pub fn get_weights(&mut self, board: &Board) -> &mut ColumnWeights {
        self.weights.entry(board.key()).or_insert(DEFAULT_WEIGHTS)
    }

    pub fn weights(&self, board: &Board) -> Option<&ColumnWeights> {
        self.weights.get(&board.key())
    }

    pub fn weights_by_key(&self, key: &BoardKey) -> Option<&ColumnWeights> {
        self.weights.get(key)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BoardKey, &ColumnWeights)> {
        self.weights.iter()
    }
}

impl WeightStore for WeightTable {
    fn column_weights(&mut self, board: &Board) -> Result<ColumnWeights> {
        Ok(*self.get_weights(board))
    }

    fn peek(&self, board: &Board) -> Option<ColumnWeights> {
        self.weights(board).copied()
    }

    fn adjust(&mut self, board: &Board, column: usize, delta: f64) -> Result<()> {
        if column >= COLUMNS {
            return Err(Error::InvalidColumn { column });
        }
        self.get_weights(board)[column] += delta;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.weights.clear();
        Ok(())
    }
}

/// Weight table shared between concurrently running episodes.
///
/// Clones share the same underlying table.
#[derive(Debug, Clone, Default)]
pub struct SharedWeightTable {
    inner: Arc<Mutex<WeightTable>>,
}

impl SharedWeightTable {
    pub fn new(table: WeightTable) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    /// Run `f` with exclusive access to the table.
    pub fn with_table<R>(&self, f: impl FnOnce(&mut WeightTable) -> R) -> Result<R> {
        let mut guard = self.inner.lock().map_err(|_| Error::LockPoisoned {
            context: "access shared weight table".to_string(),
        })?;
        Ok(f(&mut *guard))
    }

    /// Copy of the current table contents
    pub fn snapshot(&self) -> Result<WeightTable> {
        self.with_table(|table| table.clone())
    }

    pub fn len(&self) -> Result<usize> {
        self.with_table(|table| table.len())
    }
}

impl WeightStore for SharedWeightTable {
    fn column_weights(&mut self, board: &Board) -> Result<ColumnWeights> {
        self.with_table(|table| *table.get_weights(board))
    }

    fn peek(&self, board: &Board) -> Option<ColumnWeights> {
        self.with_table(|table| table.weights(board).copied())
            .ok()
            .flatten()
    }

    fn adjust(&mut self, board: &Board, column: usize, delta: f64) -> Result<()> {
        self.with_table(|table| table.adjust(board, column, delta))?
    }

    fn clear(&mut self) -> Result<()> {
        self.with_table(|table| table.clear())?
    }
}
