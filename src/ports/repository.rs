//! Repository port for weight table persistence.

use std::path::Path;

use crate::{Result, bot::WeightTable};

/// Port for persisting and loading weight tables.
///
/// # Examples
///
/// ```no_run
/// use dropfour::ports::WeightTableRepository;
/// use dropfour::bot::WeightTable;
/// use std::path::Path;
///
/// fn save_table<R: WeightTableRepository>(
///     repo: &R,
///     table: &WeightTable,
///     path: &Path,
/// ) -> dropfour::Result<()> {
///     repo.save(table, path)
/// }
/// ```
pub trait WeightTableRepository {
    /// Save a table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization fails.
    fn save(&self, table: &WeightTable, path: &Path) -> Result<()>;

    /// Load a table from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path` or the data is corrupted.
    fn load(&self, path: &Path) -> Result<WeightTable>;
}
