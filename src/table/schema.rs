//! Required-column checks and projection.

use std::collections::BTreeSet;

use super::error::{TableError, TableResult};
use super::model::{Record, Table};

impl Table {
    /// Fails with [`TableError::MissingColumns`] naming every required column the
    /// header lacks. The check is order-insensitive and the names are reported sorted.
    ///
    /// A required column that appears more than once in the header is ambiguous and
    /// fails with [`TableError::Parse`]. Repeated columns that are not required are
    /// ignored.
    pub fn require_columns(&self, required: &[&str]) -> TableResult<()> {
        let missing: BTreeSet<&str> = required
            .iter()
            .copied()
            .filter(|name| !self.has_column(name))
            .collect();

        if !missing.is_empty() {
            return Err(TableError::MissingColumns {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }

        if let Some(name) = required.iter().find(|name| self.is_duplicated(name)) {
            return Err(TableError::Parse {
                reason: format!("duplicate column '{}' in header", name),
            });
        }

        Ok(())
    }

    /// Returns a new table holding exactly `columns`, in that order.
    ///
    /// Runs [`Table::require_columns`] first, so callers need not check separately.
    pub fn project(&self, columns: &[&str]) -> TableResult<Table> {
        self.require_columns(columns)?;

        let positions: Vec<usize> = columns
            .iter()
            .filter_map(|name| self.column_position(name))
            .collect();

        let rows = self
            .rows()
            .iter()
            .map(|record| {
                Record::new(
                    positions
                        .iter()
                        .map(|&position| record.get(position).unwrap_or_default().to_string())
                        .collect(),
                )
            })
            .collect();

        Table::new(columns.iter().map(|name| name.to_string()).collect(), rows)
    }
}
