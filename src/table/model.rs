use std::collections::{BTreeSet, HashMap};

use super::error::{TableError, TableResult};

/// One row of a [`Table`]; cells are ordered like the table header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    cells: Vec<String>,
}

impl Record {
    /// Creates a record from its cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Returns the cell at `position`, if present.
    #[inline]
    pub fn get(&self, position: usize) -> Option<&str> {
        self.cells.get(position).map(String::as_str)
    }

    /// Returns the number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the record has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Header plus rows, with a name → position map for lookups.
///
/// A repeated header name resolves to its first position. Repeats only fail when
/// the column is required (see [`Table::require_columns`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    duplicated: BTreeSet<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Builds a table, rejecting ragged rows.
    pub fn new(columns: Vec<String>, rows: Vec<Record>) -> TableResult<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        let mut duplicated = BTreeSet::new();
        for (position, name) in columns.iter().enumerate() {
            if index.contains_key(name) {
                duplicated.insert(name.clone());
            } else {
                index.insert(name.clone(), position);
            }
        }

        if let Some((row, record)) = rows
            .iter()
            .enumerate()
            .find(|(_, record)| record.len() != columns.len())
        {
            return Err(TableError::Parse {
                reason: format!(
                    "row {} has {} fields, header has {}",
                    row + 1,
                    record.len(),
                    columns.len()
                ),
            });
        }

        Ok(Self {
            columns,
            index,
            duplicated,
            rows,
        })
    }

    /// Returns the header in order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows in input order.
    #[inline]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if the header contains `name`.
    #[inline]
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns `true` if `name` appears more than once in the header.
    #[inline]
    pub fn is_duplicated(&self, name: &str) -> bool {
        self.duplicated.contains(name)
    }

    /// Resolves a column name to its first position.
    #[inline]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Iterates one column's cells in row order.
    pub fn column(&self, name: &str) -> TableResult<impl Iterator<Item = &str> + '_> {
        let position = self
            .column_position(name)
            .ok_or_else(|| TableError::MissingColumns {
                missing: vec![name.to_string()],
            })?;

        Ok(self
            .rows
            .iter()
            .map(move |record| record.get(position).unwrap_or_default()))
    }

    /// Consumes the table and returns its rows.
    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }
}
