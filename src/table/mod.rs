//! Ordered, named-column tables read from delimited text.
//!
//! A [`Table`] is a sequence of [`Record`]s sharing one header. Cells are kept as
//! trimmed strings; interpretation (integer labels, identifiers) happens downstream.
//! Columns are always resolved by name through the header index, never by position
//! in the source file.
//!
//! The schema check ([`Table::require_columns`]) and projection ([`Table::project`])
//! live in [`schema`].

pub mod error;
pub mod model;
pub mod reader;
pub mod schema;


pub use error::{TableError, TableResult};
pub use model::{Record, Table};
