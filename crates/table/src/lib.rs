//! In-memory model of Android `R.txt` resource symbol tables.
//!
//! Provides:
//! - [`SymbolEntry`]: one `<id_kind> <resource_type> <name> <id_value>` row, whose
//!   identity is its [`SymbolKey`] alone
//! - [`parse_line`]: one line to an optional entry
//! - [`read_table`] / [`TableReader`]: lazy, all-or-nothing table reading
//! - [`SymbolTable`]: sorted merging with an explicit [`DuplicatePolicy`]
//!
//! Assigning final identifier values is left to the caller, which rewrites
//! entries through [`SymbolEntry::with_id_value`].

/// Symbol entries and their key/payload split.
pub mod entry;
/// Error types for entries, reading and merging.
pub mod error;
/// Single-line parsing.
pub mod parse;
/// Lazy table reading from line sources.
pub mod reader;
/// Sorted, deduplicating symbol table.
pub mod table;

pub use entry::{ARRAY_KIND, SymbolEntry, SymbolKey, SymbolPayload};
pub use error::{EntryError, EntryField, MalformedSymbolTable, MergeError, TableError};
pub use parse::parse_line;
pub use reader::{TableReader, read_table};
pub use table::{DuplicatePolicy, Insertion, SymbolTable};
