//! Error types for symbol entries, table reading and merging.

use std::fmt;

use thiserror::Error;

use crate::entry::{SymbolEntry, SymbolKey};

/// Names one of the four columns of a symbol table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
	/// Storage shape of the identifier (`int`, `int[]`).
	IdKind,
	/// Resource category (`id`, `string`, `styleable`, ...).
	ResourceType,
	/// Resource name.
	Name,
	/// Identifier payload as written.
	IdValue,
}

impl EntryField {
	/// Column name as used in diagnostics.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::IdKind => "id_kind",
			Self::ResourceType => "resource_type",
			Self::Name => "name",
			Self::IdValue => "id_value",
		}
	}
}

impl fmt::Display for EntryField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Rejected construction or rewrite of a [`SymbolEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
	/// A required field was the empty string.
	#[error("invalid symbol entry: `{field}` must not be empty")]
	Empty {
		/// The offending column.
		field: EntryField,
	},
}

/// A non-blank line that does not match `<id_kind> <resource_type> <name> <id_value>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
	"malformed symbol table{} at line {line_number}: {line:?}",
	.origin.as_ref().map(|o| format!(" {o}")).unwrap_or_default()
)]
pub struct MalformedSymbolTable {
	/// Label of the source being read, if the caller attached one.
	pub origin: Option<String>,
	/// 1-based line number, counting blank lines.
	pub line_number: usize,
	/// The offending line, untrimmed.
	pub line: String,
}

/// Failure while reading a symbol table from a line source.
#[derive(Debug, Error)]
pub enum TableError {
	/// A line could not be parsed.
	#[error(transparent)]
	Malformed(#[from] MalformedSymbolTable),

	/// The line source itself failed.
	#[error("symbol table source unavailable: {0}")]
	SourceUnavailable(#[source] std::io::Error),
}

/// Failure while merging entries into a [`SymbolTable`](crate::SymbolTable).
#[derive(Debug, Error)]
pub enum MergeError {
	/// Two sources disagree on the storage shape of the same resource.
	#[error(
		"conflicting id kinds for {key}: existing `{}` vs incoming `{}`",
		existing.id_kind(),
		incoming.id_kind()
	)]
	KindConflict {
		/// Key shared by both entries.
		key: SymbolKey,
		/// Entry already present in the table.
		existing: SymbolEntry,
		/// Entry that was refused.
		incoming: SymbolEntry,
	},

	/// A duplicate key under [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
	#[error("duplicate symbol {key}")]
	Duplicate {
		/// The repeated key.
		key: SymbolKey,
	},

	/// Reading a source failed part-way through a merge.
	#[error(transparent)]
	Table(#[from] TableError),
}

/// Result type for entry construction.
pub type Result<T, E = EntryError> = std::result::Result<T, E>;
