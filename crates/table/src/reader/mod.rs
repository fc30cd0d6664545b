//! Lazy, all-or-nothing reading of a symbol table from a line source.
//!
//! A [`TableReader`] pulls lines on demand, skips blank ones and parses the
//! rest with [`parse_line`]. The first line that fails to parse, or the first
//! failure of the line source itself, is yielded as an error and ends the
//! sequence. Later lines are never looked at, so a malformed row can't be
//! silently dropped while the rows after it keep flowing into a merge.

use std::io::{self, BufRead};
use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::entry::SymbolEntry;
use crate::error::{MalformedSymbolTable, TableError};
use crate::parse::parse_line;


/// Reads entries from an infallible sequence of lines.
///
/// Entries come out in input order. Sorting is left to the caller.
///
/// # Examples
///
/// ```
/// let lines = ["int id placeholder 0x7f020000", "", "int string a 0x7f030000"];
/// let entries = rsym_table::read_table(lines).read_all().unwrap();
/// assert_eq!(entries.len(), 2);
/// ```
pub fn read_table<L>(lines: L) -> TableReader<impl Iterator<Item = io::Result<L::Item>>>
where
	L: IntoIterator,
	L::Item: AsRef<str>,
{
	TableReader::from_fallible(lines.into_iter().map(Ok::<_, io::Error>))
}

/// Single-pass iterator of parsed symbol entries.
///
/// Yields `Ok` for each entry and at most one `Err`, after which it is fused.
#[derive(Debug)]
pub struct TableReader<I> {
	lines: I,
	origin: Option<String>,
	line_number: usize,
	entries: usize,
	done: bool,
}

impl<I, S> TableReader<I>
where
	I: Iterator<Item = io::Result<S>>,
	S: AsRef<str>,
{
	/// Reads entries from a line source that may itself fail.
	///
	/// Source failures surface as [`TableError::SourceUnavailable`] with the
	/// I/O error untouched.
	pub fn from_fallible<L>(lines: L) -> Self
	where
		L: IntoIterator<IntoIter = I>,
	{
		Self {
			lines: lines.into_iter(),
			origin: None,
			line_number: 0,
			entries: 0,
			done: false,
		}
	}

	/// Labels the source (a path, a library name) for diagnostics.
	pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
		self.origin = Some(origin.into());
		self
	}

	/// Label attached with [`with_origin`](Self::with_origin).
	pub fn origin(&self) -> Option<&str> {
		self.origin.as_deref()
	}

	/// Number of lines consumed so far, blank ones included.
	pub fn line_number(&self) -> usize {
		self.line_number
	}

	/// Drains the reader, returning every entry or the first error.
	///
	/// # Errors
	///
	/// Returns the first [`TableError`] encountered; no partial table is kept.
	pub fn read_all(self) -> Result<Vec<SymbolEntry>, TableError> {
		self.collect()
	}

	fn fail(&mut self, error: TableError) -> Option<Result<SymbolEntry, TableError>> {
		self.done = true;
		warn!(
			origin = ?self.origin,
			line_number = self.line_number,
			error = %error,
			"Symbol table read failed"
		);
		Some(Err(error))
	}
}

impl<R: BufRead> TableReader<io::Lines<R>> {
	/// Reads entries from an already opened buffered reader.
	pub fn from_buf_read(reader: R) -> Self {
		Self::from_fallible(reader.lines())
	}
}

impl<I, S> Iterator for TableReader<I>
where
	I: Iterator<Item = io::Result<S>>,
	S: AsRef<str>,
{
	type Item = Result<SymbolEntry, TableError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		loop {
			let line = match self.lines.next() {
				Some(Ok(line)) => line,
				Some(Err(error)) => return self.fail(TableError::SourceUnavailable(error)),
				None => {
					self.done = true;
					debug!(origin = ?self.origin, entries = self.entries, "Finished reading symbol table");
					return None;
				}
			};
			self.line_number += 1;

			let text = line.as_ref();
			if text.trim().is_empty() {
				trace!(line_number = self.line_number, "Skipping blank symbol table line");
				continue;
			}

			return match parse_line(text) {
				Some(entry) => {
					self.entries += 1;
					Some(Ok(entry))
				}
				None => {
					let malformed = MalformedSymbolTable {
						origin: self.origin.clone(),
						line_number: self.line_number,
						line: text.to_owned(),
					};
					self.fail(malformed.into())
				}
			};
		}
	}
}

impl<I, S> FusedIterator for TableReader<I>
where
	I: Iterator<Item = io::Result<S>>,
	S: AsRef<str>,
{
}
