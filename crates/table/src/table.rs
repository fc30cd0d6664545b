//! Sorted, deduplicating symbol table for merging library tables.
//!
//! Entries are keyed by `(resource_type, name)`. Which copy survives when two
//! sources define the same key is decided by an explicit [`DuplicatePolicy`],
//! and copies that disagree on `id_kind` are never collapsed.

use std::collections::BTreeSet;

use tracing::debug;

use crate::entry::{SymbolEntry, SymbolKey};
use crate::error::{EntryError, MergeError, TableError};

/// What to do when an inserted entry's key is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
	/// Keep the stored entry and drop the incoming one.
	#[default]
	KeepFirst,
	/// Replace the stored entry with the incoming one.
	KeepLast,
	/// Refuse duplicates with [`MergeError::Duplicate`].
	Reject,
}

/// Outcome of a successful [`SymbolTable::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
	/// The key was new.
	Added,
	/// The key existed; the incoming entry was dropped.
	KeptExisting,
	/// The key existed; the incoming entry took its place.
	Replaced,
}

/// A set of symbol entries ordered by type, then name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
	entries: BTreeSet<SymbolEntry>,
	policy: DuplicatePolicy,
}

impl SymbolTable {
	/// Creates an empty table with the given duplicate policy.
	pub fn new(policy: DuplicatePolicy) -> Self {
		Self {
			entries: BTreeSet::new(),
			policy,
		}
	}

	pub fn policy(&self) -> DuplicatePolicy {
		self.policy
	}

	/// Inserts an entry according to the table's policy.
	///
	/// # Errors
	///
	/// - [`MergeError::KindConflict`] if the key exists with a different
	///   `id_kind`, regardless of policy.
	/// - [`MergeError::Duplicate`] if the key exists and the policy is
	///   [`DuplicatePolicy::Reject`].
	///
	/// The table is unchanged on error.
	pub fn insert(&mut self, entry: SymbolEntry) -> Result<Insertion, MergeError> {
		let Some(existing) = self.entries.get(entry.key()) else {
			self.entries.insert(entry);
			return Ok(Insertion::Added);
		};

		if existing.id_kind() != entry.id_kind() {
			return Err(MergeError::KindConflict {
				key: entry.key().clone(),
				existing: existing.clone(),
				incoming: entry,
			});
		}

		match self.policy {
			DuplicatePolicy::Reject => Err(MergeError::Duplicate {
				key: entry.key().clone(),
			}),
			DuplicatePolicy::KeepFirst => {
				debug!(
					key = %entry.key(),
					kept = existing.id_value(),
					dropped = entry.id_value(),
					"Collapsed duplicate symbol"
				);
				Ok(Insertion::KeptExisting)
			}
			DuplicatePolicy::KeepLast => {
				debug!(
					key = %entry.key(),
					replaced = existing.id_value(),
					kept = entry.id_value(),
					"Replaced duplicate symbol"
				);
				self.entries.replace(entry);
				Ok(Insertion::Replaced)
			}
		}
	}

	/// Inserts every entry from a reader, stopping at the first error.
	///
	/// Returns how many keys were newly added. Entries inserted before a
	/// failure stay in the table; read a source fully with
	/// [`TableReader::read_all`](crate::TableReader::read_all) first when that
	/// matters.
	///
	/// # Errors
	///
	/// Returns the first read or insert error.
	pub fn extend_from<I>(&mut self, entries: I) -> Result<usize, MergeError>
	where
		I: IntoIterator<Item = Result<SymbolEntry, TableError>>,
	{
		let mut added = 0;
		for entry in entries {
			if self.insert(entry?)? == Insertion::Added {
				added += 1;
			}
		}
		Ok(added)
	}

	/// Returns a new table where each entry for which `f` yields `Some`
	/// carries that value as its `id_value`.
	///
	/// Goes through [`SymbolEntry::with_id_value`], so the key set is the same
	/// as `self`'s. `self` is not modified.
	///
	/// # Errors
	///
	/// Returns [`EntryError::Empty`] if `f` yields an empty value.
	pub fn rewrite_ids<F>(&self, mut f: F) -> Result<Self, EntryError>
	where
		F: FnMut(&SymbolEntry) -> Option<String>,
	{
		let entries = self
			.entries
			.iter()
			.map(|entry| match f(entry) {
				Some(value) => entry.with_id_value(value),
				None => Ok(entry.clone()),
			})
			.collect::<Result<BTreeSet<_>, _>>()?;

		Ok(Self {
			entries,
			policy: self.policy,
		})
	}

	pub fn get(&self, key: &SymbolKey) -> Option<&SymbolEntry> {
		self.entries.get(key)
	}

	pub fn contains(&self, key: &SymbolKey) -> bool {
		self.entries.contains(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries in type-then-name order.
	pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> + '_ {
		self.entries.iter()
	}

	/// Entries of one resource type, alphabetized by name.
	pub fn iter_type<'a>(
		&'a self,
		resource_type: &'a str,
	) -> impl Iterator<Item = &'a SymbolEntry> + 'a {
		self.entries
			.iter()
			.skip_while(move |e| e.resource_type() < resource_type)
			.take_while(move |e| e.resource_type() == resource_type)
	}

	pub fn into_vec(self) -> Vec<SymbolEntry> {
		self.entries.into_iter().collect()
	}
}

impl<'a> IntoIterator for &'a SymbolTable {
	type Item = &'a SymbolEntry;
	type IntoIter = std::collections::btree_set::Iter<'a, SymbolEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::reader::read_table;

	fn entry(kind: &str, ty: &str, name: &str, value: &str) -> SymbolEntry {
		SymbolEntry::new(kind, ty, name, value).unwrap()
	}

	fn key(ty: &str, name: &str) -> SymbolKey {
		SymbolKey::new(ty, name).unwrap()
	}

	#[test]
	fn keep_first_drops_later_copy() {
		let mut table = SymbolTable::default();
		assert_eq!(table.insert(entry("int", "string", "foo", "0x1")).unwrap(), Insertion::Added);
		assert_eq!(table.insert(entry("int", "string", "foo", "0x2")).unwrap(), Insertion::KeptExisting);
		assert_eq!(table.get(&key("string", "foo")).unwrap().id_value(), "0x1");
		assert_eq!(table.len(), 1);
	}

	#[test]
	fn keep_last_replaces() {
		let mut table = SymbolTable::new(DuplicatePolicy::KeepLast);
		table.insert(entry("int", "string", "foo", "0x1")).unwrap();
		assert_eq!(table.insert(entry("int", "string", "foo", "0x2")).unwrap(), Insertion::Replaced);
		assert_eq!(table.get(&key("string", "foo")).unwrap().id_value(), "0x2");
	}

	#[test]
	fn reject_refuses_duplicates() {
		let mut table = SymbolTable::new(DuplicatePolicy::Reject);
		table.insert(entry("int", "string", "foo", "0x1")).unwrap();
		let err = table.insert(entry("int", "string", "foo", "0x2")).unwrap_err();
		assert!(matches!(err, MergeError::Duplicate { key: k } if k == key("string", "foo")));
		assert_eq!(table.get(&key("string", "foo")).unwrap().id_value(), "0x1");
	}

	#[test]
	fn kind_conflict_is_rejected_under_every_policy() {
		for policy in [DuplicatePolicy::KeepFirst, DuplicatePolicy::KeepLast, DuplicatePolicy::Reject] {
			let mut table = SymbolTable::new(policy);
			table.insert(entry("int", "styleable", "View", "0x1")).unwrap();

			let err = table
				.insert(entry("int[]", "styleable", "View", "{ 0x7f010000 }"))
				.unwrap_err();
			match err {
				MergeError::KindConflict { key: k, existing, incoming } => {
					assert_eq!(k, key("styleable", "View"));
					assert_eq!(existing.id_kind(), "int");
					assert_eq!(incoming.id_kind(), "int[]");
				}
				other => panic!("unexpected error: {other}"),
			}

			let kept = table.get(&key("styleable", "View")).unwrap();
			assert_eq!((kept.id_kind(), kept.id_value()), ("int", "0x1"));
		}
	}

	#[test]
	fn kind_conflict_message() {
		let mut table = SymbolTable::default();
		table.insert(entry("int", "styleable", "View", "0x1")).unwrap();
		let err = table.insert(entry("int[]", "styleable", "View", "{ 0x1 }")).unwrap_err();
		assert_eq!(
			err.to_string(),
			"conflicting id kinds for styleable/View: existing `int` vs incoming `int[]`"
		);
	}

	#[test]
	fn iterates_sorted_and_by_type() {
		let mut table = SymbolTable::default();
		table
			.extend_from(read_table([
				"int string b 0x7f030001",
				"int id a 0x7f020000",
				"int string a 0x7f030000",
				"int attr z 0x7f010000",
			]))
			.unwrap();

		let all: Vec<_> = table.iter().map(|e| e.key().to_string()).collect();
		assert_eq!(all, vec!["attr/z", "id/a", "string/a", "string/b"]);

		let strings: Vec<_> = table.iter_type("string").map(SymbolEntry::name).collect();
		assert_eq!(strings, vec!["a", "b"]);
		assert_eq!(table.iter_type("drawable").count(), 0);
	}

	#[test]
	fn extend_from_counts_new_keys_and_stops_on_error() {
		let mut table = SymbolTable::default();
		let added = table
			.extend_from(read_table(["int id a 0x1", "int id a 0x2", "int id b 0x3"]))
			.unwrap();
		assert_eq!(added, 2);

		let err = table
			.extend_from(read_table(["int id c 0x4", "broken", "int id d 0x5"]))
			.unwrap_err();
		assert!(matches!(err, MergeError::Table(TableError::Malformed(_))));
		assert!(table.contains(&key("id", "c")));
		assert!(!table.contains(&key("id", "d")));
	}

	#[test]
	fn rewrite_ids_preserves_keys_and_original() {
		let mut table = SymbolTable::default();
		table
			.extend_from(read_table(["int id a 0x7f020000", "int string b 0x7f030000"]))
			.unwrap();

		let rewritten = table
			.rewrite_ids(|e| (e.resource_type() == "id").then(|| "0x7f0a0000".to_owned()))
			.unwrap();

		let keys = |t: &SymbolTable| t.iter().map(|e| e.key().clone()).collect::<Vec<_>>();
		assert_eq!(keys(&rewritten), keys(&table));
		assert_eq!(rewritten.get(&key("id", "a")).unwrap().id_value(), "0x7f0a0000");
		assert_eq!(rewritten.get(&key("string", "b")).unwrap().id_value(), "0x7f030000");
		assert_eq!(table.get(&key("id", "a")).unwrap().id_value(), "0x7f020000");
	}

	#[test]
	fn rewrite_ids_rejects_empty_value() {
		let mut table = SymbolTable::default();
		table.insert(entry("int", "id", "a", "0x1")).unwrap();
		assert!(table.rewrite_ids(|_| Some(String::new())).is_err());
		assert_eq!(table.get(&key("id", "a")).unwrap().id_value(), "0x1");
	}
}
