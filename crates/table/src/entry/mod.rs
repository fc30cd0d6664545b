//! # Entry
//!
//! One row of an `R.txt` symbol table, split into the part that identifies a
//! resource and the part a renumbering pass is allowed to change.
//!
//! ```text
//! int[] styleable ActionBar { 0x7f010001, 0x7f010002 }
//! ^^^^^ ^^^^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^
//! kind  key (type, name)    value
//! ```
//!
//! Equality, hashing and ordering of a [`SymbolEntry`] only look at its
//! [`SymbolKey`]. Copies of the same resource coming from different libraries,
//! each with its own placeholder value, therefore collapse under set and map
//! semantics.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{EntryError, EntryField, Result};


/// `id_kind` token used for array-shaped (styleable) identifiers.
pub const ARRAY_KIND: &str = "int[]";

fn require(field: EntryField, value: String) -> Result<String> {
	if value.is_empty() {
		return Err(EntryError::Empty { field });
	}
	Ok(value)
}

/// Logical identity of a resource: its type and name.
///
/// Orders by `resource_type` first, then `name`, comparing bytes. Sorting a
/// table by key groups it by type and alphabetizes each group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolKey {
	resource_type: String,
	name: String,
}

impl SymbolKey {
	/// Creates a key, rejecting empty components.
	pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Result<Self> {
		Ok(Self {
			resource_type: require(EntryField::ResourceType, resource_type.into())?,
			name: require(EntryField::Name, name.into())?,
		})
	}

	/// Resource category, e.g. `string` or `styleable`.
	pub fn resource_type(&self) -> &str {
		&self.resource_type
	}

	/// Resource name.
	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Display for SymbolKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.resource_type, self.name)
	}
}

/// The replaceable half of an entry: storage shape and identifier text.
///
/// `id_kind` is kept verbatim since writers must reproduce it exactly.
/// `id_value` stays textual because array values may hold placeholders that a
/// later pass resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolPayload {
	id_kind: String,
	id_value: String,
}

impl SymbolPayload {
	/// Creates a payload, rejecting empty components.
	pub fn new(id_kind: impl Into<String>, id_value: impl Into<String>) -> Result<Self> {
		Ok(Self {
			id_kind: require(EntryField::IdKind, id_kind.into())?,
			id_value: require(EntryField::IdValue, id_value.into())?,
		})
	}

	/// Storage shape token, usually `int` or `int[]`.
	pub fn id_kind(&self) -> &str {
		&self.id_kind
	}

	/// Identifier payload as written.
	pub fn id_value(&self) -> &str {
		&self.id_value
	}

	/// Whether the identifier is array-shaped (`int[]`).
	pub fn is_array(&self) -> bool {
		self.id_kind == ARRAY_KIND
	}
}

/// A single resource symbol: `<id_kind> <resource_type> <name> <id_value>`.
///
/// Immutable once built. [`with_id_value`](Self::with_id_value) is the only
/// way to derive a changed entry, and it cannot touch the key.
#[derive(Clone)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(try_from = "EntryFields", into = "EntryFields")
)]
pub struct SymbolEntry {
	key: SymbolKey,
	payload: SymbolPayload,
}

impl SymbolEntry {
	/// Creates an entry from its four columns.
	///
	/// # Errors
	///
	/// Returns [`EntryError::Empty`] naming the first empty column.
	pub fn new(
		id_kind: impl Into<String>,
		resource_type: impl Into<String>,
		name: impl Into<String>,
		id_value: impl Into<String>,
	) -> Result<Self> {
		let id_kind = require(EntryField::IdKind, id_kind.into())?;
		let key = SymbolKey::new(resource_type, name)?;
		let payload = SymbolPayload::new(id_kind, id_value)?;
		Ok(Self { key, payload })
	}

	/// Joins an already validated key and payload.
	pub fn from_parts(key: SymbolKey, payload: SymbolPayload) -> Self {
		Self { key, payload }
	}

	/// Splits the entry into its key and payload.
	pub fn into_parts(self) -> (SymbolKey, SymbolPayload) {
		(self.key, self.payload)
	}

	/// Returns a new entry for the same resource with `id_value` replaced.
	///
	/// `self` is left as it was.
	///
	/// # Errors
	///
	/// Returns [`EntryError::Empty`] if `id_value` is empty.
	pub fn with_id_value(&self, id_value: impl Into<String>) -> Result<Self> {
		let id_value = require(EntryField::IdValue, id_value.into())?;
		Ok(Self {
			key: self.key.clone(),
			payload: SymbolPayload {
				id_kind: self.payload.id_kind.clone(),
				id_value,
			},
		})
	}

	pub fn key(&self) -> &SymbolKey {
		&self.key
	}

	pub fn payload(&self) -> &SymbolPayload {
		&self.payload
	}

	pub fn id_kind(&self) -> &str {
		self.payload.id_kind()
	}

	pub fn resource_type(&self) -> &str {
		self.key.resource_type()
	}

	pub fn name(&self) -> &str {
		self.key.name()
	}

	pub fn id_value(&self) -> &str {
		self.payload.id_value()
	}
}

impl PartialEq for SymbolEntry {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key
	}
}

impl Eq for SymbolEntry {}

impl Hash for SymbolEntry {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key.hash(state);
	}
}

impl PartialOrd for SymbolEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for SymbolEntry {
	fn cmp(&self, other: &Self) -> Ordering {
		self.key.cmp(&other.key)
	}
}

// Eq/Hash/Ord all delegate to the key, so set lookups by key are sound.
impl Borrow<SymbolKey> for SymbolEntry {
	fn borrow(&self) -> &SymbolKey {
		&self.key
	}
}

// Diagnostics only; not a stable serialization.
impl fmt::Debug for SymbolEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SymbolEntry")
			.field("id_kind", &self.payload.id_kind)
			.field("resource_type", &self.key.resource_type)
			.field("name", &self.key.name)
			.field("id_value", &self.payload.id_value)
			.finish()
	}
}

/// Flat wire shape of an entry for serde.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct EntryFields {
	id_kind: String,
	resource_type: String,
	name: String,
	id_value: String,
}

#[cfg(feature = "serde")]
impl TryFrom<EntryFields> for SymbolEntry {
	type Error = EntryError;

	fn try_from(fields: EntryFields) -> Result<Self> {
		Self::new(fields.id_kind, fields.resource_type, fields.name, fields.id_value)
	}
}

#[cfg(feature = "serde")]
impl From<SymbolEntry> for EntryFields {
	fn from(entry: SymbolEntry) -> Self {
		let (key, payload) = entry.into_parts();
		Self {
			id_kind: payload.id_kind,
			resource_type: key.resource_type,
			name: key.name,
			id_value: payload.id_value,
		}
	}
}
