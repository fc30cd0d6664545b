//! # Parse
//!
//! Turns one `R.txt` line into a [`SymbolEntry`].
//!
//! ## Supported Syntax
//!
//! ```text
//! line          = id-kind ws resource-type ws name ws id-value
//! id-kind       = token          ; "int" | "int[]"
//! resource-type = token          ; "id" | "string" | "styleable" | ...
//! name          = token
//! id-value      = rest of line   ; "0x7f030002" | "{ 0x7f010001, 0x7f010002 }"
//! token         = non-whitespace+
//! ```
//!
//! The line is trimmed first. `id-value` keeps any whitespace inside it, which
//! array literals rely on.

use std::sync::LazyLock;

use regex::Regex;

use crate::entry::SymbolEntry;


static SYMBOL_LINE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\S+)\s+(\S+)\s+(\S+)\s+(.+)$").expect("symbol line pattern is valid")
});

/// Parses a single symbol table line.
///
/// Returns `None` when the line does not have the four-column shape, blank
/// lines included. Never panics on malformed input.
///
/// # Examples
///
/// ```
/// use rsym_table::parse_line;
///
/// let entry = parse_line("int string debug_http_proxy_title 0x7f030002").unwrap();
/// assert_eq!(entry.name(), "debug_http_proxy_title");
/// assert!(parse_line("int string").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<SymbolEntry> {
	let caps = SYMBOL_LINE.captures(line.trim())?;
	// Every group is non-empty by construction, so this cannot fail.
	SymbolEntry::new(&caps[1], &caps[2], &caps[3], &caps[4]).ok()
}
