use std::collections::HashMap;
use std::fmt;

use crate::error::{GibberishError, Result};

/// Placeholder character. Always a member of every alphabet; characters
/// outside the alphabet are normalized to it.
pub const BLANK: char = ' ';

/// Characters of the default alphabet (the blank is appended automatically).
pub const DEFAULT_CHARACTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// The set of characters a model understands.
///
/// # Invariants
/// - No duplicate characters
/// - Contains `BLANK` and at least one other character
/// - `charmap` maps each character to its position in `chars`, so it is a
///   bijection onto `[0, len)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
	chars: Vec<char>,
	charmap: HashMap<char, usize>,
}

impl Alphabet {
	/// Builds an alphabet from raw characters.
	///
	/// - Lowercases the input
	/// - Collapses any run of whitespace to a single blank
	/// - Appends a blank so it is always a member
	/// - Removes duplicates, keeping the first occurrence
	///
	/// # Errors
	/// `InvalidAlphabet` if fewer than 2 distinct characters remain.
	pub fn new(raw: &str) -> Result<Self> {
		let mut collapsed = collapse_whitespace(raw.chars().flat_map(char::to_lowercase));
		collapsed.push(BLANK);

		let mut chars = Vec::new();
		let mut charmap = HashMap::new();
		for c in collapsed.chars() {
			if !charmap.contains_key(&c) {
				charmap.insert(c, chars.len());
				chars.push(c);
			}
		}

		if chars.len() < 2 {
			return Err(GibberishError::InvalidAlphabet { count: chars.len() });
		}

		Ok(Self { chars, charmap })
	}

	/// Rebuilds an alphabet from its exported form.
	///
	/// The string must already be normalized, i.e. `Alphabet::new(s)` must
	/// give back exactly `s`. Otherwise the indices of an imported matrix
	/// would not line up with the characters.
	pub(crate) fn from_exported(exported: &str) -> Result<Self> {
		if exported.is_empty() {
			return Err(GibberishError::invalid_model("alphabet is empty"));
		}
		let alphabet = Self::new(exported).map_err(|e| GibberishError::invalid_model(e.to_string()))?;
		if alphabet.as_string() != exported {
			return Err(GibberishError::invalid_model(format!(
				"alphabet {:?} is not normalized (expected {:?})",
				exported,
				alphabet.as_string()
			)));
		}
		Ok(alphabet)
	}

	/// Number of characters, blank included.
	pub fn len(&self) -> usize {
		self.chars.len()
	}

	/// Always `false`: a valid alphabet holds at least 2 characters.
	pub fn is_empty(&self) -> bool {
		self.chars.is_empty()
	}

	pub fn chars(&self) -> &[char] {
		&self.chars
	}

	pub fn contains(&self, c: char) -> bool {
		self.charmap.contains_key(&c)
	}

	/// Dense index of `c`, or `None` if it is not a member.
	pub fn index_of(&self, c: char) -> Option<usize> {
		self.charmap.get(&c).copied()
	}

	/// The characters in index order.
	pub fn as_string(&self) -> String {
		self.chars.iter().collect()
	}

	/// Normalizes text against this alphabet.
	///
	/// Lowercases, replaces every non-member with a blank, collapses blank
	/// runs and trims. Foreign characters keep their position as a blank so
	/// the valid characters around them still form adjacent pairs.
	pub fn normalize(&self, text: &str) -> String {
		let mapped = text
			.chars()
			.flat_map(char::to_lowercase)
			.map(|c| if self.contains(c) { c } else { BLANK });
		collapse_whitespace(mapped).trim_matches(BLANK).to_owned()
	}

	/// Normalizes `text` and maps it to character indices.
	pub(crate) fn encode(&self, text: &str) -> Vec<usize> {
		self.normalize(text)
			.chars()
			.filter_map(|c| self.index_of(c))
			.collect()
	}
}

impl Default for Alphabet {
	/// `a`-`z` plus the blank.
	fn default() -> Self {
		let chars: Vec<char> = DEFAULT_CHARACTERS.chars().chain([BLANK]).collect();
		let charmap = chars.iter().enumerate().map(|(i, c)| (*c, i)).collect();
		Self { chars, charmap }
	}
}

impl fmt::Display for Alphabet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}", self.as_string())
	}
}

/// Replaces every run of whitespace with a single blank.
fn collapse_whitespace(chars: impl Iterator<Item = char>) -> String {
	let mut out = String::new();
	let mut previous_blank = false;
	for c in chars {
		if c.is_whitespace() {
			if !previous_blank {
				out.push(BLANK);
			}
			previous_blank = true;
		} else {
			out.push(c);
			previous_blank = false;
		}
	}
	out
}
