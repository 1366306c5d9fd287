use std::fmt;

use crate::map::{MapError, Result};

/// One step in a structural path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
	/// Select an object member by key.
	Key(String),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Location inside a canonical value tree, from the conversion root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl Path {
	/// The empty path addressing the root value.
	pub fn root() -> Self {
		Self::default()
	}

	/// Whether this path addresses the root.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	/// Append a key step.
	pub fn push_key(&mut self, key: &str) {
		self.steps.push(PathStep::Key(key.to_owned()));
	}

	/// Append an index step.
	pub fn push_index(&mut self, index: usize) {
		self.steps.push(PathStep::Index(index));
	}

	/// Remove the last step.
	pub fn pop(&mut self) -> Option<PathStep> {
		self.steps.pop()
	}

	/// Concatenate `self` and `tail`.
	pub fn join(&self, tail: &Path) -> Path {
		let mut steps = Vec::with_capacity(self.steps.len() + tail.steps.len());
		steps.extend_from_slice(&self.steps);
		steps.extend_from_slice(&tail.steps);
		Path { steps }
	}

	/// Display form used in error messages; `<root>` for the empty path.
	pub fn describe(&self) -> String {
		if self.is_root() { "<root>".to_owned() } else { self.to_string() }
	}

	/// Parse dotted key syntax with optional `[index]` selectors.
	///
	/// Keys are runs of ASCII alphanumerics, `_`, and `-`. A path may start with an
	/// index selector to address elements of a root array (`[0].name`).
	pub fn parse(input: &str) -> Result<Self> {
		if input.is_empty() {
			return Err(MapError::InvalidPath { path: input.to_owned() });
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && is_key_byte(bytes[idx]) {
				idx += 1;
			}

			if idx > start {
				steps.push(PathStep::Key(input[start..idx].to_owned()));
			} else if bytes[idx] != b'[' || !steps.is_empty() {
				return Err(MapError::InvalidPath { path: input.to_owned() });
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(MapError::InvalidPath { path: input.to_owned() });
				}

				let number = input[n_start..idx]
					.parse::<usize>()
					.map_err(|_| MapError::InvalidPath { path: input.to_owned() })?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(MapError::InvalidPath { path: input.to_owned() });
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(MapError::InvalidPath { path: input.to_owned() });
				}
			}
		}

		Ok(Self { steps })
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Key(key) if idx == 0 => write!(f, "{key}")?,
				PathStep::Key(key) => write!(f, ".{key}")?,
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

fn is_key_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

#[cfg(test)]
mod tests;
