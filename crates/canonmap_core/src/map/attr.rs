use crate::map::Value;

/// Text transform applied to string and enum payloads of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseRule {
	/// Lowercase the payload on write and read.
	Lower,
	/// Uppercase the payload on write and read.
	Upper,
	/// Replace `_` with `-` on write, `-` with `_` on read.
	UnderscoreToDash,
	/// Replace `-` with `_` on write, `_` with `-` on read.
	DashToUnderscore,
}

impl CaseRule {
	/// Stable label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Lower => "to_lower",
			Self::Upper => "to_upper",
			Self::UnderscoreToDash => "under_to_dash",
			Self::DashToUnderscore => "dash_to_under",
		}
	}

	/// Forward transform used when writing.
	pub fn apply(self, text: &str) -> String {
		match self {
			Self::Lower => text.to_lowercase(),
			Self::Upper => text.to_uppercase(),
			Self::UnderscoreToDash => text.replace('_', "-"),
			Self::DashToUnderscore => text.replace('-', "_"),
		}
	}

	/// Inverse transform used when reading.
	///
	/// Case folding has no inverse, so it normalizes the payload instead.
	pub fn invert(self, text: &str) -> String {
		match self {
			Self::Lower => text.to_lowercase(),
			Self::Upper => text.to_uppercase(),
			Self::UnderscoreToDash => text.replace('-', "_"),
			Self::DashToUnderscore => text.replace('_', "-"),
		}
	}

	/// Whether the rule discards letter case.
	pub fn folds_case(self) -> bool {
		matches!(self, Self::Lower | Self::Upper)
	}
}

/// One declarative policy attached to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
	/// Canonical value used when the key is absent.
	Default(Value),
	/// Absent key maps to the field's "no value" state.
	Optional,
	/// Treat a non-optional field type as optional, using its empty state.
	MakeOptional,
	/// Transform string/enum payloads.
	Case(CaseRule),
	/// Accept a bare scalar where a nested struct is expected.
	ValueOrStruct,
}

impl Attribute {
	/// Build a `Default` attribute from anything convertible to a canonical value.
	pub fn default_value(value: impl Into<Value>) -> Self {
		Self::Default(value.into())
	}

	/// Stable label.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Default(_) => "default",
			Self::Optional => "optional",
			Self::MakeOptional => "make_optional",
			Self::Case(rule) => rule.as_str(),
			Self::ValueOrStruct => "value_or_struct",
		}
	}
}

/// Ordered attribute pipeline of one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
	list: Vec<Attribute>,
}

impl Attributes {
	/// Wrap attributes in declaration order.
	pub fn new(list: impl IntoIterator<Item = Attribute>) -> Self {
		Self {
			list: list.into_iter().collect(),
		}
	}

	/// Attributes in declaration order.
	pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
		self.list.iter()
	}

	/// Whether no attribute is declared.
	pub fn is_empty(&self) -> bool {
		self.list.is_empty()
	}

	/// Declared default, the last one winning when repeated.
	pub fn default_value(&self) -> Option<&Value> {
		self.list.iter().rev().find_map(|attr| match attr {
			Attribute::Default(value) => Some(value),
			_ => None,
		})
	}

	/// Whether `Optional` or `MakeOptional` is declared.
	pub fn is_optional(&self) -> bool {
		self.list.iter().any(|attr| matches!(attr, Attribute::Optional | Attribute::MakeOptional))
	}

	/// Whether `ValueOrStruct` is declared.
	pub fn value_or_struct(&self) -> bool {
		self.list.contains(&Attribute::ValueOrStruct)
	}

	/// Case rules in declaration order.
	pub fn case_rules(&self) -> impl DoubleEndedIterator<Item = CaseRule> + '_ {
		self.list.iter().filter_map(|attr| match attr {
			Attribute::Case(rule) => Some(*rule),
			_ => None,
		})
	}

	/// Whether any case rule is declared.
	pub fn has_case_rules(&self) -> bool {
		self.case_rules().next().is_some()
	}

	/// Whether a declared rule discards letter case.
	pub fn folds_case(&self) -> bool {
		self.case_rules().any(CaseRule::folds_case)
	}

	/// Apply case rules in declaration order.
	pub fn encode_text(&self, text: &str) -> String {
		self.case_rules().fold(text.to_owned(), |acc, rule| rule.apply(&acc))
	}

	/// Apply inverse case rules in reverse declaration order.
	pub fn decode_text(&self, text: &str) -> String {
		self.case_rules().rev().fold(text.to_owned(), |acc, rule| rule.invert(&acc))
	}

	/// Resolve `text` against declared enum symbols.
	///
	/// Exact matches on the decoded text win; when a case-folding rule is declared,
	/// an ASCII case-insensitive match is accepted too.
	pub fn match_symbol<'a>(&self, symbols: &'a [Box<str>], text: &str) -> Option<&'a str> {
		let decoded = self.decode_text(text);
		let mut names = symbols.iter().map(|symbol| &**symbol);
		if let Some(symbol) = names.clone().find(|symbol| *symbol == decoded) {
			return Some(symbol);
		}
		if !self.folds_case() {
			return None;
		}
		names.find(|symbol| symbol.eq_ignore_ascii_case(&decoded))
	}
}

impl<'a> IntoIterator for &'a Attributes {
	type Item = &'a Attribute;
	type IntoIter = std::slice::Iter<'a, Attribute>;

	fn into_iter(self) -> Self::IntoIter {
		self.list.iter()
	}
}
