#[derive(Debug, Clone, thiserror::Error)]
#[error("not an absolute iri '{text}': {source}")]
pub struct IriError {
	pub text: String,
	#[source]
	pub source: url::ParseError,
}

/// absolute IRI, validated on construction but kept exactly as it was written
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(String);

impl Iri {
	pub fn parse(text: impl Into<String>) -> Result<Self, IriError> {
		let text = text.into();
		match url::Url::parse(&text) {
			Ok(_) => Ok(Iri(text)),
			Err(source) => Err(IriError { text, source }),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}

	pub fn to_url(&self) -> Option<url::Url> {
		url::Url::parse(&self.0).ok()
	}

	/// scheme plus authority, e.g. `https://example.org`
	pub fn origin(&self) -> Option<String> {
		let url = self.to_url()?;
		match url.origin() {
			url::Origin::Tuple(..) => Some(url.origin().ascii_serialization()),
			url::Origin::Opaque(_) => None,
		}
	}
}

impl std::fmt::Display for Iri {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl std::str::FromStr for Iri {
	type Err = IriError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Iri::parse(s)
	}
}

impl TryFrom<String> for Iri {
	type Error = IriError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Iri::parse(value)
	}
}

impl TryFrom<&str> for Iri {
	type Error = IriError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Iri::parse(value)
	}
}

impl AsRef<str> for Iri {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<Iri> for String {
	fn from(value: Iri) -> Self {
		value.0
	}
}

impl PartialEq<str> for Iri {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for Iri {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}
