use crate::value::TypeMismatch;

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
	#[error("malformed input: {0}")]
	MalformedInput(String),

	#[error(transparent)]
	TypeMismatch(#[from] TypeMismatch),

	#[error("key '{0}' is claimed by a typed property")]
	ClaimedKey(String),

	#[error("value of '{0}' cannot be represented in json")]
	Unrepresentable(&'static str),

	#[error("none of the types {0:?} is known")]
	Unresolved(Vec<String>),

	#[error("{found} is not a {expected}")]
	Incompatible {
		expected: &'static str,
		found: &'static str,
	},
}

impl VocabError {
	pub fn malformed(msg: impl ToString) -> Self {
		VocabError::MalformedInput(msg.to_string())
	}
}

pub type Result<T> = std::result::Result<T, VocabError>;
