use serde_json::Value;

use crate::VocabError;

pub const ACTIVITYSTREAMS: &str = "https://www.w3.org/ns/activitystreams";
pub const SECURITY: &str = "https://w3id.org/security/v1";

pub const CONTENT_TYPE_ACTIVITY_JSON: &str = "application/activity+json";
pub const CONTENT_TYPE_LD_JSON_ACTIVITYPUB: &str = "application/ld+json; profile=\"https://www.w3.org/ns/activitystreams\"";

/// true for both media types ActivityPub peers are expected to speak, ignoring parameters order
/// and whitespace around them
pub fn is_activitypub_media_type(header: &str) -> bool {
	let mut parts = header.split(';').map(str::trim);
	match parts.next().map(str::to_ascii_lowercase).as_deref() {
		Some("application/activity+json") => true,
		Some("application/ld+json") => parts
			.filter_map(|p| p.split_once('='))
			.any(|(k, v)| k.trim().eq_ignore_ascii_case("profile") && v.trim().trim_matches('"') == ACTIVITYSTREAMS),
		_ => false,
	}
}

/// prefixes bound to the ActivityStreams namespace by a document's `@context`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aliases {
	prefixes: Vec<String>,
}

impl Default for Aliases {
	fn default() -> Self {
		// the ActivityStreams context itself defines `as`
		Aliases { prefixes: vec!["as".to_string()] }
	}
}

fn is_activitystreams(iri: &str) -> bool {
	iri.trim_end_matches('#') == ACTIVITYSTREAMS
}

impl Aliases {
	pub fn from_context(ctx: &Value) -> Self {
		let mut out = Aliases::default();
		out.extend(ctx);
		out
	}

	pub fn extend(&mut self, ctx: &Value) {
		match ctx {
			Value::Array(x) => x.iter().for_each(|c| self.extend(c)),
			Value::Object(x) => {
				for (prefix, target) in x {
					let bound = match target {
						Value::String(iri) => is_activitystreams(iri),
						Value::Object(def) => def.get("@id")
							.and_then(|x| x.as_str())
							.is_some_and(is_activitystreams),
						_ => false,
					};
					if bound && !self.prefixes.contains(prefix) {
						self.prefixes.push(prefix.clone());
					}
				}
			},
			// remote contexts are never fetched
			_ => {},
		}
	}

	pub fn prefixes(&self) -> &[String] {
		&self.prefixes
	}

	/// `as:content` and `https://www.w3.org/ns/activitystreams#content` both become `content`
	pub fn unalias<'a>(&self, key: &'a str) -> &'a str {
		if let Some(rest) = key.strip_prefix(ACTIVITYSTREAMS) {
			if let Some(term) = rest.strip_prefix('#').or_else(|| rest.strip_prefix('/')) {
				if !term.is_empty() {
					return term;
				}
			}
			return key;
		}
		if let Some((prefix, term)) = key.split_once(':') {
			if !term.is_empty() && !term.starts_with("//") && self.prefixes.iter().any(|p| p == prefix) {
				return term;
			}
		}
		key
	}

	/// names listed under `type`, unaliased; a missing `type` is an empty list
	pub fn type_names(&self, map: &serde_json::Map<String, Value>) -> crate::Result<Vec<String>> {
		match map.iter().find(|(k, _)| self.unalias(k) == "type") {
			None => Ok(Vec::new()),
			Some((_, value)) => self.types_of(value),
		}
	}

	/// reads a `type` value: one string or a list of strings
	pub fn types_of(&self, value: &Value) -> crate::Result<Vec<String>> {
		match value {
			Value::String(x) => Ok(vec![self.unalias(x).to_string()]),
			Value::Array(arr) => arr.iter()
				.map(|x| match x {
					Value::String(x) => Ok(self.unalias(x).to_string()),
					_ => Err(VocabError::malformed(format!("type entry {x} is not a string"))),
				})
				.collect(),
			x => Err(VocabError::malformed(format!("type {x} is neither a string nor a list of strings"))),
		}
	}
}

pub trait LD {
	fn ld_context(self) -> Self;
}

impl LD for Value {
	fn ld_context(mut self) -> Self {
		if let Some(obj) = self.as_object_mut() {
			let mut ctx = serde_json::Map::new();
			ctx.insert("sensitive".to_string(), Value::String("as:sensitive".into()));
			obj.insert(
				"@context".to_string(),
				Value::Array(vec![
					Value::String(ACTIVITYSTREAMS.into()),
					Value::String(SECURITY.into()),
					Value::Object(ctx),
				]),
			);
		} else {
			tracing::warn!("cannot add @context to json value different than object");
		}
		self
	}
}
