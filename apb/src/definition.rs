use crate::kind::Kind;

/// table row describing one vocabulary property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
	/// key on the wire
	pub name: &'static str,
	/// single valued?
	pub functional: bool,
	/// permitted kinds, in deserialization priority order
	pub kinds: &'static [Kind],
	/// natural language sibling key, e.g. `contentMap` for `content`
	pub map: Option<&'static str>,
}

impl PropertyDef {
	pub fn permits(&self, kind: Kind) -> bool {
		self.kinds.contains(&kind)
	}

	pub fn permits_iri(&self) -> bool {
		self.permits(Kind::Iri)
	}

	/// position among declared kinds, IRI excluded
	pub fn position(&self, kind: Kind) -> Option<usize> {
		self.kinds.iter()
			.filter(|k| **k != Kind::Iri)
			.position(|k| *k == kind)
	}

	pub fn non_iri_kinds(&self) -> usize {
		self.kinds.iter().filter(|k| **k != Kind::Iri).count()
	}
}

/// vocabulary type: a name, its parents and the properties it declares itself
#[derive(Debug)]
pub struct TypeDef {
	pub name: &'static str,
	pub extends: &'static [&'static TypeDef],
	pub properties: &'static [&'static PropertyDef],
}

impl PartialEq for TypeDef {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for TypeDef {}

impl TypeDef {
	/// true if this type is `capability` or inherits from it
	pub fn satisfies(&self, capability: &str) -> bool {
		self.name == capability || self.extends.iter().any(|p| p.satisfies(capability))
	}

	/// every property, own first then inherited, each listed once
	pub fn all_properties(&self) -> Vec<&'static PropertyDef> {
		let mut out = Vec::new();
		self.collect_properties(&mut out);
		out
	}

	fn collect_properties(&self, out: &mut Vec<&'static PropertyDef>) {
		for prop in self.properties {
			if !out.iter().any(|p| p.name == prop.name) {
				out.push(prop);
			}
		}
		for parent in self.extends {
			parent.collect_properties(out);
		}
	}

	pub fn property(&self, name: &str) -> Option<&'static PropertyDef> {
		self.properties.iter()
			.find(|p| p.name == name)
			.copied()
			.or_else(|| self.extends.iter().find_map(|p| p.property(name)))
	}

	/// property whose natural language map lives under `key`
	pub fn language_map(&self, key: &str) -> Option<&'static PropertyDef> {
		self.properties.iter()
			.find(|p| p.map == Some(key))
			.copied()
			.or_else(|| self.extends.iter().find_map(|p| p.language_map(key)))
	}

	/// keys the typed fields own, which may never live in the extension bag
	pub fn claims(&self, key: &str) -> bool {
		key == "id"
			|| key == "type"
			|| self.property(key).is_some()
			|| self.language_map(key).is_some()
	}
}
