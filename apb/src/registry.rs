use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{definition::TypeDef, jsonld::Aliases, Entity};

/// maps type names to their definitions, so that embedded values can be built as the right
/// entity while deserializing
///
/// build it once at startup, register any extension types, then share it read only
/// (usually behind an `Arc`)
#[derive(Debug, Clone)]
pub struct Registry {
	types: HashMap<&'static str, &'static TypeDef>,
}

impl Default for Registry {
	fn default() -> Self {
		Registry::activitystreams()
	}
}

impl Registry {
	/// registry knowing no type at all
	pub fn empty() -> Self {
		Registry { types: HashMap::new() }
	}

	/// registry with every builtin ActivityStreams type
	pub fn activitystreams() -> Self {
		let mut out = Registry::empty();
		for def in crate::types::BUILTIN {
			out.register(*def);
		}
		out
	}

	/// adds a type, returning the definition it replaced if the name was taken
	pub fn register(&mut self, def: &'static TypeDef) -> Option<&'static TypeDef> {
		self.types.insert(def.name, def)
	}

	pub fn definition(&self, name: &str) -> Option<&'static TypeDef> {
		self.types.get(name).copied()
	}

	pub fn satisfies(&self, name: &str, capability: &str) -> bool {
		self.definition(name).is_some_and(|d| d.satisfies(capability))
	}

	/// fresh empty entity for `name`, only if that type provides `capability`
	pub fn resolve_as(&self, name: &str, capability: &str) -> Option<Entity> {
		let def = self.definition(name)?;
		if def.satisfies(capability) {
			Some(Entity::empty(def))
		} else {
			None
		}
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

/// what deserialization needs to know besides the value itself
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
	registry: &'a Registry,
	aliases: Aliases,
}

impl<'a> Resolver<'a> {
	pub fn new(registry: &'a Registry) -> Self {
		Resolver { registry, aliases: Aliases::default() }
	}

	/// resolver for an embedded map, inheriting aliases and adding its own `@context`
	pub fn nested(&self, map: &Map<String, Value>) -> Resolver<'a> {
		let mut out = self.clone();
		if let Some(ctx) = map.get("@context") {
			out.aliases.extend(ctx);
		}
		out
	}

	pub fn registry(&self) -> &'a Registry {
		self.registry
	}

	pub fn aliases(&self) -> &Aliases {
		&self.aliases
	}
}

#[cfg(test)]
mod test {
	use super::Registry;

	#[test]
	fn capabilities_follow_inheritance() {
		let registry = Registry::activitystreams();
		assert!(registry.satisfies("Create", "Activity"));
		assert!(registry.satisfies("Create", "Object"));
		assert!(registry.satisfies("Question", "IntransitiveActivity"));
		assert!(registry.satisfies("OrderedCollectionPage", "CollectionPage"));
		assert!(registry.satisfies("OrderedCollectionPage", "OrderedCollection"));
		assert!(registry.satisfies("Mention", "Link"));
		assert!(!registry.satisfies("Mention", "Object"));
		assert!(!registry.satisfies("Note", "Activity"));
		assert!(!registry.satisfies("Frobnicator", "Object"));
	}

	#[test]
	fn resolve_as_returns_fresh_entities() {
		let registry = Registry::activitystreams();
		let entity = registry.resolve_as("Person", "Object").unwrap();
		assert_eq!(entity.definition().name, "Person");
		assert!(entity.types().is_empty());
		assert!(registry.resolve_as("Person", "Link").is_none());
		assert!(registry.resolve_as("Nope", "Object").is_none());
	}

	#[test]
	fn hosts_can_register_extensions() {
		static EMOJI: crate::TypeDef = crate::TypeDef {
			name: "Emoji",
			extends: &[&crate::types::OBJECT],
			properties: &[],
		};
		let mut registry = Registry::empty();
		assert!(registry.is_empty());
		registry.register(&EMOJI);
		assert!(registry.satisfies("Emoji", "Object"));
		assert_eq!(registry.len(), 1);
	}
}
