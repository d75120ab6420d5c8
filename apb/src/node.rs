use std::cmp::Ordering;

use serde_json::Value;

use crate::{
	definition::PropertyDef,
	kind::{Kind, Member},
	value::Scalar,
	Entity, Iri, Registry, Resolver, VocabError,
};

/// ActivityPub property value: nothing, one embedded entity, a reference to something, a
/// terminal value, or whatever we could not make sense of
///
/// at most one reading is ever held: setting a kind replaces whatever was there
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
	#[default]
	Empty,
	/// opaque payload, kept verbatim so it can be written back untouched
	Unknown(Value),
	Iri(Iri),
	Entity {
		/// capability this entity was accepted as
		kind: &'static str,
		entity: Box<Entity>,
	},
	Scalar(Scalar),
}

impl From<Iri> for Node {
	fn from(value: Iri) -> Self {
		Node::Iri(value)
	}
}

impl From<Scalar> for Node {
	fn from(value: Scalar) -> Self {
		Node::Scalar(value)
	}
}

impl Node {
	pub fn of<K: Member>(value: K::Value) -> Self {
		K::wrap(value)
	}

	pub fn is<K: Member>(&self) -> bool {
		K::get(self).is_some()
	}

	pub fn get<K: Member>(&self) -> Option<K::Ref<'_>> {
		K::get(self)
	}

	pub fn set<K: Member>(&mut self, value: K::Value) {
		*self = K::wrap(value);
	}

	pub fn clear(&mut self) {
		*self = Node::Empty;
	}

	/// true only if Node holds nothing at all, not even an unknown payload
	pub fn is_empty(&self) -> bool {
		matches!(self, Node::Empty)
	}

	/// true if any declared reading is set, unknown payloads excluded
	pub fn has_any(&self) -> bool {
		matches!(self, Node::Iri(_) | Node::Entity { .. } | Node::Scalar(_))
	}

	pub fn is_unknown(&self) -> bool {
		matches!(self, Node::Unknown(_))
	}

	pub fn unknown(&self) -> Option<&Value> {
		match self {
			Node::Unknown(x) => Some(x),
			_ => None,
		}
	}

	pub fn set_unknown(&mut self, value: Value) {
		*self = Node::Unknown(value);
	}

	pub fn iri(&self) -> Option<&Iri> {
		match self {
			Node::Iri(x) => Some(x),
			_ => None,
		}
	}

	pub fn entity(&self) -> Option<&Entity> {
		match self {
			Node::Entity { entity, .. } => Some(&**entity),
			_ => None,
		}
	}

	pub fn entity_mut(&mut self) -> Option<&mut Entity> {
		match self {
			Node::Entity { entity, .. } => Some(&mut **entity),
			_ => None,
		}
	}

	pub fn scalar(&self) -> Option<&Scalar> {
		match self {
			Node::Scalar(x) => Some(x),
			_ => None,
		}
	}

	/// what this node points at: the IRI itself, or the id of the embedded entity
	pub fn id(&self) -> Option<&Iri> {
		match self {
			Node::Iri(x) => Some(x),
			Node::Entity { entity, .. } => entity.id.as_ref(),
			_ => None,
		}
	}

	/// stable tag used to order values of different kinds
	///
	/// empty sorts first, then unknown, then IRI, then declared kinds in declaration order;
	/// kinds the property does not declare share the slot after the last declared one
	pub fn kind_index(&self, def: &PropertyDef) -> i32 {
		let declared = |kind: Kind| def.position(kind)
			.unwrap_or_else(|| def.non_iri_kinds()) as i32;
		match self {
			Node::Empty => -3,
			Node::Unknown(_) => -2,
			Node::Iri(_) => -1,
			Node::Entity { kind, .. } => declared(Kind::Type(*kind)),
			Node::Scalar(x) => declared(Kind::Datatype(x.datatype())),
		}
	}

	// tie breaker between different variants landing on the same index
	fn rank(&self) -> u8 {
		match self {
			Node::Empty => 0,
			Node::Unknown(_) => 1,
			Node::Iri(_) => 2,
			Node::Entity { .. } => 3,
			Node::Scalar(_) => 4,
		}
	}

	pub fn compare(&self, other: &Self, def: &PropertyDef) -> Ordering {
		self.kind_index(def).cmp(&other.kind_index(def))
			.then_with(|| match (self, other) {
				(Node::Empty, Node::Empty) => Ordering::Equal,
				(Node::Unknown(a), Node::Unknown(b)) => a.to_string().cmp(&b.to_string()),
				(Node::Iri(a), Node::Iri(b)) => a.as_str().cmp(b.as_str()),
				(Node::Entity { kind: ka, entity: a }, Node::Entity { kind: kb, entity: b }) =>
					ka.cmp(kb).then_with(|| a.compare(b)),
				(Node::Scalar(a), Node::Scalar(b)) => a.compare(b),
				(a, b) => a.rank().cmp(&b.rank()),
			})
	}

	pub fn less_than(&self, other: &Self, def: &PropertyDef) -> bool {
		self.compare(other, def) == Ordering::Less
	}

	/// json form of whatever is held; an empty node serializes as null
	pub fn serialize(&self) -> crate::Result<Value> {
		match self {
			Node::Empty => Ok(Value::Null),
			Node::Unknown(x) => Ok(x.clone()),
			Node::Iri(x) => Ok(Value::String(x.to_string())),
			Node::Entity { entity, .. } => entity.serialize(),
			Node::Scalar(x) => x.serialize().map_err(VocabError::from),
		}
	}

	/// reads a value for property `def`, trying its kinds in declaration order
	///
	/// values matching none of the kinds, and embedded entities too malformed to read, are
	/// kept as unknown rather than refused
	pub fn deserialize(value: &Value, def: &PropertyDef, resolver: &Resolver) -> crate::Result<Node> {
		if let Some(map) = value.as_object() {
			if map.keys().any(|k| resolver.aliases().unalias(k) == "type") {
				return Node::deserialize_typed(value, map, def, resolver);
			}
		}

		if value.is_null() {
			return Ok(Node::Unknown(Value::Null));
		}

		for kind in def.kinds {
			match kind {
				Kind::Type(_) => continue,
				Kind::Iri => {
					if let Some(iri) = value.as_str().and_then(|x| Iri::parse(x).ok()) {
						return Ok(Node::Iri(iri));
					}
				},
				Kind::Datatype(datatype) => {
					if let Ok(x) = Scalar::deserialize(*datatype, value) {
						return Ok(Node::Scalar(x));
					}
				},
			}
		}

		tracing::trace!("no kind of '{}' matches {value}, keeping it as unknown", def.name);
		Ok(Node::Unknown(value.clone()))
	}

	fn deserialize_typed(
		value: &Value,
		map: &serde_json::Map<String, Value>,
		def: &PropertyDef,
		resolver: &Resolver,
	) -> crate::Result<Node> {
		let resolver = resolver.nested(map);
		let Ok(names) = resolver.aliases().type_names(map) else {
			tracing::debug!("unusable type on embedded '{}', keeping it as unknown", def.name);
			return Ok(Node::Unknown(value.clone()));
		};

		for kind in def.kinds {
			let Kind::Type(capability) = *kind else { continue };
			for name in &names {
				if let Some(mut entity) = resolver.registry().resolve_as(name, capability) {
					if let Err(e) = entity.deserialize_map(map, &resolver) {
						tracing::debug!("malformed embedded {name} in '{}', keeping it as unknown: {e}", def.name);
						return Ok(Node::Unknown(value.clone()));
					}
					return Ok(Node::Entity { kind: capability, entity: Box::new(entity) });
				}
			}
		}

		tracing::trace!("types {names:?} do not fit '{}', keeping it as unknown", def.name);
		Ok(Node::Unknown(value.clone()))
	}

	/// shortcut for [Node::deserialize] with the builtin aliases of a registry
	pub fn from_value(value: &Value, def: &PropertyDef, registry: &Registry) -> crate::Result<Node> {
		Node::deserialize(value, def, &Resolver::new(registry))
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{kind, types, Object, Registry};
	use super::Node;

	fn note_content() -> &'static crate::definition::PropertyDef {
		&crate::object::properties::CONTENT
	}

	#[test]
	fn setting_a_kind_clears_the_others() {
		let mut node = Node::default();
		assert!(!node.has_any());
		node.set::<kind::String>("hello".into());
		assert!(node.is::<kind::String>());
		node.set::<kind::Iri>(crate::Iri::parse("https://example.org/x").unwrap());
		assert!(node.is::<kind::Iri>());
		assert!(!node.is::<kind::String>());
		node.set_unknown(json!({"what": 1}));
		assert!(!node.is::<kind::Iri>());
		assert!(!node.has_any());
		assert!(node.is_unknown());
		node.clear();
		assert!(node.is_empty());
		assert!(!node.is_unknown());
	}

	#[test]
	fn unresolvable_embedded_type_is_kept_verbatim() {
		let registry = Registry::activitystreams();
		let raw = json!({"type": "Frobnicator", "zap": true});
		let node = Node::from_value(&raw, &crate::object::properties::ATTACHMENT, &registry).unwrap();
		assert!(!node.has_any());
		assert_eq!(node.unknown(), Some(&raw));
		assert_eq!(node.serialize().unwrap(), raw);
	}

	#[test]
	fn resolvable_embedded_type_becomes_an_entity() {
		let registry = Registry::activitystreams();
		let raw = json!({"type": "Mention", "href": "https://example.org/users/bob"});
		let node = Node::from_value(&raw, &crate::object::properties::TAG, &registry).unwrap();
		let link = node.get::<kind::Link>().expect("mention is a link");
		assert_eq!(link.definition().name, "Mention");
		assert_eq!(node.serialize().unwrap(), raw);
	}

	#[test]
	fn strings_fall_through_to_unknown_when_not_iri() {
		let registry = Registry::activitystreams();
		let node = Node::from_value(&json!("not an iri"), &crate::object::properties::TO, &registry).unwrap();
		assert!(!node.has_any());
		assert_eq!(node.unknown(), Some(&json!("not an iri")));
	}

	#[test]
	fn untyped_map_may_be_a_language_map() {
		let registry = Registry::activitystreams();
		let node = Node::from_value(&json!({"en": "hi"}), note_content(), &registry).unwrap();
		assert!(node.is::<kind::LangString>());
		let node = Node::from_value(&json!({"en": 1}), note_content(), &registry).unwrap();
		assert!(node.is_unknown());
	}

	#[test]
	fn kind_index_orders_unknown_before_iri_before_declared() {
		let def = &crate::object::properties::ATTACHMENT;
		let unknown = Node::Unknown(json!(1));
		let iri = Node::of::<kind::Iri>(crate::Iri::parse("https://example.org").unwrap());
		let object = Node::of::<kind::Object>(types::Note::new().into_entity());
		let link = Node::of::<kind::Link>(types::Link::new().into_entity());
		assert!(unknown.less_than(&iri, def));
		assert!(iri.less_than(&object, def));
		assert!(object.less_than(&link, def));
		assert!(!link.less_than(&link, def));
	}

	#[test]
	fn ordering_is_a_strict_weak_ordering() {
		let def = note_content();
		let mut nodes = vec![
			Node::of::<kind::String>("b".into()),
			Node::Unknown(json!([1, 2])),
			Node::of::<kind::LangString>([("en".to_string(), "x".to_string())].into()),
			Node::of::<kind::String>("a".into()),
			Node::Unknown(json!(null)),
			Node::of::<kind::Boolean>(true),
			Node::Empty,
		];
		for a in &nodes {
			assert!(!a.less_than(a, def));
			for b in &nodes {
				assert!(!(a.less_than(b, def) && b.less_than(a, def)));
				for c in &nodes {
					if a.less_than(b, def) && b.less_than(c, def) {
						assert!(a.less_than(c, def));
					}
				}
			}
		}
		nodes.sort_by(|a, b| a.compare(b, def));
		let again = {
			let mut x = nodes.clone();
			x.reverse();
			x.sort_by(|a, b| a.compare(b, def));
			x
		};
		assert_eq!(nodes, again);
		assert!(nodes[0].is_empty());
		assert_eq!(nodes[3].get::<kind::String>(), Some("a"));
	}

	#[test]
	fn id_of_embedded_entity() {
		let mut note = types::Note::new();
		note.append_content_string("x".into());
		let node = Node::of::<kind::Object>(note.into_entity());
		assert!(node.id().is_none());
		let iri = crate::Iri::parse("https://example.org/notes/1").unwrap();
		assert_eq!(Node::from(iri.clone()).id(), Some(&iri));
	}
}
