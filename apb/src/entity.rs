use std::{cmp::Ordering, collections::BTreeMap};

use serde_json::{Map, Value};

use crate::{
	definition::{PropertyDef, TypeDef},
	value::{self, LangMap},
	Iri, Node, Registry, Resolver, VocabError,
};

static EMPTY: Node = Node::Empty;

#[derive(Debug, Clone)]
struct Slot {
	def: &'static PropertyDef,
	nodes: Vec<Node>,
	map: Option<LangMap>,
}

impl Slot {
	fn new(def: &'static PropertyDef) -> Self {
		Slot { def, nodes: Vec::new(), map: None }
	}

	fn values(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter().filter(|n| !n.is_empty())
	}

	fn language_map(&self) -> Option<&LangMap> {
		self.map.as_ref().filter(|m| !m.is_empty())
	}

	fn is_vacant(&self) -> bool {
		self.values().next().is_none() && self.language_map().is_none()
	}

	fn compare(&self, other: &Self) -> Ordering {
		let mut lhs = self.values();
		let mut rhs = other.values();
		loop {
			match (lhs.next(), rhs.next()) {
				(None, None) => break,
				(None, Some(_)) => return Ordering::Less,
				(Some(_), None) => return Ordering::Greater,
				(Some(a), Some(b)) => match a.compare(b, self.def) {
					Ordering::Equal => continue,
					x => return x,
				},
			}
		}
		match (self.language_map(), other.language_map()) {
			(None, None) => Ordering::Equal,
			(None, Some(_)) => Ordering::Less,
			(Some(_), None) => Ordering::Greater,
			(Some(a), Some(b)) => value::compare_lang_string(a, b),
		}
	}
}

/// one ActivityStreams object: whatever its type, properties live in here
///
/// typed access goes through the accessor traits ([crate::Object], [crate::Activity], ...)
/// which [Entity] implements all of; typed wrappers in [crate::types] narrow that down
#[derive(Debug, Clone)]
pub struct Entity {
	definition: &'static TypeDef,
	pub(crate) id: Option<Iri>,
	types: Vec<String>,
	slots: BTreeMap<&'static str, Slot>,
	extensions: Map<String, Value>,
}

impl PartialEq for Entity {
	fn eq(&self, other: &Self) -> bool {
		self.compare(other) == Ordering::Equal
	}
}

impl Entity {
	/// blank entity of given type, with its own name already listed in `type`
	pub fn new(definition: &'static TypeDef) -> Self {
		let mut out = Entity::empty(definition);
		out.types.push(definition.name.to_string());
		out
	}

	/// blank entity with not even a `type`, ready to be filled by deserialization
	pub fn empty(definition: &'static TypeDef) -> Self {
		Entity {
			definition,
			id: None,
			types: Vec::new(),
			slots: BTreeMap::new(),
			extensions: Map::new(),
		}
	}

	pub fn definition(&self) -> &'static TypeDef {
		self.definition
	}

	pub fn id(&self) -> Option<&Iri> {
		self.id.as_ref()
	}

	pub fn set_id(&mut self, id: Option<Iri>) {
		self.id = id;
	}

	pub fn types(&self) -> &[String] {
		&self.types
	}

	pub fn types_mut(&mut self) -> &mut Vec<String> {
		&mut self.types
	}

	pub fn extensions(&self) -> &Map<String, Value> {
		&self.extensions
	}

	pub fn extension(&self, key: &str) -> Option<&Value> {
		self.extensions.get(key)
	}

	/// stores an unrecognized key; keys owned by typed properties are refused
	pub fn set_extension(&mut self, key: impl ToString, value: Value) -> crate::Result<Option<Value>> {
		let key = key.to_string();
		if self.definition.claims(&key) {
			return Err(VocabError::ClaimedKey(key));
		}
		Ok(self.extensions.insert(key, value))
	}

	pub fn remove_extension(&mut self, key: &str) -> Option<Value> {
		self.extensions.remove(key)
	}

	/// value of a single valued property, empty if unset
	pub fn node(&self, def: &PropertyDef) -> &Node {
		self.slots.get(def.name)
			.and_then(|s| s.nodes.first())
			.unwrap_or(&EMPTY)
	}

	pub fn node_mut(&mut self, def: &'static PropertyDef) -> &mut Node {
		let slot = self.slot_mut(def);
		if slot.nodes.is_empty() {
			slot.nodes.push(Node::Empty);
		}
		&mut slot.nodes[0]
	}

	/// values of a multi valued property, in order
	pub fn nodes(&self, def: &PropertyDef) -> &[Node] {
		self.slots.get(def.name)
			.map(|s| s.nodes.as_slice())
			.unwrap_or_default()
	}

	pub fn nodes_mut(&mut self, def: &'static PropertyDef) -> &mut Vec<Node> {
		&mut self.slot_mut(def).nodes
	}

	/// drops every value of a property, leaving its language map alone
	pub fn clear(&mut self, def: &PropertyDef) {
		if let Some(slot) = self.slots.get_mut(def.name) {
			slot.nodes.clear();
			if slot.is_vacant() {
				self.slots.remove(def.name);
			}
		}
	}

	/// orders a multi valued property with the property value ordering
	pub fn sort(&mut self, def: &'static PropertyDef) {
		self.nodes_mut(def).sort_by(|a, b| a.compare(b, def));
	}

	pub fn language_map(&self, def: &PropertyDef) -> Option<&LangMap> {
		self.slots.get(def.name)?.language_map()
	}

	pub fn set_language_map(&mut self, def: &'static PropertyDef, map: Option<LangMap>) {
		self.slot_mut(def).map = map;
		if self.slots.get(def.name).is_some_and(Slot::is_vacant) {
			self.slots.remove(def.name);
		}
	}

	pub fn language_map_mut(&mut self, def: &'static PropertyDef) -> &mut LangMap {
		self.slot_mut(def).map.get_or_insert_with(LangMap::new)
	}

	/// wire names of every property currently holding something
	pub fn properties(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.slots.iter()
			.filter(|(_, s)| !s.is_vacant())
			.map(|(k, _)| *k)
	}

	fn slot_mut(&mut self, def: &'static PropertyDef) -> &mut Slot {
		self.slots.entry(def.name).or_insert_with(|| Slot::new(def))
	}

	/// json form of this entity, without `@context`
	///
	/// unrecognized keys go in first so that typed properties always win; multi valued
	/// properties holding a single value are written bare and empty ones are left out
	pub fn serialize(&self) -> crate::Result<Value> {
		let mut out = self.extensions.clone();

		for (&name, slot) in &self.slots {
			let mut values = slot.values()
				.map(|n| n.serialize().map_err(|e| match e {
					VocabError::TypeMismatch(_) => VocabError::Unrepresentable(name),
					e => e,
				}))
				.collect::<crate::Result<Vec<Value>>>()?;

			if slot.def.functional || values.len() == 1 {
				if let Some(x) = values.pop() {
					out.insert(name.to_string(), x);
				}
			} else if !values.is_empty() {
				out.insert(name.to_string(), Value::Array(values));
			}

			if let (Some(key), Some(map)) = (slot.def.map, slot.language_map()) {
				out.insert(key.to_string(), value::serialize_lang_string(map));
			}
		}

		if let Some(id) = &self.id {
			out.insert("id".to_string(), Value::String(id.to_string()));
		}

		let mut types = self.types.clone();
		if !types.iter().any(|t| t == self.definition.name) {
			types.push(self.definition.name.to_string());
		}
		let types = if types.len() == 1 {
			Value::String(types.remove(0))
		} else {
			Value::Array(types.into_iter().map(Value::String).collect())
		};
		out.insert("type".to_string(), types);

		Ok(Value::Object(out))
	}

	/// builds the entity described by a json document, as the first of its types the
	/// registry knows
	pub fn deserialize(value: &Value, registry: &Registry) -> crate::Result<Entity> {
		let map = value.as_object()
			.ok_or_else(|| VocabError::malformed("document is not a json object"))?;
		let resolver = Resolver::new(registry).nested(map);
		let names = resolver.aliases().type_names(map)?;
		let Some(definition) = names.iter().find_map(|n| registry.definition(n)) else {
			return Err(VocabError::Unresolved(names));
		};
		let mut out = Entity::empty(definition);
		out.deserialize_map(map, &resolver)?;
		Ok(out)
	}

	/// like [Entity::deserialize] but as a fixed type, whatever `type` says
	pub fn deserialize_as(definition: &'static TypeDef, value: &Value, registry: &Registry) -> crate::Result<Entity> {
		let map = value.as_object()
			.ok_or_else(|| VocabError::malformed("document is not a json object"))?;
		let mut out = Entity::empty(definition);
		out.deserialize_map(map, &Resolver::new(registry))?;
		Ok(out)
	}

	/// fills this entity from a json map, keeping unclaimed keys in the extension bag
	pub fn deserialize_map(&mut self, map: &Map<String, Value>, resolver: &Resolver) -> crate::Result<()> {
		let resolver = resolver.nested(map);
		let aliases = resolver.aliases();

		for (key, value) in map {
			if key == "@context" {
				continue;
			}

			match aliases.unalias(key) {
				"id" => {
					let Some(text) = value.as_str() else {
						return Err(VocabError::malformed(format!("id {value} is not a string")));
					};
					self.id = Some(Iri::parse(text).map_err(VocabError::malformed)?);
				},
				"type" => self.types = aliases.types_of(value)?,
				term => {
					if let Some(def) = self.definition.property(term) {
						let nodes = match value {
							Value::Array(arr) if !def.functional => arr.iter()
								.map(|x| Node::deserialize(x, def, &resolver))
								.collect::<crate::Result<Vec<Node>>>()?,
							_ => vec![Node::deserialize(value, def, &resolver)?],
						};
						self.slot_mut(def).nodes = nodes;
					} else if let Some(def) = self.definition.language_map(term) {
						match value::deserialize_lang_string(value) {
							Ok(m) => self.slot_mut(def).map = Some(m),
							Err(e) => {
								tracing::debug!("keeping malformed {key} as extension: {e}");
								self.extensions.insert(key.clone(), value.clone());
							},
						}
					} else {
						self.extensions.insert(key.clone(), value.clone());
					}
				},
			}
		}

		Ok(())
	}

	/// total order over entities, usable to normalize unordered collections
	pub fn compare(&self, other: &Self) -> Ordering {
		self.definition.name.cmp(other.definition.name)
			.then_with(|| self.types.cmp(&other.types))
			.then_with(|| self.id.cmp(&other.id))
			.then_with(|| self.compare_slots(other))
			.then_with(|| canonical(&self.extensions).cmp(&canonical(&other.extensions)))
	}

	fn compare_slots(&self, other: &Self) -> Ordering {
		let mut lhs = self.slots.iter().filter(|(_, s)| !s.is_vacant());
		let mut rhs = other.slots.iter().filter(|(_, s)| !s.is_vacant());
		loop {
			match (lhs.next(), rhs.next()) {
				(None, None) => return Ordering::Equal,
				(None, Some(_)) => return Ordering::Less,
				(Some(_), None) => return Ordering::Greater,
				(Some((ka, a)), Some((kb, b))) => match ka.cmp(kb).then_with(|| a.compare(b)) {
					Ordering::Equal => continue,
					x => return x,
				},
			}
		}
	}

	pub fn less_than(&self, other: &Self) -> bool {
		self.compare(other) == Ordering::Less
	}
}

fn canonical(map: &Map<String, Value>) -> String {
	serde_json::to_string(map).unwrap_or_default()
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{kind, types, Activity, Base, Entity, Object, Registry, VocabError};

	#[test]
	fn note_literal_case() {
		let registry = Registry::activitystreams();
		let raw = json!({"content": "hello", "type": "Note"});
		let note = types::Note::deserialize(&raw, &registry).unwrap();
		assert!(note.is_content_string(0));
		assert_eq!(note.get_content_string(0), Some("hello"));
		assert_eq!(note.get_type(0), Some("Note"));
		assert_eq!(note.serialize().unwrap(), raw);
	}

	#[test]
	fn generic_deserialize_picks_the_known_type() {
		let registry = Registry::activitystreams();
		let raw = json!({"type": ["Frob", "Article"], "name": "x"});
		let entity = Entity::deserialize(&raw, &registry).unwrap();
		assert_eq!(entity.definition().name, "Article");
		assert_eq!(entity.serialize().unwrap(), raw);
	}

	#[test]
	fn unknown_top_level_type_is_unresolved() {
		let registry = Registry::activitystreams();
		let err = Entity::deserialize(&json!({"type": "Frob"}), &registry).unwrap_err();
		assert!(matches!(err, VocabError::Unresolved(names) if names == vec!["Frob".to_string()]));
		assert!(matches!(
			Entity::deserialize(&json!(["Note"]), &registry),
			Err(VocabError::MalformedInput(_))
		));
	}

	#[test]
	fn unknown_keys_round_trip() {
		let registry = Registry::activitystreams();
		let raw = json!({
			"type": "Note",
			"id": "https://example.org/notes/1",
			"toot:blurhash": "UEHLh[WB2yk8pyoJadR*.7kCMdnj",
			"quoteUrl": "https://example.org/notes/0",
			"sensitive": false,
			"attachment": [
				{"type": "Document", "url": "https://example.org/a.png", "mediaType": "image/png"},
				{"type": "Frobnicator", "zap": [1, 2, 3]},
			],
		});
		let entity = Entity::deserialize(&raw, &registry).unwrap();
		assert_eq!(entity.extension("quoteUrl"), Some(&json!("https://example.org/notes/0")));
		assert_eq!(entity.serialize().unwrap(), raw);
	}

	#[test]
	fn context_is_dropped_and_aliases_applied() {
		let registry = Registry::activitystreams();
		let raw = json!({
			"@context": ["https://www.w3.org/ns/activitystreams", {"act": "https://www.w3.org/ns/activitystreams#"}],
			"type": "act:Note",
			"act:content": "hi",
		});
		let note = Entity::deserialize(&raw, &registry).unwrap();
		assert_eq!(note.definition().name, "Note");
		assert_eq!(Object::get_content_string(&note, 0), Some("hi"));
		assert_eq!(note.serialize().unwrap(), json!({"type": "Note", "content": "hi"}));
	}

	#[test]
	fn compaction_law() {
		let mut note = types::Note::new();
		assert!(note.serialize().unwrap().get("to").is_none());
		note.append_to_iri(crate::Iri::parse("https://example.org/a").unwrap());
		assert_eq!(note.serialize().unwrap()["to"], json!("https://example.org/a"));
		note.append_to_iri(crate::Iri::parse("https://example.org/b").unwrap());
		note.prepend_to_iri(crate::Iri::parse("https://example.org/c").unwrap());
		assert_eq!(
			note.serialize().unwrap()["to"],
			json!(["https://example.org/c", "https://example.org/a", "https://example.org/b"])
		);
		note.remove_to(0);
		note.remove_to(0);
		note.remove_to(0);
		assert_eq!(note.to_len(), 0);
		assert!(note.serialize().unwrap().get("to").is_none());
	}

	#[test]
	fn canonical_type_is_appended() {
		let mut note = types::Note::new();
		note.remove_type(0);
		note.append_type("Thing");
		assert_eq!(note.serialize().unwrap()["type"], json!(["Thing", "Note"]));
	}

	#[test]
	fn language_maps_are_siblings() {
		let registry = Registry::activitystreams();
		let raw = json!({
			"type": "Note",
			"content": "ciao",
			"contentMap": {"it": "ciao", "en": "hello"},
			"nameMap": "not a map",
		});
		let note = types::Note::deserialize(&raw, &registry).unwrap();
		assert_eq!(note.get_content_map("en"), Some("hello"));
		assert_eq!(note.content_map_languages(), vec!["en", "it"]);
		assert_eq!(note.extension("nameMap"), Some(&json!("not a map")));
		assert_eq!(note.serialize().unwrap(), raw);
	}

	#[test]
	fn typed_fields_win_over_extensions() {
		let mut note = types::Note::new();
		assert!(matches!(
			note.set_extension("content", json!("sneaky")),
			Err(VocabError::ClaimedKey(_))
		));
		assert!(note.set_extension("contentMap", json!({})).is_err());
		note.set_extension("misskey:_misskey_content", json!("x")).unwrap();
		note.append_content_string("real".into());
		let out = note.serialize().unwrap();
		assert_eq!(out["content"], json!("real"));
		assert_eq!(out["misskey:_misskey_content"], json!("x"));
	}

	#[test]
	fn malformed_id_fails() {
		let registry = Registry::activitystreams();
		assert!(matches!(
			Entity::deserialize(&json!({"type": "Note", "id": 12}), &registry),
			Err(VocabError::MalformedInput(_))
		));
		assert!(matches!(
			Entity::deserialize(&json!({"type": "Note", "id": "/relative"}), &registry),
			Err(VocabError::MalformedInput(_))
		));
	}

	#[test]
	fn malformed_embedded_entity_is_kept_as_unknown() {
		let registry = Registry::activitystreams();
		let raw = json!({
			"type": "Create",
			"id": "https://remote.example/activities/1",
			"object": {"type": "Note", "id": "/notes/1", "content": "hi"},
			"tag": [
				{"type": "Mention", "href": "https://remote.example/users/bob"},
				{"type": "Hashtag", "id": 3, "name": "#broken"},
			],
		});
		let create = types::Create::deserialize(&raw, &registry).unwrap();
		assert!(create.has_unknown_object(0));
		assert!(create.get_object_object(0).is_none());
		assert!(create.is_tag_link(0));
		assert!(create.has_unknown_tag(1));
		assert_eq!(create.serialize().unwrap(), raw);
	}

	#[test]
	fn functional_property_given_a_list_is_unknown() {
		let registry = Registry::activitystreams();
		let raw = json!({"type": "Note", "published": ["2024-06-04T17:09:20Z"]});
		let note = types::Note::deserialize(&raw, &registry).unwrap();
		assert!(note.has_unknown_published());
		assert!(note.get_published_date_time().is_none());
		assert_eq!(note.serialize().unwrap(), raw);
	}

	#[test]
	fn explicit_null_is_preserved() {
		let registry = Registry::activitystreams();
		let raw = json!({"type": "Note", "inReplyTo": null});
		let note = types::Note::deserialize(&raw, &registry).unwrap();
		assert_eq!(note.in_reply_to_len(), 1);
		assert_eq!(note.get_unknown_in_reply_to(0), Some(&json!(null)));
		assert_eq!(note.serialize().unwrap(), raw);
	}

	#[test]
	fn embedded_activity_round_trip() {
		let registry = Registry::activitystreams();
		let raw = json!({
			"id": "https://example.org/activities/1",
			"type": "Create",
			"actor": "https://example.org/users/alice",
			"to": ["https://www.w3.org/ns/activitystreams#Public", "https://example.org/users/bob"],
			"object": {
				"id": "https://example.org/notes/1",
				"type": "Note",
				"attributedTo": "https://example.org/users/alice",
				"content": "hello",
				"published": "2024-06-04T17:09:20Z",
				"tag": {"type": "Mention", "href": "https://example.org/users/bob", "name": "@bob"},
			},
		});
		let create = types::Create::deserialize(&raw, &registry).unwrap();
		let object = create.get_object_object(0).expect("embedded object");
		assert_eq!(object.definition().name, "Note");
		let tag = Object::tag(object)[0].get::<kind::Link>().expect("mention");
		assert_eq!(tag.definition().name, "Mention");
		assert_eq!(create.serialize().unwrap(), raw);

		let again = types::Create::deserialize(&create.serialize().unwrap(), &registry).unwrap();
		assert_eq!(again, create);
	}

	#[test]
	fn ordering_is_total_and_consistent() {
		let mut a = types::Note::new();
		a.append_content_string("a".into());
		let mut b = types::Note::new();
		b.append_content_string("b".into());
		let c = types::Article::new();
		assert!(a.less_than(&b));
		assert!(!b.less_than(&a));
		assert!(c.less_than(&a));
		assert!(!a.less_than(&a));
	}
}
