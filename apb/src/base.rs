use std::cmp::Ordering;

use serde_json::Value;

use crate::{Entity, Iri};

/// anything backed by an [Entity]: identity, `type` list and extension bag
pub trait Base {
	fn entity(&self) -> &Entity;
	fn entity_mut(&mut self) -> &mut Entity;

	fn id(&self) -> Option<&Iri> {
		self.entity().id()
	}

	fn set_id(&mut self, id: Option<Iri>) {
		self.entity_mut().set_id(id)
	}

	fn types(&self) -> &[String] {
		self.entity().types()
	}

	fn type_len(&self) -> usize {
		self.entity().types().len()
	}

	fn get_type(&self, index: usize) -> Option<&str> {
		self.entity().types().get(index).map(|x| x.as_str())
	}

	fn has_type(&self, name: &str) -> bool {
		self.entity().types().iter().any(|t| t == name)
	}

	fn append_type(&mut self, name: impl ToString) {
		self.entity_mut().types_mut().push(name.to_string())
	}

	fn prepend_type(&mut self, name: impl ToString) {
		self.entity_mut().types_mut().insert(0, name.to_string())
	}

	/// panics if `index` is out of range
	fn remove_type(&mut self, index: usize) -> String {
		self.entity_mut().types_mut().remove(index)
	}

	fn extension(&self, key: &str) -> Option<&Value> {
		self.entity().extension(key)
	}

	fn set_extension(&mut self, key: impl ToString, value: Value) -> crate::Result<Option<Value>> {
		self.entity_mut().set_extension(key, value)
	}

	fn remove_extension(&mut self, key: &str) -> Option<Value> {
		self.entity_mut().remove_extension(key)
	}

	fn serialize(&self) -> crate::Result<Value> {
		self.entity().serialize()
	}

	fn compare<B: Base + ?Sized>(&self, other: &B) -> Ordering {
		self.entity().compare(other.entity())
	}

	fn less_than<B: Base + ?Sized>(&self, other: &B) -> bool {
		self.compare(other) == Ordering::Less
	}
}

impl Base for Entity {
	fn entity(&self) -> &Entity {
		self
	}

	fn entity_mut(&mut self) -> &mut Entity {
		self
	}
}
