use crate::macros::properties;

properties! {
	pub trait OrderedCollection : crate::Collection {
		ordered_items::orderedItems [many] : Object, Link, Iri;
	}
}
