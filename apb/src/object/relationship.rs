use crate::macros::properties;

properties! {
	pub trait Relationship : crate::Object {
		subject [one] : Object, Link, Iri;
		object [many] : Object, Link, Iri;
		relationship [many] : Object, Iri;
	}
}
