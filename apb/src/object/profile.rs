use crate::macros::properties;

properties! {
	pub trait Profile : crate::Object {
		describes [one] : Object, Iri;
	}
}
