use crate::macros::properties;

properties! {
	/// poll: either `oneOf` or `anyOf` lists the options
	pub trait Question : crate::Activity {
		one_of::oneOf [many] : Object, Link, Iri;
		any_of::anyOf [many] : Object, Link, Iri;
		closed [many] : Object, Link, DateTime, Boolean, Iri;
	}
}
