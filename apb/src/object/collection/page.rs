use crate::macros::properties;

properties! {
	/// one slice of a collection, chained through `next` and `prev`
	pub trait CollectionPage : crate::Collection {
		part_of::partOf [one] : Collection, Link, Iri;
		next [one] : CollectionPage, Link, Iri;
		prev [one] : CollectionPage, Link, Iri;
	}
}
