pub mod ordered;
pub mod page;
pub mod ordered_page;

use crate::macros::properties;

properties! {
	/// set of objects, possibly split across pages
	pub trait Collection : crate::Object {
		total_items::totalItems [one] : NonNegativeInteger;
		current [one] : CollectionPage, Link, Iri;
		first [one] : CollectionPage, Link, Iri;
		last [one] : CollectionPage, Link, Iri;
		items [many] : Object, Link, Iri;
	}
}
