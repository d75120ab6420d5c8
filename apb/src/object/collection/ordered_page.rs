use crate::macros::properties;

properties! {
	pub trait OrderedCollectionPage : crate::OrderedCollection, crate::CollectionPage {
		start_index::startIndex [one] : NonNegativeInteger;
	}
}
