use crate::macros::vocabulary;

use super::OBJECT;

vocabulary! {
	Collection => COLLECTION extends [OBJECT] with crate::object::collection::properties::TABLE
		: crate::Object, crate::Collection;
	OrderedCollection => ORDERED_COLLECTION extends [COLLECTION] with crate::object::collection::ordered::properties::TABLE
		: crate::Object, crate::Collection, crate::OrderedCollection;
	CollectionPage => COLLECTION_PAGE extends [COLLECTION] with crate::object::collection::page::properties::TABLE
		: crate::Object, crate::Collection, crate::CollectionPage;
	OrderedCollectionPage => ORDERED_COLLECTION_PAGE extends [ORDERED_COLLECTION, COLLECTION_PAGE] with crate::object::collection::ordered_page::properties::TABLE
		: crate::Object, crate::Collection, crate::OrderedCollection, crate::CollectionPage, crate::OrderedCollectionPage;
}
