use crate::macros::vocabulary;

vocabulary! {
	Object => OBJECT extends [] with crate::object::properties::TABLE : crate::Object;

	Article => ARTICLE extends [OBJECT] : crate::Object;
	Event => EVENT extends [OBJECT] : crate::Object;
	/// short written work, the usual status update
	Note => NOTE extends [OBJECT] : crate::Object;

	Document => DOCUMENT extends [OBJECT] : crate::Object;
	Audio => AUDIO extends [DOCUMENT] : crate::Object;
	Image => IMAGE extends [DOCUMENT] : crate::Object;
	Video => VIDEO extends [DOCUMENT] : crate::Object;
	Page => PAGE extends [DOCUMENT] : crate::Object;

	Place => PLACE extends [OBJECT] with crate::object::place::properties::TABLE : crate::Object, crate::Place;
	Profile => PROFILE extends [OBJECT] with crate::object::profile::properties::TABLE : crate::Object, crate::Profile;
	Relationship => RELATIONSHIP extends [OBJECT] with crate::object::relationship::properties::TABLE : crate::Object, crate::Relationship;
	Tombstone => TOMBSTONE extends [OBJECT] with crate::object::tombstone::properties::TABLE : crate::Object, crate::Tombstone;
}
