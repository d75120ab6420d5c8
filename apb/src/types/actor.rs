use crate::macros::vocabulary;

use super::OBJECT;

vocabulary! {
	/// not a vocabulary type by itself: every actor type extends it, so that "Actor" works as a
	/// capability when resolving
	Actor => ACTOR extends [OBJECT] with crate::object::actor::properties::TABLE : crate::Object, crate::Actor;

	Application => APPLICATION extends [ACTOR] : crate::Object, crate::Actor;
	Group => GROUP extends [ACTOR] : crate::Object, crate::Actor;
	Organization => ORGANIZATION extends [ACTOR] : crate::Object, crate::Actor;
	Person => PERSON extends [ACTOR] : crate::Object, crate::Actor;
	Service => SERVICE extends [ACTOR] : crate::Object, crate::Actor;
}
