//! builtin vocabulary: static type definitions and typed wrappers over [crate::Entity]
//!
//! wrappers share their names with the accessor traits, so they live in their own module

mod activity;
mod actor;
mod collection;
mod link;
mod object;

pub use activity::*;
pub use actor::*;
pub use collection::*;
pub use link::*;
pub use object::*;

use crate::TypeDef;

/// every concrete type the ActivityStreams vocabulary defines, plus `Hashtag`
pub static BUILTIN: &[&TypeDef] = &[
	&OBJECT, &ARTICLE, &DOCUMENT, &AUDIO, &IMAGE, &VIDEO, &PAGE, &EVENT, &NOTE,
	&PLACE, &PROFILE, &RELATIONSHIP, &TOMBSTONE,
	&LINK, &MENTION, &HASHTAG,
	&COLLECTION, &ORDERED_COLLECTION, &COLLECTION_PAGE, &ORDERED_COLLECTION_PAGE,
	&APPLICATION, &GROUP, &ORGANIZATION, &PERSON, &SERVICE,
	&ACTIVITY, &INTRANSITIVE_ACTIVITY, &QUESTION, &ARRIVE, &TRAVEL,
	&ACCEPT, &TENTATIVE_ACCEPT, &ADD, &ANNOUNCE, &CREATE, &DELETE, &DISLIKE, &FLAG,
	&FOLLOW, &IGNORE, &BLOCK, &JOIN, &LEAVE, &LIKE, &LISTEN, &MOVE, &OFFER, &INVITE,
	&READ, &REJECT, &TENTATIVE_REJECT, &REMOVE, &UNDO, &UPDATE, &VIEW,
];

#[cfg(test)]
mod test {
	use super::BUILTIN;

	#[test]
	fn builtin_names_are_unique() {
		let mut names: Vec<&str> = BUILTIN.iter().map(|d| d.name).collect();
		names.sort();
		names.dedup();
		assert_eq!(names.len(), BUILTIN.len());
	}

	#[test]
	fn every_builtin_is_an_object_or_a_link() {
		for def in BUILTIN {
			assert!(def.satisfies("Object") ^ def.satisfies("Link"), "{}", def.name);
		}
	}

	#[test]
	fn wrappers_narrow_entities() {
		let note: crate::Entity = super::Note::new().into();
		assert!(super::Create::try_from(note.clone()).is_err());
		assert!(super::Note::try_from(note).is_ok());
		let create: crate::Entity = super::Create::new().into();
		assert!(super::Activity::try_from(create).is_ok());
	}
}
