//! kinds a property may hold, and marker types to address them generically
//!
//! ```ignore
//! node.set::<apb::kind::String>("hello".to_string());
//! assert_eq!(node.get::<apb::kind::String>(), Some("hello"));
//! ```

use chrono::{DateTime as ChronoDateTime, FixedOffset};

use crate::{value::{self, Datatype, LangMap, Scalar}, Entity, Node};

/// one permitted reading of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// an embedded entity satisfying the named capability
	Type(&'static str),
	/// a bare absolute IRI pointing somewhere else
	Iri,
	Datatype(Datatype),
}

impl Kind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Kind::Type(x) => x,
			Kind::Iri => "IRI",
			Kind::Datatype(d) => d.as_str(),
		}
	}
}

/// marker for a [Kind], binding it to the rust type it is stored as
pub trait Member {
	/// owned value, as handed to setters
	type Value;
	/// borrowed view, as returned by getters
	type Ref<'a>;
	const KIND: Kind;

	fn get(node: &Node) -> Option<Self::Ref<'_>>;
	fn wrap(value: Self::Value) -> Node;
}

macro_rules! entity_kinds {
	($($name:ident),+ $(,)?) => {
		$(
			pub struct $name;

			impl Member for $name {
				type Value = Entity;
				type Ref<'a> = &'a Entity;
				const KIND: Kind = Kind::Type(stringify!($name));

				fn get(node: &Node) -> Option<Self::Ref<'_>> {
					match node {
						Node::Entity { kind, entity } if *kind == stringify!($name) => Some(&**entity),
						_ => None,
					}
				}

				fn wrap(value: Entity) -> Node {
					Node::Entity { kind: stringify!($name), entity: Box::new(value) }
				}
			}
		)+
	};
}

entity_kinds![Object, Link, Collection, CollectionPage, OrderedCollection, OrderedCollectionPage];

pub struct Iri;

impl Member for Iri {
	type Value = crate::Iri;
	type Ref<'a> = &'a crate::Iri;
	const KIND: Kind = Kind::Iri;

	fn get(node: &Node) -> Option<Self::Ref<'_>> {
		match node {
			Node::Iri(x) => Some(x),
			_ => None,
		}
	}

	fn wrap(value: crate::Iri) -> Node {
		Node::Iri(value)
	}
}

macro_rules! scalar_kinds {
	($lt:lifetime; $($name:ident : $value:ty => $r:ty { $pat:pat => $out:expr }),+ $(,)?) => {
		$(
			pub struct $name;

			impl Member for $name {
				type Value = $value;
				type Ref<$lt> = $r;
				const KIND: Kind = Kind::Datatype(Datatype::$name);

				fn get(node: &Node) -> Option<Self::Ref<'_>> {
					match node {
						Node::Scalar(Scalar::$name($pat)) => Some($out),
						_ => None,
					}
				}

				fn wrap(value: $value) -> Node {
					Node::Scalar(Scalar::$name(value))
				}
			}
		)+
	};
}

// the String marker shadows std's one in this module
scalar_kinds! { 'a;
	String : std::string::String => &'a str { x => x.as_str() },
	LangString : LangMap => &'a LangMap { x => x },
	MimeType : std::string::String => &'a str { x => x.as_str() },
	Rel : std::string::String => &'a str { x => x.as_str() },
	DateTime : ChronoDateTime<FixedOffset> => ChronoDateTime<FixedOffset> { x => *x },
	Duration : value::Duration => &'a value::Duration { x => x },
	Float : f64 => f64 { x => *x },
	Boolean : bool => bool { x => *x },
	NonNegativeInteger : u64 => u64 { x => *x },
}
