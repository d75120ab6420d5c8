//! # apb
//! > ActivityStreams vocabulary as typed, lossless data
//!
//! every ActivityStreams object is an [Entity]: a generic record whose properties are
//! described by static tables ([TypeDef], [PropertyDef]). each property holds [Node]s, a
//! tagged union of the kinds that property may be (embedded entity, IRI, terminal value),
//! plus an unknown fallback which keeps whatever could not be interpreted, so that
//! nothing is lost between deserialization and serialization.
//!
//! typed access goes through accessor traits ([Object], [Activity], [Collection], ...)
//! and typed wrappers ([types::Note], [types::Create], ...):
//!
//! ```
//! use apb::{Base, Object, Registry};
//!
//! let registry = Registry::activitystreams();
//! let note = apb::types::Note::deserialize(
//! 	&serde_json::json!({"type": "Note", "content": "hello"}),
//! 	&registry,
//! ).unwrap();
//! assert_eq!(note.get_content_string(0), Some("hello"));
//! assert_eq!(note.get_type(0), Some("Note"));
//! ```

pub(crate) mod macros;

pub mod value;
pub use value::{Datatype, LangMap, Scalar, TypeMismatch};

mod iri;
pub use iri::{Iri, IriError};

mod error;
pub use error::{Result, VocabError};

pub mod kind;
pub use kind::{Kind, Member};

mod definition;
pub use definition::{PropertyDef, TypeDef};

mod node;
pub use node::Node;

mod entity;
pub use entity::Entity;

mod base;
pub use base::Base;

mod registry;
pub use registry::{Registry, Resolver};

pub mod link;
pub use link::Link;

pub mod object;
pub use object::{
	Object,
	activity::{Activity, question::Question},
	actor::Actor,
	collection::{
		Collection,
		ordered::OrderedCollection,
		page::CollectionPage,
		ordered_page::OrderedCollectionPage,
	},
	place::Place,
	profile::Profile,
	relationship::Relationship,
	tombstone::Tombstone,
};

pub mod types;

pub mod jsonld;
pub use jsonld::{Aliases, LD};

pub mod target;
pub use target::{Addressed, PUBLIC};
