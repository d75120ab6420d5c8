use crate::{Iri, Link, Node, Object};

pub const PUBLIC : &str = "https://www.w3.org/ns/activitystreams#Public";

/// who a node points at: a bare IRI, an embedded object's id or a link's href
fn target(node: &Node) -> Option<&Iri> {
	match node {
		Node::Iri(x) => Some(x),
		Node::Entity { entity, .. } => entity.id()
			.or_else(|| Link::get_href_iri(&**entity)),
		_ => None,
	}
}

pub trait Addressed {
	/// every recipient in to, bto, cc, bcc and audience, in this order
	fn addressed(&self) -> Vec<Iri>;
	/// primary recipients only: to and bto
	fn mentioning(&self) -> Vec<Iri>;
	/// drops blind recipients, which must never leave the server
	fn strip_hidden_recipients(&mut self);
}

impl<T: Object> Addressed for T {
	fn addressed(&self) -> Vec<Iri> {
		self.to().iter()
			.chain(self.bto())
			.chain(self.cc())
			.chain(self.bcc())
			.chain(self.audience())
			.filter_map(target)
			.cloned()
			.collect()
	}

	fn mentioning(&self) -> Vec<Iri> {
		self.to().iter()
			.chain(self.bto())
			.filter_map(target)
			.cloned()
			.collect()
	}

	fn strip_hidden_recipients(&mut self) {
		self.clear_bto();
		self.clear_bcc();
	}
}

/// true if this IRI is the special public collection, in any of its spellings
pub fn is_public(iri: &Iri) -> bool {
	matches!(iri.as_str(), PUBLIC | "as:Public" | "Public")
}
