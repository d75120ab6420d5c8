use crate::macros::properties;

properties! {
	/// ActivityPub actor: whoever owns an inbox and an outbox
	pub trait Actor : crate::Object {
		inbox [one] : OrderedCollection, Iri;
		outbox [one] : OrderedCollection, Iri;
		following [one] : Collection, Iri;
		followers [one] : Collection, Iri;
		liked [one] : Collection, Iri;
		streams [many] : Collection, Iri;
		preferred_username::preferredUsername [one, map] : String;
		endpoints [one] : Object, Iri;
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{types, Actor, Base, Registry};

	#[test]
	fn mastodon_style_actor() {
		let registry = Registry::activitystreams();
		let raw = json!({
			"id": "https://example.org/users/alice",
			"type": "Person",
			"preferredUsername": "alice",
			"inbox": "https://example.org/users/alice/inbox",
			"outbox": "https://example.org/users/alice/outbox",
			"followers": "https://example.org/users/alice/followers",
			"endpoints": {"sharedInbox": "https://example.org/inbox"},
			"publicKey": {
				"id": "https://example.org/users/alice#main-key",
				"owner": "https://example.org/users/alice",
				"publicKeyPem": "-----BEGIN PUBLIC KEY-----...",
			},
		});
		let person = types::Person::deserialize(&raw, &registry).unwrap();
		assert_eq!(person.get_preferred_username_string(), Some("alice"));
		assert_eq!(
			person.get_inbox_iri().map(|x| x.as_str()),
			Some("https://example.org/users/alice/inbox")
		);
		// untyped map, kept as is
		assert!(person.has_unknown_endpoints());
		assert!(person.extension("publicKey").is_some());
		assert_eq!(person.serialize().unwrap(), raw);
	}
}
