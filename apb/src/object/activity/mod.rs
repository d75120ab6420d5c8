pub mod question;

use crate::macros::properties;

properties! {
	/// something that happened, or is being asked to happen
	pub trait Activity : crate::Object {
		actor [many] : Object, Link, Iri;
		object [many] : Object, Link, Iri;
		target [many] : Object, Link, Iri;
		result [many] : Object, Link, Iri;
		origin [many] : Object, Link, Iri;
		instrument [many] : Object, Link, Iri;
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{types, Activity, Base, Registry};

	#[test]
	fn follow_with_bare_references() {
		let registry = Registry::activitystreams();
		let raw = json!({
			"id": "https://example.org/activities/follow/1",
			"type": "Follow",
			"actor": "https://example.org/users/alice",
			"object": "https://remote.example/users/bob",
		});
		let follow = types::Follow::deserialize(&raw, &registry).unwrap();
		assert!(follow.is_actor_iri(0));
		assert_eq!(
			follow.get_object_iri(0).map(|x| x.as_str()),
			Some("https://remote.example/users/bob")
		);
		assert_eq!(follow.serialize().unwrap(), raw);
	}

	#[test]
	fn undo_embeds_the_undone_activity() {
		let registry = Registry::activitystreams();
		let raw = json!({
			"type": "Undo",
			"actor": "https://example.org/users/alice",
			"object": {
				"type": "Like",
				"actor": "https://example.org/users/alice",
				"object": "https://remote.example/notes/9",
			},
		});
		let undo = types::Undo::deserialize(&raw, &registry).unwrap();
		let like = undo.get_object_object(0).expect("embedded like");
		assert_eq!(like.definition().name, "Like");
		assert!(Activity::is_object_iri(like, 0));
		assert_eq!(undo.serialize().unwrap(), raw);
	}
}
