use crate::macros::properties;

properties! {
	/// what is left after a deletion
	pub trait Tombstone : crate::Object {
		former_type::formerType [many] : String;
		deleted [one] : DateTime;
	}
}

#[cfg(test)]
mod test {
	use crate::{types, Base, Iri, Tombstone};

	#[test]
	fn tombstone_output() {
		let mut tomb = types::Tombstone::new();
		tomb.set_id(Some(Iri::parse("https://example.org/notes/1").unwrap()));
		tomb.append_former_type_string("Note".into());
		tomb.set_deleted_date_time("2024-06-04T17:09:20+02:00".parse().unwrap());
		assert_eq!(
			tomb.serialize().unwrap(),
			serde_json::json!({
				"id": "https://example.org/notes/1",
				"type": "Tombstone",
				"formerType": "Note",
				"deleted": "2024-06-04T17:09:20+02:00",
			})
		);
	}
}
