use crate::macros::properties;

properties! {
	pub trait Place : crate::Object {
		accuracy [one] : Float;
		latitude [one] : Float;
		longitude [one] : Float;
		radius [one] : Float;
		units [one] : String, Iri;
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{types, Base, Place, Registry};

	#[test]
	fn coordinates() {
		let registry = Registry::activitystreams();
		let raw = json!({
			"type": "Place",
			"name": "Fresno Area",
			"latitude": 36.75,
			"longitude": 119.7667,
			"radius": 15,
			"units": "miles",
		});
		let place = types::Place::deserialize(&raw, &registry).unwrap();
		assert_eq!(place.get_latitude_float(), Some(36.75));
		assert_eq!(place.get_radius_float(), Some(15.));
		assert_eq!(place.get_units_string(), Some("miles"));
		assert_eq!(place.serialize().unwrap(), raw);
	}
}
