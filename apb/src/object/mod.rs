pub mod activity;
pub mod actor;
pub mod collection;
pub mod place;
pub mod profile;
pub mod relationship;
pub mod tombstone;

use crate::macros::properties;

properties! {
	/// properties shared by every ActivityStreams object
	pub trait Object : crate::Base {
		altitude [one] : Float;
		attachment [many] : Object, Link, Iri;
		attributed_to::attributedTo [many] : Object, Link, Iri;
		audience [many] : Object, Link, Iri;
		content [many, map] : String, LangString;
		context [many] : Object, Link, Iri;
		name [many, map] : String, LangString;
		end_time::endTime [one] : DateTime;
		generator [many] : Object, Link, Iri;
		icon [many] : Object, Link, Iri;
		image [many] : Object, Link, Iri;
		in_reply_to::inReplyTo [many] : Object, Link, Iri;
		location [many] : Object, Link, Iri;
		preview [many] : Link, Object, Iri;
		published [one] : DateTime;
		replies [one] : Collection, Iri;
		start_time::startTime [one] : DateTime;
		summary [many, map] : String, LangString;
		tag [many] : Object, Link, Iri;
		updated [one] : DateTime;
		url [many] : Link, Iri;
		to [many] : Object, Link, Iri;
		bto [many] : Object, Link, Iri;
		cc [many] : Object, Link, Iri;
		bcc [many] : Object, Link, Iri;
		media_type::mediaType [one] : MimeType;
		duration [one] : Duration;
		source [one] : Object;
		likes [one] : Collection, Iri;
		shares [one] : Collection, Iri;
		sensitive [one] : Boolean;
	}
}
