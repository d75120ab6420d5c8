use crate::macros::properties;

properties! {
	/// qualified reference to a resource, e.g. a mention or an attachment url
	pub trait Link : crate::Base {
		href [one] : Iri;
		rel [many] : Rel;
		media_type::mediaType [one] : MimeType;
		name [many, map] : String, LangString;
		hreflang [one] : String;
		height [one] : NonNegativeInteger;
		width [one] : NonNegativeInteger;
		preview [many] : Link, Object, Iri;
	}
}
