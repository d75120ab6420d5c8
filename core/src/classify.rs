use axum::http::{header::{ACCEPT, CONTENT_TYPE}, request::Parts, HeaderMap, HeaderName, Method};

use apb::jsonld::is_activitypub_media_type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mailbox {
	Inbox,
	Outbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
	NotActivityPub,
	InboxPost,
	InboxGet,
	OutboxPost,
	OutboxGet,
}

fn speaks_activitypub(headers: &HeaderMap, name: HeaderName) -> bool {
	headers.get_all(name)
		.iter()
		.filter_map(|h| h.to_str().ok())
		.flat_map(|h| h.split(','))
		.any(is_activitypub_media_type)
}

/// recognizes ActivityPub requests: a POST must carry an ActivityPub body, a GET must accept one
pub fn classify(parts: &Parts, mailbox: Mailbox) -> Classification {
	let recognized = match parts.method {
		Method::POST => speaks_activitypub(&parts.headers, CONTENT_TYPE),
		Method::GET => speaks_activitypub(&parts.headers, ACCEPT),
		_ => false,
	};

	if !recognized {
		return Classification::NotActivityPub;
	}

	match (mailbox, parts.method == Method::POST) {
		(Mailbox::Inbox, true) => Classification::InboxPost,
		(Mailbox::Inbox, false) => Classification::InboxGet,
		(Mailbox::Outbox, true) => Classification::OutboxPost,
		(Mailbox::Outbox, false) => Classification::OutboxGet,
	}
}

#[cfg(test)]
mod test {
	use axum::http::{Method, Request};

	use super::{classify, Classification, Mailbox};

	fn parts(method: Method, header: (&str, &str)) -> axum::http::request::Parts {
		Request::builder()
			.method(method)
			.uri("/actors/alice/inbox")
			.header(header.0, header.1)
			.body(())
			.unwrap()
			.into_parts()
			.0
	}

	#[test]
	fn activitypub_post_is_recognized() {
		let p = parts(Method::POST, ("Content-Type", "application/activity+json"));
		assert_eq!(classify(&p, Mailbox::Inbox), Classification::InboxPost);
		assert_eq!(classify(&p, Mailbox::Outbox), Classification::OutboxPost);
	}

	#[test]
	fn activitypub_get_is_recognized_among_other_types() {
		let p = parts(Method::GET, ("Accept", "text/html;q=0.9, application/ld+json; profile=\"https://www.w3.org/ns/activitystreams\""));
		assert_eq!(classify(&p, Mailbox::Inbox), Classification::InboxGet);
		assert_eq!(classify(&p, Mailbox::Outbox), Classification::OutboxGet);
	}

	#[test]
	fn weighted_accept_is_recognized() {
		let p = parts(Method::GET, ("Accept", "application/activity+json;q=0.8"));
		assert_eq!(classify(&p, Mailbox::Outbox), Classification::OutboxGet);
	}

	#[test]
	fn browsers_are_not_activitypub() {
		let p = parts(Method::GET, ("Accept", "text/html,application/xhtml+xml"));
		assert_eq!(classify(&p, Mailbox::Inbox), Classification::NotActivityPub);
	}

	#[test]
	fn header_must_match_method() {
		// a POST accepting activitypub but sending a form
		let p = parts(Method::POST, ("Accept", "application/activity+json"));
		assert_eq!(classify(&p, Mailbox::Inbox), Classification::NotActivityPub);
		let p = parts(Method::PUT, ("Content-Type", "application/activity+json"));
		assert_eq!(classify(&p, Mailbox::Outbox), Classification::NotActivityPub);
	}
}
