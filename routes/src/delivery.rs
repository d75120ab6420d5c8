use std::sync::Arc;

use axum::http::{header::{ACCEPT, CONTENT_TYPE}, request::Parts, HeaderMap};
use reqwest::StatusCode;

use apb::{jsonld::{CONTENT_TYPE_ACTIVITY_JSON, CONTENT_TYPE_LD_JSON_ACTIVITYPUB}, Entity, Iri, Registry, LD};
use postern::{ext::LoggableError, Authorization, FederatingProtocol};

use crate::store::{ActorName, MemoryStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
	#[error("http request failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("{0} answered {1}")]
	Status(Iri, StatusCode),

	#[error("invalid activitystreams document: {0}")]
	Vocab(#[from] apb::VocabError),

	#[error("{0} has no inbox")]
	NoInbox(Iri),

	#[error(transparent)]
	Store(#[from] StoreError),
}

/// where an actor document says to deliver
pub fn inbox_of(document: &serde_json::Value, registry: &Registry) -> Result<Option<Iri>, apb::VocabError> {
	let actor = Entity::deserialize(document, registry)?;
	if !actor.definition().satisfies("Actor") {
		return Ok(None);
	}
	Ok(apb::Actor::get_inbox_iri(&actor).cloned())
}

/// posts activities to remote inboxes, once, without retrying
#[derive(Debug, Clone)]
pub struct HttpDeliverer {
	client: reqwest::Client,
	registry: Arc<Registry>,
}

impl HttpDeliverer {
	pub fn new(cfg: &postern::Config, registry: Arc<Registry>) -> Result<Self, reqwest::Error> {
		let client = reqwest::Client::builder()
			.user_agent(cfg.user_agent())
			.timeout(std::time::Duration::from_secs(cfg.delivery.request_timeout))
			.build()?;
		Ok(HttpDeliverer { client, registry })
	}

	pub async fn resolve_inbox(&self, actor: &Iri) -> Result<Iri, DeliveryError> {
		let res = self.client
			.get(actor.as_str())
			.header(ACCEPT, CONTENT_TYPE_ACTIVITY_JSON)
			.send()
			.await?;
		if !res.status().is_success() {
			return Err(DeliveryError::Status(actor.clone(), res.status()));
		}
		let document: serde_json::Value = res.json().await?;
		inbox_of(&document, &self.registry)?
			.ok_or_else(|| DeliveryError::NoInbox(actor.clone()))
	}

	pub async fn post(&self, inbox: &Iri, payload: &str) -> Result<(), DeliveryError> {
		let res = self.client
			.post(inbox.as_str())
			.header(CONTENT_TYPE, CONTENT_TYPE_LD_JSON_ACTIVITYPUB)
			.body(payload.to_string())
			.send()
			.await?;
		if !res.status().is_success() {
			return Err(DeliveryError::Status(inbox.clone(), res.status()));
		}
		Ok(())
	}

	/// delivers to each distinct inbox among recipients, returns how many accepted it
	pub async fn deliver(&self, activity: &Entity, recipients: &[Iri]) -> Result<usize, DeliveryError> {
		let payload = activity.serialize()?.ld_context().to_string();

		let mut inboxes: Vec<Iri> = Vec::new();
		for recipient in recipients {
			match self.resolve_inbox(recipient).await {
				Ok(inbox) => if !inboxes.contains(&inbox) { inboxes.push(inbox) },
				Err(e) => tracing::warn!("skipping recipient {recipient}: {e}"),
			}
		}

		let mut delivered = 0;
		for inbox in inboxes {
			tracing::info!("delivering {} to {inbox}", activity.id().map(Iri::as_str).unwrap_or_default());
			let res = self.post(&inbox, &payload).await;
			if res.is_ok() {
				delivered += 1;
			}
			res.warn_failed(&format!("failed delivering to {inbox}"));
		}
		Ok(delivered)
	}
}

/// server to server side of the reference host: mailboxes in memory, delivery over http
#[derive(Debug, Clone)]
pub struct Federation {
	store: MemoryStore,
	http: HttpDeliverer,
}

impl Federation {
	pub fn new(store: MemoryStore, http: HttpDeliverer) -> Self {
		Federation { store, http }
	}
}

/// signature verification is not done here: only its presence is required
fn signed(headers: &HeaderMap) -> bool {
	headers.contains_key("signature")
}

#[async_trait::async_trait]
impl FederatingProtocol for Federation {
	type Error = DeliveryError;

	async fn authorize_post_inbox(&self, parts: &Parts, _body: &[u8]) -> Result<Authorization, Self::Error> {
		if signed(&parts.headers) {
			Ok(Authorization::Granted)
		} else {
			Ok(Authorization::Unauthenticated)
		}
	}

	async fn handle_federated(&self, parts: &Parts, kind: &str, activity: &Entity) -> Result<(), Self::Error> {
		let ActorName(name) = parts.extensions.get::<ActorName>()
			.ok_or(StoreError::NoActor)?;
		if self.store.deliver_locally(name, activity).await? {
			tracing::info!("{name} received {kind} {}", activity.id().map(Iri::as_str).unwrap_or_default());
		}
		Ok(())
	}

	async fn deliver(&self, _parts: &Parts, activity: &Entity, recipients: &[Iri]) -> Result<(), Self::Error> {
		let mut remote = Vec::new();
		for recipient in recipients {
			match self.store.local_actor(recipient) {
				Some(name) => self.store.deliver_locally(name, activity)
					.await
					.map(|_| ())
					.warn_failed(&format!("failed local delivery to {name}")),
				None => remote.push(recipient.clone()),
			}
		}

		if !remote.is_empty() {
			let delivered = self.http.deliver(activity, &remote).await?;
			tracing::debug!("{delivered} inboxes accepted {}", activity.id().map(Iri::as_str).unwrap_or_default());
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use std::sync::Arc;

	use axum::http::{HeaderMap, Request};
	use serde_json::json;

	use apb::Registry;
	use postern::{Authorization, CommonBehavior, FederatingProtocol};

	use crate::store::{ActorName, MemoryStore};

	use super::{inbox_of, signed, Federation, HttpDeliverer};

	fn federation() -> (MemoryStore, Federation) {
		let mut cfg = postern::Config::default();
		cfg.instance.domain = "https://local.example".to_string();
		cfg.actors.insert("alice".to_string(), "s3cr3t".to_string());
		cfg.actors.insert("bob".to_string(), "hunter2".to_string());
		let store = MemoryStore::new(&cfg);
		let http = HttpDeliverer::new(&cfg, Arc::new(Registry::activitystreams())).unwrap();
		(store.clone(), Federation::new(store, http))
	}

	#[test]
	fn inbox_is_read_from_actor_documents() {
		let registry = Registry::activitystreams();
		let person = json!({
			"id": "https://remote.example/users/bob",
			"type": "Person",
			"inbox": "https://remote.example/users/bob/inbox",
			"outbox": "https://remote.example/users/bob/outbox",
		});
		assert_eq!(
			inbox_of(&person, &registry).unwrap().map(String::from),
			Some("https://remote.example/users/bob/inbox".to_string())
		);

		let note = json!({ "type": "Note", "id": "https://remote.example/notes/1" });
		assert_eq!(inbox_of(&note, &registry).unwrap(), None);

		let garbage = json!("https://remote.example/users/bob");
		assert!(inbox_of(&garbage, &registry).is_err());
	}

	#[test]
	fn only_signed_requests_are_federated() {
		let mut headers = HeaderMap::new();
		assert!(!signed(&headers));
		headers.insert("signature", "keyId=\"https://remote.example/users/bob#main-key\"".parse().unwrap());
		assert!(signed(&headers));
	}

	#[tokio::test]
	async fn unsigned_inbox_posts_are_unauthenticated() {
		let (_, federation) = federation();
		let parts = Request::builder().uri("/actors/alice/inbox").body(()).unwrap().into_parts().0;
		let auth = federation.authorize_post_inbox(&parts, b"{}").await.unwrap();
		assert_eq!(auth, Authorization::Unauthenticated);
	}

	#[tokio::test]
	async fn local_recipients_skip_the_network() {
		let (store, federation) = federation();
		let mut parts = Request::builder().uri("/actors/alice/outbox").body(()).unwrap().into_parts().0;
		parts.extensions.insert(ActorName("alice".to_string()));

		let activity = apb::Entity::deserialize(&json!({
			"id": "https://local.example/activities/1",
			"type": "Follow",
			"actor": "https://local.example/actors/alice",
			"object": "https://local.example/actors/bob",
		}), &Registry::activitystreams()).unwrap();
		let bob = apb::Iri::parse("https://local.example/actors/bob").unwrap();

		federation.deliver(&parts, &activity, &[bob]).await.unwrap();

		let mut bob_parts = Request::builder().uri("/actors/bob/inbox").body(()).unwrap().into_parts().0;
		bob_parts.extensions.insert(ActorName("bob".to_string()));
		let inbox = store.get_inbox(&bob_parts).await.unwrap().serialize().unwrap();
		assert_eq!(inbox["totalItems"], 1);
	}
}
