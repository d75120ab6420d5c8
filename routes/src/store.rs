use std::{collections::{BTreeMap, HashMap, VecDeque}, sync::Arc};

use axum::{extract::Query, http::{header::AUTHORIZATION, request::Parts}};
use tokio::sync::RwLock;

use apb::{Base, Collection, CollectionPage, Entity, Iri, OrderedCollection, OrderedCollectionPage};
use postern::{Authorization, CommonBehavior, SocialProtocol};

/// which local actor a request is for, put in request extensions by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorName(pub String);

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("no local actor named '{0}'")]
	UnknownActor(String),

	#[error("request carries no actor name")]
	NoActor,

	#[error("could not build id: {0}")]
	Id(#[from] apb::IriError),
}

#[derive(Debug, Default)]
struct Mailboxes {
	// newest first
	inbox: VecDeque<Entity>,
	outbox: VecDeque<Entity>,
}

impl Mailboxes {
	fn contains(mailbox: &VecDeque<Entity>, activity: &Entity) -> bool {
		activity.id().is_some_and(|id| mailbox.iter().any(|x| x.id() == Some(id)))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Which {
	Inbox,
	Outbox,
}

impl Which {
	fn as_str(&self) -> &'static str {
		match self {
			Which::Inbox => "inbox",
			Which::Outbox => "outbox",
		}
	}
}

#[derive(Debug, serde::Deserialize)]
pub struct Pagination {
	pub offset: Option<usize>,
}

#[derive(Debug)]
struct StoreInner {
	domain: String,
	page_size: usize,
	tokens: BTreeMap<String, String>,
	actors: RwLock<HashMap<String, Mailboxes>>,
}

/// in-memory inboxes and outboxes for the actors in configuration
#[derive(Debug, Clone)]
pub struct MemoryStore(Arc<StoreInner>);

impl MemoryStore {
	pub fn new(cfg: &postern::Config) -> Self {
		let actors = cfg.actors.keys()
			.map(|name| (name.clone(), Mailboxes::default()))
			.collect();
		MemoryStore(Arc::new(StoreInner {
			domain: cfg.instance.domain.trim_end_matches('/').to_string(),
			page_size: cfg.limits.page_size.max(1),
			tokens: cfg.actors.clone(),
			actors: RwLock::new(actors),
		}))
	}

	pub fn domain(&self) -> &str {
		&self.0.domain
	}

	pub fn knows(&self, name: &str) -> bool {
		self.0.tokens.contains_key(name)
	}

	pub fn actor_id(&self, name: &str) -> String {
		format!("{}/actors/{name}", self.0.domain)
	}

	/// the local actor an IRI points at, if it points at one of ours
	pub fn local_actor<'a>(&self, iri: &'a Iri) -> Option<&'a str> {
		let name = iri.as_str()
			.strip_prefix(self.0.domain.as_str())?
			.strip_prefix("/actors/")?;
		if self.knows(name) { Some(name) } else { None }
	}

	/// the actor document other servers resolve inboxes from
	pub fn actor_document(&self, name: &str) -> Result<apb::types::Person, StoreError> {
		if !self.knows(name) {
			return Err(StoreError::UnknownActor(name.to_string()));
		}
		let id = self.actor_id(name);
		let mut person = apb::types::Person::new();
		person.set_id(Some(Iri::parse(id.as_str())?));
		apb::Actor::set_inbox_iri(&mut person, Iri::parse(format!("{id}/inbox"))?);
		apb::Actor::set_outbox_iri(&mut person, Iri::parse(format!("{id}/outbox"))?);
		apb::Actor::set_preferred_username_string(&mut person, name.to_string());
		Ok(person)
	}

	/// stores an activity in a local actor's inbox, once: returns false if it was already there
	pub async fn deliver_locally(&self, name: &str, activity: &Entity) -> Result<bool, StoreError> {
		self.push(name, Which::Inbox, activity).await
	}

	async fn push(&self, name: &str, which: Which, activity: &Entity) -> Result<bool, StoreError> {
		let mut actors = self.0.actors.write().await;
		let mailboxes = actors.get_mut(name)
			.ok_or_else(|| StoreError::UnknownActor(name.to_string()))?;
		let mailbox = match which {
			Which::Inbox => &mut mailboxes.inbox,
			Which::Outbox => &mut mailboxes.outbox,
		};
		if Mailboxes::contains(mailbox, activity) {
			tracing::debug!("{} already in {name}'s {}", activity.id().map(Iri::as_str).unwrap_or_default(), which.as_str());
			return Ok(false);
		}
		mailbox.push_front(activity.clone());
		Ok(true)
	}

	/// the whole collection when no offset is requested, otherwise one page of it
	async fn collection(&self, parts: &Parts, which: Which) -> Result<Entity, StoreError> {
		let name = actor_name(parts)?;
		let id = format!("{}/{}", self.actor_id(name), which.as_str());
		let actors = self.0.actors.read().await;
		let mailboxes = actors.get(name)
			.ok_or_else(|| StoreError::UnknownActor(name.to_string()))?;
		let mailbox = match which {
			Which::Inbox => &mailboxes.inbox,
			Which::Outbox => &mailboxes.outbox,
		};

		let offset = Query::<Pagination>::try_from_uri(&parts.uri)
			.ok()
			.and_then(|Query(page)| page.offset);

		let Some(offset) = offset else {
			let mut collection = apb::types::OrderedCollection::new();
			collection.set_id(Some(Iri::parse(id.as_str())?));
			collection.set_total_items_non_negative_integer(mailbox.len() as u64);
			collection.set_first_iri(Iri::parse(format!("{id}?offset=0"))?);
			return Ok(collection.into_entity());
		};

		let limit = self.0.page_size;
		let mut page = apb::types::OrderedCollectionPage::new();
		page.set_id(Some(Iri::parse(format!("{id}?offset={offset}"))?));
		page.set_part_of_iri(Iri::parse(id.as_str())?);
		page.set_start_index_non_negative_integer(offset as u64);
		for item in mailbox.iter().skip(offset).take(limit) {
			page.append_ordered_items_object(item.clone());
		}
		let next = offset.saturating_add(limit);
		if next < mailbox.len() {
			page.set_next_iri(Iri::parse(format!("{id}?offset={next}"))?);
		}
		if offset > 0 {
			page.set_prev_iri(Iri::parse(format!("{id}?offset={}", offset.saturating_sub(limit)))?);
		}
		Ok(page.into_entity())
	}

	/// the actor's own clients present its bearer token
	fn authorize_owner(&self, parts: &Parts) -> Result<Authorization, StoreError> {
		let name = actor_name(parts)?;
		let Some(token) = bearer(parts) else {
			return Ok(Authorization::Unauthenticated);
		};
		match self.0.tokens.get(name) {
			Some(expected) if expected == token => Ok(Authorization::Granted),
			Some(_) => Ok(Authorization::Forbidden),
			None => Err(StoreError::UnknownActor(name.to_string())),
		}
	}
}

fn actor_name(parts: &Parts) -> Result<&str, StoreError> {
	parts.extensions.get::<ActorName>()
		.map(|ActorName(name)| name.as_str())
		.ok_or(StoreError::NoActor)
}

fn bearer(parts: &Parts) -> Option<&str> {
	parts.headers.get(AUTHORIZATION)?
		.to_str()
		.ok()?
		.strip_prefix("Bearer ")
}

#[async_trait::async_trait]
impl CommonBehavior for MemoryStore {
	type Error = StoreError;

	async fn authorize_get_inbox(&self, parts: &Parts) -> Result<Authorization, Self::Error> {
		self.authorize_owner(parts)
	}

	async fn authorize_get_outbox(&self, _parts: &Parts) -> Result<Authorization, Self::Error> {
		Ok(Authorization::Granted)
	}

	async fn get_inbox(&self, parts: &Parts) -> Result<Entity, Self::Error> {
		self.collection(parts, Which::Inbox).await
	}

	async fn get_outbox(&self, parts: &Parts) -> Result<Entity, Self::Error> {
		self.collection(parts, Which::Outbox).await
	}
}

#[async_trait::async_trait]
impl SocialProtocol for MemoryStore {
	type Error = StoreError;

	async fn authorize_post_outbox(&self, parts: &Parts, _body: &[u8]) -> Result<Authorization, Self::Error> {
		self.authorize_owner(parts)
	}

	async fn new_id(&self, _parts: &Parts, entity: &Entity) -> Result<Iri, Self::Error> {
		let path = if entity.definition().satisfies("Activity") { "activities" } else { "objects" };
		Ok(Iri::parse(format!("{}/{path}/{}", self.0.domain, uuid::Uuid::new_v4()))?)
	}

	async fn handle_social(&self, parts: &Parts, activity: &Entity) -> Result<(), Self::Error> {
		let name = actor_name(parts)?;
		if self.push(name, Which::Outbox, activity).await? {
			tracing::info!("{name} posted {}", activity.id().map(Iri::as_str).unwrap_or_default());
		}
		Ok(())
	}
}
