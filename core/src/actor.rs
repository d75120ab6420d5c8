use std::sync::Arc;

use futures::StreamExt;

use axum::{
	body::Body,
	extract::Request,
	http::{request::Parts, StatusCode},
	response::{IntoResponse, Response},
};

use apb::{
	object::{activity::properties::{ACTOR, OBJECT}, properties::{ATTRIBUTED_TO, AUDIENCE, BCC, BTO, CC, TO}},
	target::is_public,
	Addressed, Base, Entity, Iri, Registry, LD,
};

use crate::{
	builders::{created, method_not_allowed, JsonLD},
	classify::{classify, Classification, Mailbox},
	traits::{CommonBehavior, Disabled, FederatingProtocol, SocialProtocol},
	ActorError, ActorResult,
};

/// what the dispatcher did with a request
#[derive(Debug)]
pub enum Dispatch {
	/// not an ActivityPub request: the host gets it back untouched and may serve it otherwise
	NotActivityPub(Request),
	/// the request was consumed and this is the whole response to send
	Handled(Response),
}

impl Dispatch {
	pub fn handled(&self) -> bool {
		matches!(self, Dispatch::Handled(_))
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Limits {
	pub max_body_bytes: usize,
}

impl Default for Limits {
	fn default() -> Self {
		Limits { max_body_bytes: 1 << 20 }
	}
}

impl From<&crate::config::LimitsConfig> for Limits {
	fn from(value: &crate::config::LimitsConfig) -> Self {
		Limits { max_body_bytes: value.max_body_bytes }
	}
}

/// an ActivityPub actor: its inbox and outbox, speaking the protocols it was built with
///
/// the social protocol makes outbox posts effective, the federating one makes inbox posts
/// effective and delivers outbox posts to peers. a protocol not enabled answers 405 on its
/// mailbox, while GETs are always served through [CommonBehavior]
#[derive(Debug, Clone)]
pub struct Actor<C, S = Disabled, F = Disabled> {
	common: C,
	social: Option<S>,
	federating: Option<F>,
	registry: Arc<Registry>,
	limits: Limits,
}

impl<C: CommonBehavior> Actor<C> {
	/// speaks neither protocol: only serves inbox and outbox contents
	pub fn custom(common: C, registry: Arc<Registry>) -> Self {
		Actor {
			common,
			social: None,
			federating: None,
			registry,
			limits: Limits::default(),
		}
	}
}

impl<C: CommonBehavior, S: SocialProtocol> Actor<C, S> {
	pub fn social(common: C, social: S, registry: Arc<Registry>) -> Self {
		Actor::custom(common, registry).with_social(social)
	}
}

impl<C: CommonBehavior, F: FederatingProtocol> Actor<C, Disabled, F> {
	pub fn federating(common: C, federating: F, registry: Arc<Registry>) -> Self {
		Actor::custom(common, registry).with_federating(federating)
	}
}

impl<C, S, F> Actor<C, S, F>
where
	C: CommonBehavior,
	S: SocialProtocol,
	F: FederatingProtocol,
{
	pub fn full(common: C, social: S, federating: F, registry: Arc<Registry>) -> Self {
		Actor::custom(common, registry)
			.with_social(social)
			.with_federating(federating)
	}

	pub fn with_social<S2: SocialProtocol>(self, social: S2) -> Actor<C, S2, F> {
		Actor {
			common: self.common,
			social: Some(social),
			federating: self.federating,
			registry: self.registry,
			limits: self.limits,
		}
	}

	pub fn with_federating<F2: FederatingProtocol>(self, federating: F2) -> Actor<C, S, F2> {
		Actor {
			common: self.common,
			social: self.social,
			federating: Some(federating),
			registry: self.registry,
			limits: self.limits,
		}
	}

	pub fn with_limits(mut self, limits: Limits) -> Self {
		self.limits = limits;
		self
	}

	/// turns protocols off at runtime, for hosts deciding from configuration
	pub fn restrict(mut self, social: bool, federated: bool) -> Self {
		if !social {
			self.social = None;
		}
		if !federated {
			self.federating = None;
		}
		self
	}

	pub fn is_social(&self) -> bool {
		self.social.is_some()
	}

	pub fn is_federating(&self) -> bool {
		self.federating.is_some()
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// routes a request for the given mailbox to its entry point
	pub async fn dispatch(&self, mailbox: Mailbox, request: Request) -> ActorResult<Dispatch> {
		let post = request.method() == &axum::http::Method::POST;
		match (mailbox, post) {
			(Mailbox::Inbox, true) => self.post_inbox(request).await,
			(Mailbox::Inbox, false) => self.get_inbox(request).await,
			(Mailbox::Outbox, true) => self.post_outbox(request).await,
			(Mailbox::Outbox, false) => self.get_outbox(request).await,
		}
	}

	/// a peer delivering an activity to this actor
	pub async fn post_inbox(&self, request: Request) -> ActorResult<Dispatch> {
		let (parts, body) = request.into_parts();
		if classify(&parts, Mailbox::Inbox) != Classification::InboxPost {
			return Ok(Dispatch::NotActivityPub(Request::from_parts(parts, body)));
		}
		tracing::debug!("inbox post on {}", parts.uri);

		let Some(federating) = &self.federating else {
			tracing::warn!("refusing inbox post on {}: federation is disabled", parts.uri);
			return Ok(Dispatch::Handled(method_not_allowed()));
		};

		let body = self.read_body(body).await?;

		let auth = federating.authorize_post_inbox(&parts, &body)
			.await
			.map_err(|e| collaborator_failed("inbox authorization", e))?;
		refused_if_denied(&parts, auth)?;

		let activity = self.parse_activity(&body)?;
		if activity.id().is_none() {
			tracing::warn!("refusing delivery without id on {}", parts.uri);
			return Err(ActorError::MissingField("id"));
		}

		for kind in activity_types(&self.registry, &activity) {
			tracing::info!("processing {kind} {} delivered to {}", display_id(&activity), parts.uri);
			federating.handle_federated(&parts, kind, &activity)
				.await
				.map_err(|e| collaborator_failed("federated side effect", e))?;
		}

		Ok(Dispatch::Handled(StatusCode::OK.into_response()))
	}

	/// someone browsing this actor's inbox
	pub async fn get_inbox(&self, request: Request) -> ActorResult<Dispatch> {
		let (parts, body) = request.into_parts();
		if classify(&parts, Mailbox::Inbox) != Classification::InboxGet {
			return Ok(Dispatch::NotActivityPub(Request::from_parts(parts, body)));
		}
		tracing::debug!("inbox get on {}", parts.uri);

		let auth = self.common.authorize_get_inbox(&parts)
			.await
			.map_err(|e| collaborator_failed("inbox authorization", e))?;
		refused_if_denied(&parts, auth)?;

		let collection = self.common.get_inbox(&parts)
			.await
			.map_err(|e| collaborator_failed("fetching inbox", e))?;

		Ok(Dispatch::Handled(collection_response(collection)?))
	}

	/// a local client posting an activity, or a bare object to create
	pub async fn post_outbox(&self, request: Request) -> ActorResult<Dispatch> {
		let (parts, body) = request.into_parts();
		if classify(&parts, Mailbox::Outbox) != Classification::OutboxPost {
			return Ok(Dispatch::NotActivityPub(Request::from_parts(parts, body)));
		}
		tracing::debug!("outbox post on {}", parts.uri);

		let Some(social) = &self.social else {
			tracing::warn!("refusing outbox post on {}: social protocol is disabled", parts.uri);
			return Ok(Dispatch::Handled(method_not_allowed()));
		};

		let body = self.read_body(body).await?;

		let auth = social.authorize_post_outbox(&parts, &body)
			.await
			.map_err(|e| collaborator_failed("outbox authorization", e))?;
		refused_if_denied(&parts, auth)?;

		let document: serde_json::Value = serde_json::from_slice(&body)
			.inspect_err(|e| tracing::warn!("outbox post is not json: {e}"))?;
		let posted = Entity::deserialize(&document, &self.registry)
			.inspect_err(|e| tracing::warn!("outbox post is not activitystreams: {e}"))?;

		let mut activity = if posted.definition().satisfies("Activity") {
			posted
		} else if posted.definition().satisfies("Object") {
			wrap_in_create(posted)
		} else {
			return Err(ActorError::NotAnActivity(posted.definition().name.to_string()));
		};

		if activity.definition().satisfies("Create") {
			for i in 0..activity.nodes(&OBJECT).len() {
				let id = match activity.nodes(&OBJECT)[i].entity() {
					Some(object) if object.id().is_none() => Some(
						social.new_id(&parts, object)
							.await
							.map_err(|e| collaborator_failed("minting object id", e))?
					),
					_ => None,
				};
				if let Some(object) = activity.nodes_mut(&OBJECT)[i].entity_mut() {
					if id.is_some() {
						object.set_id(id);
					}
				}
			}
		}

		let id = match activity.id() {
			Some(id) => id.clone(),
			None => {
				let id = social.new_id(&parts, &activity)
					.await
					.map_err(|e| collaborator_failed("minting activity id", e))?;
				activity.set_id(Some(id.clone()));
				id
			},
		};

		tracing::info!("processing {} {id} posted on {}", activity.definition().name, parts.uri);
		social.handle_social(&parts, &activity)
			.await
			.map_err(|e| collaborator_failed("social side effect", e))?;

		if let Some(federating) = &self.federating {
			let recipients = recipients(&activity);
			hide_blind_recipients(&mut activity);
			if recipients.is_empty() {
				tracing::debug!("nobody to deliver {id} to");
			} else {
				tracing::info!("delivering {id} to {} recipients", recipients.len());
				federating.deliver(&parts, &activity, &recipients)
					.await
					.map_err(|e| collaborator_failed("delivery", e))?;
			}
		}

		Ok(Dispatch::Handled(created(&id)))
	}

	/// someone browsing this actor's outbox
	pub async fn get_outbox(&self, request: Request) -> ActorResult<Dispatch> {
		let (parts, body) = request.into_parts();
		if classify(&parts, Mailbox::Outbox) != Classification::OutboxGet {
			return Ok(Dispatch::NotActivityPub(Request::from_parts(parts, body)));
		}
		tracing::debug!("outbox get on {}", parts.uri);

		let auth = self.common.authorize_get_outbox(&parts)
			.await
			.map_err(|e| collaborator_failed("outbox authorization", e))?;
		refused_if_denied(&parts, auth)?;

		let collection = self.common.get_outbox(&parts)
			.await
			.map_err(|e| collaborator_failed("fetching outbox", e))?;

		Ok(Dispatch::Handled(collection_response(collection)?))
	}

	async fn read_body(&self, body: Body) -> ActorResult<axum::body::Bytes> {
		let limit = self.limits.max_body_bytes;
		let mut stream = body.into_data_stream();
		let mut buf = Vec::new();
		while let Some(chunk) = stream.next().await {
			let chunk = chunk.map_err(ActorError::Body)?;
			if buf.len() + chunk.len() > limit {
				tracing::warn!("refusing request body larger than {limit} bytes");
				return Err(ActorError::PayloadTooLarge(limit));
			}
			buf.extend_from_slice(&chunk);
		}
		Ok(buf.into())
	}

	fn parse_activity(&self, body: &[u8]) -> ActorResult<Entity> {
		let document: serde_json::Value = serde_json::from_slice(body)
			.inspect_err(|e| tracing::warn!("delivered body is not json: {e}"))?;
		let activity = Entity::deserialize(&document, &self.registry)
			.inspect_err(|e| tracing::warn!("delivered body is not activitystreams: {e}"))?;
		if !activity.definition().satisfies("Activity") {
			return Err(ActorError::NotAnActivity(activity.definition().name.to_string()));
		}
		Ok(activity)
	}
}

fn collaborator_failed(what: &str, err: impl std::error::Error + Send + Sync + 'static) -> ActorError {
	tracing::error!("{what} failed: {err}");
	ActorError::collaborator(err)
}

fn refused_if_denied(parts: &Parts, auth: crate::Authorization) -> ActorResult<()> {
	auth.require()
		.inspect_err(|e| tracing::warn!("refusing {} {}: {e}", parts.method, parts.uri))
}

fn display_id(entity: &Entity) -> &str {
	entity.id().map(Iri::as_str).unwrap_or("<anonymous>")
}

/// every declared type which is an activity, each once, in declaration order
fn activity_types<'a>(registry: &Registry, activity: &'a Entity) -> Vec<&'a str> {
	let mut out: Vec<&str> = Vec::new();
	for kind in activity.types() {
		if registry.satisfies(kind, "Activity") && !out.contains(&kind.as_str()) {
			out.push(kind);
		}
	}
	out
}

/// a bare object posted on the outbox gets created on behalf of who it's attributed to
fn wrap_in_create(object: Entity) -> Entity {
	tracing::debug!("wrapping posted {} in a Create", object.definition().name);
	let mut create = apb::types::Create::new().into_entity();
	*create.nodes_mut(&ACTOR) = object.nodes(&ATTRIBUTED_TO).to_vec();
	for def in [&TO, &BTO, &CC, &BCC, &AUDIENCE] {
		*create.nodes_mut(def) = object.nodes(def).to_vec();
	}
	create.nodes_mut(&OBJECT).push(apb::Node::of::<apb::kind::Object>(object));
	create
}

/// deduplicated addressing of an activity, minus the public collection which is nobody's inbox
fn recipients(activity: &Entity) -> Vec<Iri> {
	let mut out: Vec<Iri> = Vec::new();
	for target in activity.addressed() {
		if !is_public(&target) && !out.contains(&target) {
			out.push(target);
		}
	}
	out
}

fn hide_blind_recipients(activity: &mut Entity) {
	activity.strip_hidden_recipients();
	for node in activity.nodes_mut(&OBJECT).iter_mut() {
		if let Some(object) = node.entity_mut() {
			object.strip_hidden_recipients();
		}
	}
}

fn collection_response(collection: Entity) -> ActorResult<Response> {
	let collection = apb::types::OrderedCollection::try_from(collection)?;
	let document = collection.serialize()?.ld_context();
	Ok(JsonLD(document).into_response())
}
