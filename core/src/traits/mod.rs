//! seams the host fills in: authorization, storage and delivery all live outside the dispatcher

pub mod common;
pub mod social;
pub mod federating;

pub use common::CommonBehavior;
pub use social::SocialProtocol;
pub use federating::FederatingProtocol;

/// outcome of an authorization callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
	Granted,
	/// no valid credentials were presented: 401
	Unauthenticated,
	/// credentials were presented but don't allow this: 403
	Forbidden,
}

impl Authorization {
	pub fn require(self) -> crate::ActorResult<()> {
		match self {
			Authorization::Granted => Ok(()),
			Authorization::Unauthenticated => Err(crate::ActorError::Unauthorized),
			Authorization::Forbidden => Err(crate::ActorError::Forbidden),
		}
	}
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("protocol is disabled for this actor")]
pub struct ProtocolDisabled;

/// placeholder for a protocol an actor doesn't speak, never invoked by the dispatcher
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

#[async_trait::async_trait]
impl SocialProtocol for Disabled {
	type Error = ProtocolDisabled;

	async fn authorize_post_outbox(&self, _parts: &axum::http::request::Parts, _body: &[u8]) -> Result<Authorization, Self::Error> {
		Err(ProtocolDisabled)
	}

	async fn new_id(&self, _parts: &axum::http::request::Parts, _entity: &apb::Entity) -> Result<apb::Iri, Self::Error> {
		Err(ProtocolDisabled)
	}

	async fn handle_social(&self, _parts: &axum::http::request::Parts, _activity: &apb::Entity) -> Result<(), Self::Error> {
		Err(ProtocolDisabled)
	}
}

#[async_trait::async_trait]
impl FederatingProtocol for Disabled {
	type Error = ProtocolDisabled;

	async fn authorize_post_inbox(&self, _parts: &axum::http::request::Parts, _body: &[u8]) -> Result<Authorization, Self::Error> {
		Err(ProtocolDisabled)
	}

	async fn handle_federated(&self, _parts: &axum::http::request::Parts, _kind: &str, _activity: &apb::Entity) -> Result<(), Self::Error> {
		Err(ProtocolDisabled)
	}

	async fn deliver(&self, _parts: &axum::http::request::Parts, _activity: &apb::Entity, _recipients: &[apb::Iri]) -> Result<(), Self::Error> {
		Err(ProtocolDisabled)
	}
}
