use axum::http::request::Parts;

use super::Authorization;

/// client to server: what happens when a local user posts to their outbox
#[async_trait::async_trait]
pub trait SocialProtocol: Send + Sync {
	type Error: std::error::Error + Send + Sync + 'static;

	/// receives the raw body too, for hosts checking digests or tokens bound to payloads
	async fn authorize_post_outbox(&self, parts: &Parts, body: &[u8]) -> Result<Authorization, Self::Error>;

	/// mint a fresh id for an activity or object posted without one
	async fn new_id(&self, parts: &Parts, entity: &apb::Entity) -> Result<apb::Iri, Self::Error>;

	/// persist or otherwise act upon a posted activity
	async fn handle_social(&self, parts: &Parts, activity: &apb::Entity) -> Result<(), Self::Error>;
}
