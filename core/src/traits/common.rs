use axum::http::request::Parts;

use super::Authorization;

/// behavior every actor needs, whichever protocols it speaks
#[async_trait::async_trait]
pub trait CommonBehavior: Send + Sync {
	type Error: std::error::Error + Send + Sync + 'static;

	async fn authorize_get_inbox(&self, parts: &Parts) -> Result<Authorization, Self::Error>;
	async fn authorize_get_outbox(&self, parts: &Parts) -> Result<Authorization, Self::Error>;

	/// the inbox (or a page of it) to show for this request, must be an OrderedCollection
	async fn get_inbox(&self, parts: &Parts) -> Result<apb::Entity, Self::Error>;
	/// the outbox (or a page of it) to show for this request, must be an OrderedCollection
	async fn get_outbox(&self, parts: &Parts) -> Result<apb::Entity, Self::Error>;
}
