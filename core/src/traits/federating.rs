use axum::http::request::Parts;

use super::Authorization;

/// server to server: deliveries coming in, activities going out
#[async_trait::async_trait]
pub trait FederatingProtocol: Send + Sync {
	type Error: std::error::Error + Send + Sync + 'static;

	/// receives the raw body too, so that signatures and digests can be verified
	async fn authorize_post_inbox(&self, parts: &Parts, body: &[u8]) -> Result<Authorization, Self::Error>;

	/// invoked once for each activity type the delivered document declares
	async fn handle_federated(&self, parts: &Parts, kind: &str, activity: &apb::Entity) -> Result<(), Self::Error>;

	/// send an activity posted on the outbox to its recipients
	async fn deliver(&self, parts: &Parts, activity: &apb::Entity, recipients: &[apb::Iri]) -> Result<(), Self::Error>;
}
