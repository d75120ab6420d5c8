use std::sync::Arc;

use axum::{
	extract::{Path, Request, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
	Router,
};
use tower_http::classify::{SharedClassifier, StatusInRangeAsFailures};

use apb::{Base, Registry, LD};
use postern::{builders::JsonLD, Dispatch, Mailbox};

pub mod store;
pub use store::{ActorName, MemoryStore};

pub mod delivery;
pub use delivery::{Federation, HttpDeliverer};

pub type Instance = postern::Actor<MemoryStore, MemoryStore, Federation>;

#[derive(Debug, Clone)]
pub struct Context(Arc<ContextInner>);

#[derive(Debug)]
struct ContextInner {
	cfg: postern::Config,
	store: MemoryStore,
	actor: Instance,
}

impl Context {
	pub fn new(cfg: postern::Config) -> Result<Self, reqwest::Error> {
		let registry = Arc::new(Registry::activitystreams());
		let store = MemoryStore::new(&cfg);
		let http = HttpDeliverer::new(&cfg, registry.clone())?;
		let federation = Federation::new(store.clone(), http);
		let actor = postern::Actor::full(store.clone(), store.clone(), federation, registry)
			.with_limits((&cfg.limits).into())
			.restrict(cfg.protocols.social, cfg.protocols.federated);
		Ok(Context(Arc::new(ContextInner { cfg, store, actor })))
	}

	pub fn cfg(&self) -> &postern::Config {
		&self.0.cfg
	}

	pub fn store(&self) -> &MemoryStore {
		&self.0.store
	}

	pub fn actor(&self) -> &Instance {
		&self.0.actor
	}
}

async fn actor(State(ctx): State<Context>, Path(id): Path<String>) -> Response {
	match ctx.store().actor_document(&id) {
		Err(e) => {
			tracing::debug!("{e}");
			StatusCode::NOT_FOUND.into_response()
		},
		Ok(person) => match person.serialize() {
			Ok(doc) => JsonLD(doc.ld_context()).into_response(),
			Err(e) => {
				tracing::error!("could not serialize actor {id}: {e}");
				StatusCode::INTERNAL_SERVER_ERROR.into_response()
			},
		},
	}
}

async fn mailbox(ctx: Context, id: String, mailbox: Mailbox, mut request: Request) -> Response {
	if !ctx.store().knows(&id) {
		return StatusCode::NOT_FOUND.into_response();
	}
	request.extensions_mut().insert(ActorName(id));
	match ctx.actor().dispatch(mailbox, request).await {
		Ok(Dispatch::Handled(res)) => res,
		// nothing else lives on these paths
		Ok(Dispatch::NotActivityPub(_)) => StatusCode::NOT_ACCEPTABLE.into_response(),
		Err(e) => e.into_response(),
	}
}

async fn inbox(State(ctx): State<Context>, Path(id): Path<String>, request: Request) -> Response {
	mailbox(ctx, id, Mailbox::Inbox, request).await
}

async fn outbox(State(ctx): State<Context>, Path(id): Path<String>, request: Request) -> Response {
	mailbox(ctx, id, Mailbox::Outbox, request).await
}

pub fn router(ctx: Context) -> Router {
	use tower_http::{cors::CorsLayer, trace::TraceLayer};

	Router::new()
		.route("/actors/{id}", get(actor))
		.route("/actors/{id}/inbox", get(inbox).post(inbox))
		.route("/actors/{id}/outbox", get(outbox).post(outbox))
		.layer(
			// 4xx are mostly peers speaking something else, but they're useful to see while testing
			TraceLayer::new(SharedClassifier::new(StatusInRangeAsFailures::new(400..=999)))
				.make_span_with(|req: &axum::http::Request<_>| {
					tracing::span!(
						tracing::Level::INFO,
						"request",
						method = %req.method(),
						uri = %req.uri(),
						status_code = tracing::field::Empty,
					)
				})
		)
		.layer(CorsLayer::permissive())
		.with_state(ctx)
}

pub async fn serve(ctx: Context, bind: String, shutdown: impl ShutdownToken) -> Result<(), std::io::Error> {
	let router = router(ctx);

	tracing::info!("serving actors on {bind}");

	let listener = tokio::net::TcpListener::bind(bind).await?;
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown.event())
		.await?;

	Ok(())
}

pub trait ShutdownToken: Sync + Send + 'static {
	/// resolves when the server should stop accepting connections
	fn event(self) -> impl std::future::Future<Output = ()> + std::marker::Send;
}

#[cfg(test)]
mod test {
	use axum::{body::Body, http::{Request, StatusCode}};
	use serde_json::{json, Value};
	use tower::ServiceExt;

	use super::{router, Context};

	fn context() -> Context {
		let mut cfg = postern::Config::default();
		cfg.instance.domain = "https://local.example".to_string();
		// keep tests off the network
		cfg.protocols.federated = false;
		cfg.actors.insert("alice".to_string(), "s3cr3t".to_string());
		Context::new(cfg).unwrap()
	}

	const AP: &str = "application/activity+json";

	async fn body(res: axum::response::Response) -> Value {
		let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
		serde_json::from_slice(&bytes).unwrap()
	}

	#[tokio::test]
	async fn actor_document_is_served() {
		let res = router(context())
			.oneshot(Request::get("/actors/alice").body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(res.status(), StatusCode::OK);
		let doc = body(res).await;
		assert_eq!(doc["inbox"], "https://local.example/actors/alice/inbox");
		assert!(doc.get("@context").is_some());
	}

	#[tokio::test]
	async fn unknown_actors_are_not_found() {
		let res = router(context())
			.oneshot(Request::get("/actors/mallory/outbox").header("Accept", AP).body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(res.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn browsers_get_not_acceptable() {
		let res = router(context())
			.oneshot(Request::get("/actors/alice/outbox").header("Accept", "text/html").body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(res.status(), StatusCode::NOT_ACCEPTABLE);
	}

	#[tokio::test]
	async fn disabled_federation_refuses_inbox_posts() {
		let res = router(context())
			.oneshot(
				Request::post("/actors/alice/inbox")
					.header("Content-Type", AP)
					.header("Signature", "keyId=\"https://remote.example/users/bob#main-key\"")
					.body(Body::from(json!({"type": "Follow"}).to_string()))
					.unwrap()
			)
			.await
			.unwrap();
		assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(res.headers().get("Allow").unwrap(), "GET");
	}

	#[tokio::test]
	async fn posted_notes_show_up_in_outbox() {
		let app = router(context());

		let unauthorized = app.clone()
			.oneshot(
				Request::post("/actors/alice/outbox")
					.header("Content-Type", AP)
					.body(Body::from(json!({"type": "Note", "content": "hello"}).to_string()))
					.unwrap()
			)
			.await
			.unwrap();
		assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

		let created = app.clone()
			.oneshot(
				Request::post("/actors/alice/outbox")
					.header("Content-Type", AP)
					.header("Authorization", "Bearer s3cr3t")
					.body(Body::from(json!({
						"type": "Note",
						"content": "hello",
						"attributedTo": "https://local.example/actors/alice",
					}).to_string()))
					.unwrap()
			)
			.await
			.unwrap();
		assert_eq!(created.status(), StatusCode::CREATED);
		let location = created.headers().get("Location").unwrap().to_str().unwrap().to_string();
		assert!(location.starts_with("https://local.example/activities/"));

		let page = app
			.oneshot(
				Request::get("/actors/alice/outbox?offset=0")
					.header("Accept", AP)
					.body(Body::empty())
					.unwrap()
			)
			.await
			.unwrap();
		assert_eq!(page.status(), StatusCode::OK);
		let page = body(page).await;
		assert_eq!(page["type"], "OrderedCollectionPage");
		assert_eq!(page["orderedItems"]["id"], location.as_str());
		assert_eq!(page["orderedItems"]["type"], "Create");
		assert_eq!(page["orderedItems"]["object"]["content"], "hello");
	}
}
