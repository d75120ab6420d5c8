//! # postern
//! > ActivityPub actors: inbox and outbox dispatch over host collaborators
//!
//! an [Actor] takes raw http requests for its inbox and outbox, recognizes the ActivityPub
//! ones, and drives them through authorization, deserialization into [apb] entities, side
//! effects and delivery. everything stateful (storage, signatures, network) is supplied by
//! the host through [CommonBehavior], [SocialProtocol] and [FederatingProtocol].

pub mod config;
pub use config::Config;

mod error;
pub use error::{ActorError, ActorResult, BoxError};

pub mod ext;

pub mod traits;
pub use traits::{Authorization, CommonBehavior, Disabled, FederatingProtocol, ProtocolDisabled, SocialProtocol};

pub mod classify;
pub use classify::{classify, Classification, Mailbox};

pub mod builders;

mod actor;
pub use actor::{Actor, Dispatch, Limits};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
