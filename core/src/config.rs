#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct Config {
	#[serde(default)]
	pub instance: InstanceConfig,

	#[serde(default)]
	pub protocols: ProtocolsConfig,

	#[serde(default)]
	pub limits: LimitsConfig,

	#[serde(default)]
	pub delivery: DeliveryConfig,

	#[serde(default)]
	/// local actors served by this instance, with the bearer token their clients use
	pub actors: std::collections::BTreeMap<String, String>,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct InstanceConfig {
	#[serde_inline_default("postern".into())]
	/// instance name, used in user agent
	pub name: String,

	#[serde_inline_default("http://127.0.0.1:3000".into())]
	/// domain of current instance, ids are minted under it: must change this for prod
	pub domain: String,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct ProtocolsConfig {
	#[serde_inline_default(true)]
	/// accept client-to-server posts on outboxes
	pub social: bool,

	#[serde_inline_default(true)]
	/// accept server-to-server deliveries on inboxes, and deliver outbox posts to peers
	pub federated: bool,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct LimitsConfig {
	#[serde_inline_default(1 << 20)]
	/// largest request body accepted on inbox and outbox, in bytes
	pub max_body_bytes: usize,

	#[serde_inline_default(20)]
	/// how many items a collection page holds
	pub page_size: usize,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct DeliveryConfig {
	#[serde_inline_default(30)]
	/// max time, in seconds, before outgoing requests fail with timeout
	pub request_timeout: u64,

	#[serde(default)]
	/// user agent sent on outgoing requests, derived from instance name and domain if empty
	pub user_agent: String,
}

impl Config {
	pub fn load(path: Option<&std::path::PathBuf>) -> Self {
		let Some(cfg_path) = path else { return Config::default() };
		match std::fs::read_to_string(cfg_path) {
			Ok(x) => match toml::from_str(&x) {
				Ok(cfg) => return cfg,
				Err(e) => tracing::error!("failed parsing config file: {e}"),
			},
			Err(e) => tracing::error!("failed reading config file: {e}"),
		}
		Config::default()
	}

	pub fn user_agent(&self) -> String {
		if self.delivery.user_agent.is_empty() {
			format!("{}+{} ({})", self.instance.name, crate::VERSION, self.instance.domain)
		} else {
			self.delivery.user_agent.clone()
		}
	}
}
