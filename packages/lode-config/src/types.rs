use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	/// Upper bound for a single query embedding, retries included.
	pub timeout_ms: u64,
	/// Extra attempts after a transient failure (transport error, 429, or 5xx).
	#[serde(default)]
	pub max_retries: u32,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	#[serde(default = "default_global_limit")]
	pub global_limit: u32,
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
	#[serde(default)]
	pub semantic: SearchSemantic,
	#[serde(default)]
	pub highlight: SearchHighlight,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			default_limit: default_limit(),
			global_limit: default_global_limit(),
			max_limit: default_max_limit(),
			semantic: SearchSemantic::default(),
			highlight: SearchHighlight::default(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSemantic {
	/// Minimum cosine similarity a knowledge item needs to be returned.
	#[serde(default = "default_semantic_threshold")]
	pub threshold: f32,
}
impl Default for SearchSemantic {
	fn default() -> Self {
		Self { threshold: default_semantic_threshold() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHighlight {
	#[serde(default = "default_window_chars")]
	pub window_chars: usize,
}
impl Default for SearchHighlight {
	fn default() -> Self {
		Self { window_chars: default_window_chars() }
	}
}

fn default_limit() -> u32 {
	20
}

fn default_global_limit() -> u32 {
	10
}

fn default_max_limit() -> u32 {
	100
}

fn default_semantic_threshold() -> f32 {
	0.7
}

fn default_window_chars() -> usize {
	120
}
