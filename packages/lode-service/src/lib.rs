pub mod fulltext;
pub mod global;
pub mod semantic;
pub mod store;

mod error;
mod ranking;
mod types;

pub use error::{Error, Result};
pub use semantic::{QueryEmbedding, UnavailableReason};
pub use store::SearchStore;
pub use types::{
	ConversationItem, GlobalSearchResult, KnowledgeItemView, MessageItem, SearchMode,
	SearchRequest, SearchResult, SearchResultSet, SemanticSearchRequest,
};

use std::{future::Future, pin::Pin, sync::Arc, time::Instant};

use lode_config::{Config, EmbeddingProviderConfig};
use lode_domain::{LexicalScorer, RelevanceScorer};
use lode_providers::embedding;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}
impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { embedding }
	}
}
impl Default for Providers {
	fn default() -> Self {
		Self { embedding: Arc::new(DefaultProviders) }
	}
}

struct DefaultProviders;
impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}

pub struct LodeService {
	pub cfg: Config,
	pub store: Arc<dyn SearchStore>,
	pub providers: Providers,
	pub scorer: Arc<dyn RelevanceScorer>,
}
impl LodeService {
	pub fn new(cfg: Config, store: Arc<dyn SearchStore>) -> Self {
		Self::with_providers(cfg, store, Providers::default())
	}

	pub fn with_providers(cfg: Config, store: Arc<dyn SearchStore>, providers: Providers) -> Self {
		Self { cfg, store, providers, scorer: Arc::new(LexicalScorer) }
	}

	/// Replaces the lexical scoring strategy used by every full-text operation.
	pub fn with_scorer(mut self, scorer: Arc<dyn RelevanceScorer>) -> Self {
		self.scorer = scorer;

		self
	}

	pub(crate) fn resolve_limit(&self, requested: Option<i64>, default: u32) -> usize {
		let max = i64::from(self.cfg.search.max_limit);

		requested.unwrap_or(i64::from(default)).clamp(0, max) as usize
	}
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
	u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
