//! Embedding-based knowledge search with lexical fallback.

use std::{
	fmt,
	time::{Duration, Instant},
};

use lode_domain::similarity;

use crate::{
	KnowledgeItemView, LodeService, Result, SearchMode, SearchResultSet, SemanticSearchRequest,
	ranking::{self, Candidate},
};

/// Outcome of embedding a query. Anything other than a usable vector is `Unavailable`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryEmbedding {
	Vector(Vec<f32>),
	Unavailable(UnavailableReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnavailableReason {
	Timeout { timeout_ms: u64 },
	Provider(String),
	Empty,
	DimensionMismatch { expected: usize, actual: usize },
}
impl fmt::Display for UnavailableReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Timeout { timeout_ms } => write!(f, "timed out after {timeout_ms} ms"),
			Self::Provider(message) => write!(f, "provider error: {message}"),
			Self::Empty => write!(f, "provider returned no vector"),
			Self::DimensionMismatch { expected, actual } => {
				write!(f, "expected {expected} dimensions, got {actual}")
			},
		}
	}
}

impl LodeService {
	/// Knowledge items whose embedding is at least `threshold` cosine-similar to the query.
	///
	/// When the query cannot be embedded this returns [`Self::search_knowledge_full_text`] for
	/// the same user, query, and limit. The fallback is logged, not returned as an error; the
	/// result set's `mode` records which path ran, and `took_ms` includes the embedding wait.
	pub async fn search_knowledge_semantic(
		&self,
		req: SemanticSearchRequest,
	) -> Result<SearchResultSet<KnowledgeItemView>> {
		let started = Instant::now();

		if req.query.trim().is_empty() {
			return self.full_text_knowledge(req.full_text(), started).await;
		}

		let vector = match self.embed_query(&req.query).await {
			QueryEmbedding::Vector(vector) => vector,
			QueryEmbedding::Unavailable(reason) => {
				tracing::warn!(
					user_id = %req.user_id,
					reason = %reason,
					provider_id = self.cfg.providers.embedding.provider_id.as_str(),
					"Query embedding unavailable. Falling back to full-text knowledge search."
				);

				return self.full_text_knowledge(req.full_text(), started).await;
			},
		};
		let limit = self.resolve_limit(req.limit, self.cfg.search.default_limit);
		let threshold = self.resolve_threshold(req.threshold);
		let rows = self.store.embedded_knowledge_items(req.user_id).await?;
		let candidates = rows
			.into_iter()
			.filter_map(|row| {
				let similarity = similarity::cosine(&vector, row.embedding.as_deref()?)?;

				(similarity >= threshold).then(|| Candidate {
					recency: row.updated_at,
					id: row.item_id,
					score: similarity,
					highlight: None,
					item: row.into(),
				})
			})
			.collect();
		let results = ranking::rank(candidates, limit);
		let took_ms = crate::elapsed_ms(started);

		tracing::debug!(
			user_id = %req.user_id,
			query_len = req.query.len(),
			threshold,
			total = results.len(),
			took_ms,
			"Knowledge semantic search finished."
		);

		Ok(SearchResultSet {
			total: results.len(),
			query: req.query,
			mode: SearchMode::Semantic,
			results,
			took_ms,
		})
	}

	/// Embeds `query`, bounded by `providers.embedding.timeout_ms` including provider retries.
	pub async fn embed_query(&self, query: &str) -> QueryEmbedding {
		let cfg = &self.cfg.providers.embedding;
		let texts = [query.to_string()];
		let call = self.providers.embedding.embed(cfg, &texts);
		let vectors = match tokio::time::timeout(Duration::from_millis(cfg.timeout_ms), call).await {
			Ok(Ok(vectors)) => vectors,
			Ok(Err(err)) => {
				return QueryEmbedding::Unavailable(UnavailableReason::Provider(err.to_string()));
			},
			Err(_) => {
				return QueryEmbedding::Unavailable(UnavailableReason::Timeout {
					timeout_ms: cfg.timeout_ms,
				});
			},
		};
		let Some(vector) = vectors.into_iter().next().filter(|vector| !vector.is_empty()) else {
			return QueryEmbedding::Unavailable(UnavailableReason::Empty);
		};
		let expected = cfg.dimensions as usize;

		if vector.len() != expected {
			return QueryEmbedding::Unavailable(UnavailableReason::DimensionMismatch {
				expected,
				actual: vector.len(),
			});
		}

		QueryEmbedding::Vector(vector)
	}

	fn resolve_threshold(&self, requested: Option<f32>) -> f32 {
		match requested {
			Some(threshold) if threshold.is_finite() => threshold.clamp(-1.0, 1.0),
			_ => self.cfg.search.semantic.threshold,
		}
	}
}
