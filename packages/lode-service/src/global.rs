use std::time::Instant;

use crate::{GlobalSearchResult, LodeService, Result, SearchRequest};

impl LodeService {
	/// Runs the three full-text searches concurrently and returns them side by side.
	///
	/// Each category is capped at the limit (default `search.global_limit`) and keeps its own
	/// order; semantic search is not part of the global path.
	pub async fn search_global(&self, req: SearchRequest) -> Result<GlobalSearchResult> {
		let started = Instant::now();
		let limit = self.resolve_limit(req.limit, self.cfg.search.global_limit);
		let sub = SearchRequest { limit: Some(limit as i64), ..req };
		let (conversations, messages, knowledge_items) = tokio::try_join!(
			self.search_conversations(sub.clone()),
			self.search_messages(sub.clone()),
			self.search_knowledge_full_text(sub.clone()),
		)?;
		let total = conversations.total + messages.total + knowledge_items.total;
		let took_ms = crate::elapsed_ms(started);

		tracing::debug!(user_id = %sub.user_id, total, took_ms, "Global search finished.");

		Ok(GlobalSearchResult {
			query: sub.query,
			conversations,
			messages,
			knowledge_items,
			total,
			took_ms,
		})
	}
}
