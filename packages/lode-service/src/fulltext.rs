//! Lexical search over conversations, messages, and knowledge items.
//!
//! All three operations score every candidate the user owns with the service's
//! [`RelevanceScorer`](lode_domain::RelevanceScorer), drop zero scores, and rank the rest.

use std::time::Instant;

use lode_domain::highlight;
use lode_storage::models::{Conversation, KnowledgeItem, Message};

use crate::{
	ConversationItem, KnowledgeItemView, LodeService, MessageItem, Result, SearchMode,
	SearchRequest, SearchResultSet,
	ranking::{self, Candidate},
};

impl LodeService {
	/// Conversations in the user's workspaces, scored on their title.
	pub async fn search_conversations(
		&self,
		req: SearchRequest,
	) -> Result<SearchResultSet<ConversationItem>> {
		let started = Instant::now();
		let limit = self.resolve_limit(req.limit, self.cfg.search.default_limit);
		let rows = self.store.conversations(req.user_id).await?;
		let candidates =
			rows.into_iter().filter_map(|row| self.score_conversation(&req.query, row)).collect();
		let results = ranking::rank(candidates, limit);
		let took_ms = crate::elapsed_ms(started);

		tracing::debug!(
			user_id = %req.user_id,
			query_len = req.query.len(),
			total = results.len(),
			took_ms,
			"Conversation search finished."
		);

		Ok(SearchResultSet {
			total: results.len(),
			query: req.query,
			mode: SearchMode::FullText,
			results,
			took_ms,
		})
	}

	/// Messages in the user's conversations, scored on their content. Every result carries a
	/// highlight around the first match.
	pub async fn search_messages(&self, req: SearchRequest) -> Result<SearchResultSet<MessageItem>> {
		let started = Instant::now();
		let limit = self.resolve_limit(req.limit, self.cfg.search.default_limit);
		let rows = self.store.messages(req.user_id).await?;
		let candidates =
			rows.into_iter().filter_map(|row| self.score_message(&req.query, row)).collect();
		let results = ranking::rank(candidates, limit);
		let took_ms = crate::elapsed_ms(started);

		tracing::debug!(
			user_id = %req.user_id,
			query_len = req.query.len(),
			total = results.len(),
			took_ms,
			"Message search finished."
		);

		Ok(SearchResultSet {
			total: results.len(),
			query: req.query,
			mode: SearchMode::FullText,
			results,
			took_ms,
		})
	}

	/// Knowledge items owned by the user, scored on the best of title, content, and tags.
	pub async fn search_knowledge_full_text(
		&self,
		req: SearchRequest,
	) -> Result<SearchResultSet<KnowledgeItemView>> {
		self.full_text_knowledge(req, Instant::now()).await
	}

	// `took_ms` is measured from `started`, which a semantic fallback sets before embedding.
	pub(crate) async fn full_text_knowledge(
		&self,
		req: SearchRequest,
		started: Instant,
	) -> Result<SearchResultSet<KnowledgeItemView>> {
		let limit = self.resolve_limit(req.limit, self.cfg.search.default_limit);
		let rows = self.store.knowledge_items(req.user_id).await?;
		let candidates =
			rows.into_iter().filter_map(|row| self.score_knowledge_item(&req.query, row)).collect();
		let results = ranking::rank(candidates, limit);
		let took_ms = crate::elapsed_ms(started);

		tracing::debug!(
			user_id = %req.user_id,
			query_len = req.query.len(),
			total = results.len(),
			took_ms,
			"Knowledge full-text search finished."
		);

		Ok(SearchResultSet {
			total: results.len(),
			query: req.query,
			mode: SearchMode::FullText,
			results,
			took_ms,
		})
	}

	fn score_conversation(
		&self,
		query: &str,
		row: Conversation,
	) -> Option<Candidate<ConversationItem>> {
		let score = self.lexical_score(query, &row.title)?;

		Some(Candidate {
			recency: row.created_at,
			id: row.conversation_id,
			score,
			highlight: None,
			item: row.into(),
		})
	}

	fn score_message(&self, query: &str, row: Message) -> Option<Candidate<MessageItem>> {
		let score = self.lexical_score(query, &row.content)?;
		let window = self.cfg.search.highlight.window_chars;
		// A replacement scorer may match text the highlighter cannot locate.
		let highlight = highlight::highlight(&row.content, query, window).unwrap_or_else(|| {
			tracing::debug!(
				message_id = %row.message_id,
				"Scorer matched text the highlighter could not locate. Using a leading excerpt."
			);

			highlight::leading_excerpt(&row.content, window)
		});

		Some(Candidate {
			recency: row.created_at,
			id: row.message_id,
			score,
			highlight: Some(highlight),
			item: row.into(),
		})
	}

	fn score_knowledge_item(
		&self,
		query: &str,
		row: KnowledgeItem,
	) -> Option<Candidate<KnowledgeItemView>> {
		let content_score = self.lexical_score(query, &row.content);
		let score = [self.lexical_score(query, &row.title), content_score]
			.into_iter()
			.chain(row.tags.iter().map(|tag| self.lexical_score(query, tag)))
			.flatten()
			.reduce(f32::max)?;
		let highlight = content_score.and_then(|_| {
			highlight::highlight(&row.content, query, self.cfg.search.highlight.window_chars)
		});

		Some(Candidate {
			recency: row.updated_at,
			id: row.item_id,
			score,
			highlight,
			item: row.into(),
		})
	}

	// `None` for scores that exclude the entity (zero, negative, or NaN).
	fn lexical_score(&self, query: &str, text: &str) -> Option<f32> {
		let score = self.scorer.score(query, text);

		(score > 0.0).then(|| score.min(1.0))
	}
}
