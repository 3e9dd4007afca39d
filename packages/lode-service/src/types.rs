use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use lode_storage::models::{Conversation, KnowledgeItem, Message};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	pub user_id: Uuid,
	pub query: String,
	/// Negative values clamp to zero; `None` uses the configured default.
	pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticSearchRequest {
	pub user_id: Uuid,
	pub query: String,
	pub limit: Option<i64>,
	/// Minimum cosine similarity; `None` or a non-finite value uses `search.semantic.threshold`.
	pub threshold: Option<f32>,
}
impl SemanticSearchRequest {
	pub fn full_text(&self) -> SearchRequest {
		SearchRequest { user_id: self.user_id, query: self.query.clone(), limit: self.limit }
	}
}

/// Which retrieval path produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
	FullText,
	Semantic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
	pub item: T,
	pub score: f32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub highlight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSet<T> {
	pub query: String,
	pub mode: SearchMode,
	pub results: Vec<SearchResult<T>>,
	/// Number of entries in `results`.
	pub total: usize,
	pub took_ms: u64,
}
impl<T> SearchResultSet<T> {
	pub fn is_empty(&self) -> bool {
		self.results.is_empty()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSearchResult {
	pub query: String,
	pub conversations: SearchResultSet<ConversationItem>,
	pub messages: SearchResultSet<MessageItem>,
	pub knowledge_items: SearchResultSet<KnowledgeItemView>,
	/// Sum of the three category totals.
	pub total: usize,
	pub took_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationItem {
	pub conversation_id: Uuid,
	pub workspace_id: Uuid,
	pub title: String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
impl From<Conversation> for ConversationItem {
	fn from(row: Conversation) -> Self {
		Self {
			conversation_id: row.conversation_id,
			workspace_id: row.workspace_id,
			title: row.title,
			created_at: row.created_at,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageItem {
	pub message_id: Uuid,
	pub conversation_id: Uuid,
	pub role: String,
	pub content: String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
impl From<Message> for MessageItem {
	fn from(row: Message) -> Self {
		Self {
			message_id: row.message_id,
			conversation_id: row.conversation_id,
			role: row.role,
			content: row.content,
			created_at: row.created_at,
		}
	}
}

/// A knowledge item as returned to callers. The embedding itself is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItemView {
	pub item_id: Uuid,
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
	pub has_embedding: bool,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}
impl From<KnowledgeItem> for KnowledgeItemView {
	fn from(row: KnowledgeItem) -> Self {
		let has_embedding = row.has_embedding();

		Self {
			item_id: row.item_id,
			title: row.title,
			content: row.content,
			tags: row.tags,
			has_embedding,
			created_at: row.created_at,
			updated_at: row.updated_at,
		}
	}
}
