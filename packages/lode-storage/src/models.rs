use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Conversation {
	pub conversation_id: Uuid,
	pub workspace_id: Uuid,
	/// Owner of `workspace_id`, copied onto the row so tenant filters never join.
	pub user_id: Uuid,
	pub title: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Message {
	pub message_id: Uuid,
	pub conversation_id: Uuid,
	pub workspace_id: Uuid,
	pub user_id: Uuid,
	pub role: String,
	pub content: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct KnowledgeItem {
	pub item_id: Uuid,
	pub user_id: Uuid,
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
	pub embedding: Option<Vec<f32>>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl KnowledgeItem {
	pub fn has_embedding(&self) -> bool {
		self.embedding.as_ref().map(|vec| !vec.is_empty()).unwrap_or(false)
	}
}
