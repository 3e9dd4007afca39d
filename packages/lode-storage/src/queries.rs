//! Tenant-scoped reads. Every query filters on the denormalized `user_id` column.

use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	models::{Conversation, KnowledgeItem, Message},
};

pub async fn list_conversations(db: &Db, user_id: Uuid) -> Result<Vec<Conversation>> {
	let rows = sqlx::query_as::<_, Conversation>(
		"\
SELECT conversation_id, workspace_id, user_id, title, created_at
FROM conversations
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_messages(db: &Db, user_id: Uuid) -> Result<Vec<Message>> {
	let rows = sqlx::query_as::<_, Message>(
		"\
SELECT message_id, conversation_id, workspace_id, user_id, role, content, created_at
FROM messages
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_knowledge_items(db: &Db, user_id: Uuid) -> Result<Vec<KnowledgeItem>> {
	let rows = sqlx::query_as::<_, KnowledgeItem>(
		"\
SELECT item_id, user_id, title, content, tags, embedding, created_at, updated_at
FROM knowledge_items
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn list_embedded_knowledge_items(db: &Db, user_id: Uuid) -> Result<Vec<KnowledgeItem>> {
	let rows = sqlx::query_as::<_, KnowledgeItem>(
		"\
SELECT item_id, user_id, title, content, tags, embedding, created_at, updated_at
FROM knowledge_items
WHERE user_id = $1
	AND embedding IS NOT NULL
	AND cardinality(embedding) > 0",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
