use uuid::Uuid;

use crate::BoxFuture;
use lode_storage::{
	Result,
	db::Db,
	memory::MemoryStore,
	models::{Conversation, KnowledgeItem, Message},
	queries,
};

/// Read-only, tenant-scoped access to searchable entities.
///
/// Every method returns only rows owned by `user_id`, directly or through workspace ownership.
pub trait SearchStore
where
	Self: Send + Sync,
{
	fn conversations<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Vec<Conversation>>>;

	fn messages<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Vec<Message>>>;

	fn knowledge_items<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Vec<KnowledgeItem>>>;

	/// Knowledge items that carry a non-empty precomputed embedding.
	fn embedded_knowledge_items<'a>(
		&'a self,
		user_id: Uuid,
	) -> BoxFuture<'a, Result<Vec<KnowledgeItem>>>;
}

impl SearchStore for Db {
	fn conversations<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Vec<Conversation>>> {
		Box::pin(queries::list_conversations(self, user_id))
	}

	fn messages<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Vec<Message>>> {
		Box::pin(queries::list_messages(self, user_id))
	}

	fn knowledge_items<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Vec<KnowledgeItem>>> {
		Box::pin(queries::list_knowledge_items(self, user_id))
	}

	fn embedded_knowledge_items<'a>(
		&'a self,
		user_id: Uuid,
	) -> BoxFuture<'a, Result<Vec<KnowledgeItem>>> {
		Box::pin(queries::list_embedded_knowledge_items(self, user_id))
	}
}

impl SearchStore for MemoryStore {
	fn conversations<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Vec<Conversation>>> {
		let rows = MemoryStore::conversations(self, user_id);

		Box::pin(async move { Ok(rows) })
	}

	fn messages<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Vec<Message>>> {
		let rows = MemoryStore::messages(self, user_id);

		Box::pin(async move { Ok(rows) })
	}

	fn knowledge_items<'a>(&'a self, user_id: Uuid) -> BoxFuture<'a, Result<Vec<KnowledgeItem>>> {
		let rows = MemoryStore::knowledge_items(self, user_id);

		Box::pin(async move { Ok(rows) })
	}

	fn embedded_knowledge_items<'a>(
		&'a self,
		user_id: Uuid,
	) -> BoxFuture<'a, Result<Vec<KnowledgeItem>>> {
		let rows = MemoryStore::embedded_knowledge_items(self, user_id);

		Box::pin(async move { Ok(rows) })
	}
}
