//! In-process datastore with the same tenant-scoped reads as [`crate::queries`].
//!
//! Owner ids are denormalized at insert time, mirroring the Postgres schema, so reads filter on
//! `user_id` alone.

use std::{
	collections::{BTreeSet, HashMap},
	sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result,
	models::{Conversation, KnowledgeItem, Message},
};

const ROLES: [&str; 3] = ["user", "assistant", "system"];

#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
	workspace_owners: HashMap<Uuid, Uuid>,
	conversations: Vec<Conversation>,
	messages: Vec<Message>,
	knowledge_items: Vec<KnowledgeItem>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_workspace(&self, workspace_id: Uuid, user_id: Uuid) {
		self.write().workspace_owners.insert(workspace_id, user_id);
	}

	pub fn add_conversation(
		&self,
		workspace_id: Uuid,
		title: &str,
		created_at: OffsetDateTime,
	) -> Result<Conversation> {
		let mut tables = self.write();
		let Some(user_id) = tables.workspace_owners.get(&workspace_id).copied() else {
			return Err(Error::InvalidArgument(format!("Unknown workspace {workspace_id}.")));
		};
		let conversation = Conversation {
			conversation_id: Uuid::new_v4(),
			workspace_id,
			user_id,
			title: title.to_string(),
			created_at,
		};

		tables.conversations.push(conversation.clone());

		Ok(conversation)
	}

	pub fn add_message(
		&self,
		conversation_id: Uuid,
		role: &str,
		content: &str,
		created_at: OffsetDateTime,
	) -> Result<Message> {
		if !ROLES.contains(&role) {
			return Err(Error::InvalidArgument(format!("Unknown message role {role:?}.")));
		}

		let mut tables = self.write();
		let Some(parent) =
			tables.conversations.iter().find(|c| c.conversation_id == conversation_id)
		else {
			return Err(Error::InvalidArgument(format!("Unknown conversation {conversation_id}.")));
		};
		let message = Message {
			message_id: Uuid::new_v4(),
			conversation_id,
			workspace_id: parent.workspace_id,
			user_id: parent.user_id,
			role: role.to_string(),
			content: content.to_string(),
			created_at,
		};

		tables.messages.push(message.clone());

		Ok(message)
	}

	/// Stores `item`, collapsing duplicate tags.
	pub fn add_knowledge_item(&self, mut item: KnowledgeItem) -> KnowledgeItem {
		let tags: BTreeSet<String> = item.tags.drain(..).collect();

		item.tags = tags.into_iter().collect();

		self.write().knowledge_items.push(item.clone());

		item
	}

	pub fn conversations(&self, user_id: Uuid) -> Vec<Conversation> {
		self.read().conversations.iter().filter(|c| c.user_id == user_id).cloned().collect()
	}

	pub fn messages(&self, user_id: Uuid) -> Vec<Message> {
		self.read().messages.iter().filter(|m| m.user_id == user_id).cloned().collect()
	}

	pub fn knowledge_items(&self, user_id: Uuid) -> Vec<KnowledgeItem> {
		self.read().knowledge_items.iter().filter(|k| k.user_id == user_id).cloned().collect()
	}

	pub fn embedded_knowledge_items(&self, user_id: Uuid) -> Vec<KnowledgeItem> {
		self.read()
			.knowledge_items
			.iter()
			.filter(|k| k.user_id == user_id && k.has_embedding())
			.cloned()
			.collect()
	}

	fn read(&self) -> RwLockReadGuard<'_, Tables> {
		self.tables.read().unwrap_or_else(|err| err.into_inner())
	}

	fn write(&self) -> RwLockWriteGuard<'_, Tables> {
		self.tables.write().unwrap_or_else(|err| err.into_inner())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn knowledge_item(user_id: Uuid, tags: &[&str], embedding: Option<Vec<f32>>) -> KnowledgeItem {
		let now = OffsetDateTime::now_utc();

		KnowledgeItem {
			item_id: Uuid::new_v4(),
			user_id,
			title: "Title".to_string(),
			content: "Content".to_string(),
			tags: tags.iter().map(|tag| tag.to_string()).collect(),
			embedding,
			created_at: now,
			updated_at: now,
		}
	}

	#[test]
	fn conversations_inherit_workspace_owner() {
		let store = MemoryStore::new();
		let (owner, other, workspace) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

		store.add_workspace(workspace, owner);

		let conversation = store
			.add_conversation(workspace, "Roadmap", OffsetDateTime::now_utc())
			.expect("Failed to add conversation.");

		assert_eq!(conversation.user_id, owner);
		assert_eq!(store.conversations(owner).len(), 1);
		assert!(store.conversations(other).is_empty());
	}

	#[test]
	fn messages_inherit_conversation_owner() {
		let store = MemoryStore::new();
		let (owner, workspace) = (Uuid::new_v4(), Uuid::new_v4());

		store.add_workspace(workspace, owner);

		let conversation = store
			.add_conversation(workspace, "Roadmap", OffsetDateTime::now_utc())
			.expect("Failed to add conversation.");
		let message = store
			.add_message(conversation.conversation_id, "user", "hello", OffsetDateTime::now_utc())
			.expect("Failed to add message.");

		assert_eq!(message.user_id, owner);
		assert_eq!(message.workspace_id, workspace);
		assert_eq!(store.messages(owner), vec![message]);
	}

	#[test]
	fn rejects_unknown_parents_and_roles() {
		let store = MemoryStore::new();
		let now = OffsetDateTime::now_utc();

		assert!(matches!(
			store.add_conversation(Uuid::new_v4(), "x", now),
			Err(Error::InvalidArgument(_))
		));
		assert!(matches!(
			store.add_message(Uuid::new_v4(), "user", "x", now),
			Err(Error::InvalidArgument(_))
		));
		assert!(matches!(
			store.add_message(Uuid::new_v4(), "robot", "x", now),
			Err(Error::InvalidArgument(_))
		));
	}

	#[test]
	fn tags_are_deduplicated() {
		let store = MemoryStore::new();
		let owner = Uuid::new_v4();
		let item = store.add_knowledge_item(knowledge_item(owner, &["sql", "perf", "sql"], None));

		assert_eq!(item.tags, vec!["perf".to_string(), "sql".to_string()]);
	}

	#[test]
	fn embedded_items_exclude_missing_and_empty_vectors() {
		let store = MemoryStore::new();
		let owner = Uuid::new_v4();

		store.add_knowledge_item(knowledge_item(owner, &[], None));
		store.add_knowledge_item(knowledge_item(owner, &[], Some(Vec::new())));

		let embedded = store.add_knowledge_item(knowledge_item(owner, &[], Some(vec![1.0, 0.0])));

		assert_eq!(store.knowledge_items(owner).len(), 3);
		assert_eq!(store.embedded_knowledge_items(owner), vec![embedded]);
	}
}
