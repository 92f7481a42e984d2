use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    errors::{DomainError, StoreError},
    models::{
        ContactMessage, MessagePage, MessageSort, MessageStatus, NewMessage, OpenMessagesQuery,
        SortDirection, SortField,
    },
    repositories::MessageRepository,
};

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<HashMap<Uuid, ContactMessage>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: NewMessage) -> Result<Uuid, StoreError> {
        let mut messages = self.messages.write().await;
        let mut id = Uuid::new_v4();
        while messages.contains_key(&id) {
            id = Uuid::new_v4();
        }
        messages.insert(id, ContactMessage::open(id, message));
        Ok(id)
    }

    async fn find_open(&self, query: &OpenMessagesQuery) -> Result<MessagePage, DomainError> {
        let messages = self.messages.read().await;
        let mut open: Vec<&ContactMessage> = messages
            .values()
            .filter(|m| m.status == MessageStatus::Open)
            .collect();
        open.sort_by(|a, b| compare(a, b, query.sort));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = query.page_size as usize;
        let has_more = open.len() > offset.saturating_add(limit);
        let page = open
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(MessagePage {
            messages: page,
            page: query.page,
            page_size: query.page_size,
            has_more,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ContactMessage, DomainError> {
        let messages = self.messages.read().await;
        messages.get(&id).cloned().ok_or(DomainError::NotFound(id))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
        actor: &str,
    ) -> Result<ContactMessage, DomainError> {
        // check and write under one lock so concurrent transitions serialize
        let mut messages = self.messages.write().await;
        let entry = messages.get_mut(&id).ok_or(DomainError::NotFound(id))?;

        if !entry.status.can_transition_to(status) {
            return Err(DomainError::InvalidTransition {
                id,
                from: entry.status,
                to: status,
            });
        }

        entry.status = status;
        entry.updated_at = Some(Utc::now());
        entry.updated_by = Some(actor.to_string());
        Ok(entry.clone())
    }
}

// bytewise text order, same as the COLLATE "C" ordering used by the postgres store
fn compare(a: &ContactMessage, b: &ContactMessage, sort: MessageSort) -> Ordering {
    let ordering = match sort.field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Subject => a.subject.cmp(&b.subject),
    };
    let ordering = match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };
    ordering.then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::domain::models::MessageSubmission;

    fn new_message(name: &str, minute: i64) -> NewMessage {
        NewMessage {
            submission: MessageSubmission {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                phone: None,
                subject: "Question about billing".to_string(),
                body: "Please call me back about my invoice.".to_string(),
            },
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
                + Duration::minutes(minute),
        }
    }

    fn query(page: u32, page_size: u32, field: SortField, direction: SortDirection) -> OpenMessagesQuery {
        OpenMessagesQuery {
            page,
            page_size,
            sort: MessageSort { field, direction },
        }
    }

    #[tokio::test]
    async fn created_message_starts_open() {
        let repo = InMemoryMessageRepository::new();
        let id = repo.create(new_message("Carol", 0)).await.unwrap();

        let stored = repo.find_by_id(id).await.unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.status, MessageStatus::Open);
        assert_eq!(stored.name, "Carol");
        assert!(stored.updated_at.is_none());
        assert!(stored.updated_by.is_none());
    }

    #[tokio::test]
    async fn find_by_id_reports_missing_message() {
        let repo = InMemoryMessageRepository::new();
        let missing = Uuid::new_v4();

        let err = repo.find_by_id(missing).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn close_records_actor_and_rejects_repeat() {
        let repo = InMemoryMessageRepository::new();
        let id = repo.create(new_message("Dave", 0)).await.unwrap();

        let closed = repo
            .update_status(id, MessageStatus::Closed, "moderator-1")
            .await
            .unwrap();
        assert_eq!(closed.status, MessageStatus::Closed);
        assert_eq!(closed.updated_by.as_deref(), Some("moderator-1"));
        assert!(closed.updated_at.is_some());

        let err = repo
            .update_status(id, MessageStatus::Closed, "moderator-2")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: MessageStatus::Closed,
                to: MessageStatus::Closed,
                ..
            }
        ));

        let reopen = repo
            .update_status(id, MessageStatus::Open, "moderator-2")
            .await
            .unwrap_err();
        assert!(matches!(reopen, DomainError::InvalidTransition { .. }));

        let stored = repo.find_by_id(id).await.unwrap();
        assert_eq!(stored.status, MessageStatus::Closed);
        assert_eq!(stored.updated_by.as_deref(), Some("moderator-1"));
    }

    #[tokio::test]
    async fn find_open_skips_closed_and_pages() {
        let repo = InMemoryMessageRepository::new();
        let mut ids = Vec::new();
        for (minute, name) in ["Ann", "Ben", "Cat", "Dan"].into_iter().enumerate() {
            ids.push(repo.create(new_message(name, minute as i64)).await.unwrap());
        }
        repo.update_status(ids[1], MessageStatus::Closed, "mod")
            .await
            .unwrap();

        let first = repo
            .find_open(&query(1, 2, SortField::CreatedAt, SortDirection::Asc))
            .await
            .unwrap();
        let names: Vec<_> = first.messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Cat"]);
        assert!(first.has_more);

        let second = repo
            .find_open(&query(2, 2, SortField::CreatedAt, SortDirection::Asc))
            .await
            .unwrap();
        let names: Vec<_> = second.messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Dan"]);
        assert!(!second.has_more);

        let beyond = repo
            .find_open(&query(5, 2, SortField::CreatedAt, SortDirection::Asc))
            .await
            .unwrap();
        assert!(beyond.messages.is_empty());
    }

    #[tokio::test]
    async fn find_open_sorts_by_text_fields() {
        let repo = InMemoryMessageRepository::new();
        for (minute, name) in ["Mia", "Ada", "Zed"].into_iter().enumerate() {
            repo.create(new_message(name, minute as i64)).await.unwrap();
        }

        let page = repo
            .find_open(&query(1, 10, SortField::Name, SortDirection::Desc))
            .await
            .unwrap();
        let names: Vec<_> = page.messages.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, vec!["Zed", "Mia", "Ada"]);
    }
}
