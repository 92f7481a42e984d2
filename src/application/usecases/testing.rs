use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::{
        errors::{DomainError, StoreError},
        models::{ContactMessage, MessagePage, MessageStatus, NewMessage, OpenMessagesQuery},
        repositories::MessageRepository,
    },
    infrastructure::repositories::InMemoryMessageRepository,
};

/// In-memory store that counts calls and can simulate an unreachable backend.
pub struct RecordingRepository {
    inner: InMemoryMessageRepository,
    creates: AtomicUsize,
    queries: AtomicUsize,
    failing: bool,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryMessageRepository::new(),
            creates: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            Err(StoreError::Backend(anyhow::anyhow!("connection refused")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MessageRepository for RecordingRepository {
    async fn create(&self, message: NewMessage) -> Result<Uuid, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.create(message).await
    }

    async fn find_open(&self, query: &OpenMessagesQuery) -> Result<MessagePage, DomainError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_open(query).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ContactMessage, DomainError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_by_id(id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
        actor: &str,
    ) -> Result<ContactMessage, DomainError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.update_status(id, status, actor).await
    }
}
