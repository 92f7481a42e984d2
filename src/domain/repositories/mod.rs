use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    errors::{DomainError, StoreError},
    models::{ContactMessage, MessagePage, MessageStatus, NewMessage, OpenMessagesQuery},
};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persists `message` as open under a fresh id. Either the whole record is written or nothing.
    async fn create(&self, message: NewMessage) -> Result<Uuid, StoreError>;

    async fn find_open(&self, query: &OpenMessagesQuery) -> Result<MessagePage, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<ContactMessage, DomainError>;

    /// Moves a message into `status` only if it currently sits in the status's predecessor.
    /// Losing a race or repeating a transition yields `InvalidTransition`, never an overwrite.
    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
        actor: &str,
    ) -> Result<ContactMessage, DomainError>;
}
