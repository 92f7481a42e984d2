use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{errors::DomainError, models::ContactMessage, repositories::MessageRepository};

pub struct GetMessageUseCase {
    repo: Arc<dyn MessageRepository>,
}

impl GetMessageUseCase {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, message_id: Uuid) -> Result<ContactMessage, DomainError> {
        self.repo.find_by_id(message_id).await
    }
}
