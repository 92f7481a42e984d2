use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    errors::DomainError,
    models::{ContactMessage, MessageStatus},
    repositories::MessageRepository,
};

pub struct CloseMessageUseCase {
    repo: Arc<dyn MessageRepository>,
}

impl CloseMessageUseCase {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { repo }
    }

    /// Closes an open message on behalf of `actor`. Closing twice is an `InvalidTransition`.
    #[tracing::instrument(name = "Close contact message", skip(self))]
    pub async fn execute(&self, message_id: Uuid, actor: &str) -> Result<ContactMessage, DomainError> {
        let actor = actor.trim();
        if actor.is_empty() {
            return Err(DomainError::InvalidArgument(
                "actor must not be blank".to_string(),
            ));
        }

        match self
            .repo
            .update_status(message_id, MessageStatus::Closed, actor)
            .await
        {
            Ok(message) => {
                tracing::info!("closed contact message");
                Ok(message)
            }
            Err(err @ DomainError::InvalidTransition { .. }) => {
                tracing::warn!(error = %err, "close rejected");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}
