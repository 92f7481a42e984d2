use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    application::services::validator::MessageValidator,
    domain::{
        errors::DomainError,
        models::{MessageSubmission, NewMessage},
        repositories::MessageRepository,
    },
};

pub struct SubmitMessageUseCase {
    repo: Arc<dyn MessageRepository>,
    validator: MessageValidator,
}

impl SubmitMessageUseCase {
    pub fn new(repo: Arc<dyn MessageRepository>, validator: MessageValidator) -> Self {
        Self { repo, validator }
    }

    #[tracing::instrument(name = "Submit contact message", skip_all)]
    pub async fn execute(&self, mut submission: MessageSubmission) -> Result<Uuid, DomainError> {
        if let Err(violations) = self.validator.validate(&submission) {
            tracing::info!(fields = ?violations.fields(), "rejected contact message");
            return Err(DomainError::Validation(violations));
        }

        // the address was checked without surrounding whitespace; store it that way
        submission.email = submission.email.trim().to_string();

        let message = NewMessage {
            submission,
            created_at: Utc::now(),
        };
        let id = self.repo.create(message).await?;

        tracing::info!(message_id = %id, "accepted contact message");
        Ok(id)
    }
}
