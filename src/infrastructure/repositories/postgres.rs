use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{
    errors::{DomainError, StoreError},
    models::{
        ContactMessage, MessagePage, MessageStatus, NewMessage, OpenMessagesQuery, SortField,
    },
    repositories::MessageRepository,
};

const MESSAGE_COLUMNS: &str =
    "id, name, email, phone, subject, body, status, created_at, updated_at, updated_by";

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        StoreError::Backend(value.into())
    }
}

#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Arc<Self> {
        Arc::new(Self { pool, timeout })
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|err| {
                tracing::error!(error = %err, "contact message query failed");
                StoreError::from(err)
            }),
            Err(_) => {
                tracing::error!(timeout = ?self.timeout, "contact message query timed out");
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ContactMessage>, StoreError> {
        let sql = format!("SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE id = $1");
        let record = self
            .bounded(
                sqlx::query_as::<_, ContactMessageRecord>(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool),
            )
            .await?;
        record.map(ContactMessage::try_from).transpose()
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    #[tracing::instrument(skip(self, message))]
    async fn create(&self, message: NewMessage) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let submission = &message.submission;

        self.bounded(
            sqlx::query(
                r#"
                INSERT INTO contact_messages (
                    id, name, email, phone, subject, body, status, created_at
                )
                VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
                "#,
            )
            .bind(id)
            .bind(&submission.name)
            .bind(&submission.email)
            .bind(&submission.phone)
            .bind(&submission.subject)
            .bind(&submission.body)
            .bind(MessageStatus::Open.as_str())
            .bind(message.created_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    async fn find_open(&self, query: &OpenMessagesQuery) -> Result<MessagePage, DomainError> {
        let limit = i64::from(query.page_size);
        let offset = i64::try_from(query.offset())
            .map_err(|_| DomainError::InvalidArgument("page is out of range".to_string()))?;

        // column and direction come from closed enums, never from caller text
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages \
             WHERE status = $1 \
             ORDER BY {} {}, id ASC \
             LIMIT $2 OFFSET $3",
            order_expression(query.sort.field),
            query.sort.direction.keyword(),
        );

        // one extra row tells whether another page exists
        let rows = self
            .bounded(
                sqlx::query_as::<_, ContactMessageRecord>(&sql)
                    .bind(MessageStatus::Open.as_str())
                    .bind(limit + 1)
                    .bind(offset)
                    .fetch_all(&self.pool),
            )
            .await?;

        let has_more = rows.len() > query.page_size as usize;
        let messages = rows
            .into_iter()
            .take(query.page_size as usize)
            .map(ContactMessage::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MessagePage {
            messages,
            page: query.page,
            page_size: query.page_size,
            has_more,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<ContactMessage, DomainError> {
        self.fetch(id).await?.ok_or(DomainError::NotFound(id))
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
        actor: &str,
    ) -> Result<ContactMessage, DomainError> {
        if let Some(from) = status.predecessor() {
            let sql = format!(
                "UPDATE contact_messages \
                 SET status = $2, updated_at = $3, updated_by = $4 \
                 WHERE id = $1 AND status = $5 \
                 RETURNING {MESSAGE_COLUMNS}"
            );
            let updated = self
                .bounded(
                    sqlx::query_as::<_, ContactMessageRecord>(&sql)
                        .bind(id)
                        .bind(status.as_str())
                        .bind(Utc::now())
                        .bind(actor)
                        .bind(from.as_str())
                        .fetch_optional(&self.pool),
                )
                .await?;

            if let Some(record) = updated {
                return Ok(ContactMessage::try_from(record)?);
            }
        }

        // nothing matched: either the id is unknown or the message already moved on
        let current = self.fetch(id).await?;
        Err(unmatched_transition(id, status, current))
    }
}

/// Text columns sort bytewise so pages match the in-memory store whatever the database collation.
fn order_expression(field: SortField) -> String {
    match field {
        SortField::CreatedAt => field.column().to_string(),
        SortField::Name | SortField::Email | SortField::Subject => {
            format!("{} COLLATE \"C\"", field.column())
        }
    }
}

fn unmatched_transition(
    id: Uuid,
    status: MessageStatus,
    current: Option<ContactMessage>,
) -> DomainError {
    match current {
        Some(current) => DomainError::InvalidTransition {
            id,
            from: current.status,
            to: status,
        },
        None => DomainError::NotFound(id),
    }
}

#[derive(FromRow)]
struct ContactMessageRecord {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    body: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<String>,
}

impl TryFrom<ContactMessageRecord> for ContactMessage {
    type Error = StoreError;

    fn try_from(value: ContactMessageRecord) -> Result<Self, Self::Error> {
        let status = MessageStatus::parse(&value.status).ok_or_else(|| {
            StoreError::Backend(anyhow::anyhow!("unknown message status {}", value.status))
        })?;

        Ok(Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            subject: value.subject,
            body: value.body,
            status,
            created_at: value.created_at,
            updated_at: value.updated_at,
            updated_by: value.updated_by,
        })
    }
}
