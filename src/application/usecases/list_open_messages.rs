use std::sync::Arc;

use crate::domain::{
    errors::DomainError,
    models::{MessagePage, MessageSort, OpenMessagesQuery, SortDirection, SortField},
    repositories::MessageRepository,
};

pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

pub struct ListOpenMessagesConfig {
    pub max_page_size: u32,
}

impl Default for ListOpenMessagesConfig {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

pub struct ListOpenMessagesUseCase {
    repo: Arc<dyn MessageRepository>,
    config: ListOpenMessagesConfig,
}

#[derive(Debug, Clone)]
pub struct ListOpenMessagesRequest {
    pub page: u32,
    pub page_size: u32,
    pub sort_field: Option<String>,
    pub sort_dir: Option<String>,
}

impl ListOpenMessagesUseCase {
    pub fn new(repo: Arc<dyn MessageRepository>, config: ListOpenMessagesConfig) -> Self {
        Self { repo, config }
    }

    #[tracing::instrument(name = "List open contact messages", skip(self))]
    pub async fn execute(&self, request: ListOpenMessagesRequest) -> Result<MessagePage, DomainError> {
        let query = self.query(&request)?;
        self.repo.find_open(&query).await
    }

    fn query(&self, request: &ListOpenMessagesRequest) -> Result<OpenMessagesQuery, DomainError> {
        if request.page < 1 {
            return Err(DomainError::InvalidArgument(
                "page must be at least 1".to_string(),
            ));
        }
        if request.page_size < 1 || request.page_size > self.config.max_page_size {
            return Err(DomainError::InvalidArgument(format!(
                "page_size must be between 1 and {}",
                self.config.max_page_size
            )));
        }

        let defaults = MessageSort::default();
        let field = match request.sort_field.as_deref() {
            Some(value) => SortField::parse(value)?,
            None => defaults.field,
        };
        let direction = match request.sort_dir.as_deref() {
            Some(value) => SortDirection::parse(value)?,
            None => defaults.direction,
        };

        Ok(OpenMessagesQuery {
            page: request.page,
            page_size: request.page_size,
            sort: MessageSort { field, direction },
        })
    }
}
