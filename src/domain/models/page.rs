use crate::domain::errors::DomainError;

use super::message::ContactMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Name,
    Email,
    Subject,
}

impl SortField {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            "subject" => Ok(SortField::Subject),
            other => Err(DomainError::InvalidArgument(format!(
                "unknown sort field '{other}'"
            ))),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Subject => "subject",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(DomainError::InvalidArgument(format!(
                "unknown sort direction '{value}'"
            ))),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for MessageSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

/// A checked request for one page of open messages. `page` is 1-based.
#[derive(Debug, Clone, Copy)]
pub struct OpenMessagesQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort: MessageSort,
}

impl OpenMessagesQuery {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

#[derive(Debug, Clone)]
pub struct MessagePage {
    pub messages: Vec<ContactMessage>,
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
}
