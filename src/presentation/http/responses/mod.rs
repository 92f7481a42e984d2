use poem_openapi::{ApiResponse, Object, payload::Json};
use uuid::Uuid;

use crate::presentation::models::MessageStatusDto;

#[derive(Object)]
pub struct SubmitMessageResponseDto {
    pub id: Uuid,
}

#[derive(Object)]
pub struct ViolationDto {
    pub field: String,
    pub reason: String,
}

#[derive(Object)]
pub struct ValidationErrorDto {
    pub violations: Vec<ViolationDto>,
}

#[derive(ApiResponse)]
pub enum SubmitMessageResponse {
    /// The message was accepted and is open.
    #[oai(status = 201)]
    Created(Json<SubmitMessageResponseDto>),
    /// One or more fields are invalid.
    #[oai(status = 400)]
    Invalid(Json<ValidationErrorDto>),
}

#[derive(Object)]
pub struct ContactMessageDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
    pub status: MessageStatusDto,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Object)]
pub struct PaginatedMessagesDto {
    pub messages: Vec<ContactMessageDto>,
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
}
