use crate::{
    domain::{
        errors::Violations,
        models::{ContactMessage, MessagePage},
    },
    presentation::http::responses::{
        ContactMessageDto, PaginatedMessagesDto, ValidationErrorDto, ViolationDto,
    },
};

pub fn map_message(message: &ContactMessage) -> ContactMessageDto {
    ContactMessageDto {
        id: message.id,
        name: message.name.clone(),
        email: message.email.clone(),
        phone: message.phone.clone(),
        subject: message.subject.clone(),
        body: message.body.clone(),
        status: message.status.into(),
        created_at: message.created_at.to_rfc3339(),
        updated_at: message.updated_at.map(|at| at.to_rfc3339()),
        updated_by: message.updated_by.clone(),
    }
}

pub fn map_page(page: &MessagePage) -> PaginatedMessagesDto {
    PaginatedMessagesDto {
        messages: page.messages.iter().map(map_message).collect(),
        page: page.page,
        page_size: page.page_size,
        has_more: page.has_more,
    }
}

pub fn map_violations(violations: &Violations) -> ValidationErrorDto {
    ValidationErrorDto {
        violations: violations
            .iter()
            .map(|v| ViolationDto {
                field: v.field.to_string(),
                reason: v.reason.clone(),
            })
            .collect(),
    }
}
