use poem_openapi::Enum;

use crate::domain::models::MessageStatus;

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum MessageStatusDto {
    #[oai(rename = "open")]
    Open,
    #[oai(rename = "closed")]
    Closed,
}

impl From<MessageStatus> for MessageStatusDto {
    fn from(value: MessageStatus) -> Self {
        match value {
            MessageStatus::Open => MessageStatusDto::Open,
            MessageStatus::Closed => MessageStatusDto::Closed,
        }
    }
}
