use poem_openapi::Object;

use crate::domain::models::MessageSubmission;

/// Field rules are enforced by the intake validator so every violation is reported at once.
#[derive(Object, Debug)]
pub struct SubmitMessageRequestDto {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
}

impl From<SubmitMessageRequestDto> for MessageSubmission {
    fn from(value: SubmitMessageRequestDto) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            subject: value.subject,
            body: value.body,
        }
    }
}
