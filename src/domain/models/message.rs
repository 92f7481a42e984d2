use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageStatus {
    Open,
    Closed,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Open => "open",
            MessageStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(MessageStatus::Open),
            "closed" => Some(MessageStatus::Closed),
            _ => None,
        }
    }

    /// The only state a message may be in right before entering `self`.
    /// `None` means nothing transitions into this state.
    pub fn predecessor(&self) -> Option<MessageStatus> {
        match self {
            MessageStatus::Open => None,
            MessageStatus::Closed => Some(MessageStatus::Open),
        }
    }

    pub fn can_transition_to(&self, next: MessageStatus) -> bool {
        next.predecessor() == Some(*self)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields a submitter controls. Carries no id, status or timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
}

/// A validated submission stamped by intake, ready to be stored as open.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub submission: MessageSubmission,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl ContactMessage {
    pub fn open(id: Uuid, new_message: NewMessage) -> Self {
        let NewMessage {
            submission,
            created_at,
        } = new_message;

        Self {
            id,
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            subject: submission.subject,
            body: submission.body,
            status: MessageStatus::Open,
            created_at,
            updated_at: None,
            updated_by: None,
        }
    }

    pub fn submission(&self) -> MessageSubmission {
        MessageSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
        }
    }
}
