pub mod message;
pub mod page;

pub use message::{ContactMessage, MessageStatus, MessageSubmission, NewMessage};
pub use page::{MessagePage, MessageSort, OpenMessagesQuery, SortDirection, SortField};
