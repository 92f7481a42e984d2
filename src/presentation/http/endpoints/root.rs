use std::sync::Arc;

use poem_openapi::Tags;

use crate::application::services::jwt::JwtService;
use crate::application::services::validator::MessageValidator;
use crate::application::usecases::{
    close_message::CloseMessageUseCase,
    get_message::GetMessageUseCase,
    list_open_messages::{ListOpenMessagesConfig, ListOpenMessagesUseCase},
    submit_message::SubmitMessageUseCase,
};
use crate::domain::repositories::MessageRepository;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

pub struct Endpoints;

#[derive(Clone)]
pub struct ApiState {
    pub submit_message_usecase: Arc<SubmitMessageUseCase>,
    pub list_open_messages_usecase: Arc<ListOpenMessagesUseCase>,
    pub get_message_usecase: Arc<GetMessageUseCase>,
    pub close_message_usecase: Arc<CloseMessageUseCase>,
    pub jwt: JwtService,
    pub default_page_size: u32,
}

impl ApiState {
    pub fn new(repo: Arc<dyn MessageRepository>, jwt: JwtService, max_page_size: u32) -> Self {
        Self {
            submit_message_usecase: Arc::new(SubmitMessageUseCase::new(
                repo.clone(),
                MessageValidator::default(),
            )),
            list_open_messages_usecase: Arc::new(ListOpenMessagesUseCase::new(
                repo.clone(),
                ListOpenMessagesConfig { max_page_size },
            )),
            get_message_usecase: Arc::new(GetMessageUseCase::new(repo.clone())),
            close_message_usecase: Arc::new(CloseMessageUseCase::new(repo)),
            jwt,
            default_page_size: DEFAULT_PAGE_SIZE.min(max_page_size),
        }
    }
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Messages,
    Moderation,
}
