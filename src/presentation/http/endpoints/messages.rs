use std::sync::Arc;

use poem::{Result as PoemResult, http::StatusCode};
use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};
use uuid::Uuid;

use crate::{
    application::usecases::list_open_messages::ListOpenMessagesRequest,
    domain::errors::DomainError,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        mappers::{map_message, map_page, map_violations},
        requests::SubmitMessageRequestDto,
        responses::{
            ContactMessageDto, PaginatedMessagesDto, SubmitMessageResponse,
            SubmitMessageResponseDto,
        },
        security::JwtAuth,
    },
};

#[derive(Clone)]
pub struct MessagesEndpoints {
    state: Arc<ApiState>,
}

impl MessagesEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl MessagesEndpoints {
    #[oai(path = "/messages", method = "post", tag = EndpointsTags::Messages)]
    pub async fn submit_message(
        &self,
        request: Json<SubmitMessageRequestDto>,
    ) -> PoemResult<SubmitMessageResponse> {
        match self
            .state
            .submit_message_usecase
            .execute(request.0.into())
            .await
        {
            Ok(id) => Ok(SubmitMessageResponse::Created(Json(
                SubmitMessageResponseDto { id },
            ))),
            Err(DomainError::Validation(violations)) => Ok(SubmitMessageResponse::Invalid(Json(
                map_violations(&violations),
            ))),
            Err(err) => Err(domain_error(err)),
        }
    }

    #[oai(
        path = "/messages",
        method = "get",
        tag = EndpointsTags::Moderation,
    )]
    pub async fn list_open_messages(
        &self,
        auth: JwtAuth,
        page: Query<Option<u32>>,
        page_size: Query<Option<u32>>,
        sort_field: Query<Option<String>>,
        sort_dir: Query<Option<String>>,
    ) -> PoemResult<Json<PaginatedMessagesDto>> {
        auth.into_moderator(&self.state.jwt)?;

        let request = ListOpenMessagesRequest {
            page: page.0.unwrap_or(1),
            page_size: page_size.0.unwrap_or(self.state.default_page_size),
            sort_field: sort_field.0,
            sort_dir: sort_dir.0,
        };

        let result = self
            .state
            .list_open_messages_usecase
            .execute(request)
            .await
            .map_err(domain_error)?;

        Ok(Json(map_page(&result)))
    }

    #[oai(
        path = "/messages/:message_id",
        method = "get",
        tag = EndpointsTags::Moderation,
    )]
    pub async fn get_message(
        &self,
        auth: JwtAuth,
        message_id: Path<Uuid>,
    ) -> PoemResult<Json<ContactMessageDto>> {
        auth.into_moderator(&self.state.jwt)?;

        let message = self
            .state
            .get_message_usecase
            .execute(message_id.0)
            .await
            .map_err(domain_error)?;

        Ok(Json(map_message(&message)))
    }

    #[oai(
        path = "/messages/:message_id/close",
        method = "post",
        tag = EndpointsTags::Moderation,
    )]
    pub async fn close_message(
        &self,
        auth: JwtAuth,
        message_id: Path<Uuid>,
    ) -> PoemResult<Json<ContactMessageDto>> {
        let moderator = auth.into_moderator(&self.state.jwt)?;

        let message = self
            .state
            .close_message_usecase
            .execute(message_id.0, &moderator.name)
            .await
            .map_err(domain_error)?;

        Ok(Json(map_message(&message)))
    }
}

fn domain_error(err: DomainError) -> poem::Error {
    let status = match &err {
        DomainError::Validation(_) | DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
        DomainError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    if err.is_transient() {
        tracing::error!(error = %err, "store unavailable");
    }
    poem::Error::from_string(err.to_string(), status)
}
