mod events;
mod reset_password;
mod reset_time;
mod set_time;
mod start_reset;
mod verify_link;
mod verify_password;

use futures::Stream;
use tracing::instrument;
use std::{pin::Pin, sync::Arc};
use tonic::{Request, Response, Status};
use crate::grpc::{api, common, internal};
use crate::grpc::api::warden_server::Warden;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};
use crate::grpc::internal::internal_server::Internal;

pub(crate) type EventStream = Pin<Box<dyn Stream<Item = Result<internal::PasswordChangedEvent, Status>> + Send + Sync>>;

///
/// The one rejection a caller sees for anything token-shaped going wrong -
/// unknown email, wrong token, expired token or a replay. Distinguishing them
/// would let a caller enumerate identities or probe token state.
///
pub(crate) fn invalid_token() -> WardenError {
    ErrorCode::InvalidResetToken.with_msg("The password reset request could not be completed")
}

///
/// Implemention for all the gRPC service endpoints defined in the .proto file.
///
#[tonic::async_trait]
impl Warden for Arc<ServiceContext> {
    #[instrument(skip(self, request))]
    async fn start_reset(&self, request: Request<api::StartResetRequest>) -> Result<Response<api::StartResetResponse>, Status> {
        start_reset::start_reset(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn verify_reset_link(&self, request: Request<api::VerifyLinkRequest>) -> Result<Response<common::Empty>, Status> {
        verify_link::verify_reset_link(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn reset_password(&self, request: Request<api::ResetRequest>) -> Result<Response<common::Empty>, Status> {
        reset_password::reset_password(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn verify_password(&self, request: Request<api::VerifyRequest>) -> Result<Response<common::Empty>, Status> {
        verify_password::verify_password(self, request).await
    }
}

#[tonic::async_trait]
impl Internal for Arc<ServiceContext> {
    type SubscribeEventsStream = EventStream;

    async fn ping(&self, _request: Request<common::Empty>) -> Result<Response<common::Empty>, Status> {
        Ok(Response::new(common::Empty::default()))
    }

    #[instrument(skip(self, request))]
    async fn set_time(&self, request: Request<internal::NewTime>) -> Result<Response<common::Empty>, Status> {
        set_time::set_time(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn reset_time(&self, request: Request<common::Empty>) -> Result<Response<common::Empty>, Status> {
        reset_time::reset_time(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn list_events(&self, request: Request<common::Empty>) -> Result<Response<internal::ListEventsResponse>, Status> {
        events::list_events(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn subscribe_events(&self, request: Request<common::Empty>) -> Result<Response<Self::SubscribeEventsStream>, Status> {
        events::subscribe_events(self, request).await
    }
}
