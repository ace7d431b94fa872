use chrono::{DateTime, Utc};
use tonic::{Request, Response, Status};
use crate::{grpc::{common, internal}, utils::{context::ServiceContext, errors::WardenError}};

///
/// Fix the service clock at the given RFC3339 instant - token expiry and the
/// throttle window are measured against it until reset_time is called.
///
pub async fn set_time(ctx: &ServiceContext, request: Request<internal::NewTime>)
    -> Result<Response<common::Empty>, Status> {

    let request = request.into_inner();

    let fixed: DateTime<Utc> = request.new_time.parse().map_err(WardenError::from)?;
    ctx.set_now(Some(fixed));

    tracing::info!("Clock fixed at {}", fixed);

    Ok(Response::new(common::Empty{}))
}
