use tonic::{Request, Response, Status};
use crate::{grpc::common, utils::context::ServiceContext};

///
/// Release a previously fixed clock back to real time.
///
pub async fn reset_time(ctx: &ServiceContext, _request: Request<common::Empty>)
    -> Result<Response<common::Empty>, Status> {

    ctx.set_now(None);

    tracing::info!("Clock released back to real time");

    Ok(Response::new(common::Empty{}))
}
