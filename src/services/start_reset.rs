use tonic::{Request, Response, Status};
use crate::{grpc::api, model::token::ResetToken, utils::context::ServiceContext};

///
/// Phase 1/2 of a reset: issue a fresh single-use token for the identity and
/// sign the link parameters.
///
/// Issuing replaces any previously issued token, so only the newest link in
/// the user's inbox works. The identity is not checked for existence - the
/// user directory is an external collaborator and a generic failure on the
/// verify side keeps identities un-enumerable.
///
pub async fn start_reset(ctx: &ServiceContext, request: Request<api::StartResetRequest>)
    -> Result<Response<api::StartResetResponse>, Status> {

    // Get the domain-level gRPC request struct.
    let request = request.into_inner();
    let now = ctx.now();

    let token = ResetToken::issue(
        &request.email,
        ctx.config().token_length,
        ctx.config().token_ttl_seconds,
        now);

    ctx.tokens().replace(token.clone());

    // Sign email, token and expiry together so none of them can be tampered with.
    let expires_at = token.expires_at.timestamp_millis() as u64;
    let signature = ctx.signer().sign(&request.email, &token.token, expires_at);

    tracing::info!("Issued reset token for {}", request.email);

    Ok(Response::new(api::StartResetResponse { token: token.token, signature, expires_at }))
}
