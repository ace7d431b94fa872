use tonic::{Request, Response, Status};
use super::invalid_token;
use crate::{grpc::{api, common}, model::token::TokenCheck, utils::{context::ServiceContext, errors::ErrorCode}};

///
/// The 'can the reset page render' check for an inbound signed link.
///
/// The signature is verified first and fails closed - an unsigned or forged
/// request never reaches the token store. Only then is the token checked,
/// non-destructively.
///
pub async fn verify_reset_link(ctx: &ServiceContext, request: Request<api::VerifyLinkRequest>)
    -> Result<Response<common::Empty>, Status> {

    let request = request.into_inner();

    ctx.signer().verify(&request.email, &request.token, request.expires_at, &request.signature)?;

    // The signature covers the expiry, so this figure is trustworthy.
    let now = ctx.now();
    if now.timestamp_millis() as u64 > request.expires_at {
        return Err(ErrorCode::SignatureExpired
            .with_msg("The reset link has expired, request a new one").into())
    }

    match ctx.tokens().check(&request.email, &request.token, now) {
        TokenCheck::Valid => Ok(Response::new(common::Empty{})),
        check => {
            tracing::info!("Rejected reset link for {}: {:?}", request.email, check);
            Err(invalid_token().into())
        },
    }
}
