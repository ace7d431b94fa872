use tonic::{Request, Response, Status};
use crate::model::algorithm;
use crate::utils::{context::ServiceContext, errors::{ErrorCode, WardenError}};
use crate::grpc::{api, common};

///
/// Verify a plain-text password against the stored credential hash.
///
/// An unknown email and a wrong password both get the same generic rejection.
///
pub async fn verify_password(ctx: &ServiceContext, request: Request<api::VerifyRequest>)
    -> Result<Response<common::Empty>, Status> {

    let request = request.into_inner();

    let credential = match ctx.credentials().load(&request.email) {
        Some(credential) => credential,
        None => return Err(ErrorCode::CredentialNotMatch.with_msg("The credentials did not match").into()),
    };

    // Verifying the hash is as CPU-bound as creating it - use the blocking pool.
    let plain_text_password = request.plain_text_password.clone();
    let valid = tokio::task::spawn_blocking(move || algorithm::validate(&plain_text_password, &credential.phc))
        .await
        .map_err(WardenError::from)?
        ?;

    if !valid {
        return Err(ErrorCode::CredentialNotMatch.with_msg("The credentials did not match").into())
    }

    Ok(Response::new(common::Empty{}))
}
