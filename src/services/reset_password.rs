use tonic::{Request, Response, Status};
use super::invalid_token;
use crate::model::{events::PasswordChanged, token::TokenCheck};
use crate::utils::{context::ServiceContext, errors::{ErrorCode, WardenError}, generate_id};
use crate::grpc::{api, common};

///
/// Phase 2/2 of a reset: validate, authenticate and consume.
///
/// The pipeline ordering is load-bearing:
///
///   1. field validation   - pure, touches no store, 422-equivalent
///   2. link signature     - fails closed before any token lookup, 403-equivalent
///   3. token check        - generic rejection, nothing enumerable
///   4. throttle gate      - only reachable with a live unconsumed token
///   5. hash               - on the blocking pool, nothing locked
///   6. consume (CAS)      - the atomic commit point, one winner per token
///   7. upsert + event     - exactly once
///
/// A failure anywhere leaves the credential, token and event log untouched.
///
pub async fn reset_password(ctx: &ServiceContext, request: Request<api::ResetRequest>)
    -> Result<Response<common::Empty>, Status> {

    let request = request.into_inner();

    // Field validation stays local to the form fields and blocks the request
    // before anything else is looked at.
    ctx.policy().validate_reset(&request.new_password, &request.confirmation)?;

    // Prove the request came from a legitimately issued link.
    ctx.signer().verify(&request.email, &request.token, request.expires_at, &request.signature)?;

    let now = ctx.now();

    // Non-destructive token check. A replayed (already consumed) token dies
    // here as Invalid - it never reaches the throttle gate below.
    match ctx.tokens().check(&request.email, &request.token, now) {
        TokenCheck::Valid => {},
        check => {
            tracing::info!("Rejected reset for {}: {:?}", request.email, check);
            return Err(invalid_token().into())
        },
    }

    // One successful change per identity per window.
    if ctx.throttle().cooling_down(&request.email, now, ctx.config().throttle_seconds) {
        return Err(ErrorCode::TooManyResetAttempts
            .with_msg("A password was changed for this identity recently, please wait and try again").into())
    }

    // Hashing is highly CPU-bound so perform it on the blocking worker thread pool.
    let policy = ctx.policy().clone();
    let plain_text_password = request.new_password.clone();
    let phc = tokio::task::spawn_blocking(move || policy.hash_into_phc(&plain_text_password))
        .await
        .map_err(WardenError::from)?
        ?;

    // The commit point: compare-and-delete the token. If a concurrent reset
    // with the same token got here first, we lose and report the same generic
    // rejection a replay gets.
    if ctx.tokens().consume(&request.email, &request.token, ctx.now()) != TokenCheck::Valid {
        tracing::info!("Reset for {} lost the consume race", request.email);
        return Err(invalid_token().into())
    }

    let changed_at = ctx.now();
    ctx.credentials().upsert(&request.email, &phc, changed_at);
    ctx.throttle().record_success(&request.email, changed_at);

    ctx.publish(PasswordChanged {
        event_id: generate_id(),
        email: request.email.clone(),
        changed_at,
    });

    tracing::info!("Password reset completed for {}", request.email);

    Ok(Response::new(common::Empty{}))
}
