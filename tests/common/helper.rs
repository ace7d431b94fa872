use tonic::{Request, Status};
use warden::grpc::{api, common, internal};
use super::TestContext;

///
/// Build the form submission a user would send after following the signed link.
///
pub fn reset_request(link: &api::StartResetResponse, email: &str, password: &str, confirmation: &str) -> api::ResetRequest {
    api::ResetRequest {
        email: email.to_string(),
        token: link.token.clone(),
        expires_at: link.expires_at,
        signature: link.signature.clone(),
        new_password: password.to_string(),
        confirmation: confirmation.to_string(),
    }
}

///
/// Build the link-verification request a page render would perform.
///
pub fn link_request(link: &api::StartResetResponse, email: &str) -> api::VerifyLinkRequest {
    api::VerifyLinkRequest {
        email: email.to_string(),
        token: link.token.clone(),
        expires_at: link.expires_at,
        signature: link.signature.clone(),
    }
}

pub async fn start_reset(email: &str, ctx: &mut TestContext) -> api::StartResetResponse {
    ctx.client()
        .start_reset(Request::new(api::StartResetRequest { email: email.to_string() }))
        .await
        .expect("start_reset should have succeeded")
        .into_inner()
}

pub async fn verify_link_assert_ok(request: api::VerifyLinkRequest, ctx: &mut TestContext) {
    ctx.client()
        .verify_reset_link(Request::new(request))
        .await
        .expect("verify_reset_link should have succeeded");
}

pub async fn verify_link_assert_err(request: api::VerifyLinkRequest, ctx: &mut TestContext) -> Status {
    match ctx.client().verify_reset_link(Request::new(request)).await {
        Ok(_) => panic!("verify_reset_link should have failed"),
        Err(status) => status,
    }
}

pub async fn reset_password_assert_ok(request: api::ResetRequest, ctx: &mut TestContext) {
    ctx.client()
        .reset_password(Request::new(request))
        .await
        .expect("reset_password should have succeeded");
}

pub async fn reset_password_assert_err(request: api::ResetRequest, ctx: &mut TestContext) -> Status {
    match ctx.client().reset_password(Request::new(request)).await {
        Ok(_) => panic!("reset_password should have failed"),
        Err(status) => status,
    }
}

pub async fn verify_password_assert_ok(email: &str, password: &str, ctx: &mut TestContext) {
    ctx.client()
        .verify_password(Request::new(api::VerifyRequest {
            email: email.to_string(),
            plain_text_password: password.to_string(),
        }))
        .await
        .expect("verify_password should have succeeded");
}

pub async fn verify_password_assert_err(email: &str, password: &str, ctx: &mut TestContext) -> Status {
    let request = Request::new(api::VerifyRequest {
        email: email.to_string(),
        plain_text_password: password.to_string(),
    });

    match ctx.client().verify_password(request).await {
        Ok(_) => panic!("verify_password should have failed"),
        Err(status) => status,
    }
}

pub async fn set_time(new_time: &str, ctx: &mut TestContext) {
    ctx.internal()
        .set_time(Request::new(internal::NewTime { new_time: new_time.to_string() }))
        .await
        .expect("set_time should have succeeded");
}

pub async fn reset_time(ctx: &mut TestContext) {
    ctx.internal()
        .reset_time(Request::new(common::Empty::default()))
        .await
        .expect("reset_time should have succeeded");
}

///
/// How many PasswordChanged events have been emitted for this email? The
/// server and its audit log are shared by every test in the binary, so tests
/// use unique emails and count their own.
///
pub async fn event_count(email: &str, ctx: &mut TestContext) -> usize {
    ctx.internal()
        .list_events(Request::new(common::Empty::default()))
        .await
        .expect("list_events should have succeeded")
        .into_inner()
        .events
        .iter()
        .filter(|event| event.email == email)
        .count()
}

///
/// Extract the numeric warden error code from the status details.
///
pub fn error_code(status: Status) -> u32 {
    String::from_utf8_lossy(status.details())
        .parse()
        .expect("The status details did not contain a numeric error code")
}
