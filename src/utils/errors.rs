use bcrypt::BcryptError;
use tokio::task::JoinError;
use tonic::{Code, Status};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorCode {
    TonicStartError                 = 0400,
    HashThreadingIssue              = 0401,
    IOError                         = 0402,
    InvalidTimeFormat               = 0403,
    InvalidJSON                     = 0505,
    HashingError                    = 0509,
    InvalidPHCFormat                = 0510,
    UnknownAlgorithmVariant         = 0511,
    PasswordTooShort                = 2002,
    PasswordTooLong                 = 2003,
    TooManyResetAttempts            = 2102,
    CredentialNotMatch              = 2103,
    PasswordRequired                = 2301,
    PasswordMismatch                = 2302,
    ConfirmationRequired            = 2303,
    InvalidResetToken               = 2500,
    SignatureInvalid                = 2601,
    SignatureExpired                = 2602,
}

impl ErrorCode {
    pub fn with_msg(&self, message: &str) -> WardenError {
        WardenError::new(*self, message)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WardenError {
    error_code: ErrorCode,
    message: String,
}

impl WardenError {
    pub fn new(error_code: ErrorCode, message: &str) -> Self {
        WardenError { error_code, message: message.to_string() }
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<tonic::transport::Error> for WardenError {
    fn from(error: tonic::transport::Error) -> Self {
        ErrorCode::TonicStartError.with_msg(&format!("Failed to start gRPC server: {}", error))
    }
}

impl From<argon2::Error> for WardenError {
    fn from(error: argon2::Error) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Invalid configuration for algorithm: {}", error))
    }
}

// The argon2 and pbkdf2 crates re-export the same password-hash Error type,
// so one conversion serves them both.
impl From<password_hash::Error> for WardenError {
    fn from(error: password_hash::Error) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Unable to hash password: {}", error))
    }
}

impl From<serde_json::Error> for WardenError {
    fn from(error: serde_json::Error) -> Self {
        ErrorCode::InvalidJSON.with_msg(&format!("Unable to convert to json: {}", error))
    }
}

impl From<JoinError> for WardenError {
    fn from(error: JoinError) -> Self {
        ErrorCode::HashThreadingIssue.with_msg(&format!("Unable to hash: {}", error))
    }
}

impl From<BcryptError> for WardenError {
    fn from(error: BcryptError) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Unable to verify: {}", error))
    }
}

impl From<chrono::ParseError> for WardenError {
    fn from(error: chrono::ParseError) -> Self {
        ErrorCode::InvalidTimeFormat.with_msg(&format!("Unable to parse datetime: {}", error))
    }
}

///
/// Convert our internal error into a gRPC status response.
///
/// The numeric error code is carried in the status details so callers can
/// distinguish causes that share a gRPC code.
///
impl From<WardenError> for Status {
    fn from(error: WardenError) -> Self {
        use ErrorCode::*;

        let code = match &error.error_code {
            TonicStartError    |
            HashThreadingIssue |
            IOError            |
            InvalidJSON        |
            HashingError       |
            InvalidPHCFormat   |
            UnknownAlgorithmVariant => Code::Internal,

            InvalidTimeFormat   |
            PasswordTooShort    |
            PasswordTooLong     |
            PasswordRequired    |
            PasswordMismatch    |
            ConfirmationRequired => Code::InvalidArgument,

            // The 403-equivalent: the request could not prove it came from a
            // legitimately issued link.
            SignatureInvalid |
            SignatureExpired => Code::PermissionDenied,

            // Deliberately generic - unknown identity, wrong token, expired
            // token and replay all surface the same way.
            InvalidResetToken |
            CredentialNotMatch => Code::Unauthenticated,

            TooManyResetAttempts => Code::ResourceExhausted,
        };

        Status::with_details(code, error.message, format!("{}", error.error_code as u32).into())
    }
}
