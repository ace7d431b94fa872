use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// The stored credential for an identity. Only ever holds the PHC-format
/// hash - the plain text is discarded as soon as it has been hashed.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Credential {
    pub email: String,
    pub phc: String,
    pub changed_on: DateTime<Utc>,
}
