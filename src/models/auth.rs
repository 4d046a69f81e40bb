use serde::{Deserialize, Serialize};

/// Identity extracted from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub uid: String,
    pub email: String,
}
