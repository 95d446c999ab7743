use serde::{Deserialize, Serialize};

use crate::domain::{account_id::AccountId, role::Role};

/// Identity asserted by a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: AccountId,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}
