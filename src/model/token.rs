use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Listed API token. Only a prefix of the secret is shown.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ApiTokenDto {
    pub id: i32,
    pub prefix: String,
    pub created_at: DateTime<Utc>,
}

/// Freshly minted API token. The full secret is only returned once.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreatedApiTokenDto {
    pub id: i32,
    pub token: String,
    pub created_at: DateTime<Utc>,
}
