use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct TagDto {
    pub id: i32,
    pub name: String,
    pub content: String,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub author_id: u64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub owner_id: u64,
    pub uses: i32,
    pub created_at: DateTime<Utc>,
}
