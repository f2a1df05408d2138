//! Personal API tokens for scripted dashboard access.

use rand::RngCore;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::api_token::ApiTokenRepository, error::AppError, model::api_token::ApiToken,
};

/// Random bytes per token; hex encoding doubles the length to 64 characters.
const TOKEN_BYTES: usize = 32;

pub struct ApiTokenService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApiTokenService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Mints a new token for `user_id`.
    pub async fn create(&self, user_id: u64) -> Result<ApiToken, AppError> {
        let token = ApiTokenRepository::new(self.db)
            .create(user_id, generate_token())
            .await?;

        tracing::info!("User {} created API token {}", user_id, token.id);

        Ok(token)
    }

    pub async fn list(&self, user_id: u64) -> Result<Vec<ApiToken>, AppError> {
        ApiTokenRepository::new(self.db).get_by_user(user_id).await
    }

    /// Revokes one of the user's tokens.
    ///
    /// # Returns
    /// - `Ok(())` - Token revoked
    /// - `Err(AppError::NotFound)` - No such token owned by the user
    pub async fn revoke(&self, user_id: u64, id: i32) -> Result<(), AppError> {
        if !ApiTokenRepository::new(self.db).delete(user_id, id).await? {
            return Err(AppError::NotFound("Unknown token ID.".to_string()));
        }

        Ok(())
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    #[test]
    fn tokens_are_64_hex_chars() {
        let token = generate_token();

        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_token());
    }

    /// Expected: revoking someone else's token is NotFound
    #[tokio::test]
    async fn revoke_is_scoped_to_owner() -> Result<(), AppError> {
        let test = TestBuilder::new().with_account_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::user::UserFactory::new(db).discord_id("1").build().await?;
        factory::user::UserFactory::new(db).discord_id("2").build().await?;

        let service = ApiTokenService::new(db);
        let token = service.create(1).await?;

        assert!(matches!(
            service.revoke(2, token.id).await,
            Err(AppError::NotFound(_))
        ));
        service.revoke(1, token.id).await?;
        assert!(service.list(1).await?.is_empty());

        Ok(())
    }
}
