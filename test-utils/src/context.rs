use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Isolated test environment holding an in-memory database and a session.
///
/// Both members are created lazily and live as long as the context. The session
/// store shares the SQLite pool of `db`, so session rows and entity rows sit in
/// the same in-memory database.
pub struct TestContext {
    /// Connection to the in-memory SQLite instance, created on first use.
    pub db: Option<DatabaseConnection>,

    /// Session backed by `SqliteStore`, created on first use.
    pub session: Option<Session>,
}

impl TestContext {
    /// Creates an empty context with no connection or session yet.
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Returns the database connection, connecting to `sqlite::memory:` on first call.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Connection shared by the whole test
    /// - `Err(TestError::Database)` - Connecting to SQLite failed
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            let db = Database::connect("sqlite::memory:").await?;
            self.db = Some(db);
        }

        self.db
            .as_ref()
            .ok_or_else(|| DbErr::Custom("test database missing".to_string()).into())
    }

    /// Executes the given CREATE TABLE statements in order.
    ///
    /// Normally called by `TestBuilder::build()`.
    ///
    /// # Arguments
    /// - `stmts` - Statements generated from entity definitions
    ///
    /// # Returns
    /// - `Ok(())` - All tables exist
    /// - `Err(TestError::Database)` - A statement failed
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Returns the test session, creating the session table on first call.
    ///
    /// # Returns
    /// - `Ok(&Session)` - Session with a seven day inactivity expiry
    /// - `Err(TestError::Database)` - Database or session table setup failed
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let pool = self.database().await?.get_sqlite_connection_pool().clone();
            let store = SqliteStore::new(pool);

            store
                .migrate()
                .await
                .map_err(|e| DbErr::Custom(e.to_string()))?;

            self.session = Some(Session::new(
                None,
                Arc::new(store),
                Some(Expiry::OnInactivity(Duration::days(7))),
            ));
        }

        self.session
            .as_ref()
            .ok_or_else(|| DbErr::Custom("test session missing".to_string()).into())
    }

    /// Returns both the database and the session.
    ///
    /// Initializes whichever is missing first, then hands out shared borrows of
    /// both so tests can pass them to the same guard or repository.
    ///
    /// # Returns
    /// - `Ok((&DatabaseConnection, &Session))` - Both handles
    /// - `Err(TestError::Database)` - Initialization failed
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.session().await?;

        match (self.db.as_ref(), self.session.as_ref()) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(DbErr::Custom("test context not initialized".to_string()).into()),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
