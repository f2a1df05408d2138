//! Trident Test Utils
//!
//! Shared testing utilities for the ticket bot. Provides a builder for test contexts
//! backed by in-memory SQLite databases, entity factories that insert rows with sensible
//! defaults, in-memory fixtures, and Serenity model constructors for permission tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::*;
//!
//! #[tokio::test]
//! async fn opens_ticket() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(GuildConfig)
//!         .with_table(Ticket)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
pub mod serenity;
