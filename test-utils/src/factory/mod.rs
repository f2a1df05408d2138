//! Factory methods for inserting test rows.
//!
//! Each entity has a `*Factory` builder for customized rows and a `create_*`
//! shorthand that inserts a row with defaults. Rows owned by a guild need an
//! existing `guild_config` row; `helpers` has shortcuts that create both.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let config = factory::create_guild_config(db).await?;
//! let ticket = factory::ticket::TicketFactory::new(db, &config.guild_id)
//!     .author_id("123456789")
//!     .locked(true)
//!     .build()
//!     .await?;
//! ```

pub mod api_token;
pub mod guild_config;
pub mod helpers;
pub mod support_role;
pub mod tag;
pub mod ticket;
pub mod ticket_question;
pub mod user;

pub use api_token::create_api_token;
pub use guild_config::create_guild_config;
pub use support_role::create_support_role;
pub use tag::create_tag;
pub use ticket::create_ticket;
pub use ticket_question::create_ticket_question;
pub use user::create_user;
