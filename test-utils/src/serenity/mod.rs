//! Serenity model constructors for tests.
//!
//! Serenity models are `#[non_exhaustive]`, so they are built by deserializing the
//! same JSON shape Discord's API returns.

pub mod channel;
pub mod guild;
pub mod member;
pub mod role;

pub use channel::create_test_channel;
pub use guild::create_test_partial_guild;
pub use member::create_test_member;
pub use role::create_test_role;
