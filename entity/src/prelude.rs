pub use super::api_token::Entity as ApiToken;
pub use super::guild_config::Entity as GuildConfig;
pub use super::support_role::Entity as SupportRole;
pub use super::tag::Entity as Tag;
pub use super::ticket::Entity as Ticket;
pub use super::ticket_question::Entity as TicketQuestion;
pub use super::user::Entity as User;
