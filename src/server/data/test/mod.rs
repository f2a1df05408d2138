mod api_token;
mod guild_config;
mod support_role;
mod tag;
mod ticket;
mod ticket_question;
mod user;
