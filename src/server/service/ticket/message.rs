//! Embeds posted in ticket channels and the guild's log channel.

use serenity::all::{CreateEmbed, CreateEmbedAuthor, Timestamp, User};

use crate::server::{model::ticket::Ticket, util::format::shorten};

pub const GREEN: u32 = 0x2ECC71;
pub const BLURPLE: u32 = 0x5865F2;
pub const GREYPLE: u32 = 0x99AAB5;

/// Close reasons are cut to this many characters in the log.
const CLOSE_REASON_WIDTH: usize = 1500;

fn author(user: &User) -> CreateEmbedAuthor {
    CreateEmbedAuthor::new(user.tag()).icon_url(user.face())
}

/// The greeting embed posted in a fresh ticket channel.
pub fn ticket_opened(ticket: &Ticket, user: &User) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("Ticket #{}", ticket.number))
        .colour(GREEN)
        .author(author(user))
        .timestamp(Timestamp::now());

    if let Some(subject) = &ticket.subject {
        embed = embed.description(subject);
    }

    embed
}

/// One embed per answered intake question.
pub fn answers(answers: &[(String, String)]) -> Vec<CreateEmbed> {
    answers
        .iter()
        .filter(|(_, answer)| !answer.trim().is_empty())
        .map(|(label, answer)| {
            CreateEmbed::new()
                .title(label)
                .description(answer)
                .colour(GREEN)
        })
        .collect()
}

pub fn log_opened(ticket: &Ticket, user: &User) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("Ticket #{} opened!", ticket.number))
        .description(format!(
            "Subject: {}",
            ticket.subject.as_deref().unwrap_or("None")
        ))
        .colour(BLURPLE)
        .author(author(user))
        .field("Jump to channel", format!("<#{}>", ticket.channel_id), false)
        .timestamp(Timestamp::now())
}

pub fn log_closed(ticket: &Ticket, closer: &User, reason: &str) -> CreateEmbed {
    let reason = shorten(reason, CLOSE_REASON_WIDTH);

    CreateEmbed::new()
        .description(format!(
            "Ticket was opened by: <@{0}> (`{0}`)\nReason: {1}",
            ticket.author_id, reason
        ))
        .colour(GREYPLE)
        .author(author(closer))
        .field(
            "Ticket info",
            format!(
                "Author: <@{0}> (`{0}`)\nOpened: <t:{1}:R>",
                ticket.author_id,
                ticket.opened_at.timestamp()
            ),
            false,
        )
        .timestamp(Timestamp::now())
}

/// Ephemeral summary shown by `/ticket info`.
pub fn info(ticket: &Ticket) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("Ticket #{}", ticket.number))
        .description(format!(
            "**Global ID**: {}\n**Ticket Number**: {}\n**Author**: <@{2}> (`{2}`)\n\
             **Ticket Channel**: <#{3}>\n**Ticket Opened**: <t:{4}:R>\n**Ticket Locked**? {5}",
            ticket.id,
            ticket.number,
            ticket.author_id,
            ticket.channel_id,
            ticket.opened_at.timestamp(),
            if ticket.locked { "Yes" } else { "No" }
        ))
        .colour(BLURPLE)
}
