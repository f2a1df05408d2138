use serenity::all::{ChannelId, UserId};

use crate::server::{
    error::AppError,
    service::ticket::{policy::Removal, TicketService},
    util::permissions::{member_allow, member_deny},
};

impl<'a> TicketService<'a> {
    /// Lets a member see and write in a ticket channel.
    pub async fn add_member(&self, channel_id: u64, user_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .create_permission(self.http, member_allow(UserId::new(user_id)))
            .await?;

        Ok(())
    }

    /// Shuts a member out of a ticket channel with a deny-all overwrite.
    pub async fn remove_member(&self, channel_id: u64, user_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .create_permission(self.http, member_deny(UserId::new(user_id)))
            .await?;

        Ok(())
    }
}

/// Reply announcing who joined a ticket.
pub fn added_reply(user_id: u64) -> String {
    format!("📥 <@{}> has been added to this ticket. Say hi!", user_id)
}

/// Reply announcing who left or was removed from a ticket.
pub fn removed_reply(user_id: u64, removal: Removal) -> String {
    match removal {
        Removal::Left => format!("📤 <@{}> left the ticket.", user_id),
        Removal::Removed => format!("📤 <@{}> was removed from the ticket.", user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_replies_differ() {
        assert_eq!(removed_reply(5, Removal::Left), "📤 <@5> left the ticket.");
        assert_eq!(
            removed_reply(5, Removal::Removed),
            "📤 <@5> was removed from the ticket."
        );
    }
}
