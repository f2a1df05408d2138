//! Rules deciding who may open, close, lock and edit the membership of a ticket.
//!
//! Everything here is pure: callers gather the facts from Discord and the
//! database, and the `Display` text of each denial is the reply shown to the
//! member.

use std::fmt;

use serenity::all::{Permissions, RoleId};

use crate::server::{
    error::AppError, model::guild_config::MAX_TICKETS_LIMIT, model::ticket::Ticket,
    util::permissions::has_support_role,
};

/// Discord refuses more than this many channels in one category.
pub const CATEGORY_CHANNEL_LIMIT: usize = MAX_TICKETS_LIMIT as usize;

pub const NOT_A_TICKET: &str = "This channel is not a ticket.";
const NOT_SUPPORT: &str = "You are not a support member.";

/// The member acting on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketActor {
    pub user_id: u64,
    pub is_support: bool,
    pub is_admin: bool,
}

impl TicketActor {
    /// # Arguments
    /// - `support_roles` - Support role IDs configured for the guild
    /// - `member_roles` - Roles of the acting member
    /// - `permissions` - Resolved permissions of the acting member
    pub fn new(
        user_id: u64,
        support_roles: &[u64],
        member_roles: &[RoleId],
        permissions: Permissions,
    ) -> Self {
        Self {
            user_id,
            is_support: has_support_role(support_roles, member_roles),
            is_admin: permissions.administrator(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenDenied {
    NotConfigured,
    Disabled,
    /// The member's previous ticket channel was gone and its row was deleted.
    StaleTicketRemoved,
    AlreadyOpen { channel_id: u64 },
    /// The configured category no longer exists and was cleared.
    CategoryMissing,
    CategoryNotManageable { category: String },
    CategoryFull,
}

impl OpenDenied {
    /// Whether the reply should only be shown to the member.
    pub fn ephemeral(&self) -> bool {
        !matches!(self, Self::Disabled | Self::CategoryMissing)
    }
}

impl fmt::Display for OpenDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(
                f,
                "This server has not yet set the bot up. Please ask an administrator to run `/setup`."
            ),
            Self::Disabled => write!(f, "This server is not currently accepting new tickets."),
            Self::StaleTicketRemoved => write!(
                f,
                "Your previous ticket was not closed correctly. It has now been deleted, please try again."
            ),
            Self::AlreadyOpen { channel_id } => write!(
                f,
                "You already have a ticket open: <#{}>. Please go there first.",
                channel_id
            ),
            Self::CategoryMissing => write!(
                f,
                "This server is not set up properly. Please ask an administrator to run `/setup`."
            ),
            Self::CategoryNotManageable { category } => write!(
                f,
                "I do not have permission to manage channels in the ticket category. Please ask an \
                 administrator to give me the `Manage Channels` permission in the category {:?}",
                category
            ),
            Self::CategoryFull => write!(
                f,
                "The ticket category is full. Please wait for support to close some tickets."
            ),
        }
    }
}

/// Checks that a new ticket channel fits into the ticket category.
///
/// # Arguments
/// - `bot_permissions` - What the bot may do in the category
/// - `channel_count` - Channels currently inside the category
/// - `max_tickets` - The guild's configured ticket limit
pub fn check_category(
    bot_permissions: Permissions,
    category_name: &str,
    channel_count: usize,
    max_tickets: i32,
) -> Result<(), OpenDenied> {
    if !bot_permissions.manage_channels() {
        return Err(OpenDenied::CategoryNotManageable {
            category: category_name.to_string(),
        });
    }

    let max_tickets = usize::try_from(max_tickets).unwrap_or(0);
    if channel_count >= CATEGORY_CHANNEL_LIMIT || channel_count >= max_tickets {
        return Err(OpenDenied::CategoryFull);
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDenied {
    NotATicket,
    NotSupport,
    Locked,
}

impl fmt::Display for CloseDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotATicket => f.write_str(NOT_A_TICKET),
            Self::NotSupport => f.write_str(NOT_SUPPORT),
            Self::Locked => f.write_str("This ticket is currently locked, and as such cannot be closed."),
        }
    }
}

impl From<CloseDenied> for AppError {
    fn from(denied: CloseDenied) -> Self {
        match denied {
            CloseDenied::NotATicket => AppError::NotFound(denied.to_string()),
            _ => AppError::Forbidden(denied.to_string()),
        }
    }
}

/// Support and the ticket author may close; a locked ticket needs an administrator.
pub fn can_close(ticket: &Ticket, actor: &TicketActor) -> Result<(), CloseDenied> {
    if !actor.is_support && ticket.author_id != actor.user_id {
        return Err(CloseDenied::NotSupport);
    }

    if ticket.locked && !actor.is_admin {
        return Err(CloseDenied::Locked);
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDenied {
    NotATicket,
    NotSupport,
}

impl fmt::Display for LockDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotATicket => f.write_str(NOT_A_TICKET),
            Self::NotSupport => f.write_str(NOT_SUPPORT),
        }
    }
}

impl From<LockDenied> for AppError {
    fn from(denied: LockDenied) -> Self {
        match denied {
            LockDenied::NotATicket => AppError::NotFound(denied.to_string()),
            LockDenied::NotSupport => AppError::Forbidden(denied.to_string()),
        }
    }
}

pub fn can_lock(actor: &TicketActor) -> Result<(), LockDenied> {
    if !actor.is_support {
        return Err(LockDenied::NotSupport);
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberDenied {
    NotATicket,
    NotSupport,
    AlreadyInTicket(u64),
    CannotAdd,
    CannotRemove,
    /// The ticket author can never be removed from their own ticket.
    AuthorProtected,
    /// Support members can only remove themselves.
    SupportProtected,
}

impl fmt::Display for MemberDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotATicket => f.write_str(NOT_A_TICKET),
            Self::NotSupport => f.write_str(NOT_SUPPORT),
            Self::AlreadyInTicket(user_id) => write!(f, "<@{}> is already in this ticket.", user_id),
            Self::CannotAdd => f.write_str("I don't have permission to add members."),
            Self::CannotRemove => f.write_str("I don't have permission to remove members."),
            Self::AuthorProtected => f.write_str("You do not have permission to do this."),
            Self::SupportProtected => f.write_str(
                "If you want someone to leave a ticket, please ask them to run this command themself.\n\
                 It is too hard to moderate staff removing each other, so to prevent abuse, this \
                 cannot happen at all.",
            ),
        }
    }
}

/// Support may add anyone who cannot already see the ticket.
///
/// # Arguments
/// - `target_can_view` - Whether the member to add can already view the channel
/// - `bot_can_manage` - Whether the bot has Manage Permissions in the channel
pub fn can_add_member(
    actor: &TicketActor,
    target_id: u64,
    target_can_view: bool,
    bot_can_manage: bool,
) -> Result<(), MemberDenied> {
    if !actor.is_support {
        return Err(MemberDenied::NotSupport);
    }
    if target_can_view {
        return Err(MemberDenied::AlreadyInTicket(target_id));
    }
    if !bot_can_manage {
        return Err(MemberDenied::CannotAdd);
    }

    Ok(())
}

/// How a member left a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Left,
    Removed,
}

/// Decides whether `target_id` may be taken out of `ticket` by `actor`.
///
/// # Returns
/// - `Ok(Removal::Left)` - The actor removes themself
/// - `Ok(Removal::Removed)` - Support removes a non-support member
/// - `Err(MemberDenied)` - Removal is not allowed
pub fn can_remove_member(
    ticket: &Ticket,
    actor: &TicketActor,
    target_id: u64,
    target_is_support: bool,
    bot_can_manage: bool,
) -> Result<Removal, MemberDenied> {
    if target_id == ticket.author_id {
        return Err(MemberDenied::AuthorProtected);
    }

    let removing_self = target_id == actor.user_id;
    if !actor.is_support && !removing_self {
        return Err(MemberDenied::NotSupport);
    }
    if !bot_can_manage {
        return Err(MemberDenied::CannotRemove);
    }

    if removing_self {
        Ok(Removal::Left)
    } else if !target_is_support {
        Ok(Removal::Removed)
    } else {
        Err(MemberDenied::SupportProtected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixture;

    const AUTHOR: u64 = 100;
    const STAFF: u64 = 300;
    const OTHER_STAFF: u64 = 301;
    const BYSTANDER: u64 = 400;

    fn ticket(locked: bool) -> Ticket {
        let mut entity = fixture::ticket_entity();
        entity.locked = locked;
        Ticket::from_entity(entity).unwrap()
    }

    fn actor(user_id: u64, is_support: bool, is_admin: bool) -> TicketActor {
        TicketActor {
            user_id,
            is_support,
            is_admin,
        }
    }

    #[test]
    fn actor_detects_support_and_admin() {
        let roles = [RoleId::new(10)];
        let actor = TicketActor::new(STAFF, &[10, 11], &roles, Permissions::ADMINISTRATOR);

        assert!(actor.is_support);
        assert!(actor.is_admin);

        let actor = TicketActor::new(BYSTANDER, &[11], &roles, Permissions::SEND_MESSAGES);
        assert!(!actor.is_support);
        assert!(!actor.is_admin);
    }

    #[test]
    fn category_requires_manage_channels() {
        let result = check_category(Permissions::VIEW_CHANNEL, "Tickets", 0, 50);

        assert_eq!(
            result,
            Err(OpenDenied::CategoryNotManageable {
                category: "Tickets".to_string()
            })
        );
        assert!(result.unwrap_err().to_string().contains("\"Tickets\""));
    }

    #[test]
    fn category_full_at_configured_limit() {
        assert_eq!(
            check_category(Permissions::MANAGE_CHANNELS, "Tickets", 5, 5),
            Err(OpenDenied::CategoryFull)
        );
        assert_eq!(check_category(Permissions::MANAGE_CHANNELS, "Tickets", 4, 5), Ok(()));
    }

    #[test]
    fn category_full_at_discord_limit() {
        assert_eq!(
            check_category(Permissions::MANAGE_CHANNELS, "Tickets", 50, 50),
            Err(OpenDenied::CategoryFull)
        );
    }

    #[test]
    fn open_denials_render_replies() {
        assert_eq!(
            OpenDenied::AlreadyOpen { channel_id: 5 }.to_string(),
            "You already have a ticket open: <#5>. Please go there first."
        );
        assert!(OpenDenied::NotConfigured.ephemeral());
        assert!(!OpenDenied::Disabled.ephemeral());
    }

    #[test]
    fn author_and_support_can_close() {
        let ticket = ticket(false);

        assert_eq!(can_close(&ticket, &actor(AUTHOR, false, false)), Ok(()));
        assert_eq!(can_close(&ticket, &actor(STAFF, true, false)), Ok(()));
        assert_eq!(
            can_close(&ticket, &actor(BYSTANDER, false, false)),
            Err(CloseDenied::NotSupport)
        );
    }

    #[test]
    fn locked_ticket_needs_admin_to_close() {
        let ticket = ticket(true);

        assert_eq!(
            can_close(&ticket, &actor(STAFF, true, false)),
            Err(CloseDenied::Locked)
        );
        assert_eq!(
            can_close(&ticket, &actor(AUTHOR, false, false)),
            Err(CloseDenied::Locked)
        );
        assert_eq!(can_close(&ticket, &actor(STAFF, true, true)), Ok(()));
    }

    #[test]
    fn close_denial_maps_to_http_errors() {
        assert!(matches!(
            AppError::from(CloseDenied::NotATicket),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(CloseDenied::Locked),
            AppError::Forbidden(_)
        ));
    }

    #[test]
    fn only_support_can_lock() {
        assert_eq!(can_lock(&actor(STAFF, true, false)), Ok(()));
        assert_eq!(
            can_lock(&actor(AUTHOR, false, true)),
            Err(LockDenied::NotSupport)
        );
    }

    #[test]
    fn add_member_checks_in_order() {
        let staff = actor(STAFF, true, false);

        assert_eq!(
            can_add_member(&actor(AUTHOR, false, false), BYSTANDER, false, true),
            Err(MemberDenied::NotSupport)
        );
        assert_eq!(
            can_add_member(&staff, BYSTANDER, true, true),
            Err(MemberDenied::AlreadyInTicket(BYSTANDER))
        );
        assert_eq!(
            can_add_member(&staff, BYSTANDER, false, false),
            Err(MemberDenied::CannotAdd)
        );
        assert_eq!(can_add_member(&staff, BYSTANDER, false, true), Ok(()));
    }

    #[test]
    fn author_can_never_be_removed() {
        let ticket = ticket(false);

        assert_eq!(
            can_remove_member(&ticket, &actor(STAFF, true, true), AUTHOR, false, true),
            Err(MemberDenied::AuthorProtected)
        );
        assert_eq!(
            can_remove_member(&ticket, &actor(AUTHOR, false, false), AUTHOR, false, true),
            Err(MemberDenied::AuthorProtected)
        );
    }

    #[test]
    fn member_can_leave() {
        let ticket = ticket(false);

        assert_eq!(
            can_remove_member(&ticket, &actor(BYSTANDER, false, false), BYSTANDER, false, true),
            Ok(Removal::Left)
        );
        assert_eq!(
            can_remove_member(&ticket, &actor(STAFF, true, false), STAFF, true, true),
            Ok(Removal::Left)
        );
    }

    #[test]
    fn support_removes_only_non_support() {
        let ticket = ticket(false);
        let staff = actor(STAFF, true, false);

        assert_eq!(
            can_remove_member(&ticket, &staff, BYSTANDER, false, true),
            Ok(Removal::Removed)
        );
        assert_eq!(
            can_remove_member(&ticket, &staff, OTHER_STAFF, true, true),
            Err(MemberDenied::SupportProtected)
        );
    }

    #[test]
    fn non_support_cannot_remove_others() {
        let ticket = ticket(false);

        assert_eq!(
            can_remove_member(&ticket, &actor(BYSTANDER, false, false), STAFF, true, true),
            Err(MemberDenied::NotSupport)
        );
    }

    #[test]
    fn removal_needs_bot_permission() {
        let ticket = ticket(false);

        assert_eq!(
            can_remove_member(&ticket, &actor(BYSTANDER, false, false), BYSTANDER, false, false),
            Err(MemberDenied::CannotRemove)
        );
    }
}
