//! The permission overwrites written on ticket channels.
//!
//! Effective permissions are left to serenity; see `DiscordService`.

use serenity::all::{PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId};

/// Everything a ticket participant is allowed to do in the ticket channel.
pub fn ticket_member_allow() -> Permissions {
    Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::ADD_REACTIONS
        | Permissions::READ_MESSAGE_HISTORY
        | Permissions::EMBED_LINKS
        | Permissions::ATTACH_FILES
        | Permissions::USE_EXTERNAL_EMOJIS
        | Permissions::USE_APPLICATION_COMMANDS
}

/// What the bot needs in a log channel to post embeds.
pub fn log_channel_required() -> Permissions {
    Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::EMBED_LINKS
}

/// Allow overwrite for a single member.
pub fn member_allow(user_id: UserId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: ticket_member_allow(),
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Member(user_id),
    }
}

/// Deny-all overwrite for a single member, written when they are removed.
pub fn member_deny(user_id: UserId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::empty(),
        deny: Permissions::all(),
        kind: PermissionOverwriteType::Member(user_id),
    }
}

/// Allow overwrite for a support role.
pub fn role_allow(role_id: RoleId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: ticket_member_allow(),
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Role(role_id),
    }
}

/// Deny-all overwrite for @everyone, whose role ID equals the guild ID.
pub fn everyone_deny(guild_id: u64) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: Permissions::empty(),
        deny: Permissions::all(),
        kind: PermissionOverwriteType::Role(RoleId::new(guild_id)),
    }
}

/// Whether any of `member_roles` is one of the guild's support roles.
pub fn has_support_role(support_roles: &[u64], member_roles: &[RoleId]) -> bool {
    member_roles
        .iter()
        .any(|role_id| support_roles.contains(&role_id.get()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::{
        create_test_channel, create_test_member, create_test_partial_guild, create_test_role,
    };

    const GUILD: u64 = 1;
    const OWNER: u64 = 2;
    const MEMBER: u64 = 3;
    const TICKET_CHANNEL: u64 = 200;
    const STAFF_ROLE: u64 = 10;
    const ADMIN_ROLE: u64 = 11;

    fn guild() -> serenity::all::PartialGuild {
        create_test_partial_guild(
            GUILD,
            OWNER,
            vec![
                create_test_role(
                    GUILD,
                    GUILD,
                    (Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES).bits(),
                    0,
                ),
                create_test_role(STAFF_ROLE, GUILD, Permissions::MANAGE_MESSAGES.bits(), 1),
                create_test_role(ADMIN_ROLE, GUILD, Permissions::ADMINISTRATOR.bits(), 2),
            ],
        )
    }

    /// Expected: ticket overwrites hide the channel from everyone but allowed members
    #[test]
    fn ticket_overwrites_gate_visibility() {
        let guild = guild();
        let outsider = create_test_member(GUILD, MEMBER, &[]);

        let channel = create_test_channel(
            TICKET_CHANNEL,
            GUILD,
            &[everyone_deny(GUILD), member_allow(UserId::new(99))],
        );
        assert!(!guild.user_permissions_in(&channel, &outsider).view_channel());

        let channel = create_test_channel(
            TICKET_CHANNEL,
            GUILD,
            &[everyone_deny(GUILD), member_allow(UserId::new(MEMBER))],
        );
        let permissions = guild.user_permissions_in(&channel, &outsider);
        assert!(permissions.view_channel());
        assert!(permissions.attach_files());
        assert!(!permissions.manage_messages());
    }

    /// Expected: support role overwrite lets staff in, a member deny takes them out again
    #[test]
    fn member_deny_overrides_support_role() {
        let guild = guild();
        let staff = create_test_member(GUILD, MEMBER, &[STAFF_ROLE]);

        let channel = create_test_channel(
            TICKET_CHANNEL,
            GUILD,
            &[everyone_deny(GUILD), role_allow(RoleId::new(STAFF_ROLE))],
        );
        assert!(guild.user_permissions_in(&channel, &staff).view_channel());

        let channel = create_test_channel(
            TICKET_CHANNEL,
            GUILD,
            &[
                everyone_deny(GUILD),
                role_allow(RoleId::new(STAFF_ROLE)),
                member_deny(UserId::new(MEMBER)),
            ],
        );
        assert!(!guild.user_permissions_in(&channel, &staff).view_channel());
    }

    /// Expected: administrators and the owner see ticket channels regardless of overwrites
    #[test]
    fn administrators_see_every_ticket() {
        let guild = guild();
        let channel = create_test_channel(
            TICKET_CHANNEL,
            GUILD,
            &[everyone_deny(GUILD), member_deny(UserId::new(MEMBER))],
        );

        let admin = create_test_member(GUILD, MEMBER, &[ADMIN_ROLE]);
        assert!(guild.user_permissions_in(&channel, &admin).view_channel());

        let owner = create_test_member(GUILD, OWNER, &[]);
        assert!(guild.member_permissions(&owner).manage_guild());
    }

    #[test]
    fn detects_support_roles() {
        assert!(has_support_role(&[5, 6], &[RoleId::new(6)]));
        assert!(!has_support_role(&[5, 6], &[RoleId::new(7)]));
        assert!(!has_support_role(&[], &[RoleId::new(7)]));
    }
}
