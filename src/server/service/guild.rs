//! Guild reads and access rules for the dashboard API.

use std::collections::HashSet;

use sea_orm::DatabaseConnection;
use serenity::all::{GuildId, GuildPagination, Http, Permissions};

use crate::{
    model::guild::{ChannelDto, GuildDto, PartialGuildDto, RoleDto},
    server::{
        data::{guild_config::GuildConfigRepository, support_role::SupportRoleRepository},
        error::AppError,
        service::{discord::DiscordService, ticket::policy::TicketActor},
    },
};

/// Discord returns at most this many guilds per page of `GET /users/@me/guilds`.
const GUILD_PAGE_SIZE: u64 = 200;

const UNKNOWN_GUILD: &str = "Unknown guild ID.";

/// Whether a member may manage tickets from the dashboard.
///
/// Managers need both Manage Server and Manage Channels; support staff get
/// in through their role alone.
pub fn can_manage_tickets(permissions: Permissions, is_support: bool) -> bool {
    is_support || permissions.contains(Permissions::MANAGE_GUILD | Permissions::MANAGE_CHANNELS)
}

/// The actor for a dashboard request, or `None` when the member may not manage tickets.
///
/// Managers act with the same rights as support staff; closing a locked ticket
/// still needs an administrator.
pub fn dashboard_actor(actor: TicketActor, permissions: Permissions) -> Option<TicketActor> {
    can_manage_tickets(permissions, actor.is_support).then_some(TicketActor {
        is_support: true,
        ..actor
    })
}

pub struct GuildService<'a> {
    db: &'a DatabaseConnection,
    http: &'a Http,
}

impl<'a> GuildService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: &'a Http) -> Self {
        Self { db, http }
    }

    /// Keeps the guilds that are configured or that the bot is a member of.
    pub async fn mutual(
        &self,
        guilds: Vec<PartialGuildDto>,
    ) -> Result<Vec<PartialGuildDto>, AppError> {
        let ids: Vec<u64> = guilds.iter().map(|guild| guild.id).collect();
        let configured: HashSet<u64> = GuildConfigRepository::new(self.db)
            .filter_configured(&ids)
            .await?
            .into_iter()
            .collect();
        let joined = self.bot_guild_ids().await?;

        Ok(guilds
            .into_iter()
            .filter(|guild| configured.contains(&guild.id) || joined.contains(&guild.id))
            .collect())
    }

    /// Guild details as seen by the bot.
    ///
    /// # Returns
    /// - `Ok(GuildDto)` - Guild with its roles and channels
    /// - `Err(AppError::NotFound)` - The bot is not in the guild
    pub async fn info(&self, guild_id: u64) -> Result<GuildDto, AppError> {
        let discord = DiscordService::new(self.http);
        let guild = discord
            .guild(guild_id)
            .await?
            .ok_or_else(|| AppError::NotFound(UNKNOWN_GUILD.to_string()))?;

        let mut roles: Vec<RoleDto> = guild
            .roles
            .values()
            .map(|role| RoleDto {
                id: role.id.get(),
                name: role.name.clone(),
                colour: role.colour.0,
                position: role.position,
            })
            .collect();
        roles.sort_by_key(|role| std::cmp::Reverse(role.position));

        let mut channels: Vec<ChannelDto> = discord
            .guild_channels(guild_id)
            .await?
            .into_iter()
            .map(|channel| ChannelDto {
                id: channel.id.get(),
                name: channel.name,
                kind: channel.kind.name().to_string(),
                parent_id: channel.parent_id.map(|id| id.get()),
            })
            .collect();
        channels.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(GuildDto {
            id: guild.id.get(),
            name: guild.name,
            icon: guild.icon.map(|icon| icon.to_string()),
            owner_id: guild.owner_id.get(),
            description: guild.description,
            roles,
            channels,
        })
    }

    /// Checks that a dashboard user may manage the guild's tickets.
    ///
    /// # Returns
    /// - `Ok(TicketActor)` - Access granted; the actor counts as support and carries the admin flag
    /// - `Err(AppError::NotFound)` - Guild is not configured or the bot left it
    /// - `Err(AppError::Forbidden)` - User is not a member or lacks permissions
    pub async fn require_ticket_access(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<TicketActor, AppError> {
        if GuildConfigRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(UNKNOWN_GUILD.to_string()));
        }

        let discord = DiscordService::new(self.http);
        let guild = discord
            .guild(guild_id)
            .await?
            .ok_or_else(|| AppError::NotFound(UNKNOWN_GUILD.to_string()))?;
        let member = discord
            .member(guild_id, user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("You are not in that server.".to_string()))?;

        let support_roles = SupportRoleRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?;
        let permissions = guild.member_permissions(&member);
        let actor = TicketActor::new(user_id, &support_roles, &member.roles, permissions);

        dashboard_actor(actor, permissions)
            .ok_or_else(|| AppError::Forbidden("Insufficient permissions.".to_string()))
    }

    async fn bot_guild_ids(&self) -> Result<HashSet<u64>, AppError> {
        let mut ids = HashSet::new();
        let mut after: Option<GuildId> = None;

        loop {
            let page = self
                .http
                .get_guilds(after.map(GuildPagination::After), Some(GUILD_PAGE_SIZE))
                .await?;
            let count = page.len() as u64;

            after = page.last().map(|guild| guild.id);
            ids.extend(page.into_iter().map(|guild| guild.id.get()));

            if count < GUILD_PAGE_SIZE || after.is_none() {
                break;
            }
        }

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use serenity::all::RoleId;
    use test_utils::fixture;

    use super::*;
    use crate::server::{
        model::ticket::Ticket,
        service::ticket::policy::{can_close, can_lock, CloseDenied},
    };

    const MANAGER: u64 = 300;

    fn ticket(locked: bool) -> Ticket {
        let mut entity = fixture::ticket_entity();
        entity.locked = locked;
        Ticket::from_entity(entity).unwrap()
    }

    fn actor(permissions: Permissions, member_roles: &[RoleId]) -> TicketActor {
        TicketActor::new(MANAGER, &[10], member_roles, permissions)
    }

    #[test]
    fn managers_need_both_permissions() {
        let both = Permissions::MANAGE_GUILD | Permissions::MANAGE_CHANNELS;

        assert!(can_manage_tickets(both, false));
        assert!(!can_manage_tickets(Permissions::MANAGE_GUILD, false));
        assert!(!can_manage_tickets(Permissions::MANAGE_CHANNELS, false));
    }

    /// Expected: a support role is enough on its own
    #[test]
    fn support_role_grants_access() {
        assert!(can_manage_tickets(Permissions::empty(), true));
    }

    /// Expected: administrators resolve to all permissions and pass
    #[test]
    fn administrator_passes() {
        assert!(can_manage_tickets(Permissions::all(), false));
    }

    /// Expected: a manager without a support role may lock and close unlocked tickets
    #[test]
    fn managers_act_as_support() {
        let permissions = Permissions::MANAGE_GUILD | Permissions::MANAGE_CHANNELS;
        let manager = dashboard_actor(actor(permissions, &[]), permissions).unwrap();

        assert!(manager.is_support);
        assert!(!manager.is_admin);
        assert_eq!(can_lock(&manager), Ok(()));
        assert_eq!(can_close(&ticket(false), &manager), Ok(()));
        assert_eq!(can_close(&ticket(true), &manager), Err(CloseDenied::Locked));
    }

    #[test]
    fn outsiders_get_no_actor() {
        let permissions = Permissions::MANAGE_GUILD;

        assert_eq!(dashboard_actor(actor(permissions, &[]), permissions), None);
    }

    /// Expected: administrators may also close locked tickets
    #[test]
    fn administrators_close_locked_tickets() {
        let permissions = Permissions::all();
        let admin = dashboard_actor(actor(permissions, &[]), permissions).unwrap();

        assert_eq!(can_close(&ticket(true), &admin), Ok(()));
    }

    /// Expected: support staff keep their flags untouched
    #[test]
    fn support_staff_pass_through() {
        let support = actor(Permissions::empty(), &[RoleId::new(10)]);

        assert_eq!(dashboard_actor(support, Permissions::empty()), Some(support));
    }
}
