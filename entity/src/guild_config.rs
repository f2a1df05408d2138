use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guild_config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guild_id: String,
    /// Number handed to the next ticket opened in this guild.
    pub ticket_counter: i64,
    pub ticket_category: Option<String>,
    pub log_channel: Option<String>,
    pub ping_support_roles: bool,
    pub max_tickets: i32,
    pub support_enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::support_role::Entity")]
    SupportRole,
    #[sea_orm(has_many = "super::ticket_question::Entity")]
    TicketQuestion,
    #[sea_orm(has_many = "super::ticket::Entity")]
    Ticket,
    #[sea_orm(has_many = "super::tag::Entity")]
    Tag,
}

impl Related<super::support_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupportRole.def()
    }
}

impl Related<super::ticket_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketQuestion.def()
    }
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
