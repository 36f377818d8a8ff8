use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Graph vertex. The owning section is reached through `type_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub type_id: i32,
    pub user_id: Option<i32>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::node_types::Entity",
        from = "Column::TypeId",
        to = "super::node_types::Column::Id",
        on_delete = "Cascade"
    )]
    NodeTypes,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::section_node::Entity")]
    SectionNode,
}

impl Related<super::node_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NodeTypes.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::section_node::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionNode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
