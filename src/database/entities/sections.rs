use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User-owned container scoping node types (and, through `section_node`, nodes).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub user_id: Option<i32>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::node_types::Entity")]
    NodeTypes,
    #[sea_orm(has_many = "super::section_node::Entity")]
    SectionNode,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::node_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NodeTypes.def()
    }
}

impl Related<super::section_node::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionNode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
