use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Undirected edge between two nodes, stored in insertion order.
///
/// The primary key is the ordered pair; existence checks and deletes look at
/// both orderings (see `NodeService::link`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "node_node")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub node1_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub node2_id: i32,
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::nodes::Entity",
        from = "Column::Node1Id",
        to = "super::nodes::Column::Id",
        on_delete = "Cascade"
    )]
    Source,
    #[sea_orm(
        belongs_to = "super::nodes::Entity",
        from = "Column::Node2Id",
        to = "super::nodes::Column::Id",
        on_delete = "Cascade"
    )]
    Target,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Users,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// True when this edge joins `a` and `b`, in either order.
    pub fn connects(&self, a: i32, b: i32) -> bool {
        (self.node1_id == a && self.node2_id == b) || (self.node1_id == b && self.node2_id == a)
    }
}
