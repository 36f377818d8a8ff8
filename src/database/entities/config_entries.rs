use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Owner id stored on configuration rows written without an authenticated user.
pub const ANONYMOUS_USER_ID: i32 = -1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "config")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub key: String,
    pub value: String,
    pub is_active: bool,
    pub user_id: i32,
    pub section_id: Option<i32>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
