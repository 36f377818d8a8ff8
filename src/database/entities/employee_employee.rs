use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Directed employee-to-employee relation: `employee1` relates to `employee2`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee_employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub employee1_uuid: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub employee2_uuid: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::Employee1Uuid",
        to = "super::employees::Column::Uuid",
        on_delete = "Cascade"
    )]
    First,
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::Employee2Uuid",
        to = "super::employees::Column::Uuid",
        on_delete = "Cascade"
    )]
    Second,
}

impl ActiveModelBehavior for ActiveModel {}
