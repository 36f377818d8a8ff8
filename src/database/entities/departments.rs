use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_department::Entity")]
    EmployeeDepartment,
}

impl Related<super::employee_department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeDepartment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Label used when the department has no name of its own.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Dept {}", self.id))
    }
}
