use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub value: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_project::Entity")]
    EmployeeProject,
}

impl Related<super::employee_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeProject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
