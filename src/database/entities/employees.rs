use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: String,
    pub fio: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_department::Entity")]
    EmployeeDepartment,
    #[sea_orm(has_many = "super::employee_position::Entity")]
    EmployeePosition,
    #[sea_orm(has_many = "super::employee_project::Entity")]
    EmployeeProject,
}

impl Related<super::employee_department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeDepartment.def()
    }
}

impl Related<super::employee_position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeePosition.def()
    }
}

impl Related<super::employee_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeProject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
