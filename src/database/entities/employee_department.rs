use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee_department")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub employee_uuid: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub departments_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeUuid",
        to = "super::employees::Column::Uuid",
        on_delete = "Cascade"
    )]
    Employees,
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentsId",
        to = "super::departments::Column::Id",
        on_delete = "Cascade"
    )]
    Departments,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Departments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
