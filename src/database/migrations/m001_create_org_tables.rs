use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().null())
                    .col(ColumnDef::new(Departments::Description).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Positions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Positions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Positions::Value).string().not_null())
                    .col(ColumnDef::new(Positions::Description).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Value).string().not_null())
                    .col(ColumnDef::new(Projects::Description).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Uuid).string().not_null().primary_key())
                    .col(ColumnDef::new(Employees::Fio).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeDepartment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EmployeeDepartment::EmployeeUuid).string().not_null())
                    .col(ColumnDef::new(EmployeeDepartment::DepartmentsId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("unique_employee_department")
                            .col(EmployeeDepartment::EmployeeUuid)
                            .col(EmployeeDepartment::DepartmentsId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_department_employee")
                            .from(EmployeeDepartment::Table, EmployeeDepartment::EmployeeUuid)
                            .to(Employees::Table, Employees::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_department_department")
                            .from(EmployeeDepartment::Table, EmployeeDepartment::DepartmentsId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeePosition::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EmployeePosition::EmployeeUuid).string().not_null())
                    .col(ColumnDef::new(EmployeePosition::PositionId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("unique_employee_position")
                            .col(EmployeePosition::EmployeeUuid)
                            .col(EmployeePosition::PositionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_position_employee")
                            .from(EmployeePosition::Table, EmployeePosition::EmployeeUuid)
                            .to(Employees::Table, Employees::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_position_position")
                            .from(EmployeePosition::Table, EmployeePosition::PositionId)
                            .to(Positions::Table, Positions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeProject::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EmployeeProject::EmployeeUuid).string().not_null())
                    .col(ColumnDef::new(EmployeeProject::ProjectId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("unique_employee_project")
                            .col(EmployeeProject::EmployeeUuid)
                            .col(EmployeeProject::ProjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_project_employee")
                            .from(EmployeeProject::Table, EmployeeProject::EmployeeUuid)
                            .to(Employees::Table, Employees::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_project_project")
                            .from(EmployeeProject::Table, EmployeeProject::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Ordered pair: (a, b) and (b, a) are distinct rows
        manager
            .create_table(
                Table::create()
                    .table(EmployeeEmployee::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EmployeeEmployee::Employee1Uuid).string().not_null())
                    .col(ColumnDef::new(EmployeeEmployee::Employee2Uuid).string().not_null())
                    .primary_key(
                        Index::create()
                            .name("unique_employee_employee")
                            .col(EmployeeEmployee::Employee1Uuid)
                            .col(EmployeeEmployee::Employee2Uuid),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_employee_first")
                            .from(EmployeeEmployee::Table, EmployeeEmployee::Employee1Uuid)
                            .to(Employees::Table, Employees::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_employee_second")
                            .from(EmployeeEmployee::Table, EmployeeEmployee::Employee2Uuid)
                            .to(Employees::Table, Employees::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Config::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Config::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Config::Name).string().not_null())
                    .col(ColumnDef::new(Config::Description).string().null())
                    .col(ColumnDef::new(Config::Key).string().not_null())
                    .col(ColumnDef::new(Config::Value).string().not_null())
                    .col(ColumnDef::new(Config::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Config::UserId).integer().not_null().default(-1))
                    .col(ColumnDef::new(Config::SectionId).integer().null())
                    .col(ColumnDef::new(Config::CreatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_config_scope")
                    .table(Config::Table)
                    .col(Config::Name)
                    .col(Config::UserId)
                    .col(Config::Key)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Config::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmployeeEmployee::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmployeeProject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmployeePosition::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmployeeDepartment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Positions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Positions {
    Table,
    Id,
    Value,
    Description,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Value,
    Description,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Uuid,
    Fio,
}

#[derive(DeriveIden)]
enum EmployeeDepartment {
    Table,
    EmployeeUuid,
    DepartmentsId,
}

#[derive(DeriveIden)]
enum EmployeePosition {
    Table,
    EmployeeUuid,
    PositionId,
}

#[derive(DeriveIden)]
enum EmployeeProject {
    Table,
    EmployeeUuid,
    ProjectId,
}

#[derive(DeriveIden)]
enum EmployeeEmployee {
    Table,
    Employee1Uuid,
    Employee2Uuid,
}

#[derive(DeriveIden)]
enum Config {
    Table,
    Id,
    Name,
    Description,
    Key,
    Value,
    IsActive,
    UserId,
    SectionId,
    CreatedAt,
}
