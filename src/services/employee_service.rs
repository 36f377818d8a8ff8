use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set,
};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::entities::{
    departments, employee_department, employee_employee, employee_position, employee_project,
    employees, positions, projects,
};
use crate::errors::{ApiError, ApiResult};
use crate::services::lookup_service::{department_service, position_service, project_service};
use crate::services::repository::{Patch, Repository};

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeInput {
    /// Generated server-side when absent or empty
    #[serde(default)]
    pub uuid: Option<String>,
    pub fio: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePatch {
    #[serde(default)]
    pub fio: Option<String>,
}

impl Patch<employees::ActiveModel> for EmployeePatch {
    fn apply(self, active: &mut employees::ActiveModel) {
        if let Some(fio) = self.fio {
            active.fio = Set(fio);
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeDepartmentInput {
    pub employee_uuid: String,
    pub department_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeePositionInput {
    pub employee_uuid: String,
    pub position_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeProjectInput {
    pub employee_uuid: String,
    pub project_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeEmployeeInput {
    pub employee1_uuid: String,
    pub employee2_uuid: String,
}

/// Employee CRUD plus the four employee join tables.
///
/// Binds reject an existing pair with `Duplicate`; unbinds delete the exact
/// row and succeed whether or not it existed.
pub struct EmployeeService {
    db: DatabaseConnection,
    repo: Repository<employees::Entity>,
}

impl EmployeeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: Repository::new(db.clone(), "Employee"),
            db,
        }
    }

    pub async fn create(&self, input: EmployeeInput) -> ApiResult<employees::Model> {
        let uuid = match input.uuid {
            Some(uuid) if !uuid.trim().is_empty() => uuid,
            _ => Uuid::new_v4().to_string(),
        };

        let employee = self
            .repo
            .create(employees::ActiveModel {
                uuid: Set(uuid),
                fio: Set(input.fio),
            })
            .await?;

        info!("Created employee {}", employee.uuid);
        Ok(employee)
    }

    pub async fn get(&self, uuid: &str) -> ApiResult<employees::Model> {
        self.repo.get(uuid.to_string()).await
    }

    pub async fn list(&self, offset: u64, limit: Option<u64>) -> ApiResult<Vec<employees::Model>> {
        self.repo.list(offset, limit).await
    }

    pub async fn update(&self, uuid: &str, patch: EmployeePatch) -> ApiResult<employees::Model> {
        self.repo.update(uuid.to_string(), patch).await
    }

    pub async fn delete(&self, uuid: &str) -> ApiResult<()> {
        self.repo.delete(uuid.to_string()).await
    }

    pub async fn count(&self) -> ApiResult<u64> {
        self.repo.count().await
    }

    pub async fn bind_department(
        &self,
        uuid: &str,
        department_id: i32,
    ) -> ApiResult<Vec<departments::Model>> {
        self.get(uuid).await?;
        department_service(self.db.clone()).get(department_id).await?;

        let existing = employee_department::Entity::find_by_id((uuid.to_string(), department_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(already_bound(uuid, "department", department_id));
        }

        employee_department::ActiveModel {
            employee_uuid: Set(uuid.to_string()),
            departments_id: Set(department_id),
        }
        .insert(&self.db)
        .await?;

        debug!("Bound employee {} to department {}", uuid, department_id);
        self.get_bind_department(Some(uuid)).await
    }

    pub async fn bind_position(
        &self,
        uuid: &str,
        position_id: i32,
    ) -> ApiResult<Vec<positions::Model>> {
        self.get(uuid).await?;
        position_service(self.db.clone()).get(position_id).await?;

        let existing = employee_position::Entity::find_by_id((uuid.to_string(), position_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(already_bound(uuid, "position", position_id));
        }

        employee_position::ActiveModel {
            employee_uuid: Set(uuid.to_string()),
            position_id: Set(position_id),
        }
        .insert(&self.db)
        .await?;

        debug!("Bound employee {} to position {}", uuid, position_id);
        self.get_bind_position(Some(uuid)).await
    }

    pub async fn bind_project(
        &self,
        uuid: &str,
        project_id: i32,
    ) -> ApiResult<Vec<projects::Model>> {
        self.get(uuid).await?;
        project_service(self.db.clone()).get(project_id).await?;

        let existing = employee_project::Entity::find_by_id((uuid.to_string(), project_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(already_bound(uuid, "project", project_id));
        }

        employee_project::ActiveModel {
            employee_uuid: Set(uuid.to_string()),
            project_id: Set(project_id),
        }
        .insert(&self.db)
        .await?;

        debug!("Bound employee {} to project {}", uuid, project_id);
        self.get_bind_project(Some(uuid)).await
    }

    /// Records the directed relation `uuid1 -> uuid2`. The reverse pair is a
    /// separate row.
    pub async fn bind_employee(&self, uuid1: &str, uuid2: &str) -> ApiResult<Vec<employees::Model>> {
        self.get(uuid1).await?;
        self.get(uuid2).await?;

        let existing = employee_employee::Entity::find_by_id((uuid1.to_string(), uuid2.to_string()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(already_bound(uuid1, "employee", uuid2));
        }

        employee_employee::ActiveModel {
            employee1_uuid: Set(uuid1.to_string()),
            employee2_uuid: Set(uuid2.to_string()),
        }
        .insert(&self.db)
        .await?;

        debug!("Bound employee {} to employee {}", uuid1, uuid2);
        self.get_bind_employee(Some(uuid1)).await
    }

    /// Employees on the second side of the relation; with `uuid`, only those
    /// related from that employee.
    pub async fn get_bind_employee(&self, uuid: Option<&str>) -> ApiResult<Vec<employees::Model>> {
        let mut query = employees::Entity::find().join(
            JoinType::InnerJoin,
            employee_employee::Relation::Second.def().rev(),
        );
        if let Some(uuid) = uuid {
            query = query.filter(employee_employee::Column::Employee1Uuid.eq(uuid));
        }
        Ok(query.all(&self.db).await?)
    }

    pub async fn get_bind_department(
        &self,
        uuid: Option<&str>,
    ) -> ApiResult<Vec<departments::Model>> {
        let mut query = departments::Entity::find().join(
            JoinType::InnerJoin,
            employee_department::Relation::Departments.def().rev(),
        );
        if let Some(uuid) = uuid {
            query = query.filter(employee_department::Column::EmployeeUuid.eq(uuid));
        }
        Ok(query.all(&self.db).await?)
    }

    pub async fn get_bind_position(&self, uuid: Option<&str>) -> ApiResult<Vec<positions::Model>> {
        let mut query = positions::Entity::find().join(
            JoinType::InnerJoin,
            employee_position::Relation::Positions.def().rev(),
        );
        if let Some(uuid) = uuid {
            query = query.filter(employee_position::Column::EmployeeUuid.eq(uuid));
        }
        Ok(query.all(&self.db).await?)
    }

    pub async fn get_bind_project(&self, uuid: Option<&str>) -> ApiResult<Vec<projects::Model>> {
        let mut query = projects::Entity::find().join(
            JoinType::InnerJoin,
            employee_project::Relation::Projects.def().rev(),
        );
        if let Some(uuid) = uuid {
            query = query.filter(employee_project::Column::EmployeeUuid.eq(uuid));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Returns the number of rows removed; zero is not an error.
    pub async fn delete_bind_department(&self, uuid: &str, department_id: i32) -> ApiResult<u64> {
        let result = employee_department::Entity::delete_many()
            .filter(employee_department::Column::EmployeeUuid.eq(uuid))
            .filter(employee_department::Column::DepartmentsId.eq(department_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_bind_position(&self, uuid: &str, position_id: i32) -> ApiResult<u64> {
        let result = employee_position::Entity::delete_many()
            .filter(employee_position::Column::EmployeeUuid.eq(uuid))
            .filter(employee_position::Column::PositionId.eq(position_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_bind_project(&self, uuid: &str, project_id: i32) -> ApiResult<u64> {
        let result = employee_project::Entity::delete_many()
            .filter(employee_project::Column::EmployeeUuid.eq(uuid))
            .filter(employee_project::Column::ProjectId.eq(project_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes the exact ordered pair only.
    pub async fn delete_bind_employee(&self, uuid1: &str, uuid2: &str) -> ApiResult<u64> {
        let result = employee_employee::Entity::delete_many()
            .filter(employee_employee::Column::Employee1Uuid.eq(uuid1))
            .filter(employee_employee::Column::Employee2Uuid.eq(uuid2))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

fn already_bound(uuid: &str, relation: &str, id: impl std::fmt::Display) -> ApiError {
    ApiError::duplicate(format!(
        "Employee {} is already bound to {} {}.",
        uuid, relation, id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::services::lookup_service::DepartmentInput;

    async fn employee(service: &EmployeeService, uuid: &str) -> employees::Model {
        service
            .create(EmployeeInput {
                uuid: Some(uuid.to_string()),
                fio: format!("Employee {}", uuid),
            })
            .await
            .unwrap()
    }

    async fn department(db: &DatabaseConnection, name: &str) -> departments::Model {
        department_service(db.clone())
            .create(
                DepartmentInput {
                    name: Some(name.to_string()),
                    description: None,
                }
                .into_active_model(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_generates_uuid_when_absent() {
        let db = setup_test_db().await;
        let service = EmployeeService::new(db);

        let created = service
            .create(EmployeeInput {
                uuid: None,
                fio: "Иванов И.И.".to_string(),
            })
            .await
            .unwrap();

        assert!(Uuid::parse_str(&created.uuid).is_ok());
        assert_eq!(service.get(&created.uuid).await.unwrap().fio, "Иванов И.И.");

        let blank = service
            .create(EmployeeInput {
                uuid: Some(String::new()),
                fio: "Blank".to_string(),
            })
            .await
            .unwrap();
        assert!(!blank.uuid.is_empty());
        assert_eq!(service.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_bind_department_twice_is_duplicate() {
        let db = setup_test_db().await;
        let service = EmployeeService::new(db.clone());
        employee(&service, "e1").await;
        let dept = department(&db, "R&D").await;

        let bound = service.bind_department("e1", dept.id).await.unwrap();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].id, dept.id);

        let err = service.bind_department("e1", dept.id).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(
            err.to_string(),
            format!("Employee e1 is already bound to department {}.", dept.id)
        );

        let after = service.get_bind_department(Some("e1")).await.unwrap();
        assert_eq!(after.len(), 1);
    }

    #[tokio::test]
    async fn test_bind_missing_side_is_not_found() {
        let db = setup_test_db().await;
        let service = EmployeeService::new(db.clone());
        employee(&service, "e1").await;

        let err = service.bind_department("e1", 77).await.unwrap_err();
        assert_eq!(err.to_string(), "Department with id 77 not found.");

        let dept = department(&db, "Ops").await;
        let err = service.bind_department("ghost", dept.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Employee with id ghost not found.");
    }

    #[tokio::test]
    async fn test_get_bind_filters_by_employee() {
        let db = setup_test_db().await;
        let service = EmployeeService::new(db.clone());
        employee(&service, "e1").await;
        employee(&service, "e2").await;
        let ops = department(&db, "Ops").await;
        let hr = department(&db, "HR").await;

        service.bind_department("e1", ops.id).await.unwrap();
        service.bind_department("e2", hr.id).await.unwrap();
        service.bind_department("e2", ops.id).await.unwrap();

        assert_eq!(service.get_bind_department(None).await.unwrap().len(), 3);
        let e1: Vec<_> = service
            .get_bind_department(Some("e1"))
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(e1, vec![ops.id]);
    }

    #[tokio::test]
    async fn test_employee_relation_is_directed() {
        let db = setup_test_db().await;
        let service = EmployeeService::new(db);
        employee(&service, "a").await;
        employee(&service, "b").await;

        let related = service.bind_employee("a", "b").await.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].uuid, "b");

        // Reverse direction is a distinct row
        service.bind_employee("b", "a").await.unwrap();

        let err = service.bind_employee("a", "b").await.unwrap_err();
        assert!(err.is_duplicate());

        let from_b = service.get_bind_employee(Some("b")).await.unwrap();
        assert_eq!(from_b[0].uuid, "a");
        assert_eq!(service.get_bind_employee(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unbind_is_silent_when_nothing_matches() {
        let db = setup_test_db().await;
        let service = EmployeeService::new(db.clone());
        employee(&service, "a").await;
        employee(&service, "b").await;
        let dept = department(&db, "Ops").await;
        service.bind_department("a", dept.id).await.unwrap();
        service.bind_employee("a", "b").await.unwrap();

        assert_eq!(service.delete_bind_department("a", dept.id).await.unwrap(), 1);
        assert_eq!(service.delete_bind_department("a", dept.id).await.unwrap(), 0);

        // Only the exact ordered pair is removed
        assert_eq!(service.delete_bind_employee("b", "a").await.unwrap(), 0);
        assert_eq!(service.delete_bind_employee("a", "b").await.unwrap(), 1);
        assert_eq!(service.delete_bind_project("a", 1).await.unwrap(), 0);
        assert_eq!(service.delete_bind_position("a", 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deleting_employee_cascades_bindings() {
        let db = setup_test_db().await;
        let service = EmployeeService::new(db.clone());
        employee(&service, "a").await;
        let dept = department(&db, "Ops").await;
        service.bind_department("a", dept.id).await.unwrap();

        service.delete("a").await.unwrap();
        assert!(service.get_bind_department(None).await.unwrap().is_empty());
    }
}
