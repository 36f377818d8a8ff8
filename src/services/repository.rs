//! Generic create/get/list/update/delete/count over a single-key entity.
//!
//! Each entity picks its own key type through sea-orm's primary key
//! definition, so `Repository<employees::Entity>` is keyed by the UUID
//! string and `Repository<departments::Entity>` by the integer id.

use std::fmt::Display;
use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, PrimaryKeyTrait, QuerySelect,
};

use crate::errors::{ApiError, ApiResult};

/// Key type of an entity's primary key.
pub type KeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Default page size applied by list endpoints when the caller gives none.
pub const DEFAULT_LIST_LIMIT: u64 = 250;

const UNBOUNDED_LIMIT: u64 = i64::MAX as u64;

/// Partial update applied to an active model.
///
/// Implementations set only the fields the caller supplied; absent fields
/// keep their stored value.
pub trait Patch<A> {
    fn apply(self, active: &mut A);
}

pub struct Repository<E: EntityTrait> {
    db: DatabaseConnection,
    entity: &'static str,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            entity: self.entity,
            _entity: PhantomData,
        }
    }
}

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: Sync,
    KeyOf<E>: Clone + Display,
{
    /// `entity` is the name used in not-found messages, e.g. "Department".
    pub fn new(db: DatabaseConnection, entity: &'static str) -> Self {
        Self {
            db,
            entity,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn entity_name(&self) -> &'static str {
        self.entity
    }

    pub async fn create<A>(&self, active: A) -> ApiResult<E::Model>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let model = active.insert(&self.db).await?;
        tracing::debug!("Created {}", self.entity);
        Ok(model)
    }

    pub async fn find(&self, key: KeyOf<E>) -> ApiResult<Option<E::Model>> {
        Ok(E::find_by_id(key).one(&self.db).await?)
    }

    pub async fn get(&self, key: KeyOf<E>) -> ApiResult<E::Model> {
        self.find(key.clone())
            .await?
            .ok_or_else(|| ApiError::not_found(self.entity, key))
    }

    /// Rows in storage order, skipping `offset` and capped at `limit` when given.
    pub async fn list(&self, offset: u64, limit: Option<u64>) -> ApiResult<Vec<E::Model>> {
        // sqlite only accepts OFFSET after a LIMIT
        let limit = limit.unwrap_or(UNBOUNDED_LIMIT);
        Ok(E::find()
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    pub async fn update<A, P>(&self, key: KeyOf<E>, patch: P) -> ApiResult<E::Model>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
        P: Patch<A>,
    {
        let model = self.get(key).await?;
        let mut active: A = model.clone().into_active_model();
        patch.apply(&mut active);

        if !active.is_changed() {
            return Ok(model);
        }

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, key: KeyOf<E>) -> ApiResult<()> {
        self.get(key.clone()).await?;
        E::delete_by_id(key).exec(&self.db).await?;
        tracing::debug!("Deleted {}", self.entity);
        Ok(())
    }

    pub async fn count(&self) -> ApiResult<u64> {
        Ok(E::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entities::{departments, employees};
    use crate::database::test_utils::setup_test_db;
    use sea_orm::Set;

    struct RenameDepartment(Option<String>);

    impl Patch<departments::ActiveModel> for RenameDepartment {
        fn apply(self, active: &mut departments::ActiveModel) {
            if let Some(name) = self.0 {
                active.name = Set(Some(name));
            }
        }
    }

    fn department(name: &str) -> departments::ActiveModel {
        departments::ActiveModel {
            name: Set(Some(name.to_string())),
            description: Set(None),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_get_and_count() {
        let db = setup_test_db().await;
        let repo = Repository::<departments::Entity>::new(db, "Department");

        let created = repo.create(department("Finance")).await.unwrap();
        assert_eq!(created.name.as_deref(), Some("Finance"));

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let db = setup_test_db().await;
        let repo = Repository::<departments::Entity>::new(db, "Department");

        let err = repo.get(42).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Department with id 42 not found.");
    }

    #[tokio::test]
    async fn test_list_honours_offset_and_limit() {
        let db = setup_test_db().await;
        let repo = Repository::<departments::Entity>::new(db, "Department");
        for name in ["A", "B", "C", "D"] {
            repo.create(department(name)).await.unwrap();
        }

        assert_eq!(repo.list(0, None).await.unwrap().len(), 4);

        let rest = repo.list(1, None).await.unwrap();
        let names: Vec<_> = rest.iter().filter_map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["B", "C", "D"]);

        let page = repo.list(1, Some(2)).await.unwrap();
        let names: Vec<_> = page.iter().filter_map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let db = setup_test_db().await;
        let repo = Repository::<departments::Entity>::new(db, "Department");
        let mut active = department("Ops");
        active.description = Set(Some("Operations".to_string()));
        let created = repo.create(active).await.unwrap();

        let unchanged = repo
            .update(created.id, RenameDepartment(None))
            .await
            .unwrap();
        assert_eq!(unchanged, created);

        let renamed = repo
            .update(created.id, RenameDepartment(Some("Platform".to_string())))
            .await
            .unwrap();
        assert_eq!(renamed.name.as_deref(), Some("Platform"));
        assert_eq!(renamed.description.as_deref(), Some("Operations"));

        let err = repo
            .update(999, RenameDepartment(Some("X".to_string())))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_rejects_missing() {
        let db = setup_test_db().await;
        let repo = Repository::<departments::Entity>::new(db, "Department");
        let created = repo.create(department("Legal")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.delete(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_string_keyed_entity() {
        let db = setup_test_db().await;
        let repo = Repository::<employees::Entity>::new(db, "Employee");

        let created = repo
            .create(employees::ActiveModel {
                uuid: Set("e-1".to_string()),
                fio: Set("Petrov P.P.".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.uuid, "e-1");

        let err = repo.get("missing".to_string()).await.unwrap_err();
        assert_eq!(err.to_string(), "Employee with id missing not found.");
    }
}
