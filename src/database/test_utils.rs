use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::database::migrations::Migrator;

pub async fn setup_test_db() -> DatabaseConnection {
    // Create an in-memory SQLite database for testing
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}
