use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);

    // An in-memory database lives and dies with a single connection
    let max_connections = if database_url.contains(":memory:") { 1 } else { 20 };

    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    Database::connect(opt).await
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(path) if path == ":memory:" => "sqlite::memory:".to_string(),
        Some(path) => format!("sqlite://{}?mode=rwc", path),
        None => "sqlite://orgraph.db?mode=rwc".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;

    #[test]
    fn test_database_url_resolution() {
        assert_eq!(get_database_url(Some(":memory:")), "sqlite::memory:");
        assert_eq!(
            get_database_url(Some("/tmp/org.db")),
            "sqlite:///tmp/org.db?mode=rwc"
        );
        assert_eq!(get_database_url(None), "sqlite://orgraph.db?mode=rwc");
    }

    #[tokio::test]
    async fn test_memory_connection_is_usable() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        assert_eq!(db.get_database_backend(), sea_orm::DatabaseBackend::Sqlite);
    }
}
