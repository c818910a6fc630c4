#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, DatabaseConfig};
use models::schema::ensure_schema;

/// Fresh in-memory database with the schema in place; isolated per test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    ensure_schema(&db).await?;
    Ok(db)
}
