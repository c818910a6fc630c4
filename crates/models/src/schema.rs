//! Create-if-missing bootstrap for the tables backing the entities.
//!
//! Tables and indexes are derived from the entity definitions and created
//! with `IF NOT EXISTS`, so calling this on every startup is safe. There is
//! no versioning: an existing table is never altered.
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};
use tracing::info;

use crate::pet;

pub async fn ensure_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_entity_table(db, pet::Entity).await
}

async fn create_entity_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    let indexes = schema.create_index_from_entity(entity);
    let index_count = indexes.len();
    for mut index in indexes {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    info!(table = entity.table_name(), indexes = index_count, "schema ensured");
    Ok(())
}
