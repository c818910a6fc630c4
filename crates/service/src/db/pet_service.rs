//! Data access for pets.
//!
//! Every function takes the connection handle from its caller and issues its
//! statements directly; nothing is cached between calls. Absence is reported
//! through `Option`/`bool`, store failures propagate as `ServiceError::Db`.

use std::collections::BTreeMap;

use models::pet;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::pagination::MAX_SKIP;
use crate::schemas::pet::{Pet, PetCreate, PetStatistics, PetUpdate};

/// Get pet by id.
pub async fn get_pet<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Pet>, ServiceError> {
    Ok(pet::Entity::find_by_id(id).one(db).await?)
}

/// List pets ordered by id, skipping `skip` and returning at most `limit`.
pub async fn list_pets<C: ConnectionTrait>(db: &C, skip: u64, limit: u64) -> Result<Vec<Pet>, ServiceError> {
    // offsets are bound as signed 64-bit integers
    if skip > MAX_SKIP {
        return Err(ServiceError::validation(format!("skip must be at most {MAX_SKIP}, got {skip}")));
    }
    let rows = pet::Entity::find()
        .order_by_asc(pet::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}

/// Create a pet; the id is assigned by the store.
#[instrument(skip(db, payload), fields(name = %payload.name, pet_type = %payload.pet_type))]
pub async fn create_pet<C: ConnectionTrait>(db: &C, payload: PetCreate) -> Result<Pet, ServiceError> {
    let created = payload.into_active_model().insert(db).await?;
    debug!(id = created.id, "pet created");
    Ok(created)
}

/// Apply the supplied fields of `patch` to pet `id`. `None` when no such pet.
#[instrument(skip(db, patch))]
pub async fn update_pet<C: ConnectionTrait>(db: &C, id: i32, patch: PetUpdate) -> Result<Option<Pet>, ServiceError> {
    patch.validate()?;
    let Some(current) = pet::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    if patch.is_empty() {
        return Ok(Some(current));
    }
    let updated = patch.merge(current).update(db).await?;
    debug!(id = updated.id, "pet updated");
    Ok(Some(updated))
}

/// Delete pet `id`. `false` when no such pet.
#[instrument(skip(db))]
pub async fn delete_pet<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    let res = pet::Entity::delete_by_id(id).exec(db).await?;
    let deleted = res.rows_affected > 0;
    debug!(deleted, "pet delete executed");
    Ok(deleted)
}

/// Count, mean known weight and per-type counts over all pets.
pub async fn get_pet_statistics<C: ConnectionTrait>(db: &C) -> Result<PetStatistics, ServiceError> {
    let total_pets = pet::Entity::find().count(db).await?;

    let average_weight = pet::Entity::find()
        .select_only()
        .column_as(SimpleExpr::from(Func::avg(Expr::col(pet::Column::Weight))), "average_weight")
        .filter(pet::Column::Weight.is_not_null())
        .into_tuple::<Option<f64>>()
        .one(db)
        .await?
        .flatten()
        .map(round2);

    let per_type: Vec<(String, i64)> = pet::Entity::find()
        .select_only()
        .column(pet::Column::PetType)
        .column_as(Expr::col(pet::Column::Id).count(), "count")
        .group_by(pet::Column::PetType)
        .into_tuple()
        .all(db)
        .await?;
    let type_distribution: BTreeMap<String, u64> = per_type
        .into_iter()
        .map(|(pet_type, count)| (pet_type, count.max(0) as u64))
        .collect();

    Ok(PetStatistics { total_pets, average_weight, type_distribution })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    async fn seed(db: &sea_orm::DatabaseConnection) -> Result<Vec<Pet>, anyhow::Error> {
        let mut out = vec![];
        for payload in [
            PetCreate::new("Rex", "dog", Some(10.0)),
            PetCreate::new("Milo", "dog", Some(20.0)),
            PetCreate::new("Tweety", "bird", None),
        ] {
            out.push(create_pet(db, payload).await?);
        }
        Ok(out)
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(15.0), 15.0);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.675_1), 2.68);
    }

    #[tokio::test]
    async fn create_then_get_round_trips_every_field() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let payload = PetCreate::new("Rex", "dog", Some(10.5));
        let created = create_pet(&db, payload.clone()).await?;
        assert_eq!(created.name, payload.name);
        assert_eq!(created.pet_type, payload.pet_type);
        assert_eq!(created.weight, payload.weight);

        let found = get_pet(&db, created.id).await?;
        assert_eq!(found, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn created_ids_are_unique() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let pets = seed(&db).await?;
        let mut ids: Vec<i32> = pets.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), pets.len());
        Ok(())
    }

    #[tokio::test]
    async fn get_missing_pet_returns_none() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(get_pet(&db, 4242).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn list_applies_skip_and_limit_in_insertion_order() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let pets = seed(&db).await?;

        let page = list_pets(&db, 1, 1).await?;
        assert_eq!(page, vec![pets[1].clone()]);

        let all = list_pets(&db, 0, 100).await?;
        assert_eq!(all, pets);

        assert!(list_pets(&db, 3, 10).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_rejects_skip_beyond_signed_range() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db).await?;

        let err = list_pets(&db, u64::MAX, 10).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(list_pets(&db, MAX_SKIP, 10).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn type_update_keeps_name_and_weight() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let rex = create_pet(&db, PetCreate::new("Rex", "dog", Some(10.0))).await?;

        let updated = update_pet(&db, rex.id, PetUpdate::default().with_type("wolf"))
            .await?
            .expect("pet exists");
        assert_eq!(updated.pet_type, "wolf");
        assert_eq!(updated.name, "Rex");
        assert_eq!(updated.weight, Some(10.0));
        Ok(())
    }

    #[tokio::test]
    async fn weight_only_update_leaves_other_fields() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let rex = create_pet(&db, PetCreate::new("Rex", "dog", Some(10.0))).await?;

        let updated = update_pet(&db, rex.id, PetUpdate::default().with_weight(Some(11.25)))
            .await?
            .expect("pet exists");
        assert_eq!(updated.name, "Rex");
        assert_eq!(updated.pet_type, "dog");
        assert_eq!(updated.weight, Some(11.25));

        let stored = get_pet(&db, rex.id).await?.expect("pet exists");
        assert_eq!(stored, updated);
        Ok(())
    }

    #[tokio::test]
    async fn update_with_explicit_null_clears_weight() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let rex = create_pet(&db, PetCreate::new("Rex", "dog", Some(10.0))).await?;

        let patch: PetUpdate = serde_json::from_str(r#"{"weight": null, "name": "Rexy"}"#)?;
        let updated = update_pet(&db, rex.id, patch).await?.expect("pet exists");
        assert_eq!(updated.name, "Rexy");
        assert_eq!(updated.pet_type, "dog");
        assert_eq!(updated.weight, None);
        Ok(())
    }

    #[tokio::test]
    async fn empty_update_returns_current_record() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let rex = create_pet(&db, PetCreate::new("Rex", "dog", None)).await?;
        let same = update_pet(&db, rex.id, PetUpdate::default()).await?;
        assert_eq!(same, Some(rex));
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_pet_returns_none() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = update_pet(&db, 99, PetUpdate::default().with_name("Ghost")).await?;
        assert!(res.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_with_null_name_is_rejected_before_the_store() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let rex = create_pet(&db, PetCreate::new("Rex", "dog", None)).await?;

        let patch: PetUpdate = serde_json::from_str(r#"{"name": null}"#)?;
        let err = update_pet(&db, rex.id, patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        assert_eq!(get_pet(&db, rex.id).await?, Some(rex));
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let pets = seed(&db).await?;

        assert!(!delete_pet(&db, 999).await?);
        assert_eq!(list_pets(&db, 0, 100).await?.len(), 3);

        assert!(delete_pet(&db, pets[0].id).await?);
        assert!(get_pet(&db, pets[0].id).await?.is_none());
        assert!(!delete_pet(&db, pets[0].id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn statistics_on_empty_store() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let stats = get_pet_statistics(&db).await?;
        assert_eq!(stats.total_pets, 0);
        assert_eq!(stats.average_weight, None);
        assert!(stats.type_distribution.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn statistics_ignore_missing_weights() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db).await?;

        let stats = get_pet_statistics(&db).await?;
        assert_eq!(stats.total_pets, 3);
        assert_eq!(stats.average_weight, Some(15.0));
        assert_eq!(
            stats.type_distribution,
            BTreeMap::from([("bird".to_string(), 1), ("dog".to_string(), 2)])
        );
        Ok(())
    }

    #[tokio::test]
    async fn statistics_without_any_weight_report_no_average() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_pet(&db, PetCreate::new("Tweety", "bird", None)).await?;
        create_pet(&db, PetCreate::new("Nemo", "fish", None)).await?;

        let stats = get_pet_statistics(&db).await?;
        assert_eq!(stats.total_pets, 2);
        assert_eq!(stats.average_weight, None);
        assert_eq!(stats.type_distribution.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn statistics_round_average_and_track_deletes() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_pet(&db, PetCreate::new("A", "cat", Some(1.0))).await?;
        create_pet(&db, PetCreate::new("B", "cat", Some(2.0))).await?;
        create_pet(&db, PetCreate::new("C", "hamster", Some(2.0))).await?;

        let stats = get_pet_statistics(&db).await?;
        assert_eq!(stats.average_weight, Some(1.67));

        delete_pet(&db, a.id).await?;
        let stats = get_pet_statistics(&db).await?;
        assert_eq!(stats.total_pets, 2);
        assert_eq!(stats.average_weight, Some(2.0));
        assert_eq!(stats.type_distribution.get("cat"), Some(&1));
        Ok(())
    }

    #[tokio::test]
    async fn zero_and_negative_weights_are_stored_and_averaged() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let zero = create_pet(&db, PetCreate::new("Zed", "fish", Some(0.0))).await?;
        assert_eq!(get_pet(&db, zero.id).await?.and_then(|p| p.weight), Some(0.0));

        let stats = get_pet_statistics(&db).await?;
        assert_eq!(stats.average_weight, Some(0.0));

        let odd = create_pet(&db, PetCreate::new("Odd", "fish", Some(-1.5))).await?;
        assert_eq!(get_pet(&db, odd.id).await?.and_then(|p| p.weight), Some(-1.5));

        let stats = get_pet_statistics(&db).await?;
        assert_eq!(stats.total_pets, 2);
        assert_eq!(stats.average_weight, Some(-0.75));
        assert_eq!(stats.type_distribution.get("fish"), Some(&2));
        Ok(())
    }
}
