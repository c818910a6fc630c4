use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A persisted pet. Serialized as `{"id", "name", "type", "weight"}`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub name: String,
    #[sea_orm(column_name = "type", indexed)]
    #[serde(rename = "type")]
    pub pet_type: String,
    pub weight: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
