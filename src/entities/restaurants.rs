use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(50))")]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    #[sea_orm(string_value = "african_cuisine")]
    AfricanCuisine,
    #[sea_orm(string_value = "american_cuisine")]
    AmericanCuisine,
    #[sea_orm(string_value = "asian_cuisine")]
    AsianCuisine,
    #[default]
    #[sea_orm(string_value = "european_cuisine")]
    EuropeanCuisine,
    #[sea_orm(string_value = "oceanic_cuisine")]
    OceanicCuisine,
}

impl Cuisine {
    /// Human readable label shown next to the stored value.
    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::AfricanCuisine => "African cuisine",
            Cuisine::AmericanCuisine => "Cuisine of the Americas",
            Cuisine::AsianCuisine => "Asian cuisine",
            Cuisine::EuropeanCuisine => "European cuisine",
            Cuisine::OceanicCuisine => "Oceanic cuisine",
        }
    }
}

impl std::fmt::Display for Cuisine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cuisine::AfricanCuisine => write!(f, "african_cuisine"),
            Cuisine::AmericanCuisine => write!(f, "american_cuisine"),
            Cuisine::AsianCuisine => write!(f, "asian_cuisine"),
            Cuisine::EuropeanCuisine => write!(f, "european_cuisine"),
            Cuisine::OceanicCuisine => write!(f, "oceanic_cuisine"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub cuisine: Cuisine,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub created_by: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CreatedBy",
        to = "super::customers::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::visits::Entity")]
    Visits,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::visits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Visits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
