use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::{Cuisine, restaurant_entity};
use crate::models::VisitStatistics;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantRequest {
    #[schema(example = "Test Restaurant")]
    pub name: String,
    #[serde(default)]
    pub cuisine: Cuisine,
    #[schema(example = "123 Test Street")]
    pub address: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RestaurantQuery {
    /// Case-insensitive substring of the restaurant name.
    pub restaurant_name: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestaurantResponse {
    pub id: i32,
    pub name: String,
    pub cuisine: Cuisine,
    pub cuisine_label: String,
    pub address: String,
    pub created_by: i32,
    pub average_rating: f64,
    pub pricing_category_eval: Option<String>,
}

impl RestaurantResponse {
    pub fn new(
        restaurant: restaurant_entity::Model,
        average_rating: f64,
        pricing_category_eval: Option<String>,
    ) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            cuisine_label: restaurant.cuisine.label().to_string(),
            cuisine: restaurant.cuisine,
            address: restaurant.address,
            created_by: restaurant.created_by,
            average_rating,
            pricing_category_eval,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantDetailResponse {
    pub restaurant: RestaurantResponse,
    /// Present only for authenticated callers.
    pub my_visits: Option<VisitStatistics>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AverageRatingResponse {
    pub average_rating: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PricingCategoryResponse {
    pub pricing_category_evaluation: Option<String>,
}
