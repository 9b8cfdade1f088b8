use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::{PricingCategory, review_entity};

pub const DEFAULT_RATING: i32 = 3;

/// Fields a customer may submit for a review of a known restaurant.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ReviewForm {
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub rating: Option<i32>,
    pub pricing: Option<PricingCategory>,
    pub comment: Option<String>,
}

impl ReviewForm {
    pub fn new(rating: i32, pricing: PricingCategory, comment: Option<&str>) -> Self {
        Self {
            rating: Some(rating),
            pricing: Some(pricing),
            comment: comment.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub restaurant: i32,
    #[serde(flatten)]
    pub form: ReviewForm,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewQuery {
    pub username: Option<String>,
    pub restaurant_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i32,
    pub restaurant: i32,
    pub customer: i32,
    pub created: DateTime<Utc>,
    pub rating: i32,
    pub pricing: PricingCategory,
    pub comment: Option<String>,
}

impl From<review_entity::Model> for ReviewResponse {
    fn from(review: review_entity::Model) -> Self {
        Self {
            id: review.id,
            restaurant: review.restaurant_id,
            customer: review.customer_id,
            created: review.created,
            rating: review.rating,
            pricing: review.pricing,
            comment: review.comment,
        }
    }
}
