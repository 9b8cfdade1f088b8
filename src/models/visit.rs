use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::visit_entity;
use crate::utils::to_money;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VisitForm {
    #[schema(example = "2024-01-20")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "25.50")]
    pub spending: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateVisitRequest {
    pub restaurant: i32,
    #[serde(flatten)]
    pub form: VisitForm,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VisitQuery {
    pub username: Option<String>,
    pub restaurant_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VisitResponse {
    pub id: i32,
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub spending: Decimal,
    pub restaurant: Option<i32>,
    pub customer: i32,
    #[schema(value_type = String)]
    pub total_spending_at_restaurant: Decimal,
}

impl VisitResponse {
    pub fn new(visit: visit_entity::Model, total_spending_at_restaurant: Decimal) -> Self {
        Self {
            id: visit.id,
            date: visit.date,
            spending: to_money(visit.spending),
            restaurant: visit.restaurant_id,
            customer: visit.customer_id,
            total_spending_at_restaurant: to_money(total_spending_at_restaurant),
        }
    }
}

/// A customer's visit count and spend at one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VisitStatistics {
    pub visit_count: u64,
    #[schema(value_type = String)]
    pub total_spending: Decimal,
}
