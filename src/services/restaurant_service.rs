use std::collections::HashMap;

use crate::entities::{
    PricingCategory, restaurant_entity as restaurants, review_entity as reviews,
    visit_entity as visits,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{VisitService, icontains, non_empty};
use crate::utils::{
    FieldErrors, average_rating, pricing_category_evaluation, validate_required_text,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct RestaurantService {
    pool: DatabaseConnection,
    visit_service: VisitService,
}

impl RestaurantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        let visit_service = VisitService::new(pool.clone());
        Self {
            pool,
            visit_service,
        }
    }

    pub async fn list_restaurants(
        &self,
        query: &RestaurantQuery,
    ) -> AppResult<PaginatedResponse<RestaurantResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut select = restaurants::Entity::find();
        if let Some(name) = non_empty(&query.restaurant_name) {
            select = select.filter(icontains(
                (restaurants::Entity, restaurants::Column::Name),
                name,
            ));
        }

        let total = select.clone().count(&self.pool).await?;
        let models = select
            .order_by_asc(restaurants::Column::Name)
            .order_by_asc(restaurants::Column::Id)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items = self.summarize(models).await?;
        Ok(PaginatedResponse::new(items, &params, total as i64))
    }

    pub async fn get_restaurant(&self, restaurant_id: i32) -> AppResult<RestaurantResponse> {
        let restaurant = self.find_restaurant(restaurant_id).await?;
        self.summarize_one(restaurant).await
    }

    /// Restaurant plus, for an authenticated caller, their own visit statistics.
    pub async fn get_restaurant_detail(
        &self,
        restaurant_id: i32,
        user: Option<&AuthUser>,
    ) -> AppResult<RestaurantDetailResponse> {
        let restaurant = self.get_restaurant(restaurant_id).await?;

        let my_visits = match user {
            Some(user) => Some(
                self.visit_service
                    .visit_statistics(user.id, restaurant_id)
                    .await?,
            ),
            None => None,
        };

        Ok(RestaurantDetailResponse {
            restaurant,
            my_visits,
        })
    }

    pub async fn create_restaurant(
        &self,
        user: &AuthUser,
        request: RestaurantRequest,
    ) -> AppResult<RestaurantResponse> {
        validate_restaurant(&request)?;

        let restaurant = restaurants::ActiveModel {
            name: Set(request.name.trim().to_string()),
            cuisine: Set(request.cuisine),
            address: Set(request.address.trim().to_string()),
            created_by: Set(user.id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Restaurant {} created by customer {}",
            restaurant.id,
            user.id
        );
        Ok(RestaurantResponse::new(restaurant, 0.0, None))
    }

    pub async fn update_restaurant(
        &self,
        user: &AuthUser,
        restaurant_id: i32,
        request: RestaurantRequest,
    ) -> AppResult<RestaurantResponse> {
        let restaurant = self.find_restaurant(restaurant_id).await?;
        if restaurant.created_by != user.id {
            return Err(AppError::PermissionDenied);
        }
        validate_restaurant(&request)?;

        let mut model = restaurant.into_active_model();
        model.name = Set(request.name.trim().to_string());
        model.cuisine = Set(request.cuisine);
        model.address = Set(request.address.trim().to_string());
        let updated = model.update(&self.pool).await?;

        self.summarize_one(updated).await
    }

    /// Deletes the restaurant with its reviews; visits stay, detached from it.
    pub async fn delete_restaurant(&self, user: &AuthUser, restaurant_id: i32) -> AppResult<()> {
        let restaurant = self.find_restaurant(restaurant_id).await?;
        if restaurant.created_by != user.id {
            return Err(AppError::PermissionDenied);
        }

        let txn = self.pool.begin().await?;
        let removed_reviews = reviews::Entity::delete_many()
            .filter(reviews::Column::RestaurantId.eq(restaurant.id))
            .exec(&txn)
            .await?;
        let orphaned_visits = visits::Entity::update_many()
            .col_expr(visits::Column::RestaurantId, Expr::value(None::<i32>))
            .filter(visits::Column::RestaurantId.eq(restaurant.id))
            .exec(&txn)
            .await?;
        restaurants::Entity::delete_by_id(restaurant.id)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        log::info!(
            "Restaurant {} deleted by customer {} ({} reviews removed, {} visits kept)",
            restaurant.id,
            user.id,
            removed_reviews.rows_affected,
            orphaned_visits.rows_affected
        );
        Ok(())
    }

    pub async fn average_rating(&self, restaurant_id: i32) -> AppResult<f64> {
        self.find_restaurant(restaurant_id).await?;
        let ratings: Vec<i32> = self
            .reviews_of(restaurant_id)
            .await?
            .iter()
            .map(|r| r.rating)
            .collect();
        Ok(average_rating(&ratings))
    }

    pub async fn pricing_category_evaluation(
        &self,
        restaurant_id: i32,
    ) -> AppResult<Option<String>> {
        self.find_restaurant(restaurant_id).await?;
        let pricings: Vec<PricingCategory> = self
            .reviews_of(restaurant_id)
            .await?
            .iter()
            .map(|r| r.pricing)
            .collect();
        Ok(pricing_category_evaluation(&pricings))
    }

    async fn reviews_of(&self, restaurant_id: i32) -> AppResult<Vec<reviews::Model>> {
        Ok(reviews::Entity::find()
            .filter(reviews::Column::RestaurantId.eq(restaurant_id))
            .all(&self.pool)
            .await?)
    }

    async fn find_restaurant(&self, restaurant_id: i32) -> AppResult<restaurants::Model> {
        restaurants::Entity::find_by_id(restaurant_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant"))
    }

    async fn summarize_one(&self, restaurant: restaurants::Model) -> AppResult<RestaurantResponse> {
        let mut items = self.summarize(vec![restaurant]).await?;
        items
            .pop()
            .ok_or_else(|| AppError::InternalError("Restaurant summary missing".to_string()))
    }

    /// Attaches rating and pricing aggregates, loading all reviews in one query.
    async fn summarize(
        &self,
        models: Vec<restaurants::Model>,
    ) -> AppResult<Vec<RestaurantResponse>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = models.iter().map(|r| r.id).collect();
        let all_reviews = reviews::Entity::find()
            .filter(reviews::Column::RestaurantId.is_in(ids))
            .all(&self.pool)
            .await?;

        let mut grouped: HashMap<i32, (Vec<i32>, Vec<PricingCategory>)> = HashMap::new();
        for review in all_reviews {
            let entry = grouped.entry(review.restaurant_id).or_default();
            entry.0.push(review.rating);
            entry.1.push(review.pricing);
        }

        Ok(models
            .into_iter()
            .map(|restaurant| {
                let (ratings, pricings) = grouped.remove(&restaurant.id).unwrap_or_default();
                RestaurantResponse::new(
                    restaurant,
                    average_rating(&ratings),
                    pricing_category_evaluation(&pricings),
                )
            })
            .collect())
    }
}

fn validate_restaurant(request: &RestaurantRequest) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    validate_required_text(&mut errors, "name", &request.name, 100);
    validate_required_text(&mut errors, "address", &request.address, 200);
    errors.into_result()
}
