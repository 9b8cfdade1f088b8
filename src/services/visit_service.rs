use std::collections::{HashMap, HashSet};

use crate::entities::{
    customer_entity as customers, restaurant_entity as restaurants, visit_entity as visits,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{icontains, non_empty};
use crate::utils::{FieldErrors, total_spending};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// Ten digits with two of them after the point.
const MAX_INTEGER_DIGITS: u32 = 8;

#[derive(Clone)]
pub struct VisitService {
    pool: DatabaseConnection,
}

impl VisitService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_visits(&self, query: &VisitQuery) -> AppResult<Vec<VisitResponse>> {
        let mut select = visits::Entity::find().order_by_desc(visits::Column::Date);

        if let Some(username) = non_empty(&query.username) {
            select = select.inner_join(customers::Entity).filter(icontains(
                (customers::Entity, customers::Column::Username),
                username,
            ));
        }
        if let Some(name) = non_empty(&query.restaurant_name) {
            select = select.inner_join(restaurants::Entity).filter(icontains(
                (restaurants::Entity, restaurants::Column::Name),
                name,
            ));
        }

        let models = select.all(&self.pool).await?;
        self.with_totals(models).await
    }

    pub async fn get_visit(&self, visit_id: i32) -> AppResult<VisitResponse> {
        let visit = self.find_visit(visit_id).await?;
        let total = self
            .total_spending(visit.customer_id, visit.restaurant_id)
            .await?;
        Ok(VisitResponse::new(visit, total))
    }

    pub async fn create_visit(
        &self,
        user: &AuthUser,
        request: CreateVisitRequest,
    ) -> AppResult<VisitResponse> {
        let restaurant = restaurants::Entity::find_by_id(request.restaurant)
            .one(&self.pool)
            .await?;
        if restaurant.is_none() {
            let mut errors = FieldErrors::new();
            errors.add(
                "restaurant",
                format!("Invalid pk \"{}\" - object does not exist.", request.restaurant),
            );
            return Err(AppError::InvalidFields(errors));
        }

        self.insert_visit(user, request.restaurant, request.form).await
    }

    /// Records a visit to `restaurant_id` for the caller.
    pub async fn add_visit(
        &self,
        user: &AuthUser,
        restaurant_id: i32,
        form: VisitForm,
    ) -> AppResult<VisitResponse> {
        restaurants::Entity::find_by_id(restaurant_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant"))?;

        self.insert_visit(user, restaurant_id, form).await
    }

    pub async fn update_visit(
        &self,
        user: &AuthUser,
        visit_id: i32,
        form: VisitForm,
    ) -> AppResult<VisitResponse> {
        let visit = self.find_visit(visit_id).await?;
        if visit.customer_id != user.id {
            return Err(AppError::PermissionDenied);
        }
        validate_visit(&form)?;

        let mut model = visit.into_active_model();
        model.date = Set(form.date);
        model.spending = Set(form.spending);
        let updated = model.update(&self.pool).await?;

        let total = self
            .total_spending(updated.customer_id, updated.restaurant_id)
            .await?;
        Ok(VisitResponse::new(updated, total))
    }

    pub async fn delete_visit(&self, user: &AuthUser, visit_id: i32) -> AppResult<()> {
        let visit = self.find_visit(visit_id).await?;
        if visit.customer_id != user.id {
            return Err(AppError::PermissionDenied);
        }

        visits::Entity::delete_by_id(visit.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    /// The caller's visits, most recent first.
    pub async fn list_customer_visits(&self, customer_id: i32) -> AppResult<Vec<VisitResponse>> {
        let models = visits::Entity::find()
            .filter(visits::Column::CustomerId.eq(customer_id))
            .order_by_desc(visits::Column::Date)
            .all(&self.pool)
            .await?;
        self.with_totals(models).await
    }

    pub async fn visit_count(&self, customer_id: i32, restaurant_id: i32) -> AppResult<u64> {
        Ok(visits::Entity::find()
            .filter(visits::Column::CustomerId.eq(customer_id))
            .filter(visits::Column::RestaurantId.eq(restaurant_id))
            .count(&self.pool)
            .await?)
    }

    /// Spend of `customer_id` at `restaurant_id`; `None` sums the customer's orphaned visits.
    pub async fn total_spending(
        &self,
        customer_id: i32,
        restaurant_id: Option<i32>,
    ) -> AppResult<Decimal> {
        let spendings = self.spendings(customer_id, restaurant_id).await?;
        Ok(total_spending(&spendings))
    }

    pub async fn visit_statistics(
        &self,
        customer_id: i32,
        restaurant_id: i32,
    ) -> AppResult<VisitStatistics> {
        let spendings = self.spendings(customer_id, Some(restaurant_id)).await?;
        Ok(VisitStatistics {
            visit_count: spendings.len() as u64,
            total_spending: total_spending(&spendings),
        })
    }

    async fn spendings(
        &self,
        customer_id: i32,
        restaurant_id: Option<i32>,
    ) -> AppResult<Vec<Decimal>> {
        let restaurant_filter = match restaurant_id {
            Some(id) => visits::Column::RestaurantId.eq(id),
            None => visits::Column::RestaurantId.is_null(),
        };

        let models = visits::Entity::find()
            .filter(visits::Column::CustomerId.eq(customer_id))
            .filter(restaurant_filter)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(|v| v.spending).collect())
    }

    async fn insert_visit(
        &self,
        user: &AuthUser,
        restaurant_id: i32,
        form: VisitForm,
    ) -> AppResult<VisitResponse> {
        validate_visit(&form)?;

        let visit = visits::ActiveModel {
            restaurant_id: Set(Some(restaurant_id)),
            customer_id: Set(user.id),
            date: Set(form.date),
            spending: Set(form.spending),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        let total = self.total_spending(user.id, Some(restaurant_id)).await?;
        Ok(VisitResponse::new(visit, total))
    }

    async fn find_visit(&self, visit_id: i32) -> AppResult<visits::Model> {
        visits::Entity::find_by_id(visit_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Visit"))
    }

    /// Attaches each visit's (customer, restaurant) spend total with one extra query.
    async fn with_totals(&self, models: Vec<visits::Model>) -> AppResult<Vec<VisitResponse>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let customer_ids: HashSet<i32> = models.iter().map(|v| v.customer_id).collect();
        let history = visits::Entity::find()
            .filter(visits::Column::CustomerId.is_in(customer_ids))
            .all(&self.pool)
            .await?;

        let mut totals: HashMap<(i32, Option<i32>), Vec<Decimal>> = HashMap::new();
        for visit in history {
            totals
                .entry((visit.customer_id, visit.restaurant_id))
                .or_default()
                .push(visit.spending);
        }

        Ok(models
            .into_iter()
            .map(|visit| {
                let total = totals
                    .get(&(visit.customer_id, visit.restaurant_id))
                    .map(|s| total_spending(s))
                    .unwrap_or(Decimal::ZERO);
                VisitResponse::new(visit, total)
            })
            .collect())
    }
}

fn validate_visit(form: &VisitForm) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    let spending = form.spending.normalize();

    if spending.is_sign_negative() && !spending.is_zero() {
        errors.add("spending", "Ensure this value is greater than or equal to 0.");
    }
    if spending.scale() > 2 {
        errors.add(
            "spending",
            "Ensure that there are no more than 2 decimal places.",
        );
    }
    if spending.abs() >= Decimal::from(10i64.pow(MAX_INTEGER_DIGITS)) {
        errors.add(
            "spending",
            "Ensure that there are no more than 10 digits in total.",
        );
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::*;
    use chrono::NaiveDate;

    fn form(day: u32, cents: i64) -> VisitForm {
        VisitForm {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            spending: Decimal::new(cents, 2),
        }
    }

    #[tokio::test]
    async fn test_no_visits_means_zero_statistics() {
        let pool = test_pool().await;
        let user = create_customer(&pool, "testuser", "test@example.com").await;
        let restaurant = create_restaurant(&pool, &user, "Test Restaurant").await;
        let service = VisitService::new(pool);

        assert_eq!(service.visit_count(user.id, restaurant.id).await.unwrap(), 0);
        assert_eq!(
            service
                .total_spending(user.id, Some(restaurant.id))
                .await
                .unwrap(),
            Decimal::ZERO
        );
    }

    #[tokio::test]
    async fn test_statistics_sum_visits() {
        let pool = test_pool().await;
        let user = create_customer(&pool, "testuser", "test@example.com").await;
        let restaurant = create_restaurant(&pool, &user, "Test Restaurant").await;
        let service = VisitService::new(pool);

        service
            .add_visit(&user, restaurant.id, form(20, 2550))
            .await
            .unwrap();
        let second = service
            .add_visit(&user, restaurant.id, form(21, 1025))
            .await
            .unwrap();
        assert_eq!(second.total_spending_at_restaurant, Decimal::new(3575, 2));

        let stats = service.visit_statistics(user.id, restaurant.id).await.unwrap();
        assert_eq!(stats.visit_count, 2);
        assert_eq!(stats.total_spending, Decimal::new(3575, 2));
        assert_eq!(service.visit_count(user.id, restaurant.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_one_visit_per_day() {
        let pool = test_pool().await;
        let user = create_customer(&pool, "testuser", "test@example.com").await;
        let restaurant = create_restaurant(&pool, &user, "Test Restaurant").await;
        let service = VisitService::new(pool);

        service
            .add_visit(&user, restaurant.id, form(20, 2550))
            .await
            .unwrap();
        let duplicate = service.add_visit(&user, restaurant.id, form(20, 1000)).await;
        assert!(matches!(duplicate, Err(AppError::ConstraintViolation(_))));

        assert!(
            service
                .add_visit(&user, restaurant.id, form(21, 1000))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_spending_validation() {
        let pool = test_pool().await;
        let user = create_customer(&pool, "testuser", "test@example.com").await;
        let restaurant = create_restaurant(&pool, &user, "Test Restaurant").await;
        let service = VisitService::new(pool);

        let negative = service.add_visit(&user, restaurant.id, form(20, -100)).await;
        assert!(matches!(negative, Err(AppError::InvalidFields(_))));

        let too_precise = VisitForm {
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            spending: Decimal::new(12345, 3),
        };
        let result = service.add_visit(&user, restaurant.id, too_precise).await;
        assert!(matches!(result, Err(AppError::InvalidFields(_))));
    }

    #[tokio::test]
    async fn test_only_owner_may_change_a_visit() {
        let pool = test_pool().await;
        let owner = create_customer(&pool, "owner", "").await;
        let other = create_customer(&pool, "other", "").await;
        let restaurant = create_restaurant(&pool, &owner, "Test Restaurant").await;
        let service = VisitService::new(pool);

        let visit = service
            .add_visit(&owner, restaurant.id, form(20, 2550))
            .await
            .unwrap();

        assert!(matches!(
            service.update_visit(&other, visit.id, form(22, 100)).await,
            Err(AppError::PermissionDenied)
        ));
        assert!(matches!(
            service.delete_visit(&other, visit.id).await,
            Err(AppError::PermissionDenied)
        ));

        let updated = service
            .update_visit(&owner, visit.id, form(22, 100))
            .await
            .unwrap();
        assert_eq!(updated.spending, Decimal::new(100, 2));

        service.delete_visit(&owner, visit.id).await.unwrap();
        assert!(matches!(
            service.get_visit(visit.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_and_order() {
        let pool = test_pool().await;
        let alice = create_customer(&pool, "alice", "").await;
        let bob = create_customer(&pool, "bob", "").await;
        let pizza = create_restaurant(&pool, &alice, "Pizza Place").await;
        let sushi = create_restaurant(&pool, &alice, "Sushi Bar").await;
        let service = VisitService::new(pool);

        service.add_visit(&alice, pizza.id, form(1, 1000)).await.unwrap();
        service.add_visit(&alice, sushi.id, form(5, 2000)).await.unwrap();
        service.add_visit(&bob, sushi.id, form(3, 3000)).await.unwrap();

        let mine = service.list_customer_visits(alice.id).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].restaurant, Some(sushi.id));

        let sushi_visits = service
            .list_visits(&VisitQuery {
                username: None,
                restaurant_name: Some("sushi".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(sushi_visits.len(), 2);

        let bobs = service
            .list_visits(&VisitQuery {
                username: Some("BO".to_string()),
                restaurant_name: None,
            })
            .await
            .unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].total_spending_at_restaurant, Decimal::new(3000, 2));
    }
}
