use crate::entities::{
    customer_entity as customers, restaurant_entity as restaurants, review_entity as reviews,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{icontains, non_empty};
use crate::utils::FieldErrors;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

const MAX_COMMENT_CHARS: usize = 500;

#[derive(Clone)]
pub struct ReviewService {
    pool: DatabaseConnection,
}

impl ReviewService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_reviews(&self, query: &ReviewQuery) -> AppResult<Vec<ReviewResponse>> {
        let mut select = reviews::Entity::find().order_by_desc(reviews::Column::Created);

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
        Ok(models.into_iter().map(ReviewResponse::from).collect())
    }

    pub async fn get_review(&self, review_id: i32) -> AppResult<ReviewResponse> {
        Ok(ReviewResponse::from(self.find_review(review_id).await?))
    }

    pub async fn list_restaurant_reviews(
        &self,
        restaurant_id: i32,
    ) -> AppResult<Vec<ReviewResponse>> {
        self.ensure_restaurant(restaurant_id).await?;

        let models = reviews::Entity::find()
            .filter(reviews::Column::RestaurantId.eq(restaurant_id))
            .order_by_desc(reviews::Column::Created)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(ReviewResponse::from).collect())
    }

    pub async fn list_customer_reviews(&self, customer_id: i32) -> AppResult<Vec<ReviewResponse>> {
        let models = reviews::Entity::find()
            .filter(reviews::Column::CustomerId.eq(customer_id))
            .order_by_desc(reviews::Column::Created)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(ReviewResponse::from).collect())
    }

    /// Fails with `ConstraintViolation` when the caller already reviewed the restaurant.
    pub async fn create_review(
        &self,
        user: &AuthUser,
        request: CreateReviewRequest,
    ) -> AppResult<ReviewResponse> {
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

        self.insert_review(user, request.restaurant, request.form)
            .await
    }

    /// Creates the caller's review of `restaurant_id`, or updates it if one exists.
    /// The flag is `true` when a review was created.
    pub async fn submit_review(
        &self,
        user: &AuthUser,
        restaurant_id: i32,
        form: ReviewForm,
    ) -> AppResult<(ReviewResponse, bool)> {
        self.ensure_restaurant(restaurant_id).await?;

        let existing = reviews::Entity::find()
            .filter(reviews::Column::RestaurantId.eq(restaurant_id))
            .filter(reviews::Column::CustomerId.eq(user.id))
            .one(&self.pool)
            .await?;

        match existing {
            Some(review) => Ok((self.apply_form(review, form).await?, false)),
            None => Ok((self.insert_review(user, restaurant_id, form).await?, true)),
        }
    }

    pub async fn update_review(
        &self,
        user: &AuthUser,
        review_id: i32,
        form: ReviewForm,
    ) -> AppResult<ReviewResponse> {
        let review = self.find_review(review_id).await?;
        if review.customer_id != user.id {
            return Err(AppError::PermissionDenied);
        }

        self.apply_form(review, form).await
    }

    pub async fn delete_review(&self, user: &AuthUser, review_id: i32) -> AppResult<()> {
        let review = self.find_review(review_id).await?;
        if review.customer_id != user.id {
            return Err(AppError::PermissionDenied);
        }

        reviews::Entity::delete_by_id(review.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_review(
        &self,
        user: &AuthUser,
        restaurant_id: i32,
        form: ReviewForm,
    ) -> AppResult<ReviewResponse> {
        validate_review(&form)?;

        let review = reviews::ActiveModel {
            restaurant_id: Set(restaurant_id),
            customer_id: Set(user.id),
            created: Set(Utc::now()),
            rating: Set(form.rating.unwrap_or(DEFAULT_RATING)),
            pricing: Set(form.pricing.unwrap_or_default()),
            comment: Set(normalize_comment(form.comment)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Review {} created for restaurant {} by customer {}",
            review.id,
            review.restaurant_id,
            review.customer_id
        );
        Ok(ReviewResponse::from(review))
    }

    /// Fields left out of the form keep their stored values.
    async fn apply_form(
        &self,
        review: reviews::Model,
        form: ReviewForm,
    ) -> AppResult<ReviewResponse> {
        validate_review(&form)?;

        let mut model = review.into_active_model();
        if let Some(rating) = form.rating {
            model.rating = Set(rating);
        }
        if let Some(pricing) = form.pricing {
            model.pricing = Set(pricing);
        }
        if form.comment.is_some() {
            model.comment = Set(normalize_comment(form.comment));
        }
        let updated = model.update(&self.pool).await?;

        Ok(ReviewResponse::from(updated))
    }

    async fn find_review(&self, review_id: i32) -> AppResult<reviews::Model> {
        reviews::Entity::find_by_id(review_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Review"))
    }

    async fn ensure_restaurant(&self, restaurant_id: i32) -> AppResult<()> {
        restaurants::Entity::find_by_id(restaurant_id)
            .one(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Restaurant"))
    }
}

fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn validate_review(form: &ReviewForm) -> AppResult<()> {
    let mut errors = FieldErrors::new();

    if let Some(rating) = form.rating
        && !(1..=5).contains(&rating)
    {
        errors.add(
            "rating",
            format!("Select a valid choice. {rating} is not one of the available choices."),
        );
    }
    if let Some(comment) = &form.comment
        && comment.chars().count() > MAX_COMMENT_CHARS
    {
        errors.add(
            "comment",
            format!("Ensure this value has at most {MAX_COMMENT_CHARS} characters."),
        );
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PricingCategory;
    use crate::services::test_support::*;

    #[tokio::test]
    async fn test_one_review_per_customer_and_restaurant() {
        let pool = test_pool().await;
        let user = create_customer(&pool, "testuser", "").await;
        let restaurant = create_restaurant(&pool, &user, "Test Restaurant").await;
        let service = ReviewService::new(pool);

        service
            .create_review(
                &user,
                CreateReviewRequest {
                    restaurant: restaurant.id,
                    form: ReviewForm::new(4, PricingCategory::Moderate, Some("Test comment 1")),
                },
            )
            .await
            .unwrap();

        let second = service
            .create_review(
                &user,
                CreateReviewRequest {
                    restaurant: restaurant.id,
                    form: ReviewForm::new(5, PricingCategory::High, Some("Test comment 2")),
                },
            )
            .await;
        assert!(matches!(second, Err(AppError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_defaults() {
        let pool = test_pool().await;
        let user = create_customer(&pool, "testuser", "").await;
        let restaurant = create_restaurant(&pool, &user, "Test Restaurant").await;
        let service = ReviewService::new(pool);

        let (review, created) = service
            .submit_review(&user, restaurant.id, ReviewForm::default())
            .await
            .unwrap();
        assert!(created);
        assert_eq!(review.rating, 3);
        assert_eq!(review.pricing, PricingCategory::Moderate);
        assert_eq!(review.comment, None);
    }

    #[tokio::test]
    async fn test_submit_updates_existing_review() {
        let pool = test_pool().await;
        let user = create_customer(&pool, "testuser", "").await;
        let restaurant = create_restaurant(&pool, &user, "Test Restaurant").await;
        let service = ReviewService::new(pool);

        let (first, _) = service
            .submit_review(&user, restaurant.id, ReviewForm::new(2, PricingCategory::High, None))
            .await
            .unwrap();
        let (second, created) = service
            .submit_review(
                &user,
                restaurant.id,
                ReviewForm::new(5, PricingCategory::Cheap, Some("Better now")),
            )
            .await
            .unwrap();

        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(second.rating, 5);
        assert_eq!(second.created, first.created);
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let pool = test_pool().await;
        let user = create_customer(&pool, "testuser", "").await;
        let restaurant = create_restaurant(&pool, &user, "Test Restaurant").await;
        let service = ReviewService::new(pool);

        for rating in [0, 6] {
            let result = service
                .submit_review(
                    &user,
                    restaurant.id,
                    ReviewForm::new(rating, PricingCategory::Cheap, None),
                )
                .await;
            match result {
                Err(AppError::InvalidFields(fields)) => assert!(fields.get("rating").is_some()),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_restaurant() {
        let pool = test_pool().await;
        let user = create_customer(&pool, "testuser", "").await;
        let service = ReviewService::new(pool);

        assert!(matches!(
            service
                .submit_review(&user, 999, ReviewForm::default())
                .await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service
                .create_review(
                    &user,
                    CreateReviewRequest {
                        restaurant: 999,
                        form: ReviewForm::default(),
                    },
                )
                .await,
            Err(AppError::InvalidFields(_))
        ));
    }

    #[tokio::test]
    async fn test_only_author_may_edit() {
        let pool = test_pool().await;
        let author = create_customer(&pool, "author", "").await;
        let other = create_customer(&pool, "other", "").await;
        let restaurant = create_restaurant(&pool, &author, "Test Restaurant").await;
        let service = ReviewService::new(pool);

        let (review, _) = service
            .submit_review(&author, restaurant.id, ReviewForm::default())
            .await
            .unwrap();

        assert!(matches!(
            service
                .update_review(&other, review.id, ReviewForm::default())
                .await,
            Err(AppError::PermissionDenied)
        ));
        assert!(matches!(
            service.delete_review(&other, review.id).await,
            Err(AppError::PermissionDenied)
        ));
        service.delete_review(&author, review.id).await.unwrap();
        assert!(
            service
                .list_customer_reviews(author.id)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
