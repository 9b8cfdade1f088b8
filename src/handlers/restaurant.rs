use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::{RestaurantService, ReviewService, VisitService};

#[utoipa::path(
    get,
    path = "/api/restaurants",
    tag = "restaurants",
    params(RestaurantQuery),
    responses(
        (status = 200, description = "Page of restaurants with rating and pricing summaries")
    )
)]
pub async fn list_restaurants(
    restaurant_service: web::Data<RestaurantService>,
    query: web::Query<RestaurantQuery>,
) -> Result<HttpResponse> {
    match restaurant_service.list_restaurants(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/restaurants",
    tag = "restaurants",
    request_body = RestaurantRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantResponse),
        (status = 400, description = "Invalid restaurant form"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_restaurant(
    restaurant_service: web::Data<RestaurantService>,
    user: AuthUser,
    request: web::Json<RestaurantRequest>,
) -> Result<HttpResponse> {
    match restaurant_service
        .create_restaurant(&user, request.into_inner())
        .await
    {
        Ok(restaurant) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            restaurant,
            "Restaurant added successfully.",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant detail; includes the caller's visits when authenticated", body = RestaurantDetailResponse),
        (status = 404, description = "No such restaurant")
    )
)]
pub async fn get_restaurant(
    restaurant_service: web::Data<RestaurantService>,
    user: Option<AuthUser>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match restaurant_service
        .get_restaurant_detail(path.into_inner(), user.as_ref())
        .await
    {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{id}",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant id")),
    request_body = RestaurantRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Restaurant updated", body = RestaurantResponse),
        (status = 403, description = "Caller did not create this restaurant"),
        (status = 404, description = "No such restaurant")
    )
)]
pub async fn update_restaurant(
    restaurant_service: web::Data<RestaurantService>,
    user: AuthUser,
    path: web::Path<i32>,
    request: web::Json<RestaurantRequest>,
) -> Result<HttpResponse> {
    match restaurant_service
        .update_restaurant(&user, path.into_inner(), request.into_inner())
        .await
    {
        Ok(restaurant) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            restaurant,
            "Restaurant updated successfully.",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/restaurants/{id}",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Restaurant deleted"),
        (status = 403, description = "Caller did not create this restaurant"),
        (status = 404, description = "No such restaurant")
    )
)]
pub async fn delete_restaurant(
    restaurant_service: web::Data<RestaurantService>,
    user: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match restaurant_service
        .delete_restaurant(&user, path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message(
            "Restaurant deleted successfully.",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/average-rating",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Mean review rating, 0 without reviews", body = AverageRatingResponse),
        (status = 404, description = "No such restaurant")
    )
)]
pub async fn average_rating(
    restaurant_service: web::Data<RestaurantService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match restaurant_service.average_rating(path.into_inner()).await {
        Ok(average_rating) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AverageRatingResponse { average_rating },
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/pricing-category",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Consensus pricing category, null without reviews", body = PricingCategoryResponse),
        (status = 404, description = "No such restaurant")
    )
)]
pub async fn pricing_category(
    restaurant_service: web::Data<RestaurantService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match restaurant_service
        .pricing_category_evaluation(path.into_inner())
        .await
    {
        Ok(pricing_category_evaluation) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PricingCategoryResponse {
                pricing_category_evaluation,
            },
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/reviews",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Reviews of the restaurant", body = [ReviewResponse]),
        (status = 404, description = "No such restaurant")
    )
)]
pub async fn restaurant_reviews(
    review_service: web::Data<ReviewService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match review_service
        .list_restaurant_reviews(path.into_inner())
        .await
    {
        Ok(reviews) => Ok(HttpResponse::Ok().json(ApiResponse::success(reviews))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{id}/review",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant id")),
    request_body = ReviewForm,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 200, description = "Existing review updated", body = ReviewResponse),
        (status = 400, description = "Invalid review form"),
        (status = 404, description = "No such restaurant")
    )
)]
pub async fn submit_review(
    review_service: web::Data<ReviewService>,
    user: AuthUser,
    path: web::Path<i32>,
    request: web::Json<ReviewForm>,
) -> Result<HttpResponse> {
    match review_service
        .submit_review(&user, path.into_inner(), request.into_inner())
        .await
    {
        Ok((review, true)) => Ok(HttpResponse::Created().json(
            ApiResponse::success_with_message(review, "Review submitted successfully."),
        )),
        Ok((review, false)) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            review,
            "Review updated successfully.",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/restaurants/{id}/visits",
    tag = "restaurants",
    params(("id" = i32, Path, description = "Restaurant id")),
    request_body = VisitForm,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Visit recorded", body = VisitResponse),
        (status = 400, description = "Invalid visit form or duplicate date"),
        (status = 404, description = "No such restaurant")
    )
)]
pub async fn add_visit(
    visit_service: web::Data<VisitService>,
    user: AuthUser,
    path: web::Path<i32>,
    request: web::Json<VisitForm>,
) -> Result<HttpResponse> {
    match visit_service
        .add_visit(&user, path.into_inner(), request.into_inner())
        .await
    {
        Ok(visit) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            visit,
            "Visit added successfully.",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn restaurant_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/restaurants")
            .route("", web::get().to(list_restaurants))
            .route("", web::post().to(create_restaurant))
            .route("/{id}", web::get().to(get_restaurant))
            .route("/{id}", web::put().to(update_restaurant))
            .route("/{id}", web::delete().to(delete_restaurant))
            .route("/{id}/average-rating", web::get().to(average_rating))
            .route("/{id}/pricing-category", web::get().to(pricing_category))
            .route("/{id}/reviews", web::get().to(restaurant_reviews))
            .route("/{id}/review", web::put().to(submit_review))
            .route("/{id}/visits", web::post().to(add_visit)),
    );
}
