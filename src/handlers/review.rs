use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::ReviewService;

#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "reviews",
    params(ReviewQuery),
    responses(
        (status = 200, description = "Reviews matching the filters", body = [ReviewResponse])
    )
)]
pub async fn list_reviews(
    review_service: web::Data<ReviewService>,
    query: web::Query<ReviewQuery>,
) -> Result<HttpResponse> {
    match review_service.list_reviews(&query).await {
        Ok(reviews) => Ok(HttpResponse::Ok().json(ApiResponse::success(reviews))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "reviews",
    request_body = CreateReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid review or restaurant already reviewed"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_review(
    review_service: web::Data<ReviewService>,
    user: AuthUser,
    request: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse> {
    match review_service
        .create_review(&user, request.into_inner())
        .await
    {
        Ok(review) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            review,
            "Review submitted successfully.",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    tag = "reviews",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review", body = ReviewResponse),
        (status = 404, description = "No such review")
    )
)]
pub async fn get_review(
    review_service: web::Data<ReviewService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match review_service.get_review(path.into_inner()).await {
        Ok(review) => Ok(HttpResponse::Ok().json(ApiResponse::success(review))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = "reviews",
    params(("id" = i32, Path, description = "Review id")),
    request_body = ReviewForm,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 403, description = "Review belongs to another customer"),
        (status = 404, description = "No such review")
    )
)]
pub async fn update_review(
    review_service: web::Data<ReviewService>,
    user: AuthUser,
    path: web::Path<i32>,
    request: web::Json<ReviewForm>,
) -> Result<HttpResponse> {
    match review_service
        .update_review(&user, path.into_inner(), request.into_inner())
        .await
    {
        Ok(review) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            review,
            "Review updated successfully.",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "reviews",
    params(("id" = i32, Path, description = "Review id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 403, description = "Review belongs to another customer"),
        (status = 404, description = "No such review")
    )
)]
pub async fn delete_review(
    review_service: web::Data<ReviewService>,
    user: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match review_service.delete_review(&user, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Review deleted successfully."))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn review_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .route("", web::get().to(list_reviews))
            .route("", web::post().to(create_review))
            .route("/{id}", web::get().to(get_review))
            .route("/{id}", web::put().to(update_review))
            .route("/{id}", web::delete().to(delete_review)),
    );
}
