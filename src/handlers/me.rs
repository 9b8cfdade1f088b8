use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::{ReviewService, VisitService};

#[utoipa::path(
    get,
    path = "/api/me/reviews",
    tag = "me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's reviews", body = [ReviewResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_reviews(
    review_service: web::Data<ReviewService>,
    user: AuthUser,
) -> Result<HttpResponse> {
    match review_service.list_customer_reviews(user.id).await {
        Ok(reviews) => Ok(HttpResponse::Ok().json(ApiResponse::success(reviews))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/me/visits",
    tag = "me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's visits, most recent first", body = [VisitResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_visits(
    visit_service: web::Data<VisitService>,
    user: AuthUser,
) -> Result<HttpResponse> {
    match visit_service.list_customer_visits(user.id).await {
        Ok(visits) => Ok(HttpResponse::Ok().json(ApiResponse::success(visits))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn me_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/me")
            .route("/reviews", web::get().to(my_reviews))
            .route("/visits", web::get().to(my_visits)),
    );
}
