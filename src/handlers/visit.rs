use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::VisitService;

#[utoipa::path(
    get,
    path = "/api/visits",
    tag = "visits",
    params(VisitQuery),
    responses(
        (status = 200, description = "Visits matching the filters, most recent first", body = [VisitResponse])
    )
)]
pub async fn list_visits(
    visit_service: web::Data<VisitService>,
    query: web::Query<VisitQuery>,
) -> Result<HttpResponse> {
    match visit_service.list_visits(&query).await {
        Ok(visits) => Ok(HttpResponse::Ok().json(ApiResponse::success(visits))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/visits",
    tag = "visits",
    request_body = CreateVisitRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Visit recorded", body = VisitResponse),
        (status = 400, description = "Invalid visit or duplicate date"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_visit(
    visit_service: web::Data<VisitService>,
    user: AuthUser,
    request: web::Json<CreateVisitRequest>,
) -> Result<HttpResponse> {
    match visit_service.create_visit(&user, request.into_inner()).await {
        Ok(visit) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            visit,
            "Visit added successfully.",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/visits/{id}",
    tag = "visits",
    params(("id" = i32, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit", body = VisitResponse),
        (status = 404, description = "No such visit")
    )
)]
pub async fn get_visit(
    visit_service: web::Data<VisitService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match visit_service.get_visit(path.into_inner()).await {
        Ok(visit) => Ok(HttpResponse::Ok().json(ApiResponse::success(visit))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/visits/{id}",
    tag = "visits",
    params(("id" = i32, Path, description = "Visit id")),
    request_body = VisitForm,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Visit updated", body = VisitResponse),
        (status = 403, description = "Visit belongs to another customer"),
        (status = 404, description = "No such visit")
    )
)]
pub async fn update_visit(
    visit_service: web::Data<VisitService>,
    user: AuthUser,
    path: web::Path<i32>,
    request: web::Json<VisitForm>,
) -> Result<HttpResponse> {
    match visit_service
        .update_visit(&user, path.into_inner(), request.into_inner())
        .await
    {
        Ok(visit) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            visit,
            "Visit updated successfully.",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/visits/{id}",
    tag = "visits",
    params(("id" = i32, Path, description = "Visit id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Visit deleted"),
        (status = 403, description = "Visit belongs to another customer"),
        (status = 404, description = "No such visit")
    )
)]
pub async fn delete_visit(
    visit_service: web::Data<VisitService>,
    user: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match visit_service.delete_visit(&user, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Visit deleted successfully."))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn visit_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/visits")
            .route("", web::get().to(list_visits))
            .route("", web::post().to(create_visit))
            .route("/{id}", web::get().to(get_visit))
            .route("/{id}", web::put().to(update_visit))
            .route("/{id}", web::delete().to(delete_visit)),
    );
}
