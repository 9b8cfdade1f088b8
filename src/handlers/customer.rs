use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::CustomerService;

#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "customers",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Customers matching the query", body = [CustomerResponse])
    )
)]
pub async fn list_customers(
    customer_service: web::Data<CustomerService>,
    query: web::Query<CustomerQuery>,
) -> Result<HttpResponse> {
    match customer_service.search_customers(&query).await {
        Ok(customers) => Ok(HttpResponse::Ok().json(ApiResponse::success(customers))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/customers/{username}",
    tag = "customers",
    params(("username" = String, Path, description = "Customer username")),
    responses(
        (status = 200, description = "Customer profile", body = CustomerResponse),
        (status = 404, description = "No such customer")
    )
)]
pub async fn get_customer(
    customer_service: web::Data<CustomerService>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    match customer_service.get_customer(&username).await {
        Ok(customer) => Ok(HttpResponse::Ok().json(ApiResponse::success(customer))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn customer_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::get().to(list_customers))
            .route("/{username}", web::get().to(get_customer)),
    );
}
