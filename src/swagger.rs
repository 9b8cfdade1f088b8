use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{Cuisine, PricingCategory};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::token,
        handlers::auth::refresh,
        handlers::customer::list_customers,
        handlers::customer::get_customer,
        handlers::restaurant::list_restaurants,
        handlers::restaurant::create_restaurant,
        handlers::restaurant::get_restaurant,
        handlers::restaurant::update_restaurant,
        handlers::restaurant::delete_restaurant,
        handlers::restaurant::average_rating,
        handlers::restaurant::pricing_category,
        handlers::restaurant::restaurant_reviews,
        handlers::restaurant::submit_review,
        handlers::restaurant::add_visit,
        handlers::review::list_reviews,
        handlers::review::create_review,
        handlers::review::get_review,
        handlers::review::update_review,
        handlers::review::delete_review,
        handlers::visit::list_visits,
        handlers::visit::create_visit,
        handlers::visit::get_visit,
        handlers::visit::update_visit,
        handlers::visit::delete_visit,
        handlers::me::my_reviews,
        handlers::me::my_visits,
    ),
    components(
        schemas(
            RegisterRequest,
            TokenRequest,
            RefreshRequest,
            AuthResponse,
            CustomerResponse,
            Cuisine,
            RestaurantRequest,
            RestaurantResponse,
            RestaurantDetailResponse,
            AverageRatingResponse,
            PricingCategoryResponse,
            PricingCategory,
            ReviewForm,
            CreateReviewRequest,
            ReviewResponse,
            VisitForm,
            CreateVisitRequest,
            VisitResponse,
            VisitStatistics,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and token API"),
        (name = "customers", description = "Customer lookup API"),
        (name = "restaurants", description = "Restaurant API"),
        (name = "reviews", description = "Review API"),
        (name = "visits", description = "Visit API"),
        (name = "me", description = "Caller's own reviews and visits"),
    ),
    info(
        title = "Restaurant Reviews API",
        version = "1.0.0",
        description = "Restaurant reviews REST API documentation"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/restaurants/{id}/pricing-category"));
        assert!(paths.contains_key("/api/me/visits"));
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer_auth"))
        );
    }
}
