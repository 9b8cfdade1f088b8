pub mod auth;
pub mod customer;
pub mod me;
pub mod restaurant;
pub mod review;
pub mod visit;

use actix_web::web;

use crate::error::AppError;

pub use auth::auth_config;
pub use customer::customer_config;
pub use me::me_config;
pub use restaurant::restaurant_config;
pub use review::review_config;
pub use visit::visit_config;

/// Mounts every route under the enclosing `/api` scope.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .configure(auth_config)
    .configure(customer_config)
    .configure(restaurant_config)
    .configure(review_config)
    .configure(visit_config)
    .configure(me_config);
}
