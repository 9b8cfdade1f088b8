use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::customer_entity;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "testuser")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "test@example.com")]
    pub email: String,
    #[schema(example = "testpassword")]
    pub password1: String,
    #[schema(example = "testpassword")]
    pub password2: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenRequest {
    #[schema(example = "testuser")]
    pub username: String,
    #[schema(example = "testpassword")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerQuery {
    /// Case-insensitive substring matched against username and e-mail.
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

impl From<customer_entity::Model> for CustomerResponse {
    fn from(customer: customer_entity::Model) -> Self {
        Self {
            id: customer.id,
            username: customer.username,
            email: customer.email,
            date_joined: customer.date_joined,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub customer: CustomerResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Identity of the caller, attached to the request by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}
