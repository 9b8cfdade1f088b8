use crate::entities::customer_entity as customers;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_string();

        let mut errors = FieldErrors::new();
        validate_username(&mut errors, &username);
        validate_email(&mut errors, &email);
        if request.password1 != request.password2 {
            errors.add("password2", "The two password fields didn't match.");
        }
        validate_password(&mut errors, "password2", &request.password2, &username);

        if errors.get("username").is_none() && self.find_by_username(&username).await?.is_some() {
            errors.add("username", "A user with that username already exists.");
        }
        errors.into_result()?;

        let password_hash = hash_password(&request.password1)?;

        let customer = customers::ActiveModel {
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Customer registered: id={} username={}", customer.id, customer.username);

        self.issue_tokens(customer)
    }

    pub async fn login(&self, request: TokenRequest) -> AppResult<AuthResponse> {
        let invalid =
            || AppError::AuthError("No active account found with the given credentials".to_string());

        let customer = self
            .find_by_username(&request.username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &customer.password_hash)? {
            return Err(invalid());
        }

        self.issue_tokens(customer)
    }

    pub async fn refresh_token(&self, request: RefreshRequest) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(&request.refresh)?;

        let customer = customers::Entity::find_by_id(claims.customer_id()?)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Customer no longer exists".to_string()))?;

        self.issue_tokens(customer)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<customers::Model>> {
        Ok(customers::Entity::find()
            .filter(customers::Column::Username.eq(username))
            .one(&self.pool)
            .await?)
    }

    fn issue_tokens(&self, customer: customers::Model) -> AppResult<AuthResponse> {
        let access_token = self.jwt_service.generate_access_token(
            customer.id,
            &customer.username,
            &customer.email,
        )?;
        let refresh_token = self.jwt_service.generate_refresh_token(
            customer.id,
            &customer.username,
            &customer.email,
        )?;

        Ok(AuthResponse {
            customer: CustomerResponse::from(customer),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
