use actix_web::http::StatusCode;
use actix_web::{App, ResponseError, test, web};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};

use restaurant_reviews::{
    database::run_migrations,
    handlers,
    middlewares::AuthMiddleware,
    services::*,
    utils::JwtService,
};

async fn test_pool() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);
    let pool = Database::connect(options).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

macro_rules! test_app {
    ($pool:expr) => {{
        let pool: DatabaseConnection = $pool;
        let jwt_service = JwtService::new("test-secret", 300, 86400);
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service.clone()))
                .app_data(web::Data::new(AuthService::new(pool.clone(), jwt_service)))
                .app_data(web::Data::new(CustomerService::new(pool.clone())))
                .app_data(web::Data::new(RestaurantService::new(pool.clone())))
                .app_data(web::Data::new(ReviewService::new(pool.clone())))
                .app_data(web::Data::new(VisitService::new(pool.clone())))
                .service(web::scope("/api").configure(handlers::api_config)),
        )
        .await
    }};
}

macro_rules! register_tokens {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({
                "username": $username,
                "email": format!("{}@example.com", $username),
                "password1": "testpassword",
                "password2": "testpassword",
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["data"].clone()
    }};
}

macro_rules! register {
    ($app:expr, $username:expr) => {{
        let auth = register_tokens!($app, $username);
        auth["access_token"].as_str().unwrap().to_string()
    }};
}

macro_rules! create_restaurant {
    ($app:expr, $token:expr, $name:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/restaurants")
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .set_json(json!({
                "name": $name,
                "cuisine": "asian_cuisine",
                "address": "123 Test Street",
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["data"]["id"].as_i64().unwrap()
    }};
}

#[actix_web::test]
async fn test_review_flow_updates_aggregates() {
    let app = test_app!(test_pool().await);

    register!(app, "testuser");

    let req = test::TestRequest::post()
        .uri("/api/token")
        .set_json(json!({"username": "testuser", "password": "testpassword"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let restaurant_id = create_restaurant!(app, token, "Test Restaurant");

    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/{restaurant_id}/review"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"rating": 4, "pricing": "moderate", "comment": "Great food"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/restaurants/{restaurant_id}/average-rating"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["average_rating"], json!(4.0));

    let req = test::TestRequest::get()
        .uri(&format!("/api/restaurants/{restaurant_id}/pricing-category"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pricing_category_evaluation"], json!("moderate"));

    // a second submission updates the existing review
    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/{restaurant_id}/review"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"rating": 2}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/restaurants/{restaurant_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["restaurant"]["average_rating"], json!(2.0));
    assert_eq!(body["data"]["my_visits"]["visit_count"], json!(0));

    let req = test::TestRequest::get().uri("/api/me/reviews").to_request();
    let resp = test::try_call_service(&app, req).await;
    let status = match resp {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_mutation_requires_token() {
    let app = test_app!(test_pool().await);

    let req = test::TestRequest::post()
        .uri("/api/restaurants")
        .set_json(json!({"name": "Anonymous", "address": "Nowhere"}))
        .to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(
        err.as_response_error().status_code(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get().uri("/api/restaurants").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_foreign_edit_forbidden_and_unknown_not_found() {
    let app = test_app!(test_pool().await);

    let owner = register!(app, "owner");
    let other = register!(app, "other");
    let restaurant_id = create_restaurant!(app, owner, "Owned Restaurant");

    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/{restaurant_id}"))
        .insert_header(("Authorization", format!("Bearer {other}")))
        .set_json(json!({"name": "Hijacked", "address": "Elsewhere"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/restaurants/9999")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

#[actix_web::test]
async fn test_duplicate_visit_date_rejected() {
    let app = test_app!(test_pool().await);

    let token = register!(app, "testuser");
    let restaurant_id = create_restaurant!(app, token, "Test Restaurant");

    let visit = |date: &str| {
        test::TestRequest::post()
            .uri(&format!("/api/restaurants/{restaurant_id}/visits"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"date": date, "spending": "25.50"}))
            .to_request()
    };

    let resp = test::call_service(&app, visit("2024-01-20")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, visit("2024-01-20")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], json!("CONSTRAINT_VIOLATION"));

    let resp = test::call_service(&app, visit("2024-01-21")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["spending"], json!("25.50"));
    assert_eq!(body["data"]["total_spending_at_restaurant"], json!("51.00"));
}

#[actix_web::test]
async fn test_register_rejects_mismatched_passwords() {
    let app = test_app!(test_pool().await);

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": "testuser",
            "password1": "testpassword",
            "password2": "otherpassword",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["fields"]["password2"].is_array());
}

#[actix_web::test]
async fn test_customer_is_taken_from_token() {
    let app = test_app!(test_pool().await);

    let owner = register!(app, "owner");
    let auth = register_tokens!(app, "diner");
    let token = auth["access_token"].as_str().unwrap().to_string();
    let diner_id = auth["customer"]["id"].as_i64().unwrap();
    let restaurant_id = create_restaurant!(app, owner, "Test Restaurant");

    let review = || {
        test::TestRequest::post()
            .uri("/api/reviews")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"restaurant": restaurant_id, "rating": 4, "customer": 99}))
            .to_request()
    };

    let resp = test::call_service(&app, review()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["customer"], json!(diner_id));
    assert_eq!(body["data"]["pricing"], json!("moderate"));

    let resp = test::call_service(&app, review()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], json!("CONSTRAINT_VIOLATION"));

    let req = test::TestRequest::post()
        .uri("/api/visits")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "restaurant": restaurant_id,
            "date": "2024-02-01",
            "spending": 3.5,
            "customer": 99,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["customer"], json!(diner_id));
    assert_eq!(body["data"]["spending"], json!("3.50"));

    let req = test::TestRequest::get()
        .uri("/api/me/visits")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let visits = body["data"].as_array().unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0]["restaurant"], json!(restaurant_id));

    let req = test::TestRequest::get()
        .uri("/api/customers?query=DINER")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let customers = body["data"].as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["username"], json!("diner"));
}

#[actix_web::test]
async fn test_refresh_issues_new_pair() {
    let app = test_app!(test_pool().await);

    let auth = register_tokens!(app, "testuser");
    let refresh = auth["refresh_token"].as_str().unwrap().to_string();
    let access = auth["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/token/refresh")
        .set_json(json!({"refresh": refresh}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["customer"]["username"], json!("testuser"));
    let new_access = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/me/reviews")
        .insert_header(("Authorization", format!("Bearer {new_access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // an access token is not accepted as a refresh token
    let req = test::TestRequest::post()
        .uri("/api/token/refresh")
        .set_json(json!({"refresh": access}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
