//! Route table.
//!
//! ```text
//! /health                                   public
//! /api/v1
//!   ├── categories, products, campaigns,    GET public
//!   │   discount-rules                      POST / PUT / DELETE admin
//!   ├── auth/{register,login,refresh}       public
//!   ├── user/profile                        auth
//!   ├── carts, cart-items                   auth (GET /cart-items admin)
//!   └── discounts/{strategy}/{cart_id}      public
//! ```

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    auth, campaign, cart, cart_item, category, discount, discount_rule, health, product,
};
use crate::middleware::{require_admin, require_auth};
use crate::AppState;

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(category::list))
        .route("/categories/{id}", get(category::get))
        .route("/products", get(product::list))
        .route("/products/{id}", get(product::get))
        .route("/campaigns", get(campaign::list))
        .route("/campaigns/{id}", get(campaign::get))
        .route("/discount-rules", get(discount_rule::list))
        .route("/discount-rules/{id}", get(discount_rule::get))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/discounts/fixed-amount/{cart_id}", get(discount::fixed_amount))
        .route("/discounts/percentage/{cart_id}", get(discount::percentage))
        .route("/discounts/category/{cart_id}", get(discount::category))
        .route("/discounts/points/{cart_id}", get(discount::points))
        .route("/discounts/special/{cart_id}", get(discount::special))
}

fn authenticated_routes() -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(auth::profile))
        .route("/carts", get(cart::list_own).post(cart::create))
        .route(
            "/carts/{id}",
            get(cart::get).put(cart::update).delete(cart::delete),
        )
        .route("/cart-items", post(cart_item::create))
        // GET takes a cart id, PUT / DELETE an item id
        .route(
            "/cart-items/{id}",
            get(cart_item::list_by_cart)
                .put(cart_item::update)
                .delete(cart_item::delete),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", post(category::create))
        .route("/categories/{id}", put(category::update).delete(category::delete))
        .route("/products", post(product::create))
        .route("/products/{id}", put(product::update).delete(product::delete))
        .route("/campaigns", post(campaign::create))
        .route("/campaigns/{id}", put(campaign::update).delete(campaign::delete))
        .route("/discount-rules", post(discount_rule::create))
        .route(
            "/discount-rules/{id}",
            put(discount_rule::update).delete(discount_rule::delete),
        )
        .route("/cart-items", get(cart_item::list))
        .route_layer(from_fn(require_admin))
}

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    // route_layer: guards run only for matched routes, so unknown paths
    // still 404 instead of 401
    let protected = authenticated_routes()
        .merge(admin_routes())
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let api = public_routes().merge(protected);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CatchPanicLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use playtowin_core::Role;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login(app: &Router, email: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": email, "password": "secret-pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["access_token"].as_str().unwrap().to_string()
    }

    async fn admin_app() -> (Router, String) {
        let state = test_support::state().await;
        test_support::user(&state, "admin@example.com", Role::Admin).await;
        let app = build_router(state);
        let token = login(&app, "admin@example.com").await;
        (app, token)
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_support::state().await);
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["database"], true);
    }

    #[tokio::test]
    async fn test_discount_routes_end_to_end() {
        let state = test_support::state().await;
        let cart_id =
            test_support::cart_with_items(&state, &[("shoes", 2, 30_000), ("hats", 1, 40_000)]).await;
        let app = build_router(state);

        let cases = [
            (format!("/api/v1/discounts/percentage/{}?percentage=10", cart_id), 900.0),
            (format!("/api/v1/discounts/points/{}?points=500", cart_id), 800.0),
            (format!("/api/v1/discounts/special/{}?threshold=300&discount=50", cart_id), 850.0),
            (format!("/api/v1/discounts/fixed-amount/{}?amount=2000", cart_id), 0.0),
            (format!("/api/v1/discounts/category/{}?category=hats&percentage=50", cart_id), 800.0),
            (format!("/api/v1/discounts/fixed-amount/{}?amount=abc", cart_id), 1000.0),
        ];

        for (uri, expected) in cases {
            let (status, body) = send(&app, Method::GET, &uri, None, None).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["status"], true);
            assert_eq!(body["message"], "Discount calculated successfully");
            assert_eq!(body["data"]["final_price"].as_f64(), Some(expected), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_discount_errors_are_500() {
        let state = test_support::state().await;
        let cart_id = test_support::cart_with_items(&state, &[("shoes", 1, 10_000)]).await;
        let app = build_router(state);

        let uri = format!("/api/v1/discounts/percentage/{}?percentage=150", cart_id);
        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], false);
        assert_eq!(body["code"], 500);
        assert_eq!(body["message"], "discount percentage must be between 0 and 100");
        assert!(body["data"].is_null());

        let (status, body) =
            send(&app, Method::GET, "/api/v1/discounts/points/unknown?points=1", None, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "cart is empty");
    }

    #[tokio::test]
    async fn test_discount_query_boundaries_survive_rounding() {
        let state = test_support::state().await;
        let cart_id = test_support::cart_with_items(&state, &[("shoes", 1, 100_000)]).await;
        let app = build_router(state);

        let rejected = [
            (format!("/api/v1/discounts/fixed-amount/{}?amount=-0.004", cart_id), "discount amount is invalid"),
            (
                format!("/api/v1/discounts/percentage/{}?percentage=100.004", cart_id),
                "discount percentage must be between 0 and 100",
            ),
            (
                format!("/api/v1/discounts/percentage/{}?percentage=inf", cart_id),
                "discount percentage must be between 0 and 100",
            ),
        ];
        for (uri, message) in rejected {
            let (status, body) = send(&app, Method::GET, &uri, None, None).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            assert_eq!(body["message"], message, "{}", uri);
        }

        let accepted = [
            (format!("/api/v1/discounts/special/{}?threshold=0.004&discount=1", cart_id), 0.0),
            (format!("/api/v1/discounts/fixed-amount/{}?amount=inf", cart_id), 0.0),
            (format!("/api/v1/discounts/special/{}?threshold=Infinity&discount=1", cart_id), 1000.0),
        ];
        for (uri, expected) in accepted {
            let (status, body) = send(&app, Method::GET, &uri, None, None).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["data"]["final_price"].as_f64(), Some(expected), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_oversized_cart_lines() {
        let state = test_support::state().await;
        test_support::user(&state, "ann@example.com", Role::User).await;
        let app = build_router(state);
        let ann = login(&app, "ann@example.com").await;

        let (_, body) = send(&app, Method::POST, "/api/v1/carts", Some(&ann), Some(json!({}))).await;
        let cart_id = body["data"]["id"].as_str().unwrap().to_string();
        let line = |unit: i64, total: Option<i64>| {
            json!({
                "cart_id": cart_id,
                "product_id": "00000000-0000-4000-8000-000000000001",
                "quantity": 2,
                "category": "bulk",
                "unit_price_cents": unit,
                "total_price_cents": total
            })
        };

        let (status, body) =
            send(&app, Method::POST, "/api/v1/cart-items", Some(&ann), Some(line(i64::MAX, None))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["data"].is_null());

        for _ in 0..2 {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/v1/cart-items",
                Some(&ann),
                Some(line(1, Some(i64::MAX))),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let uri = format!("/api/v1/discounts/fixed-amount/{}?amount=0", cart_id);
        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "cart total is too large");
    }

    #[tokio::test]
    async fn test_register_login_profile() {
        let app = build_router(test_support::state().await);
        let registration = json!({"name": "Bob", "email": "bob@example.com", "password": "secret-pw"});

        let (status, body) =
            send(&app, Method::POST, "/api/v1/auth/register", None, Some(registration.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        let refresh_token = body["data"]["refresh_token"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, Method::POST, "/api/v1/auth/register", None, Some(registration)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "User already exists");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/refresh",
            None,
            Some(json!({"refresh_token": refresh_token})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Token refreshed successfully");

        let token = login(&app, "bob@example.com").await;
        let (status, body) = send(&app, Method::GET, "/api/v1/user/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "bob@example.com");
        assert_eq!(body["data"]["role"], "user");
        assert!(body["data"].get("password_hash").is_none());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "bob@example.com", "password": "nope-nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_auth_guards() {
        let state = test_support::state().await;
        test_support::user(&state, "ann@example.com", Role::User).await;
        let app = build_router(state);

        let (status, body) = send(&app, Method::GET, "/api/v1/user/profile", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Missing authorization header");

        let request = Request::builder()
            .uri("/api/v1/user/profile")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, Method::GET, "/api/v1/user/profile", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token");

        let token = login(&app, "ann@example.com").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/categories",
            Some(&token),
            Some(json!({"name": "Shoes", "description": "Footwear"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Insufficient permissions");

        let (status, _) = send(&app, Method::GET, "/api/v1/cart-items", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Public reads need no token
        let (status, body) = send(&app, Method::GET, "/api/v1/categories", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Categories retrieved successfully");
    }

    #[tokio::test]
    async fn test_admin_category_crud() {
        let (app, token) = admin_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/categories",
            Some(&token),
            Some(json!({"name": "Shoes", "description": "Footwear"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["code"], 201);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/categories/{}", id);
        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({"name": "Sneakers", "description": "Footwear"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Sneakers");

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Category not found");
    }

    #[tokio::test]
    async fn test_bad_bodies_are_400() {
        let (app, token) = admin_app().await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/products")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Invalid request payload");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/products",
            Some(&token),
            Some(json!({
                "name": "Runner", "description": "d", "content": "c",
                "image": "i.png", "price_cents": 0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "price_cents must be positive");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/discount-rules",
            Some(&token),
            Some(json!({
                "campaign_id": "00000000-0000-4000-8000-000000000000",
                "discount_type": "percentage",
                "percentage_bps": 1000
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_campaign_and_rule_flow() {
        let (app, token) = admin_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/campaigns",
            Some(&token),
            Some(json!({"name": "Summer", "category": "shoes"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["is_active"], true);
        let campaign_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/discount-rules",
            Some(&token),
            Some(json!({
                "campaign_id": campaign_id,
                "discount_type": "category",
                "percentage_bps": 1500,
                "item_category": "shoes"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Discount Rule has been created");
        assert_eq!(body["data"]["campaign_name"], "Summer");

        let uri = format!("/api/v1/discount-rules?campaign_id={}", campaign_id);
        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_cart_flow_and_ownership() {
        let state = test_support::state().await;
        test_support::user(&state, "ann@example.com", Role::User).await;
        test_support::user(&state, "eve@example.com", Role::User).await;
        let app = build_router(state);
        let ann = login(&app, "ann@example.com").await;
        let eve = login(&app, "eve@example.com").await;

        let (status, body) =
            send(&app, Method::POST, "/api/v1/carts", Some(&ann), Some(json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Cart has been created");
        let cart_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/cart-items",
            Some(&ann),
            Some(json!({
                "cart_id": cart_id,
                "product_id": "00000000-0000-4000-8000-000000000001",
                "quantity": 2,
                "category": "shoes",
                "unit_price_cents": 30000
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["total_price_cents"], 60000);

        let items_uri = format!("/api/v1/cart-items/{}", cart_id);
        let (status, body) = send(&app, Method::GET, &items_uri, Some(&ann), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Cart Items have been retrieved");
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

        let (status, _) = send(&app, Method::GET, &items_uri, Some(&eve), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, Method::GET, "/api/v1/carts", Some(&eve), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

        let uri = format!("/api/v1/discounts/percentage/{}?percentage=10", cart_id);
        let (_, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(body["data"]["final_price"].as_f64(), Some(540.0));

        let cart_uri = format!("/api/v1/carts/{}", cart_id);
        let (status, _) = send(&app, Method::DELETE, &cart_uri, Some(&ann), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, &cart_uri, Some(&ann), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
