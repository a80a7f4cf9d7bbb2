use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use arts_shop::config::ServerConfig;
use arts_shop::domain::auth::CredentialVerifier;
use arts_shop::domain::discount::demo_discounts;
use arts_shop::domain::guest::GUEST_COOKIE;
use arts_shop::domain::testimonial::NewTestimonial;
use arts_shop::repository::{DieselRepository, DiscountWriter, TestimonialWriter};
use arts_shop::routes;
use arts_shop::services::auth::JwtVerifier;

mod common;

fn server_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| match key {
        "ADMIN_JWT_SECRET" => Some(common::JWT_SECRET.to_string()),
        _ => None,
    })
    .expect("config")
}

fn verifier() -> web::Data<dyn CredentialVerifier> {
    let verifier: Arc<dyn CredentialVerifier> =
        Arc::new(JwtVerifier::new(common::JWT_SECRET.as_bytes()));
    web::Data::from(verifier)
}

macro_rules! init_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::<DieselRepository>::new($repo))
                .app_data(web::Data::new(server_config()))
                .app_data(verifier())
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn index_reports_liveness() {
    let test_db = common::TestDb::new("api_index.db");
    let app = init_app!(test_db.repo());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Backend API is running");
}

#[actix_web::test]
async fn guest_cookie_is_issued_once_and_echoed() {
    let test_db = common::TestDb::new("api_guest_cookie.db");
    let app = init_app!(test_db.repo());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/products").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == GUEST_COOKIE)
        .map(|cookie| cookie.into_owned())
        .expect("guest cookie issued");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_eq!(cookie.path(), Some("/"));
    assert!(cookie.max_age().is_some());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["guestToken"], cookie.value());

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/discounts")
            .cookie(Cookie::new(GUEST_COOKIE, cookie.value().to_string()))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.response()
            .cookies()
            .all(|reissued| reissued.name() != GUEST_COOKIE)
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["guestToken"], cookie.value());
}

#[actix_web::test]
async fn empty_catalog_is_not_an_error() {
    let test_db = common::TestDb::new("api_empty_catalog.db");
    let app = init_app!(test_db.repo());

    let req = test::TestRequest::get()
        .uri("/products?category=resin&min=abc&max=10&page=x&limit=y")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["status"], 200);
    assert_eq!(body["data"]["count"], 0);
    assert_eq!(body["data"]["data"], json!([]));
    assert_eq!(body["data"]["message"], "No products found");
    assert_eq!(body["pagination"]["totalItems"], 0);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[actix_web::test]
async fn listing_applies_filters_sort_and_pagination() {
    let test_db = common::TestDb::new("api_listing.db");
    let repo = test_db.repo();
    common::seed_catalog(&repo);
    let app = init_app!(repo);

    let req = test::TestRequest::get()
        .uri("/products?sort=high-to-low&page=1&limit=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["data"][0]["id"], 2);
    assert_eq!(body["data"]["data"][0]["type"], "canvas");
    assert_eq!(body["data"]["data"][0]["isSale"], true);
    assert_eq!(body["data"]["data"][1]["id"], 4);
    assert_eq!(body["data"]["message"], "Products fetched successfully");
    assert_eq!(
        body["pagination"],
        json!({"totalItems": 5, "currentPage": 1, "pageSize": 2, "totalPages": 3})
    );

    let req = test::TestRequest::get()
        .uri("/products?category=Resin,Painting&available=true&sort=best-selling")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["data"][0]["id"], 1);
    assert_eq!(body["pagination"]["totalItems"], 1);
}

#[actix_web::test]
async fn suggestions_require_two_characters() {
    let test_db = common::TestDb::new("api_suggestions.db");
    let repo = test_db.repo();
    common::seed_catalog(&repo);
    let app = init_app!(repo);

    for uri in ["/products/suggestions", "/products/suggestions?search=r"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    let req = test::TestRequest::get()
        .uri("/products/suggestions?search=re")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["title"], "Mini Resin Coaster");
    assert_eq!(body["data"][1]["title"], "Ocean Resin Tray");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/products/suggestions?search=zz")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 204);
    assert_eq!(body["count"], 0);
}

#[actix_web::test]
async fn product_lookup_by_identifier() {
    let test_db = common::TestDb::new("api_lookup.db");
    let repo = test_db.repo();
    common::seed_catalog(&repo);
    let app = init_app!(repo);

    let req = test::TestRequest::get().uri("/products/4").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["title"], "Macrame Wall Art");
    assert_eq!(body["data"]["mostSeller"], true);

    for uri in ["/products/99", "/products/abc"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn add_product_requires_admin() {
    let test_db = common::TestDb::new("api_add_product_auth.db");
    let app = init_app!(test_db.repo());

    let payload = json!({"title": "Ocean Tray", "price": 1500, "category": "resin"});

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/addProducts")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized: Admin token missing");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/addProducts")
            .insert_header((
                header::AUTHORIZATION,
                common::bearer_token_with("admin", "some-other-secret-value-here", 3600),
            ))
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired token");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/addProducts")
            .insert_header((header::AUTHORIZATION, common::bearer_token("customer")))
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Forbidden: Admin access only");
}

#[actix_web::test]
async fn add_product_validates_and_creates() {
    let test_db = common::TestDb::new("api_add_product.db");
    let app = init_app!(test_db.repo());
    let token = common::bearer_token("admin");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/addProducts")
            .insert_header((header::AUTHORIZATION, token.clone()))
            .set_json(json!({"title": "", "price": -5, "category": "pottery"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors list")
        .iter()
        .filter_map(|issue| issue["field"].as_str())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"price"));
    assert!(fields.contains(&"category"));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/addProducts")
            .insert_header((header::AUTHORIZATION, token.clone()))
            .set_json(json!({
                "title": "Name Keychain",
                "price": 350,
                "category": "Crafts",
                "details": ["5cm"],
                "customizedOptions": [
                    {"key": "name", "label": "Name", "inputType": "text", "required": true}
                ]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["category"], "crafts");
    assert_eq!(body["data"]["customizationAllowed"], true);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/addProducts")
            .insert_header((header::AUTHORIZATION, token))
            .set_json(json!({"title": "name keychain", "price": 400, "category": "crafts"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product with this title already exists");
}

#[actix_web::test]
async fn add_product_reports_wrongly_typed_fields() {
    let test_db = common::TestDb::new("api_add_product_types.db");
    let app = init_app!(test_db.repo());
    let token = common::bearer_token("admin");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/addProducts")
            .insert_header((header::AUTHORIZATION, token.clone()))
            .set_json(json!({"title": "", "price": "cheap", "category": "resin", "isSale": 1}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation failed");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors list")
        .iter()
        .filter_map(|issue| issue["field"].as_str())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"price"));
    assert!(fields.contains(&"isSale"));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/addProducts")
            .insert_header((header::AUTHORIZATION, token))
            .set_json(json!({"title": "Clay Tray", "price": "1200", "category": "crafts", "isSale": "true", "saleDiscount": 10}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["price"], 1200.0);
    assert_eq!(body["data"]["isSale"], true);
}

#[actix_web::test]
async fn explicit_id_does_not_block_later_creations() {
    let test_db = common::TestDb::new("api_add_product_explicit_id.db");
    let app = init_app!(test_db.repo());
    let token = common::bearer_token("admin");

    for (payload, expected_id) in [
        (json!({"id": 1, "title": "Alpha", "price": 100, "category": "crafts"}), 1),
        (json!({"title": "Beta", "price": 100, "category": "crafts"}), 2),
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/products/addProducts")
                .insert_header((header::AUTHORIZATION, token.clone()))
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["id"], expected_id);
    }
}

#[actix_web::test]
async fn malformed_json_gets_failure_envelope() {
    let test_db = common::TestDb::new("api_malformed_json.db");
    let app = init_app!(test_db.repo());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/products/addProducts")
            .insert_header((header::AUTHORIZATION, common::bearer_token("admin")))
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"title\": ")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn delete_product_soft_deletes() {
    let test_db = common::TestDb::new("api_delete_product.db");
    let repo = test_db.repo();
    common::seed_catalog(&repo);
    let app = init_app!(repo);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/products/1").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let delete = || {
        test::TestRequest::delete()
            .uri("/products/1")
            .insert_header((header::AUTHORIZATION, common::bearer_token("admin")))
            .to_request()
    };

    let resp = test::call_service(&app, delete()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, delete()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/products/1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn discounts_list_and_validate() {
    let test_db = common::TestDb::new("api_discounts.db");
    let repo = test_db.repo();
    repo.replace_discounts(&demo_discounts()).expect("seed discounts");
    let app = init_app!(repo);

    let req = test::TestRequest::get().uri("/discounts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["guestToken"].is_string());
    assert_eq!(body["discounts"].as_array().map(Vec::len), Some(8));
    assert!(body["discounts"][0].get("id").is_none());

    let req = test::TestRequest::post()
        .uri("/discounts/validate")
        .set_json(json!({"code": "arts20"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["discount"], json!({"code": "ARTS20", "discountPercent": 20}));
    assert!(body["guestToken"].is_string());

    for code in ["WINTER25", "nope", "  "] {
        let req = test::TestRequest::post()
            .uri("/discounts/validate")
            .set_json(json!({ "code": code }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{code}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["message"], "Invalid or Inactive Discount code");
    }

    for payload in [r#"{"code": 123}"#, r#"{"code": "#] {
        let req = test::TestRequest::post()
            .uri("/discounts/validate")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["message"], "Invalid or Inactive Discount code");
    }
}

#[actix_web::test]
async fn feedback_lists_testimonials_newest_first() {
    let test_db = common::TestDb::new("api_feedback.db");
    let repo = test_db.repo();
    repo.create_testimonial(&NewTestimonial::new("Ananya", "Beautiful tray", 5))
        .expect("testimonial");
    repo.create_testimonial(&NewTestimonial::new("Rohit", "Quick delivery", 4))
        .expect("testimonial");
    let app = init_app!(repo);

    let req = test::TestRequest::get().uri("/feedback").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["name"], "Rohit");
    assert_eq!(body[1]["rating"], 5);
}
