use actix_web::error::InternalError;
use actix_web::middleware::from_fn;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::middleware::guest_token;

pub mod discounts;
pub mod main;
pub mod products;
pub mod testimonials;

/// Register every route and the shared extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(main::show_index)
        .service(
            web::scope("/products")
                .wrap(from_fn(guest_token))
                .service(products::list_products)
                .service(products::suggest_products)
                .service(products::add_product)
                .service(products::show_product)
                .service(products::delete_product),
        )
        .service(
            web::scope("/discounts")
                .app_data(discount_json_config())
                .wrap(from_fn(guest_token))
                .service(discounts::list_discounts)
                .service(discounts::validate_discount),
        )
        .service(testimonials::list_feedback);
}

/// Malformed JSON bodies answer with the common failure envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = failure(
            HttpResponse::BadRequest(),
            &format!("Invalid JSON payload: {err}"),
        );
        InternalError::from_response(err, response).into()
    })
}

/// Discount bodies that fail to parse get the discount envelope instead.
fn discount_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected discount payload: {err}");
        let response = HttpResponse::BadRequest().json(json!({
            "valid": false,
            "message": "Invalid or Inactive Discount code",
        }));
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = failure(
            HttpResponse::BadRequest(),
            &format!("Invalid query string: {err}"),
        );
        InternalError::from_response(err, response).into()
    })
}

/// `{ success: false, message }` with the given status.
pub(crate) fn failure(
    mut builder: actix_web::HttpResponseBuilder,
    message: &str,
) -> HttpResponse {
    builder.json(json!({
        "success": false,
        "message": message,
    }))
}

/// Log a store failure and answer with a generic 500.
pub(crate) fn server_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    log::error!("{context}: {err}");
    failure(HttpResponse::InternalServerError(), "Server error")
}
