use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::domain::guest::GuestToken;
use crate::forms::discounts::ValidateDiscountForm;
use crate::repository::DieselRepository;
use crate::routes::server_error;
use crate::services::{ServiceError, discounts};

#[get("")]
pub async fn list_discounts(
    guest: GuestToken,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match discounts::list_active_discounts(repo.get_ref()) {
        Ok(discounts) => HttpResponse::Ok().json(json!({
            "guestToken": guest,
            "discounts": discounts,
        })),
        Err(err) => server_error("Failed to list discounts", err),
    }
}

#[post("/validate")]
pub async fn validate_discount(
    guest: GuestToken,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ValidateDiscountForm>,
) -> impl Responder {
    match discounts::validate_discount(repo.get_ref(), form) {
        Ok(discount) => HttpResponse::Ok().json(json!({
            "valid": true,
            "guestToken": guest,
            "discount": {
                "code": discount.code,
                "discountPercent": discount.discount_percent,
            },
            "message": "Discount code is valid",
        })),
        Err(ServiceError::NotFound) => HttpResponse::BadRequest().json(json!({
            "valid": false,
            "message": "Invalid or Inactive Discount code",
        })),
        Err(err) => {
            log::error!("Failed to validate discount: {err}");
            HttpResponse::InternalServerError().json(json!({
                "valid": false,
                "message": "Server error",
            }))
        }
    }
}
