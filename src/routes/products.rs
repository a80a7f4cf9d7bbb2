use actix_web::{HttpResponse, Responder, delete, get, post, web};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::guest::GuestToken;
use crate::forms::FieldIssue;
use crate::forms::products::{AddProductForm, ProductFormError};
use crate::middleware::AdminUser;
use crate::repository::DieselRepository;
use crate::routes::{failure, server_error};
use crate::services::{ServiceError, products};

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub search: Option<String>,
}

#[get("")]
pub async fn list_products(
    params: web::Query<products::ProductsQuery>,
    guest: GuestToken,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), &params) {
        Ok(page) => {
            let message = if page.products.is_empty() {
                "No products found"
            } else {
                "Products fetched successfully"
            };
            HttpResponse::Ok().json(json!({
                "data": {
                    "status": 200,
                    "count": page.products.len(),
                    "guestToken": guest,
                    "data": page.products,
                    "message": message,
                },
                "pagination": page.pagination,
            }))
        }
        Err(err) => server_error("Failed to list products", err),
    }
}

#[get("/suggestions")]
pub async fn suggest_products(
    params: web::Query<SuggestionQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::suggest_products(repo.get_ref(), params.search.as_deref()) {
        Ok(suggestions) if suggestions.is_empty() => HttpResponse::Ok().json(json!({
            "status": 204,
            "count": 0,
            "data": suggestions,
            "message": "No matching products found",
        })),
        Ok(suggestions) => HttpResponse::Ok().json(json!({
            "status": 200,
            "count": suggestions.len(),
            "data": suggestions,
            "message": "Suggestions fetched successfully",
        })),
        Err(ServiceError::Form(message)) => failure(HttpResponse::BadRequest(), &message),
        Err(err) => server_error("Failed to suggest products", err),
    }
}

#[post("/addProducts")]
pub async fn add_product(
    _admin: AdminUser,
    repo: web::Data<DieselRepository>,
    web::Json(body): web::Json<Value>,
) -> impl Responder {
    let form = match AddProductForm::from_json(body) {
        Ok(form) => form,
        Err(ProductFormError::Validation(issues)) => return validation_failure(issues),
    };

    match products::create_product(repo.get_ref(), form) {
        Ok(product) => HttpResponse::Created().json(json!({
            "success": true,
            "message": "Product added successfully",
            "data": product,
        })),
        Err(ServiceError::Validation(issues)) => validation_failure(issues),
        Err(ServiceError::Conflict(message)) => failure(HttpResponse::BadRequest(), &message),
        Err(err) => server_error("Failed to add product", err),
    }
}

fn validation_failure(issues: Vec<FieldIssue>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "success": false,
        "message": "Validation failed",
        "errors": issues,
    }))
}

#[get("/{id}")]
pub async fn show_product(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::get_product(repo.get_ref(), &path.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(json!({
            "status": 200,
            "data": product,
            "message": "Product fetched successfully",
        })),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().json(json!({
            "status": 404,
            "message": "Product not found",
        })),
        Err(err) => server_error("Failed to fetch product", err),
    }
}

#[delete("/{id}")]
pub async fn delete_product(
    _admin: AdminUser,
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::remove_product(repo.get_ref(), &path.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Product deleted successfully",
        })),
        Err(ServiceError::NotFound) => failure(HttpResponse::NotFound(), "Product not found"),
        Err(err) => server_error("Failed to delete product", err),
    }
}
