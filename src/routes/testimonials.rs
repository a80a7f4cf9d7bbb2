use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::server_error;
use crate::services::testimonials;

#[get("/feedback")]
pub async fn list_feedback(repo: web::Data<DieselRepository>) -> impl Responder {
    match testimonials::list_testimonials(repo.get_ref()) {
        Ok(testimonials) => HttpResponse::Ok().json(testimonials),
        Err(err) => server_error("Failed to fetch feedback", err),
    }
}
