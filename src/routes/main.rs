use actix_web::{HttpResponse, Responder, get};

#[get("/")]
pub async fn show_index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Backend API is running")
}
