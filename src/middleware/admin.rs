use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use serde_json::json;

use crate::domain::auth::{AdminClaims, AuthError, CredentialVerifier};
use crate::services::auth::authorize_admin;

/// Caller holding a verified admin credential.
///
/// Extraction fails with [`AuthError`] before the request body is read, so
/// unauthenticated writes never reach validation.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AdminClaims);

impl FromRequest for AdminUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let result = match req.app_data::<web::Data<dyn CredentialVerifier>>() {
            Some(verifier) => authorize_admin(verifier.get_ref(), header).map(AdminUser),
            None => {
                log::error!("No credential verifier registered");
                Err(AuthError::InvalidCredential)
            }
        };

        ready(result)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential | AuthError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": self.to_string(),
        }))
    }
}
