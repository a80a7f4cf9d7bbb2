use std::future::{Ready, ready};

use actix_web::body::MessageBody;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::error::ErrorInternalServerError;
use actix_web::middleware::Next;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, web};

use crate::config::ServerConfig;
use crate::domain::guest::{GUEST_COOKIE, GUEST_TOKEN_TTL_DAYS, GuestToken};

/// Attach a guest token to every request, issuing a cookie for clients that
/// do not present one yet. Existing tokens are passed through untouched.
pub async fn guest_token(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let presented = req
        .cookie(GUEST_COOKIE)
        .and_then(|cookie| GuestToken::from_cookie(cookie.value()));

    let (token, issued) = match presented {
        Some(token) => (token, false),
        None => (GuestToken::issue(), true),
    };

    let secure = req
        .app_data::<web::Data<ServerConfig>>()
        .map(|config| config.production)
        .unwrap_or(false);

    req.extensions_mut().insert(token.clone());

    let mut res = next.call(req).await?;

    if issued {
        res.response_mut().add_cookie(&guest_cookie(&token, secure))?;
    }

    Ok(res)
}

fn guest_cookie(token: &GuestToken, secure: bool) -> Cookie<'static> {
    Cookie::build(GUEST_COOKIE, token.as_str().to_owned())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::days(GUEST_TOKEN_TTL_DAYS))
        .finish()
}

/// Extracts the token stored by [`guest_token`].
impl FromRequest for GuestToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req.extensions().get::<GuestToken>().cloned();

        ready(token.ok_or_else(|| {
            log::error!("Guest token requested on a route without the guest middleware");
            ErrorInternalServerError("Server error")
        }))
    }
}
