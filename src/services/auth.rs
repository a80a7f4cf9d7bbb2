//! Admin credential verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::ADMIN_ROLE;
use crate::domain::auth::{AdminClaims, AuthError, CredentialVerifier};

/// Verifies HS256-signed admin tokens.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier").finish()
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, credential: &str) -> Result<AdminClaims, AuthError> {
        jsonwebtoken::decode::<AdminClaims>(credential, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                log::warn!("Rejected admin credential: {err}");
                AuthError::InvalidCredential
            })
    }
}

/// Check an `Authorization` header value and require the admin role.
pub fn authorize_admin<V>(verifier: &V, header: Option<&str>) -> Result<AdminClaims, AuthError>
where
    V: CredentialVerifier + ?Sized,
{
    let token = header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingCredential)?;

    let claims = verifier.verify(token)?;

    if claims.role != ADMIN_ROLE {
        return Err(AuthError::Forbidden);
    }

    Ok(claims)
}
