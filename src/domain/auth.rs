use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a verified admin credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Role granted by the issuer. Missing roles deserialize as empty.
    #[serde(default)]
    pub role: String,
    pub exp: u64,
}

/// Reasons an admin credential is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Unauthorized: Admin token missing")]
    MissingCredential,
    #[error("Invalid or expired token")]
    InvalidCredential,
    #[error("Forbidden: Admin access only")]
    Forbidden,
}

/// Capability check over an opaque admin credential.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credential: &str) -> Result<AdminClaims, AuthError>;
}
