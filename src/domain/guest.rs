use serde::Serialize;
use uuid::Uuid;

/// Name of the cookie carrying the guest token.
pub const GUEST_COOKIE: &str = "guestToken";

/// Days a guest cookie stays valid in the browser.
pub const GUEST_TOKEN_TTL_DAYS: i64 = 7;

/// Opaque identifier correlating an anonymous visitor across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GuestToken(String);

impl GuestToken {
    /// Mint a fresh random token.
    pub fn issue() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a token presented by the client, ignoring blank values.
    pub fn from_cookie(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
