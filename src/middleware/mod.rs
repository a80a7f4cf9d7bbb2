//! Request middleware and extractors shared by the HTTP routes.

pub mod admin;
pub mod guest;

pub use admin::AdminUser;
pub use guest::guest_token;
