pub mod auth;
pub mod discount;
pub mod guest;
pub mod product;
pub mod testimonial;
