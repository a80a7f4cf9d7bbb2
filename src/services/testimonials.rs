use crate::domain::testimonial::Testimonial;
use crate::repository::TestimonialReader;
use crate::services::{ServiceError, ServiceResult};

/// All testimonials, newest first.
pub fn list_testimonials<R>(repo: &R) -> ServiceResult<Vec<Testimonial>>
where
    R: TestimonialReader + ?Sized,
{
    repo.list_testimonials().map_err(ServiceError::from)
}
