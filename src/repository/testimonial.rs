use diesel::prelude::*;

use crate::domain::testimonial::{
    NewTestimonial as DomainNewTestimonial, Testimonial as DomainTestimonial,
};
use crate::models::testimonial::{NewTestimonial as DbNewTestimonial, Testimonial as DbTestimonial};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, TestimonialReader, TestimonialWriter};
use crate::schema::testimonials;

impl TestimonialReader for DieselRepository {
    fn list_testimonials(&self) -> RepositoryResult<Vec<DomainTestimonial>> {
        let mut conn = self.conn()?;

        let rows = testimonials::table
            .order((testimonials::created_at.desc(), testimonials::id.desc()))
            .load::<DbTestimonial>(&mut conn)?;

        Ok(rows.into_iter().map(DomainTestimonial::from).collect())
    }
}

impl TestimonialWriter for DieselRepository {
    fn create_testimonial(
        &self,
        new_testimonial: &DomainNewTestimonial,
    ) -> RepositoryResult<DomainTestimonial> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(testimonials::table)
            .values(&DbNewTestimonial::from(new_testimonial))
            .get_result::<DbTestimonial>(&mut conn)?;

        Ok(created.into())
    }
}
