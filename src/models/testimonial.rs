use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::testimonial::{
    NewTestimonial as DomainNewTestimonial, Testimonial as DomainTestimonial,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::testimonials)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Testimonial {
    pub id: i32,
    pub name: String,
    pub message: String,
    pub rating: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::testimonials)]
pub struct NewTestimonial<'a> {
    pub name: &'a str,
    pub message: &'a str,
    pub rating: i32,
}

impl From<Testimonial> for DomainTestimonial {
    fn from(value: Testimonial) -> Self {
        Self {
            id: value.id,
            name: value.name,
            message: value.message,
            rating: value.rating,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewTestimonial> for NewTestimonial<'a> {
    fn from(value: &'a DomainNewTestimonial) -> Self {
        Self {
            name: value.name.as_str(),
            message: value.message.as_str(),
            rating: value.rating,
        }
    }
}
