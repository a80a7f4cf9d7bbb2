use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::discount::{Discount as DomainDiscount, NewDiscount as DomainNewDiscount};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::discounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Discount {
    pub id: i32,
    pub code: String,
    pub discount_percent: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::discounts)]
pub struct NewDiscount<'a> {
    pub code: &'a str,
    pub discount_percent: i32,
    pub is_active: bool,
}

impl From<Discount> for DomainDiscount {
    fn from(value: Discount) -> Self {
        Self {
            id: value.id,
            code: value.code,
            discount_percent: value.discount_percent,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewDiscount> for NewDiscount<'a> {
    fn from(value: &'a DomainNewDiscount) -> Self {
        Self {
            code: value.code.as_str(),
            discount_percent: value.discount_percent,
            is_active: value.is_active,
        }
    }
}
