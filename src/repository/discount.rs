use diesel::prelude::*;

use crate::domain::discount::{Discount as DomainDiscount, NewDiscount as DomainNewDiscount};
use crate::models::discount::{Discount as DbDiscount, NewDiscount as DbNewDiscount};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, DiscountReader, DiscountWriter, lower};
use crate::schema::discounts;

impl DiscountReader for DieselRepository {
    fn list_active_discounts(&self) -> RepositoryResult<Vec<DomainDiscount>> {
        let mut conn = self.conn()?;

        let rows = discounts::table
            .filter(discounts::is_active.eq(true))
            .order(discounts::id.asc())
            .load::<DbDiscount>(&mut conn)?;

        Ok(rows.into_iter().map(DomainDiscount::from).collect())
    }

    fn find_active_discount(&self, code: &str) -> RepositoryResult<Option<DomainDiscount>> {
        let mut conn = self.conn()?;

        let discount = discounts::table
            .filter(lower(discounts::code).eq(code.trim().to_ascii_lowercase()))
            .filter(discounts::is_active.eq(true))
            .first::<DbDiscount>(&mut conn)
            .optional()?;

        Ok(discount.map(DomainDiscount::from))
    }
}

impl DiscountWriter for DieselRepository {
    fn replace_discounts(&self, new_discounts: &[DomainNewDiscount]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let rows: Vec<DbNewDiscount> = new_discounts.iter().map(DbNewDiscount::from).collect();

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            diesel::delete(discounts::table).execute(conn)?;
            if rows.is_empty() {
                return Ok(0);
            }
            let inserted = diesel::insert_into(discounts::table)
                .values(&rows)
                .execute(conn)?;
            Ok(inserted)
        })
    }
}
