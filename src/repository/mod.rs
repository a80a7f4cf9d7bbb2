use diesel::sql_types::{BigInt, Nullable, Text};

use crate::db::{DbConnection, DbPool};
use crate::domain::{
    discount::{Discount, NewDiscount},
    product::{NewProduct, Product, ProductListQuery, ProductSuggestion},
    testimonial::{NewTestimonial, Testimonial},
};
use crate::repository::errors::RepositoryResult;

pub mod counter;
pub mod discount;
pub mod errors;
pub mod product;
pub mod testimonial;

#[cfg(test)]
pub mod mock;

diesel::define_sql_function!(fn lower(x: Text) -> Text);
diesel::define_sql_function!(
    #[sql_name = "lower"]
    fn lower_nullable(x: Nullable<Text>) -> Nullable<Text>
);
diesel::define_sql_function!(
    #[sql_name = "max"]
    fn greatest(a: BigInt, b: BigInt) -> BigInt
);

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over live (not soft-deleted) products.
pub trait ProductReader {
    fn get_product_by_id(&self, product_id: i64) -> RepositoryResult<Option<Product>>;
    /// Case-insensitive exact title lookup.
    fn find_product_by_title(&self, title: &str) -> RepositoryResult<Option<Product>>;
    /// Returns the total number of matches and the requested page.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    fn suggest_products(
        &self,
        fragment: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<ProductSuggestion>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Flag a live product as deleted.
    fn soft_delete_product(&self, product_id: i64) -> RepositoryResult<()>;
}

/// Named monotonic counters.
pub trait CounterStore {
    /// Atomically increment `name` and return the new value. The first call
    /// for a name returns 1.
    fn next_value(&self, name: &str) -> RepositoryResult<i64>;

    /// Atomically raise `name` to at least `floor` and return the resulting
    /// value. Never lowers the counter.
    fn advance_to(&self, name: &str, floor: i64) -> RepositoryResult<i64>;
}

/// Read-only operations over discount codes.
pub trait DiscountReader {
    fn list_active_discounts(&self) -> RepositoryResult<Vec<Discount>>;
    /// Case-insensitive exact code lookup among active discounts.
    fn find_active_discount(&self, code: &str) -> RepositoryResult<Option<Discount>>;
}

/// Write operations over discount codes.
pub trait DiscountWriter {
    /// Remove every discount and insert `discounts` in one transaction.
    fn replace_discounts(&self, discounts: &[NewDiscount]) -> RepositoryResult<usize>;
}

/// Read-only operations over testimonials.
pub trait TestimonialReader {
    /// All testimonials, newest first.
    fn list_testimonials(&self) -> RepositoryResult<Vec<Testimonial>>;
}

/// Write operations over testimonials.
pub trait TestimonialWriter {
    fn create_testimonial(&self, new_testimonial: &NewTestimonial) -> RepositoryResult<Testimonial>;
}

/// Escape LIKE wildcards so `term` matches literally, and wrap it for a
/// substring search. Pairs with `.escape('\\')`.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.to_ascii_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
