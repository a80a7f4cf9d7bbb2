use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        ProductSort, ProductSuggestion,
    },
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, ProductReader, ProductWriter, contains_pattern, lower, lower_nullable},
    schema::products,
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, product_id: i64) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::product_id.eq(product_id))
            .filter(products::is_deleted.eq(false))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product
            .map(|db_product| DomainProduct::try_from(db_product).map_err(RepositoryError::from))
            .transpose()
    }

    fn find_product_by_title(&self, title: &str) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = products::table
            .filter(lower(products::title).eq(title.trim().to_ascii_lowercase()))
            .filter(products::is_deleted.eq(false))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product
            .map(|db_product| DomainProduct::try_from(db_product).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        let mut conn = self.conn()?;

        let total = filtered_products(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_products(&query);

        items = match query.sort {
            ProductSort::Identifier => items.order(products::product_id.asc()),
            ProductSort::PriceAscending => {
                items.order((products::price.asc(), products::product_id.asc()))
            }
            ProductSort::PriceDescending => {
                items.order((products::price.desc(), products::product_id.asc()))
            }
            ProductSort::Newest => {
                items.order((products::created_at.desc(), products::product_id.desc()))
            }
        };

        if let Some(pagination) = &query.pagination {
            // SQLite reads a negative OFFSET as 0, so out-of-range windows clamp.
            let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
            let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        let mut domain_products = Vec::with_capacity(db_products.len());
        for db_product in db_products {
            domain_products.push(DomainProduct::try_from(db_product)?);
        }

        Ok((total, domain_products))
    }

    fn suggest_products(
        &self,
        fragment: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<ProductSuggestion>> {
        let mut conn = self.conn()?;

        let rows = products::table
            .filter(products::is_deleted.eq(false))
            .filter(lower(products::title).like(contains_pattern(fragment)).escape('\\'))
            .order((lower(products::title).asc(), products::product_id.asc()))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .select((products::product_id, products::title, products::category))
            .load::<(i64, String, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(id, title, category)| ProductSuggestion {
                id,
                title,
                category,
            })
            .collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;
        let db_new = DbNewProduct::try_from(new_product)?;

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(DomainProduct::try_from(created)?)
    }

    fn soft_delete_product(&self, product_id: i64) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let target = products::table
            .filter(products::product_id.eq(product_id))
            .filter(products::is_deleted.eq(false));

        let updated = diesel::update(target)
            .set((
                products::is_deleted.eq(true),
                products::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Live products narrowed by every predicate in `query`, without ordering or
/// page window. Shared by the count and the page load so both agree.
fn filtered_products(query: &ProductListQuery) -> products::BoxedQuery<'static, Sqlite> {
    let mut items = products::table
        .filter(products::is_deleted.eq(false))
        .into_boxed::<Sqlite>();

    if !query.categories.is_empty() {
        items = items.filter(lower(products::category).eq_any(query.categories.clone()));
    }

    if !query.types.is_empty() {
        items = items.filter(lower_nullable(products::product_type).eq_any(query.types.clone()));
    }

    if let Some(term) = query.title.as_ref() {
        items = items.filter(lower(products::title).like(contains_pattern(term)).escape('\\'));
    }

    if let Some(range) = query.price_range {
        items = items.filter(products::price.between(range.min, range.max));
    }

    if let Some(available) = query.available {
        items = items.filter(products::is_available.eq(available));
    }

    if query.best_sellers_only {
        items = items.filter(products::most_seller.eq(true));
    }

    items
}
