use serde::Deserialize;

use crate::domain::product::{
    PRODUCT_ID_COUNTER, Product, ProductListQuery, ProductSort, ProductSuggestion,
};
use crate::forms::products::{AddProductForm, ProductFormError};
use crate::pagination::PageSummary;
use crate::repository::{CounterStore, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Maximum number of title suggestions returned per request.
pub const SUGGESTION_LIMIT: usize = 5;

/// Minimum number of characters a suggestion fragment must have.
pub const SUGGESTION_MIN_CHARS: usize = 2;

/// Raw query-string parameters accepted by the product listing.
///
/// Every field stays a string so malformed numbers degrade to "absent"
/// instead of failing extraction.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub available: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ProductsQuery {
    /// Requested page, defaulting to 1 for missing or unusable values.
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }

    /// Requested page size. `None` disables pagination.
    pub fn limit(&self) -> Option<usize> {
        self.limit
            .as_deref()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
    }

    /// Translate the raw parameters into a list query descriptor.
    pub fn to_list_query(&self) -> ProductListQuery {
        let mut query = ProductListQuery::new();

        if let Some(category) = self.category.as_deref() {
            query = query.categories(category.split(','));
        }

        if let Some(product_type) = self.product_type.as_deref() {
            query = query.types(product_type.split(','));
        }

        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.title(title);
        }

        // One-sided bounds are ignored on purpose.
        if let (Some(min), Some(max)) = (parse_price(&self.min), parse_price(&self.max)) {
            query = query.price_between(min, max);
        }

        if let Some(available) = self.available.as_deref() {
            query = query.available(available == "true");
        }

        match self.sort.as_deref().map(str::trim) {
            Some("best-selling") => query = query.best_sellers_only(),
            Some("low-to-high") => query = query.sort(ProductSort::PriceAscending),
            Some("high-to-low") => query = query.sort(ProductSort::PriceDescending),
            Some("newest") => query = query.sort(ProductSort::Newest),
            _ => {}
        }

        if let Some(limit) = self.limit() {
            query = query.paginate(self.page(), limit);
        }

        query
    }
}

fn parse_price(value: &Option<String>) -> Option<f64> {
    value
        .as_deref()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|price| price.is_finite())
}

/// A page of products together with its pagination summary.
#[derive(Debug)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: PageSummary,
}

/// Lists live products matching the query-string filters.
pub fn list_products<R>(repo: &R, params: &ProductsQuery) -> ServiceResult<ProductPage>
where
    R: ProductReader + ?Sized,
{
    let list_query = params.to_list_query();
    let (total, products) = repo.list_products(list_query).map_err(ServiceError::from)?;

    Ok(ProductPage {
        products,
        pagination: PageSummary::new(total, params.page(), params.limit()),
    })
}

/// Loads one live product by its sequential identifier.
pub fn get_product<R>(repo: &R, raw_id: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let product_id = parse_product_id(raw_id)?;

    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Title suggestions for a search-as-you-type box.
pub fn suggest_products<R>(repo: &R, search: Option<&str>) -> ServiceResult<Vec<ProductSuggestion>>
where
    R: ProductReader + ?Sized,
{
    let fragment = search.map(str::trim).unwrap_or_default();
    if fragment.chars().count() < SUGGESTION_MIN_CHARS {
        return Err(ServiceError::Form(format!(
            "search must be at least {SUGGESTION_MIN_CHARS} characters"
        )));
    }

    repo.suggest_products(fragment, SUGGESTION_LIMIT)
        .map_err(ServiceError::from)
}

/// Validates and stores a new product, assigning the next sequential
/// identifier when the payload does not carry one.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CounterStore + ?Sized,
{
    let draft = form.into_draft().map_err(|err| match err {
        ProductFormError::Validation(issues) => ServiceError::Validation(issues),
    })?;

    if repo
        .find_product_by_title(draft.title())
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict(
            "Product with this title already exists".to_string(),
        ));
    }

    let product_id = match draft.requested_id {
        Some(requested) => {
            if repo
                .get_product_by_id(requested)
                .map_err(ServiceError::from)?
                .is_some()
            {
                return Err(ServiceError::Conflict(
                    "Product with this id already exists".to_string(),
                ));
            }
            // Keep later counter-assigned ids clear of the requested one.
            repo.advance_to(PRODUCT_ID_COUNTER, requested)
                .map_err(ServiceError::from)?;
            requested
        }
        None => repo
            .next_value(PRODUCT_ID_COUNTER)
            .map_err(ServiceError::from)?,
    };

    let created = repo
        .create_product(&draft.into_new_product(product_id))
        .map_err(|err| match ServiceError::from(err) {
            // A concurrent insert won the race for the same title or id.
            ServiceError::Conflict(_) => ServiceError::Conflict(
                "Product with this title or id already exists".to_string(),
            ),
            other => other,
        })?;

    log::info!("Created product {} ({})", created.id, created.title);
    Ok(created)
}

/// Soft-deletes a live product.
pub fn remove_product<R>(repo: &R, raw_id: &str) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let product_id = parse_product_id(raw_id)?;
    repo.soft_delete_product(product_id)
        .map_err(ServiceError::from)?;

    log::info!("Soft-deleted product {product_id}");
    Ok(())
}

fn parse_product_id(raw_id: &str) -> ServiceResult<i64> {
    raw_id
        .trim()
        .parse::<i64>()
        .map_err(|_| ServiceError::NotFound)
}
