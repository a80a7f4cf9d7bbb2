use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Counter used to mint sequential product identifiers.
pub const PRODUCT_ID_COUNTER: &str = "productId";

/// Categories a product may be filed under. Stored lower-case.
pub const PRODUCT_CATEGORIES: &[&str] = &["resin", "painting", "home decor", "crafts"];

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Sequential identifier exposed to clients.
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub is_available: bool,
    pub details: Vec<String>,
    pub customization_allowed: bool,
    pub customized_details: Option<String>,
    pub customized_options: Vec<CustomizationOption>,
    pub is_sale: bool,
    /// Sale percentage, zero unless `is_sale` is set.
    pub sale_discount: i32,
    pub is_latest: bool,
    /// Best-seller flag used by the `best-selling` listing mode.
    pub most_seller: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Kind of input a customization option renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Select,
    Text,
    Number,
    Boolean,
}

impl InputKind {
    /// Parse the lower-case wire name of an input kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "select" => Some(Self::Select),
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// A customization a buyer can apply to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationOption {
    pub key: String,
    pub label: String,
    pub input_type: InputKind,
    pub required: bool,
    pub price_delta: f64,
    /// Only populated for `InputKind::Select`.
    #[serde(default)]
    pub choices: Vec<CustomizationChoice>,
}

/// One selectable value of a `select` customization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationChoice {
    pub label: String,
    pub value: String,
    pub price_delta: f64,
}

/// Projection returned by the title suggestion search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSuggestion {
    pub id: i64,
    pub title: String,
    pub category: String,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_id: i64,
    pub title: String,
    pub price: f64,
    pub image: Option<String>,
    pub product_type: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub is_available: bool,
    pub details: Vec<String>,
    pub customization_allowed: bool,
    pub customized_details: Option<String>,
    pub customized_options: Vec<CustomizationOption>,
    pub is_sale: bool,
    pub sale_discount: i32,
    pub is_latest: bool,
    pub most_seller: bool,
}

impl NewProduct {
    /// Build a product payload with the required fields and catalog defaults.
    pub fn new(
        product_id: i64,
        title: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            title: title.into(),
            price,
            image: None,
            product_type: None,
            category: category.into(),
            description: None,
            is_available: true,
            details: Vec::new(),
            customization_allowed: false,
            customized_details: None,
            customized_options: Vec::new(),
            is_sale: false,
            sale_discount: 0,
            is_latest: false,
            most_seller: false,
        }
    }

    pub fn with_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_availability(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    /// Put the product on sale with the given percentage.
    pub fn on_sale(mut self, sale_discount: i32) -> Self {
        self.is_sale = true;
        self.sale_discount = sale_discount;
        self
    }

    pub fn best_seller(mut self) -> Self {
        self.most_seller = true;
        self
    }

    pub fn latest(mut self) -> Self {
        self.is_latest = true;
        self
    }

    /// Attach customization options; customization becomes allowed when any
    /// option is present.
    pub fn with_options(mut self, options: Vec<CustomizationOption>) -> Self {
        self.customization_allowed = !options.is_empty();
        self.customized_options = options;
        self
    }
}

/// Ordering applied to a product listing. Every mode falls back to the
/// sequential identifier so repeated queries page identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Identifier,
    PriceAscending,
    PriceDescending,
    Newest,
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Store-agnostic description of a product listing: predicate, ordering and
/// page window. Soft-deleted products are always excluded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductListQuery {
    /// Lower-cased categories; a product matches when its category equals any.
    pub categories: Vec<String>,
    /// Lower-cased types; a product matches when its type equals any.
    pub types: Vec<String>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub price_range: Option<PriceRange>,
    pub available: Option<bool>,
    pub best_sellers_only: bool,
    pub sort: ProductSort,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given categories, compared case-insensitively.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.categories = normalize_names(categories);
        self
    }

    /// Restrict to the given types, compared case-insensitively.
    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.types = normalize_names(types);
        self
    }

    /// Match titles containing `term` anywhere, ignoring case.
    pub fn title(mut self, term: impl Into<String>) -> Self {
        self.title = Some(term.into());
        self
    }

    pub fn price_between(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange { min, max });
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn best_sellers_only(mut self) -> Self {
        self.best_sellers_only = true;
        self
    }

    pub fn sort(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

fn normalize_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref().trim().to_ascii_lowercase();
        if !name.is_empty() && !normalized.contains(&name) {
            normalized.push(name);
        }
    }
    normalized
}
