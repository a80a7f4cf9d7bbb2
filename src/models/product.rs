use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    CustomizationOption, NewProduct as DomainNewProduct, Product as DomainProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: i32,
    pub product_id: i64,
    pub title: String,
    pub price: f64,
    pub image: Option<String>,
    pub product_type: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub is_available: bool,
    /// JSON array of strings.
    pub details: String,
    pub customization_allowed: bool,
    pub customized_details: Option<String>,
    /// JSON array of customization options.
    pub customized_options: String,
    pub is_sale: bool,
    pub sale_discount: i32,
    pub is_latest: bool,
    pub most_seller: bool,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub product_id: i64,
    pub title: &'a str,
    pub price: f64,
    pub image: Option<&'a str>,
    pub product_type: Option<&'a str>,
    pub category: &'a str,
    pub description: Option<&'a str>,
    pub is_available: bool,
    pub details: String,
    pub customization_allowed: bool,
    pub customized_details: Option<&'a str>,
    pub customized_options: String,
    pub is_sale: bool,
    pub sale_discount: i32,
    pub is_latest: bool,
    pub most_seller: bool,
}

impl TryFrom<Product> for DomainProduct {
    type Error = serde_json::Error;

    fn try_from(value: Product) -> Result<Self, Self::Error> {
        let details: Vec<String> = serde_json::from_str(&value.details)?;
        let customized_options: Vec<CustomizationOption> =
            serde_json::from_str(&value.customized_options)?;

        Ok(Self {
            id: value.product_id,
            title: value.title,
            price: value.price,
            image: value.image,
            product_type: value.product_type,
            category: value.category,
            description: value.description,
            is_available: value.is_available,
            details,
            customization_allowed: value.customization_allowed,
            customized_details: value.customized_details,
            customized_options,
            is_sale: value.is_sale,
            sale_discount: value.sale_discount,
            is_latest: value.is_latest,
            most_seller: value.most_seller,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewProduct> for NewProduct<'a> {
    type Error = serde_json::Error;

    fn try_from(value: &'a DomainNewProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: value.product_id,
            title: value.title.as_str(),
            price: value.price,
            image: value.image.as_deref(),
            product_type: value.product_type.as_deref(),
            category: value.category.as_str(),
            description: value.description.as_deref(),
            is_available: value.is_available,
            details: serde_json::to_string(&value.details)?,
            customization_allowed: value.customization_allowed,
            customized_details: value.customized_details.as_deref(),
            customized_options: serde_json::to_string(&value.customized_options)?,
            is_sale: value.is_sale,
            sale_discount: value.sale_discount,
            is_latest: value.is_latest,
            most_seller: value.most_seller,
        })
    }
}
