use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::domain::product::{
    CustomizationChoice, CustomizationOption, InputKind, NewProduct, PRODUCT_CATEGORIES,
};
use crate::forms::{
    FieldIssue, collect_issues, invalid, sanitize_inline_text, sanitize_multiline_text,
};

/// Maximum allowed length for a product title.
const TITLE_MAX_LEN: u64 = 200;

/// Maximum allowed length for free-text type and option fields.
const SHORT_TEXT_MAX_LEN: u64 = 64;

/// Maximum allowed length for a description or customization notes.
const DESCRIPTION_MAX_LEN: u64 = 4096;

/// Maximum allowed length for an image reference.
const IMAGE_MAX_LEN: u64 = 2048;

/// Top-level fields whose JSON type is checked before deserialization.
const TYPED_FIELDS: &[(&str, JsonKind)] = &[
    ("id", JsonKind::Integer),
    ("title", JsonKind::Text),
    ("price", JsonKind::Number),
    ("image", JsonKind::Text),
    ("type", JsonKind::Text),
    ("category", JsonKind::Text),
    ("description", JsonKind::Text),
    ("isAvailable", JsonKind::Bool),
    ("details", JsonKind::TextList),
    ("customizationAllowed", JsonKind::Bool),
    ("customizedDetails", JsonKind::Text),
    ("customizedOptions", JsonKind::List),
    ("isSale", JsonKind::Bool),
    ("saleDiscount", JsonKind::Integer),
    ("isLatest", JsonKind::Bool),
    ("mostSeller", JsonKind::Bool),
];

#[derive(Debug, Clone, Copy)]
enum JsonKind {
    Integer,
    Number,
    Bool,
    Text,
    TextList,
    List,
}

impl JsonKind {
    fn describe(self) -> &'static str {
        match self {
            JsonKind::Integer => "an integer",
            JsonKind::Number => "a number",
            JsonKind::Bool => "a boolean",
            JsonKind::Text => "a string",
            JsonKind::TextList => "a list of strings",
            JsonKind::List => "a list",
        }
    }

    /// Accept `value` as-is, coerce a numeric or boolean string in place, or
    /// report a mismatch.
    fn coerce(self, value: &mut Value) -> bool {
        let coerced = match (self, &*value) {
            (JsonKind::Integer, Value::Number(number)) => return number.is_i64(),
            (JsonKind::Number, Value::Number(_)) => return true,
            (JsonKind::Bool, Value::Bool(_)) => return true,
            (JsonKind::Text, Value::String(_)) => return true,
            (JsonKind::List, Value::Array(_)) => return true,
            (JsonKind::TextList, Value::Array(items)) => return items.iter().all(Value::is_string),
            (JsonKind::Integer, Value::String(raw)) => raw.trim().parse::<i64>().ok().map(Value::from),
            (JsonKind::Number, Value::String(raw)) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .map(Value::from),
            (JsonKind::Bool, Value::String(raw)) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        };

        match coerced {
            Some(replacement) => {
                *value = replacement;
                true
            }
            None => false,
        }
    }
}

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Every field that failed validation.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldIssue>),
}

/// JSON payload accepted by the admin "add product" endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AddProductForm {
    /// Explicit sequential identifier. Assigned from the counter when absent.
    #[validate(range(min = 1, message = "id must be a positive integer"))]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = TITLE_MAX_LEN, message = "title is required (max 200 characters)"))]
    pub title: String,
    #[validate(
        required(message = "price is required"),
        range(exclusive_min = 0.0, message = "price must be greater than zero")
    )]
    pub price: Option<f64>,
    #[validate(length(max = IMAGE_MAX_LEN, message = "image reference is too long"))]
    pub image: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(max = SHORT_TEXT_MAX_LEN, message = "type is too long"))]
    pub product_type: Option<String>,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN, message = "description is too long"))]
    pub description: Option<String>,
    pub is_available: Option<bool>,
    pub details: Vec<String>,
    /// Defaults to whether any customization option was supplied.
    pub customization_allowed: Option<bool>,
    #[validate(length(max = DESCRIPTION_MAX_LEN, message = "customizedDetails is too long"))]
    pub customized_details: Option<String>,
    #[validate(nested)]
    pub customized_options: Vec<CustomizationOptionForm>,
    pub is_sale: bool,
    #[validate(range(min = 0, max = 99, message = "saleDiscount must be between 0 and 99"))]
    pub sale_discount: i32,
    pub is_latest: bool,
    pub most_seller: bool,
    /// Fields rejected for their JSON type by [`AddProductForm::from_json`].
    #[serde(skip)]
    pub type_issues: Vec<FieldIssue>,
}

/// One customization option inside `AddProductForm`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizationOptionForm {
    #[validate(length(min = 1, max = SHORT_TEXT_MAX_LEN, message = "key is required"))]
    pub key: String,
    #[validate(length(min = 1, max = SHORT_TEXT_MAX_LEN, message = "label is required"))]
    pub label: String,
    #[validate(custom(function = "validate_input_kind"))]
    pub input_type: String,
    pub required: bool,
    pub price_delta: f64,
    #[validate(nested)]
    pub choices: Vec<CustomizationChoiceForm>,
}

/// One choice of a `select` customization option.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizationChoiceForm {
    #[validate(length(min = 1, max = SHORT_TEXT_MAX_LEN, message = "label is required"))]
    pub label: String,
    #[validate(length(min = 1, max = SHORT_TEXT_MAX_LEN, message = "value is required"))]
    pub value: String,
    pub price_delta: f64,
}

/// A validated product still waiting for its sequential identifier.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    /// Identifier supplied by the caller, if any.
    pub requested_id: Option<i64>,
    product: NewProduct,
}

impl ProductDraft {
    pub fn title(&self) -> &str {
        &self.product.title
    }

    /// Finalize the draft with its assigned identifier.
    pub fn into_new_product(mut self, product_id: i64) -> NewProduct {
        self.product.product_id = product_id;
        self.product
    }
}

impl AddProductForm {
    /// Build the form from a raw JSON body. Numeric and boolean strings are
    /// coerced; other wrongly typed fields are dropped and kept as issues so
    /// that `into_draft` reports them with every other failure.
    pub fn from_json(body: Value) -> ProductFormResult<Self> {
        let Value::Object(mut fields) = body else {
            return Err(ProductFormError::Validation(vec![FieldIssue::new(
                "body",
                "request body must be a JSON object",
            )]));
        };

        let type_issues = check_field_types(&mut fields);

        match serde_json::from_value::<AddProductForm>(Value::Object(fields)) {
            Ok(mut form) => {
                form.type_issues = type_issues;
                Ok(form)
            }
            Err(err) => {
                let mut issues = type_issues;
                issues.push(FieldIssue::new(
                    "customizedOptions",
                    format!("customizedOptions is malformed: {err}"),
                ));
                Err(ProductFormError::Validation(issues))
            }
        }
    }

    /// Validate every field, collecting all failures, and sanitize the
    /// payload into a `ProductDraft`.
    pub fn into_draft(self) -> ProductFormResult<ProductDraft> {
        let mut issues = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_issues(&errors),
        };

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() && !issues.iter().any(|issue| issue.field == "title") {
            issues.push(FieldIssue::new("title", "title cannot be blank"));
        }

        if self.is_sale && !(1..=99).contains(&self.sale_discount) {
            issues.push(FieldIssue::new(
                "saleDiscount",
                "saleDiscount must be between 1 and 99 when isSale is true",
            ));
        }
        if !self.is_sale && self.sale_discount != 0 {
            issues.push(FieldIssue::new(
                "saleDiscount",
                "saleDiscount must be 0 unless isSale is true",
            ));
        }

        let mut seen_keys = HashSet::new();
        for (index, option) in self.customized_options.iter().enumerate() {
            let key = option.key.trim().to_ascii_lowercase();
            if !key.is_empty() && !seen_keys.insert(key) {
                issues.push(FieldIssue::new(
                    format!("customizedOptions[{index}].key"),
                    "option keys must be unique",
                ));
            }

            match InputKind::parse(&option.input_type) {
                Some(InputKind::Select) if option.choices.is_empty() => {
                    issues.push(FieldIssue::new(
                        format!("customizedOptions[{index}].choices"),
                        "select options need at least one choice",
                    ));
                }
                Some(kind) if kind != InputKind::Select && !option.choices.is_empty() => {
                    issues.push(FieldIssue::new(
                        format!("customizedOptions[{index}].choices"),
                        "only select options may define choices",
                    ));
                }
                _ => {}
            }
        }

        if !self.type_issues.is_empty() {
            issues.retain(|issue| {
                self.type_issues
                    .iter()
                    .all(|typed| typed.field != issue.field)
            });
            issues.extend(self.type_issues.iter().cloned());
        }

        if !issues.is_empty() {
            issues.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
            return Err(ProductFormError::Validation(issues));
        }

        let AddProductForm {
            id,
            price,
            image,
            product_type,
            category,
            description,
            is_available,
            details,
            customization_allowed,
            customized_details,
            customized_options,
            is_sale,
            sale_discount,
            is_latest,
            most_seller,
            ..
        } = self;

        let options: Vec<CustomizationOption> = customized_options
            .into_iter()
            .filter_map(CustomizationOptionForm::into_option)
            .collect();

        let mut product = NewProduct::new(
            0,
            title,
            price.unwrap_or_default(),
            category.trim().to_ascii_lowercase(),
        )
        .with_options(options);

        product.image = non_empty(image.as_deref().map(str::trim));
        product.product_type = non_empty(product_type.as_deref().map(sanitize_inline_text).as_deref());
        product.description = non_empty(description.as_deref().map(sanitize_multiline_text).as_deref());
        product.customized_details =
            non_empty(customized_details.as_deref().map(sanitize_multiline_text).as_deref());
        product.details = details
            .iter()
            .map(|line| sanitize_inline_text(line))
            .filter(|line| !line.is_empty())
            .collect();
        product.is_available = is_available.unwrap_or(true);
        if let Some(allowed) = customization_allowed {
            product.customization_allowed = allowed;
        }
        product.is_sale = is_sale;
        product.sale_discount = sale_discount;
        product.is_latest = is_latest;
        product.most_seller = most_seller;

        Ok(ProductDraft {
            requested_id: id,
            product,
        })
    }
}

impl CustomizationOptionForm {
    fn into_option(self) -> Option<CustomizationOption> {
        let input_type = InputKind::parse(&self.input_type)?;
        let choices = self
            .choices
            .into_iter()
            .map(|choice| CustomizationChoice {
                label: sanitize_inline_text(&choice.label),
                value: choice.value.trim().to_string(),
                price_delta: choice.price_delta,
            })
            .collect();

        Some(CustomizationOption {
            key: self.key.trim().to_string(),
            label: sanitize_inline_text(&self.label),
            input_type,
            required: self.required,
            price_delta: self.price_delta,
            choices,
        })
    }
}

fn check_field_types(fields: &mut Map<String, Value>) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    for (name, kind) in TYPED_FIELDS {
        let Some(value) = fields.get_mut(*name) else {
            continue;
        };

        if value.is_null() {
            fields.remove(*name);
            continue;
        }

        if !kind.coerce(value) {
            fields.remove(*name);
            issues.push(FieldIssue::new(
                *name,
                format!("{name} must be {}", kind.describe()),
            ));
        }
    }

    issues
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|text| !text.is_empty()).map(str::to_string)
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    let normalized = category.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(invalid("required", "category is required"));
    }
    if PRODUCT_CATEGORIES.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(invalid(
            "category",
            "category must be one of: resin, painting, home decor, crafts",
        ))
    }
}

fn validate_input_kind(input_type: &str) -> Result<(), ValidationError> {
    match InputKind::parse(input_type) {
        Some(_) => Ok(()),
        None => Err(invalid(
            "input_type",
            "inputType must be one of: select, text, number, boolean",
        )),
    }
}
