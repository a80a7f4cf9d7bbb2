use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Maximum allowed length for a discount code.
const CODE_MAX_LEN: u64 = 64;

/// Errors that can occur while processing the discount form.
#[derive(Debug, Error)]
pub enum DiscountFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("discount code cannot be empty")]
    EmptyCode,
}

/// JSON payload of `POST /discounts/validate`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ValidateDiscountForm {
    #[serde(default)]
    #[validate(length(min = 1, max = CODE_MAX_LEN))]
    pub code: String,
}

impl ValidateDiscountForm {
    /// Validate the payload and return the trimmed code.
    pub fn into_code(self) -> Result<String, DiscountFormError> {
        self.validate()?;

        let code = self.code.trim();
        if code.is_empty() {
            return Err(DiscountFormError::EmptyCode);
        }

        Ok(code.to_string())
    }
}
