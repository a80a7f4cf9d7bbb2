use crate::domain::discount::Discount;
use crate::forms::discounts::ValidateDiscountForm;
use crate::repository::DiscountReader;
use crate::services::{ServiceError, ServiceResult};

/// All discounts that can currently be redeemed.
pub fn list_active_discounts<R>(repo: &R) -> ServiceResult<Vec<Discount>>
where
    R: DiscountReader + ?Sized,
{
    repo.list_active_discounts().map_err(ServiceError::from)
}

/// Resolve a submitted code to an active discount.
///
/// Blank, unknown and inactive codes all yield `ServiceError::NotFound` so
/// callers cannot probe which codes exist.
pub fn validate_discount<R>(repo: &R, form: ValidateDiscountForm) -> ServiceResult<Discount>
where
    R: DiscountReader + ?Sized,
{
    let code = form.into_code().map_err(|_| ServiceError::NotFound)?;

    repo.find_active_discount(&code)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}
