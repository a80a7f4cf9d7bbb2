use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    #[serde(skip)]
    pub id: i32,
    pub code: String,
    pub discount_percent: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a discount code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscount {
    pub code: String,
    pub discount_percent: i32,
    pub is_active: bool,
}

impl NewDiscount {
    /// Build an active discount.
    pub fn new(code: impl Into<String>, discount_percent: i32) -> Self {
        Self {
            code: code.into(),
            discount_percent,
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Demo discount codes loaded by the `seed` binary.
pub fn demo_discounts() -> Vec<NewDiscount> {
    vec![
        NewDiscount::new("ARTS10", 10),
        NewDiscount::new("ARTS20", 20),
        NewDiscount::new("ARTS30", 30),
        NewDiscount::new("SUMMER15", 15),
        NewDiscount::new("WINTER25", 25).inactive(),
        NewDiscount::new("WELCOME5", 5),
        NewDiscount::new("HOLIDAY50", 50).inactive(),
        NewDiscount::new("VIP30", 30),
        NewDiscount::new("FESTIVE40", 40),
        NewDiscount::new("NEWYEAR20", 20),
    ]
}
