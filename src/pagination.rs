use serde::Serialize;

/// Page window applied to a list query. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows skipped before the requested page starts.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}

/// Pagination metadata returned alongside a list of products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub total_items: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl PageSummary {
    /// Build the summary for `total` matching items. Without a page size the
    /// whole result set counts as a single page.
    pub fn new(total: usize, page: usize, per_page: Option<usize>) -> Self {
        match per_page {
            Some(per_page) if per_page > 0 => Self {
                total_items: total,
                current_page: page,
                page_size: per_page,
                total_pages: total.div_ceil(per_page),
            },
            _ => Self {
                total_items: total,
                current_page: page,
                page_size: total,
                total_pages: 1,
            },
        }
    }
}
