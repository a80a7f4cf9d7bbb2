use mockall::mock;

use super::{CounterStore, DiscountReader, ProductReader, ProductWriter, TestimonialReader};
use crate::domain::{
    discount::Discount,
    product::{NewProduct, Product, ProductListQuery, ProductSuggestion},
    testimonial::Testimonial,
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, product_id: i64) -> RepositoryResult<Option<Product>>;
        fn find_product_by_title(&self, title: &str) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn suggest_products(&self, fragment: &str, limit: usize) -> RepositoryResult<Vec<ProductSuggestion>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn soft_delete_product(&self, product_id: i64) -> RepositoryResult<()>;
    }
}

mock! {
    pub CounterStore {}

    impl CounterStore for CounterStore {
        fn next_value(&self, name: &str) -> RepositoryResult<i64>;
        fn advance_to(&self, name: &str, floor: i64) -> RepositoryResult<i64>;
    }
}

mock! {
    pub DiscountReader {}

    impl DiscountReader for DiscountReader {
        fn list_active_discounts(&self) -> RepositoryResult<Vec<Discount>>;
        fn find_active_discount(&self, code: &str) -> RepositoryResult<Option<Discount>>;
    }
}

mock! {
    pub TestimonialReader {}

    impl TestimonialReader for TestimonialReader {
        fn list_testimonials(&self) -> RepositoryResult<Vec<Testimonial>>;
    }
}
