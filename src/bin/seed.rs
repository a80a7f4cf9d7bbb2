//! Populate a migrated database with the demo discount codes and, when the
//! table is still empty, a handful of testimonials.

use std::env;

use dotenvy::dotenv;

use arts_shop::db::establish_connection_pool;
use arts_shop::domain::discount::demo_discounts;
use arts_shop::domain::testimonial::NewTestimonial;
use arts_shop::repository::{DieselRepository, DiscountWriter, TestimonialReader, TestimonialWriter};

fn demo_testimonials() -> Vec<NewTestimonial> {
    vec![
        NewTestimonial::new(
            "Ananya",
            "The resin coaster set arrived beautifully packed.",
            5,
        ),
        NewTestimonial::new(
            "Rohit",
            "Loved the custom name engraving on the keychain.",
            4,
        ),
        NewTestimonial::new("Meera", "Gorgeous painting, colours pop in person.", 5),
    ]
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    match repo.replace_discounts(&demo_discounts()) {
        Ok(count) => log::info!("Seeded {count} discount codes"),
        Err(e) => {
            log::error!("Failed to seed discounts: {e}");
            std::process::exit(1);
        }
    }

    let existing = match repo.list_testimonials() {
        Ok(existing) => existing,
        Err(e) => {
            log::error!("Failed to read testimonials: {e}");
            std::process::exit(1);
        }
    };

    if !existing.is_empty() {
        log::info!("Testimonials already present, leaving them untouched");
        return;
    }

    for testimonial in demo_testimonials() {
        if let Err(e) = repo.create_testimonial(&testimonial) {
            log::error!("Failed to seed testimonial from {}: {e}", testimonial.name);
            std::process::exit(1);
        }
    }
    log::info!("Seeded demo testimonials");
}
