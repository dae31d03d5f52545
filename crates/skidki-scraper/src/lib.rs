pub mod client;
pub mod error;
pub mod html;
pub mod price;
pub mod products;
pub mod report;
pub mod sections;

pub use client::PageClient;
pub use error::ScraperError;
pub use price::{calculate_discount_percentage, format_price, parse_price};
pub use products::{extract_products, get_discount_period, NO_PERIOD_FALLBACK};
pub use report::{build_report, render_section_report, split_message};
pub use sections::extract_sections;
