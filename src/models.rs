pub mod analytics;
pub mod sales;
