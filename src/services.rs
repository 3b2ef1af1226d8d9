pub mod sale_service;
pub mod sales_engine;
pub use sale_service::SaleService;
