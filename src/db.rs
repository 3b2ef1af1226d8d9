pub mod sales_repo;
pub use sales_repo::{PgSaleRepository, SaleGateway};

#[cfg(test)]
pub mod memory_repo;
