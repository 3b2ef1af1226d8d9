// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales Ledger API",
        description = "Registro de vendas com cálculo de margem e indicadores"
    ),
    paths(
        // --- SALES ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,

        // --- ANALYTICS ---
        handlers::sales::get_analytics,
        handlers::sales::get_summary,
    ),
    components(
        schemas(
            // --- Sales ---
            models::sales::SaleStatus,
            models::sales::PaymentMethod,
            models::sales::Sale,
            models::sales::SaleView,

            // --- Payloads ---
            models::sales::CreateSaleRequest,
            models::sales::UpdateSaleRequest,

            // --- Analytics ---
            models::analytics::SalesTotals,
            models::analytics::MonthlyBucket,
            models::analytics::SalesAnalytics,
            models::analytics::SalesSummary,
        )
    ),
    tags(
        (name = "Sales", description = "Vendas, margens e indicadores")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_sales_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/sales",
            "/api/sales/{id}",
            "/api/sales/analytics",
            "/api/sales/summary",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltando {path}");
        }
    }
}
