// src/models/analytics.rs

use rust_decimal::Decimal;
use serde::{ser::SerializeMap, Serialize, Serializer};
use utoipa::ToSchema;

// 1. Totais de todas as vendas
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    #[schema(value_type = f64, example = 150.0)]
    pub total_revenue: Decimal,
    #[schema(example = 3)]
    pub total_quantity: i64,
    #[schema(value_type = f64, example = 70.0)]
    pub total_margin: Decimal,
    #[schema(example = 2)]
    pub total_sales: i64,
}

// 2. Agrupamento mensal (chave "YYYY-MM")
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    #[schema(example = "2024-01")]
    pub month: String,
    #[schema(value_type = f64, example = 100.0)]
    pub monthly_revenue: Decimal,
    #[schema(example = 2)]
    pub monthly_quantity: i64,
    #[schema(example = 1)]
    pub monthly_sales: i64,
}

// 3. Resposta de GET /api/sales/analytics
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalytics {
    // Sem vendas => `{}`
    #[serde(serialize_with = "totals_or_empty")]
    pub total_sales: Option<SalesTotals>,
    pub monthly_sales: Vec<MonthlyBucket>,
}

fn totals_or_empty<S>(totals: &Option<SalesTotals>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match totals {
        Some(totals) => totals.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

// 4. Resumo exibido nas telas de tabela e dashboard
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    #[schema(example = 3)]
    pub total_quantity: i64,
    #[schema(value_type = f64, example = 150.0)]
    pub total_sales_value: Decimal,
    #[schema(value_type = f64, example = 80.0)]
    pub total_costs: Decimal,
    #[schema(value_type = f64, example = 70.0)]
    pub total_margin: Decimal,
    #[schema(example = "46.67")]
    pub total_margin_percentage: String,
}
