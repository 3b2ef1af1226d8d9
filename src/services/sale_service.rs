// src/services/sale_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::SaleGateway,
    models::{
        analytics::{SalesAnalytics, SalesSummary},
        sales::{CreateSaleRequest, Sale, UpdateSaleRequest},
    },
    services::sales_engine,
};

#[derive(Clone)]
pub struct SaleService {
    gateway: Arc<dyn SaleGateway>,
}

impl SaleService {
    pub fn new(gateway: Arc<dyn SaleGateway>) -> Self {
        Self { gateway }
    }

    // --- CREATE ---
    pub async fn create_sale(&self, payload: CreateSaleRequest) -> Result<Sale, AppError> {
        let payload = payload.normalized();
        payload.validate()?;

        let draft = payload
            .into_draft(Utc::now())
            .ok_or_else(|| AppError::InvalidPayload("campos obrigatórios ausentes".into()))?;
        draft.validate()?;

        let sale = self.gateway.insert(&draft).await?;
        tracing::info!(sale_id = %sale.id, margin = %sale.margin, "Venda criada");
        Ok(sale)
    }

    pub async fn list_sales(&self) -> Result<Vec<Sale>, AppError> {
        self.gateway.find_all().await
    }

    pub async fn get_sale(&self, id: Uuid) -> Result<Sale, AppError> {
        self.gateway.find_by_id(id).await?.ok_or(AppError::SaleNotFound)
    }

    // --- UPDATE (PARCIAL) ---
    // A margem é recalculada a partir do registro fundido (atual + payload),
    // então nunca fica desatualizada, mesmo quando só um dos campos muda.
    pub async fn update_sale(&self, id: Uuid, patch: UpdateSaleRequest) -> Result<Sale, AppError> {
        let current = self.get_sale(id).await?;

        let draft = current.merged_with(patch);
        draft.validate()?;

        let sale = self
            .gateway
            .update_by_id(id, &draft)
            .await?
            .ok_or(AppError::SaleNotFound)?; // Excluída entre a leitura e a escrita

        tracing::info!(sale_id = %sale.id, margin = %sale.margin, "Venda atualizada");
        Ok(sale)
    }

    // --- DELETE ---
    pub async fn delete_sale(&self, id: Uuid) -> Result<(), AppError> {
        if !self.gateway.delete_by_id(id).await? {
            return Err(AppError::SaleNotFound);
        }
        tracing::info!(sale_id = %id, "Venda excluída");
        Ok(())
    }

    // --- ANALYTICS ---
    // Recalculado a cada chamada, sem cache
    pub async fn get_analytics(&self) -> Result<SalesAnalytics, AppError> {
        let total_sales = self.gateway.aggregate_totals().await?;
        let monthly_sales = self.gateway.aggregate_by_month().await?;

        Ok(SalesAnalytics {
            total_sales,
            monthly_sales,
        })
    }

    pub async fn get_summary(&self) -> Result<SalesSummary, AppError> {
        let sales = self.gateway.find_all().await?;
        Ok(sales_engine::summarize(&sales).map_err(anyhow::Error::from)?)
    }
}
