// src/db/sales_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        analytics::{MonthlyBucket, SalesTotals},
        sales::{Sale, SaleDraft},
    },
    services::sales_engine,
};

/// Fronteira com o armazenamento das vendas.
///
/// A margem gravada é sempre `draft.margin()`; quem implementa não recebe
/// a margem de fora.
#[async_trait]
pub trait SaleGateway: Send + Sync {
    async fn insert(&self, draft: &SaleDraft) -> Result<Sale, AppError>;

    /// `None` quando o id não existe.
    async fn update_by_id(&self, id: Uuid, draft: &SaleDraft) -> Result<Option<Sale>, AppError>;

    /// `false` quando o id não existe.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError>;

    /// Todas as vendas, mais recentes primeiro.
    async fn find_all(&self) -> Result<Vec<Sale>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError>;

    /// `None` quando não há vendas. Recalculado do conjunto completo.
    async fn aggregate_totals(&self) -> Result<Option<SalesTotals>, AppError> {
        let sales = self.find_all().await?;
        Ok(sales_engine::totals(&sales).map_err(anyhow::Error::from)?)
    }

    /// Buckets "YYYY-MM" (UTC) em ordem crescente.
    async fn aggregate_by_month(&self) -> Result<Vec<MonthlyBucket>, AppError> {
        let sales = self.find_all().await?;
        Ok(sales_engine::monthly_buckets(&sales).map_err(anyhow::Error::from)?)
    }
}

// O repositório de vendas, responsável por todas as interações com a tabela 'sales'
#[derive(Clone)]
pub struct PgSaleRepository {
    pool: PgPool,
}

impl PgSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleGateway for PgSaleRepository {
    async fn insert(&self, draft: &SaleDraft) -> Result<Sale, AppError> {
        let margin = draft.margin()?;

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (
                id, product, quantity, sale_price, unit_cost, margin,
                date, client, payment_method, status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
            .bind(Uuid::new_v4())
            .bind(&draft.product)
            .bind(draft.quantity)
            .bind(draft.sale_price)
            .bind(draft.unit_cost)
            .bind(margin)
            .bind(draft.date)
            .bind(&draft.client)
            .bind(draft.payment_method)
            .bind(draft.status)
            .bind(draft.notes.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(sale)
    }

    async fn update_by_id(&self, id: Uuid, draft: &SaleDraft) -> Result<Option<Sale>, AppError> {
        let margin = draft.margin()?;

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET product = $2,
                quantity = $3,
                sale_price = $4,
                unit_cost = $5,
                margin = $6,
                date = $7,
                client = $8,
                payment_method = $9,
                status = $10,
                notes = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(&draft.product)
            .bind(draft.quantity)
            .bind(draft.sale_price)
            .bind(draft.unit_cost)
            .bind(margin)
            .bind(draft.date)
            .bind(&draft.client)
            .bind(draft.payment_method)
            .bind(draft.status)
            .bind(draft.notes.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY date DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }
}
