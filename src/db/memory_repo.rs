// src/db/memory_repo.rs
//
// SaleGateway em memória para os testes. Os agregados vêm da implementação
// padrão do trait, a mesma usada pelo PgSaleRepository.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SaleGateway,
    models::sales::{Sale, SaleDraft},
};

#[derive(Default)]
pub struct InMemorySaleRepository {
    sales: RwLock<Vec<Sale>>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sales.read().await.len()
    }
}

fn apply(sale: &mut Sale, draft: &SaleDraft) -> Result<(), AppError> {
    sale.margin = draft.margin()?;
    sale.product = draft.product.clone();
    sale.quantity = draft.quantity;
    sale.sale_price = draft.sale_price;
    sale.unit_cost = draft.unit_cost;
    sale.date = draft.date;
    sale.client = draft.client.clone();
    sale.payment_method = draft.payment_method;
    sale.status = draft.status;
    sale.notes = draft.notes.clone();
    sale.updated_at = Utc::now();
    Ok(())
}

#[async_trait]
impl SaleGateway for InMemorySaleRepository {
    async fn insert(&self, draft: &SaleDraft) -> Result<Sale, AppError> {
        let now = Utc::now();
        let sale = Sale {
            id: Uuid::new_v4(),
            product: draft.product.clone(),
            quantity: draft.quantity,
            sale_price: draft.sale_price,
            unit_cost: draft.unit_cost,
            margin: draft.margin()?,
            date: draft.date,
            client: draft.client.clone(),
            payment_method: draft.payment_method,
            status: draft.status,
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.sales.write().await.push(sale.clone());
        Ok(sale)
    }

    async fn update_by_id(&self, id: Uuid, draft: &SaleDraft) -> Result<Option<Sale>, AppError> {
        let mut sales = self.sales.write().await;
        match sales.iter_mut().find(|s| s.id == id) {
            Some(sale) => {
                apply(sale, draft)?;
                Ok(Some(sale.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let mut sales = self.sales.write().await;
        let before = sales.len();
        sales.retain(|s| s.id != id);
        Ok(sales.len() < before)
    }

    async fn find_all(&self) -> Result<Vec<Sale>, AppError> {
        let mut sales = self.sales.read().await.clone();
        sales.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sales)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        Ok(self.sales.read().await.iter().find(|s| s.id == id).cloned())
    }
}
