// src/models/sales.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{common::error::AppError, services::sales_engine};

// --- Enums (Mapeando o Postgres) ---

/// Situação do pagamento de uma venda.
///
/// O valor canônico (banco e JSON) é capitalizado; a entrada aceita qualquer
/// caixa, então `"completed"` e `"Completed"` são a mesma coisa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_status", rename_all = "PascalCase")]
#[serde(try_from = "String")]
pub enum SaleStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl SaleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SaleStatus::Pending => "Pending",
            SaleStatus::Completed => "Completed",
            SaleStatus::Cancelled => "Cancelled",
        }
    }

    /// Espelho em minúsculas usado pelo frontend (`paymentStatus`).
    pub fn as_lowercase(self) -> &'static str {
        match self {
            SaleStatus::Pending => "pending",
            SaleStatus::Completed => "completed",
            SaleStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(SaleStatus::Pending),
            "completed" => Ok(SaleStatus::Completed),
            "cancelled" => Ok(SaleStatus::Cancelled),
            other => Err(format!("status de pagamento desconhecido: '{other}'")),
        }
    }
}

impl TryFrom<String> for SaleStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    // Só existe uma grafia: "transfer" ("transfert" é rejeitado)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            other => Err(format!("forma de pagamento desconhecida: '{other}'")),
        }
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// --- Structs ---

/// Uma venda persistida na tabela `sales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "T-Shirt Noir/M")]
    pub product: String,

    #[schema(example = 2)]
    pub quantity: i32,

    // Valor total da linha, não o preço unitário
    #[schema(value_type = f64, example = 39.98)]
    pub sale_price: Decimal,

    #[schema(value_type = f64, example = 7.99)]
    pub unit_cost: Decimal,

    // Sempre sale_price - unit_cost * quantity
    #[schema(value_type = f64, example = 24.0)]
    pub margin: Decimal,

    pub date: DateTime<Utc>,

    #[schema(example = "Marie Dupont")]
    pub client: String,

    pub payment_method: PaymentMethod,
    pub status: SaleStatus,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Linha da listagem: a venda mais os espelhos que o frontend consome.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    #[serde(flatten)]
    pub sale: Sale,

    #[schema(example = "pending")]
    pub payment_status: String,

    // Margem sobre o custo, só para exibição
    #[schema(example = "150.00")]
    pub margin_percent: String,
}

impl From<Sale> for SaleView {
    fn from(sale: Sale) -> Self {
        let margin_percent =
            sales_engine::margin_percent(sale.sale_price, sale.unit_cost, sale.quantity);
        Self {
            payment_status: sale.status.as_lowercase().to_string(),
            margin_percent,
            sale,
        }
    }
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

/// Conjunto completo de campos de uma venda prestes a ser gravada.
///
/// Tanto a criação quanto a atualização passam por aqui: a margem é sempre
/// derivada deste conjunto, nunca do payload bruto.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SaleDraft {
    #[validate(length(min = 1, message = "O produto é obrigatório."))]
    pub product: String,

    #[validate(range(min = 1, message = "A quantidade deve ser no mínimo 1."))]
    pub quantity: i32,

    #[validate(custom(function = "validate_not_negative"))]
    pub sale_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_cost: Decimal,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1, message = "O cliente é obrigatório."))]
    pub client: String,

    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub notes: Option<String>,
}

impl SaleDraft {
    /// Margem a gravar. Erro quando o custo total não cabe num `Decimal`.
    pub fn margin(&self) -> Result<Decimal, AppError> {
        sales_engine::margin(self.sale_price, self.unit_cost, self.quantity).ok_or_else(|| {
            AppError::InvalidPayload("salePrice/unitCost/quantity fora do intervalo suportado".into())
        })
    }
}

// --- Payloads ---

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    #[validate(required(message = "O campo 'product' é obrigatório."))]
    #[schema(example = "T-Shirt Noir/M")]
    pub product: Option<String>,

    #[validate(required(message = "O campo 'quantity' é obrigatório."))]
    #[schema(example = 2)]
    pub quantity: Option<i32>,

    #[validate(required(message = "O campo 'salePrice' é obrigatório."))]
    #[schema(value_type = Option<f64>, example = 39.98)]
    pub sale_price: Option<Decimal>,

    #[validate(required(message = "O campo 'unitCost' é obrigatório."))]
    #[schema(value_type = Option<f64>, example = 7.99)]
    pub unit_cost: Option<Decimal>,

    #[validate(required(message = "O campo 'client' é obrigatório."))]
    #[schema(example = "Marie Dupont")]
    pub client: Option<String>,

    // Nome antigo de `client`; o formulário do frontend manda os dois
    #[schema(example = "Marie Dupont")]
    pub customer: Option<String>,

    // Ausente => cash
    pub payment_method: Option<PaymentMethod>,

    // Ausente => Pending
    #[schema(value_type = Option<String>, example = "completed")]
    pub payment_status: Option<SaleStatus>,

    #[schema(value_type = Option<String>, example = "Completed")]
    pub status: Option<SaleStatus>,

    pub date: Option<DateTime<Utc>>,

    pub sale_date: Option<DateTime<Utc>>,

    pub notes: Option<String>,
}

impl CreateSaleRequest {
    /// Resolve os nomes alternativos (`customer`, `status`, `saleDate`).
    /// O nome canônico ganha quando os dois vêm no corpo.
    pub fn normalized(mut self) -> Self {
        self.client = self.client.or(self.customer.take());
        self.payment_status = self.payment_status.or(self.status.take());
        self.date = self.date.or(self.sale_date.take());
        self
    }

    /// Aplica os defaults de criação. Espera `normalized()` e `validate()`.
    pub fn into_draft(self, now: DateTime<Utc>) -> Option<SaleDraft> {
        Some(SaleDraft {
            product: self.product?,
            quantity: self.quantity?,
            sale_price: self.sale_price?,
            unit_cost: self.unit_cost?,
            date: self.date.unwrap_or(now),
            client: self.client?,
            payment_method: self.payment_method.unwrap_or_default(),
            status: self.payment_status.unwrap_or_default(),
            notes: self.notes,
        })
    }
}

// Distingue `"notes": null` (limpar) de campo ausente (manter)
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Atualização parcial: qualquer subconjunto dos campos.
///
/// Aceita de volta uma linha da listagem (com `status` e `paymentStatus`
/// juntos); campos desconhecidos como `margin` e `id` são ignorados.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleRequest {
    pub product: Option<String>,
    pub quantity: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub sale_price: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub unit_cost: Option<Decimal>,
    pub client: Option<String>,
    pub customer: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    #[schema(value_type = Option<String>, example = "cancelled")]
    pub payment_status: Option<SaleStatus>,
    #[schema(value_type = Option<String>, example = "Cancelled")]
    pub status: Option<SaleStatus>,
    pub date: Option<DateTime<Utc>>,
    pub sale_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl Sale {
    /// Funde o registro atual com os campos enviados na atualização.
    pub fn merged_with(&self, patch: UpdateSaleRequest) -> SaleDraft {
        SaleDraft {
            product: patch.product.unwrap_or_else(|| self.product.clone()),
            quantity: patch.quantity.unwrap_or(self.quantity),
            sale_price: patch.sale_price.unwrap_or(self.sale_price),
            unit_cost: patch.unit_cost.unwrap_or(self.unit_cost),
            date: patch.date.or(patch.sale_date).unwrap_or(self.date),
            client: patch
                .client
                .or(patch.customer)
                .unwrap_or_else(|| self.client.clone()),
            payment_method: patch.payment_method.unwrap_or(self.payment_method),
            status: patch.payment_status.or(patch.status).unwrap_or(self.status),
            notes: match patch.notes {
                Some(notes) => notes,
                None => self.notes.clone(),
            },
        }
    }
}
