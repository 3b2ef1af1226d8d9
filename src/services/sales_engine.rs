// src/services/sales_engine.rs
//
// Cálculos de margem e agregados das vendas. Funções puras, sem I/O,
// sobre o conjunto completo de vendas lido do gateway.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::{
    analytics::{MonthlyBucket, SalesSummary, SalesTotals},
    sales::Sale,
};

const ZERO_PERCENT: &str = "0.00";

/// Soma ou produto que não cabe num `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("valor fora do intervalo suportado por Decimal")]
pub struct Overflow;

/// Margem absoluta gravada em cada venda: `sale_price - unit_cost * quantity`.
///
/// Não valida faixas; isso é papel do `SaleDraft`. `None` em overflow.
pub fn margin(sale_price: Decimal, unit_cost: Decimal, quantity: i32) -> Option<Decimal> {
    sale_price.checked_sub(line_cost(unit_cost, quantity)?)
}

fn line_cost(unit_cost: Decimal, quantity: i32) -> Option<Decimal> {
    unit_cost.checked_mul(Decimal::from(quantity))
}

/// Margem em percentual do custo, só para exibição. Não confundir com `margin`.
pub fn margin_percent(sale_price: Decimal, unit_cost: Decimal, quantity: i32) -> String {
    if sale_price.is_zero() || unit_cost.is_zero() || quantity == 0 {
        return ZERO_PERCENT.to_string();
    }
    match line_cost(unit_cost, quantity)
        .and_then(|cost| Some((sale_price.checked_sub(cost)?, cost)))
    {
        Some((gain, cost)) => percent_of(gain, cost),
        None => ZERO_PERCENT.to_string(),
    }
}

// (part / whole) * 100 com duas casas, como o toFixed(2) do frontend
fn percent_of(part: Decimal, whole: Decimal) -> String {
    if whole.is_zero() {
        return ZERO_PERCENT.to_string();
    }
    match part
        .checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(pct) => format!(
            "{:.2}",
            pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => ZERO_PERCENT.to_string(),
    }
}

/// Receita de uma linha. `sale_price` já é o total da linha.
pub fn revenue(sale: &Sale) -> Decimal {
    sale.sale_price
}

/// Totais da carteira inteira. `Ok(None)` quando não há vendas.
pub fn totals(sales: &[Sale]) -> Result<Option<SalesTotals>, Overflow> {
    if sales.is_empty() {
        return Ok(None);
    }
    let mut acc = SalesTotals {
        total_revenue: Decimal::ZERO,
        total_quantity: 0,
        total_margin: Decimal::ZERO,
        total_sales: 0,
    };
    for sale in sales {
        acc.total_revenue = acc.total_revenue.checked_add(revenue(sale)).ok_or(Overflow)?;
        acc.total_quantity += i64::from(sale.quantity);
        acc.total_margin = acc.total_margin.checked_add(sale.margin).ok_or(Overflow)?;
        acc.total_sales += 1;
    }
    Ok(Some(acc))
}

/// Agrupa por mês civil (UTC) da data da venda, em ordem crescente de chave.
pub fn monthly_buckets(sales: &[Sale]) -> Result<Vec<MonthlyBucket>, Overflow> {
    let mut buckets: BTreeMap<String, MonthlyBucket> = BTreeMap::new();

    for sale in sales {
        let month = sale.date.format("%Y-%m").to_string();
        let bucket = buckets
            .entry(month.clone())
            .or_insert_with(|| MonthlyBucket {
                month,
                monthly_revenue: Decimal::ZERO,
                monthly_quantity: 0,
                monthly_sales: 0,
            });
        bucket.monthly_revenue = bucket
            .monthly_revenue
            .checked_add(revenue(sale))
            .ok_or(Overflow)?;
        bucket.monthly_quantity += i64::from(sale.quantity);
        bucket.monthly_sales += 1;
    }

    Ok(buckets.into_values().collect())
}

/// Resumo das telas de vendas: quantidade, faturamento, custos e margem.
pub fn summarize(sales: &[Sale]) -> Result<SalesSummary, Overflow> {
    let mut total_quantity = 0i64;
    let mut total_sales_value = Decimal::ZERO;
    let mut total_costs = Decimal::ZERO;

    for sale in sales {
        total_quantity += i64::from(sale.quantity);
        total_sales_value = total_sales_value.checked_add(revenue(sale)).ok_or(Overflow)?;
        let cost = line_cost(sale.unit_cost, sale.quantity).ok_or(Overflow)?;
        total_costs = total_costs.checked_add(cost).ok_or(Overflow)?;
    }
    let total_margin = total_sales_value.checked_sub(total_costs).ok_or(Overflow)?;

    let total_margin_percentage = if total_sales_value.is_zero() || total_costs.is_zero() {
        ZERO_PERCENT.to_string()
    } else {
        percent_of(total_margin, total_sales_value)
    };

    Ok(SalesSummary {
        total_quantity,
        total_sales_value,
        total_costs,
        total_margin,
        total_margin_percentage,
    })
}
