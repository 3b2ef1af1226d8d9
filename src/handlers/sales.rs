// src/handlers/sales.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::{translate, MessageKey},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::{
        analytics::{SalesAnalytics, SalesSummary},
        sales::{CreateSaleRequest, Sale, SaleView, UpdateSaleRequest},
    },
};

// JSON malformado ou com tipos errados vira 400, não o 422 padrão do axum
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    locale: &Locale,
    failure: MessageKey,
) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidPayload(rejection.body_text()).to_api_error(locale, failure))
}

fn sale_id(
    id: Result<Path<Uuid>, PathRejection>,
    locale: &Locale,
    failure: MessageKey,
) -> Result<Uuid, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::InvalidPayload(rejection.body_text()).to_api_error(locale, failure))
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Venda criada, com a margem calculada", body = Sale),
        (status = 400, description = "Campos ausentes ou inválidos")
    )
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<CreateSaleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload, &locale, MessageKey::CreateFailed)?;

    let sale = app_state
        .sale_service
        .create_sale(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, MessageKey::CreateFailed))?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    responses(
        (status = 200, description = "Todas as vendas, mais recentes primeiro", body = Vec<SaleView>)
    )
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let sales = app_state
        .sale_service
        .list_sales()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, MessageKey::FetchFailed))?;

    let views: Vec<SaleView> = sales.into_iter().map(SaleView::from).collect();

    Ok((StatusCode::OK, Json(views)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "A venda", body = SaleView),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = sale_id(id, &locale, MessageKey::FetchFailed)?;

    let sale = app_state
        .sale_service
        .get_sale(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, MessageKey::FetchFailed))?;

    Ok((StatusCode::OK, Json(SaleView::from(sale))))
}

// PUT /api/sales/{id}
#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    request_body = UpdateSaleRequest,
    responses(
        (status = 200, description = "Venda atualizada, margem recalculada", body = Sale),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateSaleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = sale_id(id, &locale, MessageKey::UpdateFailed)?;
    let patch = json_body(payload, &locale, MessageKey::UpdateFailed)?;

    let sale = app_state
        .sale_service
        .update_sale(id, patch)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, MessageKey::UpdateFailed))?;

    Ok((StatusCode::OK, Json(sale)))
}

// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda excluída"),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = sale_id(id, &locale, MessageKey::DeleteFailed)?;

    app_state
        .sale_service
        .delete_sale(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, MessageKey::DeleteFailed))?;

    let body = json!({ "message": translate(MessageKey::SaleDeleted, &locale.0) });
    Ok((StatusCode::OK, Json(body)))
}

// GET /api/sales/analytics
#[utoipa::path(
    get,
    path = "/api/sales/analytics",
    tag = "Sales",
    responses(
        (status = 200, description = "Totais e agrupamento mensal", body = SalesAnalytics)
    )
)]
pub async fn get_analytics(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let analytics = app_state
        .sale_service
        .get_analytics()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, MessageKey::AnalyticsFailed))?;

    Ok((StatusCode::OK, Json(analytics)))
}

// GET /api/sales/summary
#[utoipa::path(
    get,
    path = "/api/sales/summary",
    tag = "Sales",
    responses(
        (status = 200, description = "Quantidade, faturamento, custos e margem percentual", body = SalesSummary)
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .sale_service
        .get_summary()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, MessageKey::AnalyticsFailed))?;

    Ok((StatusCode::OK, Json(summary)))
}
