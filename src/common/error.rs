// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::{translate, MessageKey};
use crate::middleware::i18n::Locale;

// Erros do domínio. Nenhum deles conhece HTTP; a tradução para resposta
// acontece em `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Payload inválido: {0}")]
    InvalidPayload(String),

    #[error("Venda não encontrada")]
    SaleNotFound,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// Erro já pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl AppError {
    /// Converte para `ApiError` no idioma do cliente.
    ///
    /// `failure` é a mensagem genérica usada quando o erro é do servidor
    /// (ex.: "Erro ao buscar as vendas."); a causa real só vai para o log.
    pub fn to_api_error(&self, locale: &Locale, failure: MessageKey) -> ApiError {
        let lang = locale.0.as_str();

        match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    body: json!({
                        "error": translate(MessageKey::ValidationFailed, lang),
                        "details": details,
                    }),
                }
            }
            AppError::InvalidPayload(reason) => ApiError {
                status: StatusCode::BAD_REQUEST,
                body: json!({
                    "error": translate(MessageKey::InvalidPayload, lang),
                    "details": reason,
                }),
            },
            AppError::SaleNotFound => ApiError {
                status: StatusCode::NOT_FOUND,
                body: json!({ "error": translate(MessageKey::SaleNotFound, lang) }),
            },
            e @ (AppError::DatabaseError(_) | AppError::InternalServerError(_)) => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: json!({ "error": translate(failure, lang) }),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
