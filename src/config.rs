// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{PgSaleRepository, SaleGateway},
    services::SaleService,
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub default_locale: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        Ok(Self {
            database_url,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3001)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parse_var("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            default_locale: env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Variável ausente => default; presente mas inválida => erro
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} inválida: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sale_service: SaleService,
    pub default_locale: String,
}

impl AppState {
    /// Monta o estado a partir de um pool já conectado.
    pub fn new(db_pool: PgPool, config: &Config) -> Self {
        let sale_repo = PgSaleRepository::new(db_pool);
        Self::with_gateway(Arc::new(sale_repo), config.default_locale.clone())
    }

    pub fn with_gateway(gateway: Arc<dyn SaleGateway>, default_locale: String) -> Self {
        Self {
            sale_service: SaleService::new(gateway),
            default_locale,
        }
    }
}

/// Conecta ao banco de dados, usando '?' para propagar erros
pub async fn connect_pool(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await
        .context("Falha ao conectar ao banco de dados")?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}
