// src/db/sales_repo.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::{Contract, Quote},
};

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn insert(&self, quote: &Quote) -> Result<Uuid, AppError>;

    /// Passe le devis à `Converted`. Échoue avec `QuoteAlreadyConverted`
    /// si la transition a déjà eu lieu : `Converted` est terminal.
    async fn mark_converted(&self, id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn insert(&self, contract: &Contract) -> Result<Uuid, AppError>;
}
