// src/db/finance_repo.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{Invoice, Payment, Transaction},
};

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError>;

    /// Compare-and-set sur le statut : passe `pending → paid` et renvoie
    /// `true` si c'est CET appel qui a effectué la transition. Deux appels
    /// concurrents ne peuvent donc pas régler la même facture deux fois.
    async fn mark_paid_if_pending(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert(&self, payment: &Payment) -> Result<Uuid, AppError>;
}

/// Grand livre : ajout seul, aucune mise à jour ni suppression.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn insert(&self, transaction: &Transaction) -> Result<Uuid, AppError>;

    async fn find_all(&self) -> Result<Vec<Transaction>, AppError>;
}
