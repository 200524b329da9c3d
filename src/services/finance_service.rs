// src/services/finance_service.rs

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{error::AppError, saga::SagaLog},
    db::{InvoiceRepository, PaymentRepository, TransactionRepository},
    models::finance::{
        InvoiceStatus, Payment, PaymentMethod, PaymentStatus, Transaction, TransactionKind,
    },
};

/// Résultat d'un règlement : le paiement et sa ligne de grand livre.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub payment: Payment,
    pub transaction: Transaction,
}

#[derive(Clone)]
pub struct FinanceService {
    invoice_repo: Arc<dyn InvoiceRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,
}

impl FinanceService {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        transaction_repo: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            invoice_repo,
            payment_repo,
            transaction_repo,
        }
    }

    /// Règle une facture partenaire en attente.
    ///
    /// La garde d'admission est le compare-and-set `pending → paid` : deux
    /// appels concurrents sur la même facture ne peuvent pas payer deux
    /// fois, seul celui qui remporte la transition continue. Les écritures
    /// suivantes (paiement, grand livre) viennent après ; si l'une échoue,
    /// l'état partiel est journalisé avec les identifiants déjà créés.
    pub async fn settle_invoice(&self, invoice_id: Uuid) -> Result<Settlement, AppError> {
        // 0. Préconditions, avant toute écriture.
        let invoice = self
            .invoice_repo
            .find_by_id(invoice_id)
            .await?
            .ok_or(AppError::InvoiceNotFound(invoice_id))?;
        if invoice.status == InvoiceStatus::Paid {
            return Err(AppError::InvoiceAlreadyPaid(invoice_id));
        }

        let mut log = SagaLog::new("reglement_facture");

        // 1. La garde CAS : perdre la transition signifie qu'un règlement
        // concurrent est passé entre la lecture et ici.
        let won = self.invoice_repo.mark_paid_if_pending(invoice_id).await?;
        if !won {
            return Err(AppError::InvoiceAlreadyPaid(invoice_id));
        }
        log.record("facture_reglee", invoice_id);

        let now = Utc::now();

        // 2. Le paiement, un par facture réglée.
        let payment = Payment {
            id: Uuid::new_v4(),
            partner_id: invoice.partner_id,
            invoice_id: Some(invoice_id),
            amount: invoice.amount,
            method: PaymentMethod::Virement,
            status: PaymentStatus::Completed,
            date: now,
        };
        self.payment_repo
            .insert(&payment)
            .await
            .map_err(|e| log.fail("insertion_paiement", e))?;
        log.record("paiement", payment.id);

        // 3. La ligne de grand livre. Le signe négatif encode « argent qui
        // sort de l'agence » et doit être préservé tel quel : la position de
        // trésorerie est la somme signée de toutes les lignes.
        let transaction = Transaction {
            id: Uuid::new_v4(),
            date: now,
            amount: -invoice.amount,
            kind: TransactionKind::Commission,
            description: format!(
                "Commission facture {} ({})",
                invoice.number, invoice.partner_name
            ),
        };
        self.transaction_repo
            .insert(&transaction)
            .await
            .map_err(|e| log.fail("insertion_transaction", e))?;

        tracing::info!(
            invoice = %invoice.number,
            partner = %invoice.partner_name,
            amount = %invoice.amount,
            "✅ Facture réglée"
        );

        Ok(Settlement {
            payment,
            transaction,
        })
    }

    /// Encaissement direct d'un partenaire, hors facture : un paiement sans
    /// référence de facture et une ligne de grand livre positive.
    pub async fn record_direct_payment(
        &self,
        partner_id: Uuid,
        partner_name: &str,
        amount: Decimal,
        method: PaymentMethod,
    ) -> Result<Settlement, AppError> {
        let mut log = SagaLog::new("encaissement_direct");
        let now = Utc::now();

        let payment = Payment {
            id: Uuid::new_v4(),
            partner_id,
            invoice_id: None,
            amount,
            method,
            status: PaymentStatus::Completed,
            date: now,
        };
        self.payment_repo
            .insert(&payment)
            .await
            .map_err(|e| log.fail("insertion_paiement", e))?;
        log.record("paiement", payment.id);

        let transaction = Transaction {
            id: Uuid::new_v4(),
            date: now,
            amount,
            kind: TransactionKind::Encaissement,
            description: format!("Encaissement direct {partner_name}"),
        };
        self.transaction_repo
            .insert(&transaction)
            .await
            .map_err(|e| log.fail("insertion_transaction", e))?;

        Ok(Settlement {
            payment,
            transaction,
        })
    }

    /// Position de trésorerie : somme signée de toutes les lignes du
    /// grand livre.
    pub async fn cash_position(&self) -> Result<Decimal, AppError> {
        let transactions = self.transaction_repo.find_all().await?;
        Ok(transactions.iter().map(|t| t.amount).sum())
    }
}
