// src/models/finance.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    /// Terminal : une facture ne passe qu'une seule fois à `paid`.
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Virement,
    Cheque,
    Especes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Sortie d'argent vers un partenaire (montant négatif).
    Commission,
    /// Entrée d'argent directe (montant positif).
    Encaissement,
}

// --- FACTURE ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub partner_name: String,
    /// Numéro porté par le document (ex. "FAC-2026-0731").
    pub number: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

// --- PAIEMENT ---

/// Événement de règlement d'un partenaire. Collection en ajout seul :
/// aucun flux ne supprime ni ne modifie un paiement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub partner_id: Uuid,
    /// Absent pour un encaissement direct hors facture.
    pub invoice_id: Option<Uuid>,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub date: DateTime<Utc>,
}

// --- TRANSACTION (le grand livre) ---

/// Ligne du grand livre, en ajout seul.
///
/// Le signe du montant est porteur de sens : positif pour l'argent qui entre
/// à l'agence, négatif pour l'argent qui sort. La position de trésorerie est
/// la somme signée de toutes les lignes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub description: String,
}
