// src/models/sales.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    Draft,
    /// Terminal : un devis ne se convertit qu'une seule fois.
    Converted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Créé manuellement par le back-office, en attente d'activation.
    #[serde(rename = "En attente")]
    EnAttente,
    Actif,
    #[serde(rename = "Résilié")]
    Resilie,
}

// --- PRODUIT (le catalogue d'offres) ---

/// Définition d'une offre. Le taux de commission est figé ici au moment du
/// devis, il n'est pas relu depuis la fiche partenaire à la conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Prime mensuelle unitaire.
    pub unit_premium: Decimal,
    /// Taux en pourcentage (ex. 15 pour 15 %).
    pub commission_rate: Decimal,
    pub duration_months: u32,
}

// --- DEVIS ---

/// Données d'entrée d'une conversion de devis, telles que saisies dans le
/// formulaire. `quote_id` est renseigné si le brouillon est déjà persisté.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    pub quote_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Le nom du client est obligatoire"))]
    pub client_name: String,
    #[validate(email(message = "Adresse e-mail invalide"))]
    pub email: String,
    pub phone: Option<String>,
    pub product_id: Uuid,
    /// Prime mensuelle unitaire au moment du devis.
    pub unit_premium: Decimal,
    /// Taux figé à la création du devis.
    pub commission_rate: Decimal,
    #[validate(range(min = 1, message = "La durée doit être d'au moins un mois"))]
    pub duration_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub status: QuoteStatus,
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub product_id: Uuid,
    /// Prime totale sur la durée (unitaire × mois).
    pub premium: Decimal,
    pub commission: Decimal,
    pub duration_months: u32,
    pub created_at: DateTime<Utc>,
}

// --- CONTRAT ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: Uuid,
    pub client_id: Uuid,
    /// Distributeur apporteur, absent pour une souscription en direct.
    pub partner_id: Option<Uuid>,
    pub status: ContractStatus,
    pub premium: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
