// src/models/crm.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerKind {
    /// Apporteur d'affaires (vend nos produits, touche une commission).
    Distributeur,
    /// Prestataire de services (expertise, réparation, missions sinistre).
    Prestataire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerStatus {
    Actif,
    Inactif,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientStatus {
    /// Créé par une conversion de devis, pas encore confirmé.
    Prospect,
    Actif,
    Inactif,
}

// --- PARTENAIRE ---

// Un seul partenaire par adresse e-mail : la résolution de rôle suppose
// au plus une correspondance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub kind: PartnerKind,
    /// Taux en pourcentage (ex. 15 pour 15 %). Absent pour les prestataires.
    pub commission_rate: Option<Decimal>,
    pub status: PartnerStatus,
    pub created_at: DateTime<Utc>,
}

// --- CLIENT ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
