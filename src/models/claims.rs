// src/models/claims.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    Ouvert,
    #[serde(rename = "En cours")]
    EnCours,
    Expertise,
    Indemnisation,
    #[serde(rename = "Clôturé")]
    Cloture,
    #[serde(rename = "Remboursé")]
    Rembourse,
    /// Branche terminale, atteignable depuis tout état non terminal.
    #[serde(rename = "Rejeté")]
    Rejete,
}

impl ClaimStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ClaimStatus::Rembourse | ClaimStatus::Rejete)
    }

    /// Position dans la progression nominale du traitement d'un sinistre.
    fn rank(self) -> u8 {
        match self {
            ClaimStatus::Ouvert => 0,
            ClaimStatus::EnCours => 1,
            ClaimStatus::Expertise => 2,
            ClaimStatus::Indemnisation => 3,
            ClaimStatus::Cloture => 4,
            ClaimStatus::Rembourse => 5,
            // Hors progression nominale, traité à part.
            ClaimStatus::Rejete => u8::MAX,
        }
    }

    /// Un sinistre avance de façon monotone : jamais en arrière, et plus
    /// aucune transition depuis un état terminal. `Rejeté` reste atteignable
    /// depuis n'importe quel état non terminal.
    pub fn can_transition_to(self, next: ClaimStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == ClaimStatus::Rejete {
            return true;
        }
        next.rank() > self.rank()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionStatus {
    New,
    Pending,
    Completed,
}

impl MissionStatus {
    /// Étape suivante de la machine `new → pending → completed`.
    pub fn next(self) -> Option<MissionStatus> {
        match self {
            MissionStatus::New => Some(MissionStatus::Pending),
            MissionStatus::Pending => Some(MissionStatus::Completed),
            MissionStatus::Completed => None,
        }
    }
}

// --- SINISTRE ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: Uuid,
    /// Référence affichée aux assurés (ex. "SIN-2026-0042").
    pub reference: String,
    pub status: ClaimStatus,
    pub contract_id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    /// Nature du sinistre (ex. "Auto", "Habitation").
    pub kind: String,
    pub category: String,
    pub location: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// --- MISSION ---

/// Mission confiée à un prestataire pour un sinistre donné.
///
/// Les champs `claim_ref`, `client`, `kind`, `address` et `description` sont
/// des instantanés du sinistre pris à la création : une modification
/// ultérieure du sinistre ne réécrit pas les missions historiques.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub claim_id: Uuid,
    pub status: MissionStatus,
    pub claim_ref: String,
    pub client: String,
    pub kind: String,
    pub address: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
