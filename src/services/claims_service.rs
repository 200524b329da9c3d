// src/services/claims_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClaimRepository, MissionRepository},
    models::claims::{Mission, MissionStatus},
};

#[derive(Clone)]
pub struct ClaimsService {
    claim_repo: Arc<dyn ClaimRepository>,
    mission_repo: Arc<dyn MissionRepository>,
}

impl ClaimsService {
    pub fn new(claim_repo: Arc<dyn ClaimRepository>, mission_repo: Arc<dyn MissionRepository>) -> Self {
        Self {
            claim_repo,
            mission_repo,
        }
    }

    /// Confie un sinistre ouvert à un prestataire en créant une mission.
    ///
    /// Le sinistre doit exister (précondition appliquée, aucune écriture
    /// sinon). Que le partenaire soit bien un prestataire est garanti par
    /// l'écran appelant : le flux ne le revérifie pas.
    ///
    /// Aucune garde d'unicité : réaffecter le même couple (partenaire,
    /// sinistre) crée une seconde mission indépendante, et certains dossiers
    /// (second expert) s'appuient sur ce comportement.
    pub async fn assign_mission(&self, partner_id: Uuid, claim_id: Uuid) -> Result<Mission, AppError> {
        // 1. Le sinistre doit exister avant toute écriture.
        let claim = self
            .claim_repo
            .find_by_id(claim_id)
            .await?
            .ok_or(AppError::ClaimNotFound(claim_id))?;

        // 2. Instantané du sinistre copié sur la mission à la création :
        // une édition ultérieure du sinistre ne réécrit pas les missions
        // historiques. C'est un anti-join volontaire, pas un oubli de
        // synchronisation.
        let mission = Mission {
            id: Uuid::new_v4(),
            partner_id,
            claim_id,
            status: MissionStatus::New,
            claim_ref: claim.reference.clone(),
            client: claim.client_name.clone(),
            kind: claim.kind.clone(),
            address: claim.location.clone(),
            description: claim.description.clone(),
            created_at: Utc::now(),
        };

        self.mission_repo.insert(&mission).await?;
        tracing::info!(
            mission_id = %mission.id,
            partner_id = %partner_id,
            claim_ref = %mission.claim_ref,
            "🔗 Mission créée pour le sinistre"
        );

        Ok(mission)
    }

    /// Avance la mission d'une étape (`new → pending → completed`).
    /// Réservé au prestataire affecté, depuis son portail.
    pub async fn advance_mission(&self, mission_id: Uuid) -> Result<Mission, AppError> {
        let mission = self
            .mission_repo
            .find_by_id(mission_id)
            .await?
            .ok_or(AppError::MissionNotFound(mission_id))?;

        let next = mission
            .status
            .next()
            .ok_or(AppError::MissionAlreadyCompleted(mission_id))?;

        self.mission_repo.update_status(mission_id, next).await?;

        Ok(Mission {
            status: next,
            ..mission
        })
    }

    /// Refus d'une mission par le prestataire : transition prévue mais pas
    /// encore câblée côté portail. Sans effet pour l'instant.
    pub async fn refuse_mission(&self, mission_id: Uuid) -> Result<(), AppError> {
        tracing::warn!(%mission_id, "Refus de mission demandé : non implémenté, aucun effet");
        Ok(())
    }
}
