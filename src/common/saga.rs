// src/common/saga.rs

use std::fmt::Display;

use crate::common::error::AppError;

/// Journal d'étapes d'un flux multi-écritures.
///
/// Les flux (règlement de facture, conversion de devis, ...) écrivent dans
/// plusieurs collections sans transaction globale : si une étape échoue après
/// des écritures déjà validées, on n'annule rien. On garde donc la trace des
/// entités déjà créées pour permettre la réconciliation manuelle.
pub struct SagaLog {
    workflow: &'static str,
    created: Vec<(&'static str, String)>,
}

impl SagaLog {
    pub fn new(workflow: &'static str) -> Self {
        Self {
            workflow,
            created: Vec::new(),
        }
    }

    /// Enregistre une entité créée (ou mutée de façon irréversible).
    pub fn record(&mut self, entity: &'static str, id: impl Display) {
        self.created.push((entity, id.to_string()));
    }

    /// Transforme l'erreur d'une étape en échec de flux, en loguant l'étape
    /// fautive et les identifiants déjà créés.
    pub fn fail(&self, step: &'static str, source: AppError) -> AppError {
        let created = self.created_summary();
        tracing::error!(
            workflow = self.workflow,
            step,
            %created,
            "❌ Flux interrompu : {source}"
        );
        AppError::WorkflowIncomplete {
            workflow: self.workflow,
            step,
            created,
            source: Box::new(source),
        }
    }

    fn created_summary(&self) -> String {
        if self.created.is_empty() {
            return "aucune entité".to_string();
        }
        self.created
            .iter()
            .map(|(entity, id)| format!("{entity}={id}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn fail_liste_les_entites_deja_creees() {
        let mut log = SagaLog::new("reglement_facture");
        let paiement = Uuid::new_v4();
        log.record("paiement", paiement);

        let err = log.fail("insertion_transaction", AppError::InvalidDuration(0));
        match err {
            AppError::WorkflowIncomplete {
                workflow,
                step,
                created,
                ..
            } => {
                assert_eq!(workflow, "reglement_facture");
                assert_eq!(step, "insertion_transaction");
                assert!(created.contains(&paiement.to_string()));
            }
            other => panic!("variante inattendue : {other:?}"),
        }
    }

    #[test]
    fn fail_sans_ecriture_indique_aucune_entite() {
        let log = SagaLog::new("conversion_devis");
        let err = log.fail("insertion_devis", AppError::InvalidDuration(0));
        match err {
            AppError::WorkflowIncomplete { created, .. } => {
                assert_eq!(created, "aucune entité");
            }
            other => panic!("variante inattendue : {other:?}"),
        }
    }
}
