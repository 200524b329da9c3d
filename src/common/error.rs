use thiserror::Error;
use uuid::Uuid;

// Notre type d'erreur, avec `thiserror` pour une meilleure ergonomie.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur de validation")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Sinistre {0} introuvable")]
    ClaimNotFound(Uuid),

    #[error("Facture {0} introuvable")]
    InvoiceNotFound(Uuid),

    // Garde d'idempotence : une facture ne se règle qu'une seule fois.
    #[error("La facture {0} est déjà réglée")]
    InvoiceAlreadyPaid(Uuid),

    #[error("Le devis {0} est déjà converti")]
    QuoteAlreadyConverted(Uuid),

    #[error("Mission {0} introuvable")]
    MissionNotFound(Uuid),

    #[error("La mission {0} est déjà terminée")]
    MissionAlreadyCompleted(Uuid),

    #[error("Durée de contrat invalide : {0} mois")]
    InvalidDuration(u32),

    // Un flux multi-étapes a échoué après des écritures déjà validées.
    // Le journal des entités créées permet la réconciliation manuelle.
    #[error("Le flux '{workflow}' a échoué à l'étape '{step}' (déjà créé : {created})")]
    WorkflowIncomplete {
        workflow: &'static str,
        step: &'static str,
        created: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("Échec de la déconnexion auprès du fournisseur d'authentification")]
    SignOutFailed(#[source] anyhow::Error),

    // Variante pour les erreurs du magasin de documents (dépôt injoignable, etc.)
    #[error("Erreur du dépôt de données")]
    Repository(#[from] anyhow::Error),
}

impl AppError {
    /// Message destiné à l'utilisateur final.
    ///
    /// Les échecs de précondition et de flux partiel nomment l'étape fautive ;
    /// les erreurs techniques sont loguées en détail et remplacées par un
    /// message générique.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Un ou plusieurs champs sont invalides.".into(),
            AppError::ClaimNotFound(_) => "Ce sinistre n'existe pas ou plus.".into(),
            AppError::InvoiceNotFound(_) => "Cette facture n'existe pas ou plus.".into(),
            AppError::InvoiceAlreadyPaid(_) => "Cette facture a déjà été réglée.".into(),
            AppError::QuoteAlreadyConverted(_) => "Ce devis a déjà été converti.".into(),
            AppError::MissionNotFound(_) => "Cette mission n'existe pas ou plus.".into(),
            AppError::MissionAlreadyCompleted(_) => "Cette mission est déjà terminée.".into(),
            AppError::WorkflowIncomplete { workflow, step, .. } => {
                format!("L'opération '{workflow}' a échoué à l'étape '{step}'. Contactez le back-office.")
            }
            AppError::SignOutFailed(_) => "La déconnexion a échoué, veuillez réessayer.".into(),

            // Toutes les autres erreurs sont techniques : on logue le détail
            // que `thiserror` nous donne, l'utilisateur voit un message neutre.
            e => {
                tracing::error!("Erreur interne : {e:#}");
                "Une erreur inattendue s'est produite.".into()
            }
        }
    }
}
