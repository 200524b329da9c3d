// src/services/auth.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::{ClientRepository, PartnerRepository},
    models::auth::{Principal, ResolvedRole, Session},
};

// --- FOURNISSEUR D'AUTHENTIFICATION (collaborateur externe) ---

/// Événements émis par le fournisseur d'authentification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Principal),
    SignedOut,
}

/// Couture vers le fournisseur d'authentification. N'importe quel
/// fournisseur capable d'émettre des [`AuthEvent`] et d'exposer une
/// déconnexion convient.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_out(&self) -> anyhow::Result<()>;
}

// --- RÉSOLUTION DE RÔLE ---

/// Sondes de résolution, dans l'ordre de précédence.
///
/// La règle « Partenaire bat Client » n'est pas enfouie dans du contrôle de
/// flux : c'est cette table ordonnée qui la porte. Si une même adresse a une
/// fiche des deux côtés, la première sonde gagne (incohérence de données que
/// le système n'empêche pas par ailleurs).
const PROBE_ORDER: [RoleProbe; 2] = [RoleProbe::Partner, RoleProbe::Client];

#[derive(Debug, Clone, Copy)]
enum RoleProbe {
    Partner,
    Client,
}

#[derive(Clone)]
pub struct RoleResolver {
    partner_repo: Arc<dyn PartnerRepository>,
    client_repo: Arc<dyn ClientRepository>,
    // Déjà normalisée en minuscules à la construction.
    super_admin_email: String,
}

impl RoleResolver {
    pub fn new(
        partner_repo: Arc<dyn PartnerRepository>,
        client_repo: Arc<dyn ClientRepository>,
        super_admin_email: &str,
    ) -> Self {
        Self {
            partner_repo,
            client_repo,
            super_admin_email: super_admin_email.trim().to_lowercase(),
        }
    }

    /// Transforme un principal authentifié en session typée.
    ///
    /// Ne renvoie jamais d'erreur : si un dépôt est injoignable, la session
    /// se résout en `Unknown` (accès fermé) plutôt que de laisser l'interface
    /// bloquée en chargement.
    pub async fn resolve(&self, principal: &Principal) -> Session {
        let email = principal.email.trim().to_lowercase();

        // 1. Le super-admin configuré court-circuite toute requête au dépôt.
        if email == self.super_admin_email {
            return Session {
                principal: principal.clone(),
                resolved: ResolvedRole::Admin,
            };
        }

        // 2. Les sondes, dans l'ordre, premier résultat gagnant.
        for probe in PROBE_ORDER {
            match self.run_probe(probe, &email).await {
                Ok(Some(resolved)) => {
                    tracing::info!(%email, role = ?resolved.tag(), "✅ Rôle résolu");
                    return Session {
                        principal: principal.clone(),
                        resolved,
                    };
                }
                Ok(None) => continue,
                Err(e) => {
                    // Échec de résolution : on dégrade, on ne propage pas.
                    tracing::warn!(%email, "Résolution de rôle impossible : {e:#}");
                    return Session {
                        principal: principal.clone(),
                        resolved: ResolvedRole::Unknown,
                    };
                }
            }
        }

        // 3. Repli : tout principal authentifié non classé est considéré
        // comme membre du personnel interne.
        Session {
            principal: principal.clone(),
            resolved: ResolvedRole::Admin,
        }
    }

    async fn run_probe(
        &self,
        probe: RoleProbe,
        email: &str,
    ) -> Result<Option<ResolvedRole>, AppError> {
        match probe {
            RoleProbe::Partner => Ok(self
                .partner_repo
                .find_by_email(email)
                .await?
                .map(ResolvedRole::Partner)),
            RoleProbe::Client => Ok(self
                .client_repo
                .find_by_email(email)
                .await?
                .map(ResolvedRole::Client)),
        }
    }
}
