// src/models/auth.rs

use serde::{Deserialize, Serialize};

use crate::models::crm::{Client, Partner};

// --- PRINCIPAL (l'identité brute du fournisseur d'authentification) ---

/// Identité authentifiée, sans rôle métier attaché.
/// Immuable une fois émise ; détruite à la déconnexion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    // Identifiant opaque attribué par le fournisseur (pas un Uuid à nous).
    pub id: String,
    pub email: String,
}

// --- RÔLES ---

/// Étiquette de rôle, utilisée par le gardien d'accès pour ses tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    Partner,
    Client,
    /// Résolution échouée (dépôt injoignable) : on ferme l'accès.
    Unknown,
}

/// Rôle résolu avec sa fiche associée.
///
/// L'invariant « profil présent si et seulement si rôle partenaire ou
/// client » est encodé dans le type : impossible de construire un admin
/// avec une fiche partenaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "profile", rename_all = "camelCase")]
pub enum ResolvedRole {
    Admin,
    Partner(Partner),
    Client(Client),
    Unknown,
}

impl ResolvedRole {
    pub fn tag(&self) -> Role {
        match self {
            ResolvedRole::Admin => Role::Admin,
            ResolvedRole::Partner(_) => Role::Partner,
            ResolvedRole::Client(_) => Role::Client,
            ResolvedRole::Unknown => Role::Unknown,
        }
    }
}

// --- SESSION ---

/// Un principal enrichi de son rôle résolu.
/// Recréée en bloc à chaque résolution ; jamais mutée sur place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub principal: Principal,
    pub resolved: ResolvedRole,
}

impl Session {
    pub fn role(&self) -> Role {
        self.resolved.tag()
    }
}

/// Cycle de vie de l'emplacement de session unique du processus :
/// `Loading` → `Ready` ou `Anonymous`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Ready(Session),
    Anonymous,
}
