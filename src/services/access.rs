// src/services/access.rs

use crate::models::auth::{Role, SessionState};

/// Cibles de redirection connues des portails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    PartnerHome,
    AdminHome,
}

/// Résultat du gardien : le refus d'accès est une valeur de contrôle de
/// flux, pas une erreur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session encore en résolution : l'appelant affiche un chargement
    /// et ne navigue pas.
    Pending,
    Allow,
    RedirectTo(Route),
}

/// Décide l'accès à une route protégée.
///
/// Une session authentifiée mais du mauvais rôle est renvoyée vers SON
/// portail, pas vers une page « accès refusé » générique. La table est
/// volontairement asymétrique : un client égaré repart vers `Login`, pas
/// vers un accueil client.
pub fn authorize(state: &SessionState, required_roles: &[Role]) -> AccessDecision {
    let session = match state {
        SessionState::Loading => return AccessDecision::Pending,
        SessionState::Anonymous => return AccessDecision::RedirectTo(Route::Login),
        SessionState::Ready(session) => session,
    };

    if required_roles.is_empty() || required_roles.contains(&session.role()) {
        return AccessDecision::Allow;
    }

    // Redirection par rôle, y compris `Client` et `Unknown` vers Login.
    let target = match session.role() {
        Role::Partner => Route::PartnerHome,
        Role::Admin => Route::AdminHome,
        Role::Client | Role::Unknown => Route::Login,
    };
    AccessDecision::RedirectTo(target)
}
