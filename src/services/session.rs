// src/services/session.rs

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use tokio::sync::watch;

use crate::{
    common::error::AppError,
    models::auth::{Principal, ResolvedRole, Session, SessionState},
    services::auth::{AuthEvent, AuthProvider, RoleResolver},
};

/// Emplacement de session unique du processus.
///
/// Possédé explicitement et injecté dans les consommateurs (créé au
/// démarrage, libéré par `Drop` à l'arrêt), jamais accédé comme un global
/// ambiant. Les observateurs suivent les changements d'état via un canal
/// `watch`.
pub struct SessionStore {
    resolver: RoleResolver,
    provider: Arc<dyn AuthProvider>,
    resolution_timeout: Duration,
    /// Numéro d'époque : chaque événement d'authentification l'incrémente.
    /// Une résolution qui se termine après un événement plus récent est
    /// simplement jetée, elle n'écrase jamais un état plus frais.
    epoch: AtomicU64,
    // Sérialise tout couple (époque, publication) : l'ouverture d'un
    // événement comme la décision de publication finale.
    publish_lock: Mutex<()>,
    tx: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(
        resolver: RoleResolver,
        provider: Arc<dyn AuthProvider>,
        resolution_timeout: Duration,
    ) -> Self {
        let (tx, _rx) = watch::channel(SessionState::Loading);
        Self {
            resolver,
            provider,
            resolution_timeout,
            epoch: AtomicU64::new(0),
            publish_lock: Mutex::new(()),
            tx,
        }
    }

    /// Abonne un consommateur aux changements d'état.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Point d'entrée unique des événements du fournisseur.
    pub async fn handle_event(&self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(principal) => self.handle_signed_in(principal).await,
            AuthEvent::SignedOut => self.handle_signed_out(),
        }
    }

    /// Connexion : passe en `Loading`, résout, puis publie `Ready`.
    /// La résolution est bornée dans le temps ; au-delà, la session se
    /// dégrade en `Unknown` plutôt que de rester en chargement.
    pub async fn handle_signed_in(&self, principal: Principal) {
        let epoch = self.begin_event(SessionState::Loading);

        let session = match tokio::time::timeout(
            self.resolution_timeout,
            self.resolver.resolve(&principal),
        )
        .await
        {
            Ok(session) => session,
            Err(_) => {
                tracing::warn!(
                    email = %principal.email,
                    "Résolution de rôle trop lente, session dégradée en Unknown"
                );
                Session {
                    principal,
                    resolved: ResolvedRole::Unknown,
                }
            }
        };

        if !self.publish_if_current(epoch, SessionState::Ready(session)) {
            tracing::debug!("Résolution obsolète ignorée (époque {epoch})");
        }
    }

    /// Déconnexion : transition directe vers `Anonymous`, sans résolution.
    pub fn handle_signed_out(&self) {
        self.begin_event(SessionState::Anonymous);
    }

    /// Délègue la déconnexion au fournisseur. C'est l'événement `SignedOut`
    /// qui fera basculer l'état : en cas d'échec du fournisseur, la session
    /// reste telle quelle et l'appelant reçoit l'erreur.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        self.provider
            .sign_out()
            .await
            .map_err(AppError::SignOutFailed)
    }

    /// Ouvre une nouvelle époque et publie son état initial d'un seul
    /// tenant, sous le verrou de publication. L'incrément et la publication
    /// sont indissociables : un événement périmé, rattrapé entre les deux,
    /// ne peut pas republier son `Loading` par-dessus un état plus frais.
    fn begin_event(&self, state: SessionState) -> u64 {
        let _guard = self.publish_lock.lock().unwrap_or_else(|e| e.into_inner());
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_replace(state);
        epoch
    }

    fn publish_if_current(&self, epoch: u64, state: SessionState) -> bool {
        let _guard = self.publish_lock.lock().unwrap_or_else(|e| e.into_inner());
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return false;
        }
        self.tx.send_replace(state);
        true
    }
}
