// src/config.rs

use std::{env, sync::Arc, time::Duration};

use crate::{
    db::{
        ClaimRepository, ClientRepository, ContractRepository, InvoiceRepository,
        MissionRepository, PartnerRepository, PaymentRepository, QuoteRepository,
        TransactionRepository,
    },
    services::{
        auth::AuthProvider, ClaimsService, FinanceService, RoleResolver, SalesService,
        SessionStore,
    },
};

const DEFAULT_RESOLUTION_TIMEOUT_SECS: u64 = 5;

/// Initialise le logger. À appeler une seule fois par l'hôte (ou par les
/// tests) ; les appels suivants sont sans effet.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .compact()
        .try_init();
}

#[derive(Clone)]
pub struct AppConfig {
    /// Adresse du super-admin : résolue en `Admin` sans requête au dépôt.
    pub super_admin_email: String,
    /// Borne de la résolution de rôle ; au-delà, la session dégrade en
    /// `Unknown` plutôt que de rester en chargement.
    pub resolution_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let super_admin_email = env::var("AGENCE_SUPER_ADMIN_EMAIL")
            .map_err(|_| anyhow::anyhow!("AGENCE_SUPER_ADMIN_EMAIL doit être définie"))?;
        let resolution_timeout = env::var("AGENCE_RESOLUTION_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map_or(
                Duration::from_secs(DEFAULT_RESOLUTION_TIMEOUT_SECS),
                Duration::from_secs,
            );

        Ok(Self {
            super_admin_email,
            resolution_timeout,
        })
    }
}

/// Les dépôts par collection, fournis par l'hôte (le magasin de documents
/// est un collaborateur externe).
#[derive(Clone)]
pub struct Repositories {
    pub partners: Arc<dyn PartnerRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub claims: Arc<dyn ClaimRepository>,
    pub missions: Arc<dyn MissionRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
    pub contracts: Arc<dyn ContractRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub session_store: Arc<SessionStore>,
    pub claims_service: ClaimsService,
    pub sales_service: SalesService,
    pub finance_service: FinanceService,
}

impl AppState {
    /// Monte le graphe de dépendances : dépôts → résolveur → magasin de
    /// session, plus les trois services de flux.
    pub fn new(
        config: AppConfig,
        provider: Arc<dyn AuthProvider>,
        repos: Repositories,
    ) -> Self {
        let resolver = RoleResolver::new(
            repos.partners.clone(),
            repos.clients.clone(),
            &config.super_admin_email,
        );
        let session_store = Arc::new(SessionStore::new(
            resolver,
            provider,
            config.resolution_timeout,
        ));

        let claims_service = ClaimsService::new(repos.claims.clone(), repos.missions.clone());
        let sales_service = SalesService::new(
            repos.quotes.clone(),
            repos.contracts.clone(),
            repos.clients.clone(),
        );
        let finance_service = FinanceService::new(
            repos.invoices.clone(),
            repos.payments.clone(),
            repos.transactions.clone(),
        );

        tracing::info!("✅ Cœur métier initialisé");

        Self {
            session_store,
            claims_service,
            sales_service,
            finance_service,
        }
    }
}
