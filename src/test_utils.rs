//! Utilitaires partagés des tests.
//!
//! Le magasin de documents et le fournisseur d'authentification sont des
//! collaborateurs externes : les tests les remplacent par des doubles en
//! mémoire. `MemoryStore` implémente les neuf dépôts sur de simples `Vec`
//! sous mutex, avec une latence simulable et des pannes injectables.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        ClaimRepository, ClientRepository, ContractRepository, InvoiceRepository,
        MissionRepository, PartnerRepository, PaymentRepository, QuoteRepository,
        TransactionRepository,
    },
    models::{
        auth::Principal,
        claims::{Claim, ClaimStatus, Mission, MissionStatus},
        crm::{Client, ClientStatus, Partner, PartnerKind, PartnerStatus},
        finance::{Invoice, InvoiceStatus, Payment, Transaction},
        sales::{Contract, Product, Quote, QuoteStatus},
    },
    services::auth::AuthProvider,
};

// --- MAGASIN EN MÉMOIRE ---

#[derive(Default)]
pub struct MemoryStore {
    partners: Mutex<Vec<Partner>>,
    clients: Mutex<Vec<Client>>,
    claims: Mutex<Vec<Claim>>,
    missions: Mutex<Vec<Mission>>,
    quotes: Mutex<Vec<Quote>>,
    contracts: Mutex<Vec<Contract>>,
    invoices: Mutex<Vec<Invoice>>,
    payments: Mutex<Vec<Payment>>,
    transactions: Mutex<Vec<Transaction>>,
    latency: Mutex<Duration>,
    fail_contracts: AtomicBool,
    fail_payments: AtomicBool,
}

impl MemoryStore {
    // Amorçage des collections.

    pub fn seed_partner(&self, partner: Partner) {
        self.partners.lock().expect("mutex").push(partner);
    }

    pub fn seed_client(&self, client: Client) {
        self.clients.lock().expect("mutex").push(client);
    }

    pub fn seed_claim(&self, claim: Claim) {
        self.claims.lock().expect("mutex").push(claim);
    }

    pub fn seed_invoice(&self, invoice: Invoice) {
        self.invoices.lock().expect("mutex").push(invoice);
    }

    // Lecture de l'état final pour les assertions.

    pub fn clients(&self) -> Vec<Client> {
        self.clients.lock().expect("mutex").clone()
    }

    pub fn missions(&self) -> Vec<Mission> {
        self.missions.lock().expect("mutex").clone()
    }

    pub fn quotes(&self) -> Vec<Quote> {
        self.quotes.lock().expect("mutex").clone()
    }

    pub fn contracts(&self) -> Vec<Contract> {
        self.contracts.lock().expect("mutex").clone()
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.invoices.lock().expect("mutex").clone()
    }

    pub fn payments(&self) -> Vec<Payment> {
        self.payments.lock().expect("mutex").clone()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().expect("mutex").clone()
    }

    /// Latence appliquée aux recherches d'identité (tests de concurrence
    /// de la résolution de session).
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().expect("mutex") = latency;
    }

    /// Fait échouer les prochaines insertions de contrats.
    pub fn fail_contract_inserts(&self, fail: bool) {
        self.fail_contracts.store(fail, Ordering::SeqCst);
    }

    /// Fait échouer les prochaines insertions de paiements.
    pub fn fail_payment_inserts(&self, fail: bool) {
        self.fail_payments.store(fail, Ordering::SeqCst);
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock().expect("mutex");
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl PartnerRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Partner>, AppError> {
        self.simulate_latency().await;
        Ok(self
            .partners
            .lock()
            .expect("mutex")
            .iter()
            .find(|p| p.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        self.simulate_latency().await;
        Ok(self
            .clients
            .lock()
            .expect("mutex")
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(&self, client: &Client) -> Result<Uuid, AppError> {
        self.clients.lock().expect("mutex").push(client.clone());
        Ok(client.id)
    }
}

#[async_trait]
impl ClaimRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Claim>, AppError> {
        Ok(self
            .claims
            .lock()
            .expect("mutex")
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

#[async_trait]
impl MissionRepository for MemoryStore {
    async fn insert(&self, mission: &Mission) -> Result<Uuid, AppError> {
        self.missions.lock().expect("mutex").push(mission.clone());
        Ok(mission.id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, AppError> {
        Ok(self
            .missions
            .lock()
            .expect("mutex")
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn update_status(&self, id: Uuid, status: MissionStatus) -> Result<(), AppError> {
        let mut missions = self.missions.lock().expect("mutex");
        let mission = missions
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| anyhow::anyhow!("mission {id} absente du magasin"))?;
        mission.status = status;
        Ok(())
    }
}

#[async_trait]
impl QuoteRepository for MemoryStore {
    async fn insert(&self, quote: &Quote) -> Result<Uuid, AppError> {
        self.quotes.lock().expect("mutex").push(quote.clone());
        Ok(quote.id)
    }

    async fn mark_converted(&self, id: Uuid) -> Result<(), AppError> {
        let mut quotes = self.quotes.lock().expect("mutex");
        let quote = quotes
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| anyhow::anyhow!("devis {id} absent du magasin"))?;
        if quote.status == QuoteStatus::Converted {
            return Err(AppError::QuoteAlreadyConverted(id));
        }
        quote.status = QuoteStatus::Converted;
        Ok(())
    }
}

#[async_trait]
impl ContractRepository for MemoryStore {
    async fn insert(&self, contract: &Contract) -> Result<Uuid, AppError> {
        if self.fail_contracts.load(Ordering::SeqCst) {
            return Err(AppError::Repository(anyhow::anyhow!(
                "panne injectée : insertion de contrat refusée"
            )));
        }
        self.contracts.lock().expect("mutex").push(contract.clone());
        Ok(contract.id)
    }
}

#[async_trait]
impl InvoiceRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        Ok(self
            .invoices
            .lock()
            .expect("mutex")
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn mark_paid_if_pending(&self, id: Uuid) -> Result<bool, AppError> {
        let mut invoices = self.invoices.lock().expect("mutex");
        let invoice = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| anyhow::anyhow!("facture {id} absente du magasin"))?;
        if invoice.status != InvoiceStatus::Pending {
            return Ok(false);
        }
        invoice.status = InvoiceStatus::Paid;
        Ok(true)
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn insert(&self, payment: &Payment) -> Result<Uuid, AppError> {
        if self.fail_payments.load(Ordering::SeqCst) {
            return Err(AppError::Repository(anyhow::anyhow!(
                "panne injectée : insertion de paiement refusée"
            )));
        }
        self.payments.lock().expect("mutex").push(payment.clone());
        Ok(payment.id)
    }
}

#[async_trait]
impl TransactionRepository for MemoryStore {
    async fn insert(&self, transaction: &Transaction) -> Result<Uuid, AppError> {
        self.transactions
            .lock()
            .expect("mutex")
            .push(transaction.clone());
        Ok(transaction.id)
    }

    async fn find_all(&self) -> Result<Vec<Transaction>, AppError> {
        Ok(self.transactions.lock().expect("mutex").clone())
    }
}

// --- MAGASIN EN PANNE ---

/// Toutes les requêtes échouent : vérifie que la résolution de rôle dégrade
/// au lieu de propager.
pub struct FailingStore;

#[async_trait]
impl PartnerRepository for FailingStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<Partner>, AppError> {
        Err(AppError::Repository(anyhow::anyhow!("dépôt injoignable")))
    }
}

#[async_trait]
impl ClientRepository for FailingStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<Client>, AppError> {
        Err(AppError::Repository(anyhow::anyhow!("dépôt injoignable")))
    }

    async fn insert(&self, _client: &Client) -> Result<Uuid, AppError> {
        Err(AppError::Repository(anyhow::anyhow!("dépôt injoignable")))
    }
}

// --- FOURNISSEURS D'AUTHENTIFICATION ---

/// Compte les déconnexions demandées, sans émettre d'événement.
#[derive(Default)]
pub struct RecordingProvider {
    sign_outs: AtomicUsize,
}

impl RecordingProvider {
    pub fn sign_out_calls(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for RecordingProvider {
    async fn sign_out(&self) -> anyhow::Result<()> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FailingProvider;

#[async_trait]
impl AuthProvider for FailingProvider {
    async fn sign_out(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("fournisseur d'authentification indisponible"))
    }
}

// --- GABARITS D'ENTITÉS ---

pub fn principal(email: &str) -> Principal {
    Principal {
        id: "uid-test".to_string(),
        email: email.to_string(),
    }
}

pub fn sample_partner(email: &str, kind: PartnerKind) -> Partner {
    Partner {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: "Garage Martin".to_string(),
        kind,
        commission_rate: Some(Decimal::from(15)),
        status: PartnerStatus::Actif,
        created_at: Utc::now(),
    }
}

pub fn sample_client(email: &str) -> Client {
    Client {
        id: Uuid::new_v4(),
        email: email.to_string(),
        first_name: "Jean".to_string(),
        last_name: "Durand".to_string(),
        phone: None,
        status: ClientStatus::Actif,
        created_at: Utc::now(),
    }
}

pub fn sample_claim(kind: &str) -> Claim {
    Claim {
        id: Uuid::new_v4(),
        reference: "SIN-2026-0042".to_string(),
        status: ClaimStatus::Ouvert,
        contract_id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        client_name: "Marie Dupont".to_string(),
        kind: kind.to_string(),
        category: "Collision".to_string(),
        location: "12 rue de la République, Lyon".to_string(),
        description: Some("Choc arrière sur parking".to_string()),
        amount: Decimal::from(4_500),
        attachments: Vec::new(),
        created_at: Utc::now(),
    }
}

pub fn sample_invoice(amount: Decimal) -> Invoice {
    Invoice {
        id: Uuid::new_v4(),
        partner_id: Uuid::new_v4(),
        partner_name: "Garage Martin".to_string(),
        number: "FAC-2026-0731".to_string(),
        amount,
        status: InvoiceStatus::Pending,
        created_at: Utc::now(),
    }
}

pub fn sample_product(unit_premium: Decimal, duration_months: u32, rate: Decimal) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: "Auto Tous Risques".to_string(),
        unit_premium,
        commission_rate: rate,
        duration_months,
    }
}
