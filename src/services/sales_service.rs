// src/services/sales_service.rs

use std::sync::Arc;

use chrono::{Months, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, saga::SagaLog},
    db::{ClientRepository, ContractRepository, QuoteRepository},
    models::{
        crm::{Client, ClientStatus},
        sales::{Contract, ContractStatus, Product, Quote, QuoteDraft, QuoteStatus},
    },
};

/// Résultat d'une conversion de devis.
#[derive(Debug, Clone)]
pub struct QuoteConversion {
    pub quote_id: Uuid,
    pub client: Client,
    pub contract: Contract,
}

/// Arithmétique commune aux deux parcours de souscription :
/// prime totale = prime unitaire × durée en mois,
/// commission = prime totale × taux / 100.
/// Le taux est celui figé à la création du devis, jamais relu depuis la
/// fiche partenaire au moment de la conversion.
pub fn premium_breakdown(
    unit_premium: Decimal,
    duration_months: u32,
    commission_rate: Decimal,
) -> (Decimal, Decimal) {
    let total = unit_premium * Decimal::from(duration_months);
    let commission = total * commission_rate / Decimal::ONE_HUNDRED;
    (total, commission)
}

#[derive(Clone)]
pub struct SalesService {
    quote_repo: Arc<dyn QuoteRepository>,
    contract_repo: Arc<dyn ContractRepository>,
    client_repo: Arc<dyn ClientRepository>,
}

impl SalesService {
    pub fn new(
        quote_repo: Arc<dyn QuoteRepository>,
        contract_repo: Arc<dyn ContractRepository>,
        client_repo: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            quote_repo,
            contract_repo,
            client_repo,
        }
    }

    /// Convertit un devis en couple client + contrat.
    ///
    /// L'ordre des étapes est contractuel : les écritures référencent des
    /// identifiants produits par les étapes précédentes, et le marquage
    /// `Converted` (irréversible) vient en dernier pour réduire la fenêtre
    /// où un échec laisserait des enregistrements orphelins. Il n'y a pas de
    /// rollback : un échec en cours de route est journalisé avec les
    /// identifiants déjà créés.
    pub async fn convert_quote_to_contract(
        &self,
        draft: QuoteDraft,
    ) -> Result<QuoteConversion, AppError> {
        // 0. Validation du formulaire avant toute écriture.
        draft.validate()?;

        // 1-2. Calculs de prime et de commission, plus les bornes du
        // contrat ; tout ce qui peut échouer sans écrire échoue ici.
        let (premium, commission) =
            premium_breakdown(draft.unit_premium, draft.duration_months, draft.commission_rate);
        let now = Utc::now();
        let start_date = now.date_naive();
        let end_date = start_date
            .checked_add_months(Months::new(draft.duration_months))
            .ok_or(AppError::InvalidDuration(draft.duration_months))?;

        let mut log = SagaLog::new("conversion_devis");

        // 3. Persiste le devis en brouillon s'il ne l'est pas déjà.
        let quote_id = match draft.quote_id {
            Some(id) => id,
            None => {
                let quote = Quote {
                    id: Uuid::new_v4(),
                    status: QuoteStatus::Draft,
                    client_name: draft.client_name.clone(),
                    email: draft.email.clone(),
                    phone: draft.phone.clone(),
                    product_id: draft.product_id,
                    premium,
                    commission,
                    duration_months: draft.duration_months,
                    created_at: now,
                };
                self.quote_repo
                    .insert(&quote)
                    .await
                    .map_err(|e| log.fail("insertion_devis", e))?;
                log.record("devis", quote.id);
                quote.id
            }
        };

        // 4. Nouvelle fiche client en prospect. Aucune déduplication par
        // e-mail : chaque conversion crée sa fiche, même si l'adresse
        // existe déjà (limitation documentée, ne pas « corriger » en douce).
        let (first_name, last_name) = split_name(&draft.client_name);
        let client = Client {
            id: Uuid::new_v4(),
            email: draft.email.clone(),
            first_name,
            last_name,
            phone: draft.phone.clone(),
            status: ClientStatus::Prospect,
            created_at: now,
        };
        self.client_repo
            .insert(&client)
            .await
            .map_err(|e| log.fail("insertion_client", e))?;
        log.record("client", client.id);

        // 5. Le contrat référence le client tout juste créé.
        let contract = Contract {
            id: Uuid::new_v4(),
            client_id: client.id,
            partner_id: None,
            status: ContractStatus::Actif,
            premium,
            start_date,
            end_date,
            created_at: now,
        };
        self.contract_repo
            .insert(&contract)
            .await
            .map_err(|e| log.fail("insertion_contrat", e))?;
        log.record("contrat", contract.id);

        // 6. Étape terminale en dernier : le devis bascule en `Converted`.
        self.quote_repo
            .mark_converted(quote_id)
            .await
            .map_err(|e| log.fail("cloture_devis", e))?;

        tracing::info!(
            quote_id = %quote_id,
            client_id = %client.id,
            client = %client.full_name(),
            contract_id = %contract.id,
            %premium,
            %commission,
            "✅ Devis converti en contrat"
        );

        Ok(QuoteConversion {
            quote_id,
            client,
            contract,
        })
    }

    /// Souscription en libre-service depuis le portail client : le client
    /// existe déjà, pas de brouillon de devis. Même arithmétique de prime
    /// et de commission que la conversion.
    pub async fn finalize_subscription(
        &self,
        product: &Product,
        client: &Client,
    ) -> Result<Contract, AppError> {
        let (premium, commission) = premium_breakdown(
            product.unit_premium,
            product.duration_months,
            product.commission_rate,
        );
        let now = Utc::now();
        let start_date = now.date_naive();
        let end_date = start_date
            .checked_add_months(Months::new(product.duration_months))
            .ok_or(AppError::InvalidDuration(product.duration_months))?;

        let contract = Contract {
            id: Uuid::new_v4(),
            client_id: client.id,
            partner_id: None,
            status: ContractStatus::Actif,
            premium,
            start_date,
            end_date,
            created_at: now,
        };
        self.contract_repo.insert(&contract).await?;

        tracing::info!(
            contract_id = %contract.id,
            client_id = %client.id,
            product = %product.name,
            %premium,
            %commission,
            "✅ Souscription finalisée"
        );

        Ok(contract)
    }
}

/// Découpe un nom complet saisi en formulaire en (prénom, nom).
fn split_name(full_name: &str) -> (String, String) {
    match full_name.trim().split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (full_name.trim().to_string(), String::new()),
    }
}
