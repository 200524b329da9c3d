// src/db/crm_repo.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{Client, Partner},
};

/// Accès à la collection des partenaires.
///
/// Le magasin de documents est un collaborateur externe : le cœur ne possède
/// que la couture. Les requêtes sont des égalités de champ, rien de plus.
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    /// Recherche par e-mail normalisé en minuscules. Au plus une fiche par
    /// adresse ; en cas de doublon en base le magasin renvoie la première.
    async fn find_by_email(&self, email: &str) -> Result<Option<Partner>, AppError>;
}

/// Accès à la collection des clients.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError>;

    async fn insert(&self, client: &Client) -> Result<Uuid, AppError>;
}
