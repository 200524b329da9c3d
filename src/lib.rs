//! `agence-core` : le cœur métier du back-office de l'agence d'assurance.
//!
//! Les portails (personnel, partenaires, assurés) sont des collaborateurs
//! externes qui appellent ce cœur et affichent ses résultats. Ici ne vivent
//! que les parties à vrais invariants : la résolution d'identité et de rôle,
//! le gardien d'accès, et les trois flux qui touchent plusieurs collections
//! à la fois (sinistre → mission, devis → client + contrat,
//! facture → paiement + grand livre).

// Déclaration de nos modules
pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(test)]
pub mod test_utils;

pub use common::error::AppError;
pub use config::{AppConfig, AppState, Repositories};
