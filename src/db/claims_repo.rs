// src/db/claims_repo.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::claims::{Claim, Mission, MissionStatus},
};

#[async_trait]
pub trait ClaimRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Claim>, AppError>;
}

#[async_trait]
pub trait MissionRepository: Send + Sync {
    async fn insert(&self, mission: &Mission) -> Result<Uuid, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, AppError>;

    async fn update_status(&self, id: Uuid, status: MissionStatus) -> Result<(), AppError>;
}
