use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{EstimateId, EstimateRecord, LeadId, LeadRecord};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn insert_lead(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn insert_estimate(&self, record: EstimateRecord) -> Result<EstimateRecord, RepositoryError>;
    fn fetch_lead(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn fetch_estimate_for_lead(
        &self,
        lead_id: &LeadId,
    ) -> Result<Option<EstimateRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for new leads (e-mail, chat, CRM adapters).
pub trait LeadNotifier: Send + Sync {
    fn notify(&self, notification: LeadNotification) -> Result<(), NotificationError>;
}

/// Notification payload; `details` carries the rendered fields a template needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadNotification {
    pub template: String,
    pub lead_id: LeadId,
    pub estimate_id: EstimateId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
