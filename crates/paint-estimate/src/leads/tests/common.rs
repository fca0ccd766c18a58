use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::estimate::{Condition, EstimateInput, JobType, Operation};
use crate::leads::domain::{
    CustomerContact, EstimateRecord, LeadId, LeadRecord, LeadSubmission,
};
use crate::leads::repository::{
    LeadNotification, LeadNotifier, LeadRepository, NotificationError, RepositoryError,
};
use crate::leads::{lead_router, LeadService};

pub(super) fn interior_input() -> EstimateInput {
    let mut input = EstimateInput::new(
        JobType::Interior,
        Operation::PaintInterior,
        80.0,
        Condition::Normal,
    );
    input.include_materials = Some(true);
    input.windows_count = Some(0.0);
    input.doors_count = Some(0.0);
    input
}

pub(super) fn customer() -> CustomerContact {
    CustomerContact {
        name: Some("Kari Nordmann".to_string()),
        phone: Some("+47 912 34 567".to_string()),
        email: Some("kari@example.no".to_string()),
    }
}

pub(super) fn submission() -> LeadSubmission {
    LeadSubmission {
        input: interior_input(),
        customer: customer(),
    }
}

pub(super) fn build_service() -> (
    LeadService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = LeadService::new(repository.clone(), notifier.clone());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) leads: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
    pub(super) estimates: Arc<Mutex<HashMap<LeadId, EstimateRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn insert_lead(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.leads.lock().expect("lead mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn insert_estimate(&self, record: EstimateRecord) -> Result<EstimateRecord, RepositoryError> {
        if !self
            .leads
            .lock()
            .expect("lead mutex poisoned")
            .contains_key(&record.lead_id)
        {
            return Err(RepositoryError::NotFound);
        }
        let mut guard = self.estimates.lock().expect("estimate mutex poisoned");
        guard.insert(record.lead_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch_lead(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.leads.lock().expect("lead mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_estimate_for_lead(
        &self,
        lead_id: &LeadId,
    ) -> Result<Option<EstimateRecord>, RepositoryError> {
        let guard = self.estimates.lock().expect("estimate mutex poisoned");
        Ok(guard.get(lead_id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<LeadNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<LeadNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl LeadNotifier for MemoryNotifier {
    fn notify(&self, notification: LeadNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl LeadNotifier for FailingNotifier {
    fn notify(&self, _notification: LeadNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp timeout".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert_lead(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_estimate(&self, _record: EstimateRecord) -> Result<EstimateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_lead(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_estimate_for_lead(
        &self,
        _lead_id: &LeadId,
    ) -> Result<Option<EstimateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Accepts leads but refuses estimates, to check partial writes surface as failures.
#[derive(Default, Clone)]
pub(super) struct EstimateRejectingRepository {
    pub(super) inner: MemoryRepository,
}

impl LeadRepository for EstimateRejectingRepository {
    fn insert_lead(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        self.inner.insert_lead(record)
    }

    fn insert_estimate(&self, _record: EstimateRecord) -> Result<EstimateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("estimates table locked".to_string()))
    }

    fn fetch_lead(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        self.inner.fetch_lead(id)
    }

    fn fetch_estimate_for_lead(
        &self,
        lead_id: &LeadId,
    ) -> Result<Option<EstimateRecord>, RepositoryError> {
        self.inner.fetch_estimate_for_lead(lead_id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: LeadService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    lead_router(Arc::new(service))
}
