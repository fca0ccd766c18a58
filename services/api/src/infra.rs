use metrics_exporter_prometheus::PrometheusHandle;
use paint_estimate::leads::{
    EstimateRecord, LeadId, LeadNotification, LeadNotifier, LeadRecord, LeadRepository,
    NotificationError, RepositoryError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct LeadTables {
    leads: HashMap<LeadId, LeadRecord>,
    // Keyed by the owning lead; one estimate per lead.
    estimates: HashMap<LeadId, EstimateRecord>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    tables: Arc<Mutex<LeadTables>>,
}

impl InMemoryLeadRepository {
    fn lock(&self) -> Result<MutexGuard<'_, LeadTables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lead store lock poisoned".to_string()))
    }
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert_lead(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.leads.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.leads.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn insert_estimate(&self, record: EstimateRecord) -> Result<EstimateRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if !guard.leads.contains_key(&record.lead_id) {
            return Err(RepositoryError::NotFound);
        }
        if guard.estimates.contains_key(&record.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.estimates.insert(record.lead_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch_lead(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(self.lock()?.leads.get(id).cloned())
    }

    fn fetch_estimate_for_lead(
        &self,
        lead_id: &LeadId,
    ) -> Result<Option<EstimateRecord>, RepositoryError> {
        Ok(self.lock()?.estimates.get(lead_id).cloned())
    }
}

/// Mail notifier that writes the outgoing message to the log instead of an SMTP relay.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogMailNotifier {
    recipient: Option<String>,
}

impl LogMailNotifier {
    pub(crate) fn new(recipient: Option<String>) -> Self {
        Self { recipient }
    }
}

impl LeadNotifier for LogMailNotifier {
    fn notify(&self, notification: LeadNotification) -> Result<(), NotificationError> {
        let Some(recipient) = &self.recipient else {
            info!(
                lead_id = %notification.lead_id.0,
                "no lead recipient configured; notification skipped"
            );
            return Ok(());
        };

        let customer = notification
            .details
            .get("customer_name")
            .map(String::as_str)
            .unwrap_or_default();
        let price_range = notification
            .details
            .get("price_range")
            .map(String::as_str)
            .unwrap_or_default();

        info!(
            to = %recipient,
            template = %notification.template,
            lead_id = %notification.lead_id.0,
            estimate_id = %notification.estimate_id.0,
            customer,
            price_range,
            "lead notification sent"
        );
        Ok(())
    }
}
