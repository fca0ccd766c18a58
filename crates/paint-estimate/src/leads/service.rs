use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    format_nok, EstimateId, EstimateRecord, LeadDetails, LeadId, LeadReceipt, LeadRecord,
    LeadSubmission,
};
use super::repository::{
    LeadNotification, LeadNotifier, LeadRepository, NotificationError, RepositoryError,
};
use crate::estimate::{calculate_estimate, EstimateInput, EstimateResult};

pub const NEW_LEAD_TEMPLATE: &str = "new_lead";

/// Service composing the estimate engine, lead storage, and outbound notifications.
pub struct LeadService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ESTIMATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

fn next_estimate_id() -> EstimateId {
    let id = ESTIMATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EstimateId(format!("est-{id:06}"))
}

impl<R, N> LeadService<R, N>
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Live preview; nothing is stored.
    pub fn preview(&self, input: &EstimateInput) -> EstimateResult {
        calculate_estimate(input)
    }

    /// Price the job, store the lead and then its estimate, and notify on a best-effort basis.
    ///
    /// A failed notification is logged and otherwise ignored: the stored rows stand.
    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadReceipt, LeadServiceError> {
        let LeadSubmission { input, customer } = submission;
        let result = calculate_estimate(&input);
        let now = Utc::now();

        let lead = self.repository.insert_lead(LeadRecord::from_submission(
            next_lead_id(),
            now,
            &input,
            customer,
        ))?;
        let estimate = self.repository.insert_estimate(EstimateRecord::from_result(
            next_estimate_id(),
            lead.id.clone(),
            now,
            result,
        ))?;

        info!(
            lead_id = %lead.id.0,
            estimate_id = %estimate.id.0,
            total_low_nok = estimate.total_low_nok,
            total_high_nok = estimate.total_high_nok,
            "lead stored"
        );

        if let Err(err) = self.notifier.notify(lead_notification(&lead, &estimate)) {
            warn!(lead_id = %lead.id.0, error = %err, "lead notification failed");
        }

        Ok(LeadReceipt {
            lead_id: lead.id,
            estimate_id: estimate.id,
        })
    }

    pub fn get(&self, lead_id: &LeadId) -> Result<LeadDetails, LeadServiceError> {
        let lead = self
            .repository
            .fetch_lead(lead_id)?
            .ok_or(RepositoryError::NotFound)?;
        let estimate = self.repository.fetch_estimate_for_lead(lead_id)?;
        Ok(LeadDetails { lead, estimate })
    }

    /// Re-sends the notification for a stored lead, reporting transport failures to the caller.
    pub fn resend_notification(&self, lead_id: &LeadId) -> Result<(), LeadServiceError> {
        let LeadDetails { lead, estimate } = self.get(lead_id)?;
        let estimate = estimate.ok_or(RepositoryError::NotFound)?;
        debug!(lead_id = %lead.id.0, "resending lead notification");
        self.notifier.notify(lead_notification(&lead, &estimate))?;
        Ok(())
    }
}

fn lead_notification(lead: &LeadRecord, estimate: &EstimateRecord) -> LeadNotification {
    let mut details = BTreeMap::new();
    details.insert(
        "customer_name".to_string(),
        lead.customer.display_name().to_string(),
    );
    if let Some(phone) = &lead.customer.phone {
        details.insert("phone".to_string(), phone.clone());
    }
    if let Some(email) = &lead.customer.email {
        details.insert("email".to_string(), email.clone());
    }
    details.insert("job_type".to_string(), lead.job_type.label().to_string());
    details.insert("operation".to_string(), lead.operation.label().to_string());
    details.insert("condition".to_string(), lead.condition.label().to_string());
    details.insert("area_m2".to_string(), format!("{}", lead.area_m2));
    details.insert(
        "price_range".to_string(),
        format!(
            "{} – {}",
            format_nok(estimate.total_low_nok),
            format_nok(estimate.total_high_nok)
        ),
    );

    LeadNotification {
        template: NEW_LEAD_TEMPLATE.to_string(),
        lead_id: lead.id.clone(),
        estimate_id: estimate.id.clone(),
        details,
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
