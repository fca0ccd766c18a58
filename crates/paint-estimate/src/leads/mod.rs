//! Lead intake: price a submitted job, store the lead and its estimate, and notify the office.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    format_nok, CustomerContact, EstimateId, EstimateRecord, LeadDetails, LeadId, LeadReceipt,
    LeadRecord, LeadSubmission,
};
pub use repository::{
    LeadNotification, LeadNotifier, LeadRepository, NotificationError, RepositoryError,
};
pub use router::lead_router;
pub use service::{LeadService, LeadServiceError, NEW_LEAD_TEMPLATE};
