use super::common::*;
use crate::estimate::{Condition, EstimateInput, JobType, Operation, PriceCode};
use crate::leads::domain::{CustomerContact, LeadId, LeadSubmission};
use crate::leads::repository::{LeadRepository, RepositoryError};
use crate::leads::{LeadService, LeadServiceError, NEW_LEAD_TEMPLATE};
use std::sync::Arc;

#[test]
fn submit_stores_lead_and_estimate() {
    let (service, repository, notifier) = build_service();

    let receipt = service.submit(submission()).expect("submission succeeds");

    let lead = repository
        .fetch_lead(&receipt.lead_id)
        .expect("fetch succeeds")
        .expect("lead stored");
    assert_eq!(lead.customer.name.as_deref(), Some("Kari Nordmann"));
    assert_eq!(lead.job_type, JobType::Interior);
    assert_eq!(lead.area_m2, 80.0);
    assert!(lead.include_materials);
    assert!(!lead.needs_scaffold);

    let estimate = repository
        .fetch_estimate_for_lead(&receipt.lead_id)
        .expect("fetch succeeds")
        .expect("estimate stored");
    assert_eq!(estimate.id, receipt.estimate_id);
    assert_eq!(estimate.base_subtotal_nok, 12_000);
    assert_eq!(estimate.total_low_nok, 13_200);
    assert_eq!(estimate.total_high_nok, 15_870);
    assert_eq!(estimate.items[0].code, PriceCode::InteriorPainting);

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, NEW_LEAD_TEMPLATE);
    assert_eq!(events[0].lead_id, receipt.lead_id);
    assert_eq!(
        events[0].details.get("price_range").map(String::as_str),
        Some("13 200 kr – 15 870 kr")
    );
}

#[test]
fn submit_issues_distinct_identifiers() {
    let (service, _, _) = build_service();

    let first = service.submit(submission()).expect("first submission");
    let second = service.submit(submission()).expect("second submission");

    assert_ne!(first.lead_id, second.lead_id);
    assert_ne!(first.estimate_id, second.estimate_id);
    assert!(first.lead_id.0.starts_with("lead-"));
    assert!(first.estimate_id.0.starts_with("est-"));
}

#[test]
fn notification_failure_does_not_fail_submission() {
    let repository = Arc::new(MemoryRepository::default());
    let service = LeadService::new(repository.clone(), Arc::new(FailingNotifier));

    let receipt = service
        .submit(submission())
        .expect("submission survives notifier outage");

    assert!(repository
        .fetch_lead(&receipt.lead_id)
        .expect("fetch succeeds")
        .is_some());
    assert!(repository
        .fetch_estimate_for_lead(&receipt.lead_id)
        .expect("fetch succeeds")
        .is_some());
}

#[test]
fn submit_propagates_repository_errors() {
    let service = LeadService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifier::default()),
    );

    match service.submit(submission()) {
        Err(LeadServiceError::Repository(RepositoryError::Unavailable(message))) => {
            assert_eq!(message, "database offline");
        }
        other => panic!("expected unavailable repository, got {other:?}"),
    }
}

#[test]
fn failed_estimate_write_skips_notification() {
    let repository = Arc::new(EstimateRejectingRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = LeadService::new(repository.clone(), notifier.clone());

    let result = service.submit(submission());

    assert!(matches!(result, Err(LeadServiceError::Repository(_))));
    assert!(notifier.events().is_empty());
    assert_eq!(
        repository.inner.leads.lock().expect("lead mutex poisoned").len(),
        1,
        "the lead row written before the failure is kept"
    );
}

#[test]
fn submission_without_customer_is_accepted() {
    let (service, repository, notifier) = build_service();
    let mut input = EstimateInput::new(
        JobType::Exterior,
        Operation::PaintExterior,
        50.0,
        Condition::Good,
    );
    input.needs_scaffold = Some(true);

    let receipt = service
        .submit(LeadSubmission {
            input,
            customer: CustomerContact::default(),
        })
        .expect("submission succeeds");

    let lead = repository
        .fetch_lead(&receipt.lead_id)
        .expect("fetch succeeds")
        .expect("lead stored");
    assert!(lead.needs_scaffold);
    assert_eq!(lead.windows_count, 0.0);
    assert_eq!(lead.scaffold_weeks, None);
    assert_eq!(
        notifier.events()[0].details.get("customer_name").map(String::as_str),
        Some("ukjent kunde")
    );
}

#[test]
fn get_returns_lead_with_estimate() {
    let (service, _, _) = build_service();
    let receipt = service.submit(submission()).expect("submission succeeds");

    let details = service.get(&receipt.lead_id).expect("lead found");

    assert_eq!(details.lead.id, receipt.lead_id);
    assert_eq!(
        details.estimate.map(|estimate| estimate.id),
        Some(receipt.estimate_id)
    );
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&LeadId("missing".to_string())) {
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn resend_reports_transport_failures() {
    let repository = Arc::new(MemoryRepository::default());
    let service = LeadService::new(repository, Arc::new(FailingNotifier));
    let receipt = service.submit(submission()).expect("submission succeeds");

    match service.resend_notification(&receipt.lead_id) {
        Err(LeadServiceError::Notification(err)) => {
            assert!(err.to_string().contains("smtp timeout"));
        }
        other => panic!("expected notification error, got {other:?}"),
    }
}

#[test]
fn resend_publishes_again() {
    let (service, _, notifier) = build_service();
    let receipt = service.submit(submission()).expect("submission succeeds");

    service
        .resend_notification(&receipt.lead_id)
        .expect("resend succeeds");

    let events = notifier.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], events[1]);
}

#[test]
fn preview_matches_engine() {
    let (service, repository, _) = build_service();

    let result = service.preview(&interior_input());

    assert_eq!(result.total_low_nok, 13_200);
    assert!(repository.leads.lock().expect("lead mutex poisoned").is_empty());
}
