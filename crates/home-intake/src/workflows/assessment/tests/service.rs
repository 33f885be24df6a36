use super::common::*;
use std::sync::Arc;

use crate::workflows::assessment::domain::{AssessmentId, AssessmentStatus};
use crate::workflows::assessment::repository::{AssessmentRepository, QueueError, RepositoryError};
use crate::workflows::assessment::{IntakeService, IntakeServiceError, Vulnerability};

#[test]
fn submit_stores_record_and_queues_first_contact() {
    let (service, repository, queue) = build_service();

    let record = service.submit(high_need_answers()).expect("submit succeeds");

    assert_eq!(record.assessment_id, AssessmentId("asmt-000001".to_string()));
    assert_eq!(record.status, AssessmentStatus::Assessed);
    assert_eq!(record.scored_on, reference_date());
    assert_eq!(record.score.total_score, 11);

    let stored = repository
        .fetch(&record.assessment_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.score, record.score);

    let items = queue.items();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.action_type, "initial_contact");
    assert_eq!(item.priority, 5);
    assert_eq!(item.description, "New intake: high vulnerability, score 11/17");
    assert_eq!(item.plan.vulnerability, Vulnerability::High);
}

#[test]
fn submit_assigns_sequential_identifiers() {
    let (service, _, queue) = build_service();

    let first = service.submit(sheltered_answers()).expect("first");
    let second = service.submit(moderate_need_answers()).expect("second");

    assert_eq!(first.assessment_id.0, "asmt-000001");
    assert_eq!(second.assessment_id.0, "asmt-000002");
    let priorities: Vec<_> = queue.items().iter().map(|item| item.priority).collect();
    assert_eq!(priorities, vec![3, 3]);
}

#[test]
fn submit_propagates_repository_conflicts() {
    let service = IntakeService::new(
        Arc::new(ConflictRepository),
        Arc::new(MemoryQueue::default()),
    );

    match service.submit(sheltered_answers()) {
        Err(IntakeServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn submit_surfaces_queue_failures_after_storing() {
    let repository = Arc::new(MemoryRepository::default());
    let service = IntakeService::new(repository.clone(), Arc::new(OfflineQueue))
        .with_reference_date(Some(reference_date()));

    match service.submit(moderate_need_answers()) {
        Err(IntakeServiceError::Queue(QueueError::Transport(_))) => {}
        other => panic!("expected queue failure, got {other:?}"),
    }
    assert_eq!(
        repository
            .records
            .lock()
            .expect("repository mutex poisoned")
            .len(),
        1
    );
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&AssessmentId("asmt-999999".to_string())) {
        Err(IntakeServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn score_does_not_store_anything() {
    let (service, repository, queue) = build_service();

    let result = service.score(&high_need_answers());

    assert_eq!(result.total_score, 11);
    assert!(repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .is_empty());
    assert!(queue.items().is_empty());
}

#[test]
fn mark_contacted_updates_status_and_leaves_pending() {
    let (service, repository, _) = build_service();
    let record = service.submit(high_need_answers()).expect("submit");

    let updated = service
        .mark_contacted(&record.assessment_id)
        .expect("contact recorded");

    assert_eq!(updated.status, AssessmentStatus::Contacted);
    let stored = repository
        .fetch(&record.assessment_id)
        .expect("fetch")
        .expect("present");
    assert_eq!(stored.status, AssessmentStatus::Contacted);
    assert!(service.pending(10).expect("pending").is_empty());
}

#[test]
fn pending_orders_by_score_then_id_and_truncates() {
    let (service, _, _) = build_service();
    service.submit(sheltered_answers()).expect("low");
    service.submit(high_need_answers()).expect("high");
    service.submit(moderate_need_answers()).expect("moderate");
    service.submit(high_need_answers()).expect("second high");

    let ids: Vec<_> = service
        .pending(3)
        .expect("pending")
        .into_iter()
        .map(|record| record.assessment_id.0)
        .collect();

    assert_eq!(ids, vec!["asmt-000002", "asmt-000004", "asmt-000003"]);
}

#[test]
fn pending_ranks_every_stored_record_before_truncating() {
    let service = IntakeService::new(
        Arc::new(InsertionOrderRepository::default()),
        Arc::new(MemoryQueue::default()),
    )
    .with_reference_date(Some(reference_date()));
    service.submit(sheltered_answers()).expect("low");
    service.submit(high_need_answers()).expect("high");

    let top = service.pending(1).expect("pending");

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].score.total_score, 11);
    assert_eq!(top[0].assessment_id.0, "asmt-000002");
}

#[test]
fn queue_summary_counts_uncontacted_assessments() {
    let (service, _, _) = build_service();
    service.submit(sheltered_answers()).expect("low");
    let high = service.submit(high_need_answers()).expect("high");
    service.submit(moderate_need_answers()).expect("moderate");
    service.submit(high_need_answers()).expect("second high");
    service.mark_contacted(&high.assessment_id).expect("contacted");

    let summary = service.queue_summary().expect("summary");

    assert_eq!(summary.pending, 3);
    assert_eq!(summary.high_priority, 1);
    let counts: Vec<_> = summary
        .by_vulnerability
        .iter()
        .map(|entry| (entry.vulnerability_label, entry.count))
        .collect();
    assert_eq!(counts, vec![("low", 1), ("moderate", 1), ("high", 1)]);
}

#[test]
fn pending_propagates_unavailable_repository() {
    let service = IntakeService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryQueue::default()),
    );

    assert!(matches!(
        service.pending(5),
        Err(IntakeServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}
