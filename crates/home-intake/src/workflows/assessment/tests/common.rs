use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::assessment::domain::{
    Answer, AnswerRecord, AssessmentId, AssessmentStatus, NumericAnswer,
};
use crate::workflows::assessment::repository::{
    AssessmentRecord, AssessmentRepository, CaseworkerActionItem, CaseworkerQueue, QueueError,
    RepositoryError,
};
use crate::workflows::assessment::{assessment_router, IntakeService, ScoringEngine};

pub(super) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 19).expect("valid date")
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(reference_date())
}

/// Every question answered with its non-vulnerable value.
pub(super) fn sheltered_answers() -> AnswerRecord {
    AnswerRecord {
        date_of_birth: None,
        sleeping_location: Some("shelters".to_string()),
        sleeping_location_other: None,
        length_homeless: Some(String::new()),
        homeless_episodes: Some(NumericAnswer::from(0)),
        er_visits: Some(NumericAnswer::from(0)),
        ambulance: Some(NumericAnswer::from(0)),
        hospitalized: Some(NumericAnswer::from(0)),
        crisis_services: Some(NumericAnswer::from(0)),
        police_interactions: Some(NumericAnswer::from(0)),
        incarceration: Some(NumericAnswer::from(0)),
        attacked: Some(Answer::No),
        self_harm: Some(Answer::No),
        legal_issues: Some(Answer::No),
        forced: Some(Answer::No),
        risky_behaviors: Some(Answer::No),
        owe_money: Some(Answer::No),
        has_income: Some(Answer::Yes),
        meaningful_activities: Some(Answer::Yes),
        self_care: Some(Answer::Yes),
        relationship_cause: Some(Answer::No),
        physical_health_eviction: Some(Answer::No),
        chronic_health: Some(Answer::No),
        hiv_aids_interest: Some(Answer::No),
        physical_disability: Some(Answer::No),
        avoids_help: Some(Answer::No),
        pregnant: Some(Answer::No),
        substance_eviction: Some(Answer::No),
        substance_housing_difficulty: Some(Answer::No),
        mental_health_eviction: Some(Answer::No),
        head_injury: Some(Answer::No),
        learning_disability: Some(Answer::No),
        mental_health_need: Some(Answer::No),
        not_taking_meds: Some(Answer::No),
        misusing_meds: Some(Answer::No),
        abuse_trauma: Some(Answer::No),
        best_location: None,
        best_time: None,
        phone: None,
        email: None,
        photo_consent: Some(Answer::No),
    }
}

/// Older respondent sleeping outdoors with concerns across every section.
pub(super) fn high_need_answers() -> AnswerRecord {
    AnswerRecord {
        date_of_birth: Some("1960-10-19".to_string()),
        sleeping_location: Some("outdoors".to_string()),
        length_homeless: Some("3 years".to_string()),
        attacked: Some(Answer::Yes),
        legal_issues: Some(Answer::Yes),
        owe_money: Some(Answer::Yes),
        chronic_health: Some(Answer::Yes),
        substance_eviction: Some(Answer::Yes),
        mental_health_eviction: Some(Answer::Yes),
        abuse_trauma: Some(Answer::Yes),
        ..sheltered_answers()
    }
}

/// Five points: enough for rapid re-housing, short of permanent housing.
pub(super) fn moderate_need_answers() -> AnswerRecord {
    AnswerRecord {
        sleeping_location: Some("Outdoors".to_string()),
        homeless_episodes: Some(NumericAnswer::from("4")),
        attacked: Some(Answer::Yes),
        has_income: Some(Answer::No),
        abuse_trauma: Some(Answer::Yes),
        ..sheltered_answers()
    }
}

pub(super) fn build_service() -> (
    IntakeService<MemoryRepository, MemoryQueue>,
    Arc<MemoryRepository>,
    Arc<MemoryQueue>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let queue = Arc::new(MemoryQueue::default());
    let service = IntakeService::new(repository.clone(), queue.clone())
        .with_reference_date(Some(reference_date()));
    (service, repository, queue)
}

pub(super) fn router_with_service(
    service: IntakeService<MemoryRepository, MemoryQueue>,
) -> Router {
    assessment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.assessment_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.assessment_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == AssessmentStatus::Assessed)
            .cloned()
            .collect())
    }
}

/// Hands back pending records in the order they were stored.
#[derive(Default)]
pub(super) struct InsertionOrderRepository {
    records: Mutex<Vec<AssessmentRecord>>,
}

impl AssessmentRepository for InsertionOrderRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let stored = guard
            .iter_mut()
            .find(|stored| stored.assessment_id == record.assessment_id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = record;
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.assessment_id == id).cloned())
    }

    fn pending(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.status == AssessmentStatus::Assessed)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryQueue {
    items: Arc<Mutex<Vec<CaseworkerActionItem>>>,
}

impl MemoryQueue {
    pub(super) fn items(&self) -> Vec<CaseworkerActionItem> {
        self.items.lock().expect("queue mutex poisoned").clone()
    }
}

impl CaseworkerQueue for MemoryQueue {
    fn enqueue(&self, item: CaseworkerActionItem) -> Result<(), QueueError> {
        self.items.lock().expect("queue mutex poisoned").push(item);
        Ok(())
    }
}

pub(super) struct OfflineQueue;

impl CaseworkerQueue for OfflineQueue {
    fn enqueue(&self, _item: CaseworkerActionItem) -> Result<(), QueueError> {
        Err(QueueError::Transport("case management system offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl AssessmentRepository for ConflictRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
