use chrono::NaiveDate;
use home_intake::workflows::assessment::{
    AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentStatus, CaseworkerActionItem,
    CaseworkerQueue, QueueError, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
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
        if guard.contains_key(&record.assessment_id) {
            guard.insert(record.assessment_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

/// Holds caseworker follow-ups until a case management system is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCaseworkerQueue {
    items: Arc<Mutex<Vec<CaseworkerActionItem>>>,
}

impl CaseworkerQueue for InMemoryCaseworkerQueue {
    fn enqueue(&self, item: CaseworkerActionItem) -> Result<(), QueueError> {
        debug!(
            assessment_id = %item.assessment_id.0,
            priority = item.priority,
            "caseworker action queued"
        );
        let mut guard = self.items.lock().expect("queue mutex poisoned");
        guard.push(item);
        Ok(())
    }
}

impl InMemoryCaseworkerQueue {
    pub(crate) fn items(&self) -> Vec<CaseworkerActionItem> {
        self.items.lock().expect("queue mutex poisoned").clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
