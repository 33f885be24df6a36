use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AnswerRecord, AssessmentId, AssessmentStatus};
use super::recommendation::{InterventionPlan, Vulnerability};
use super::scoring::ScoreResult;

const NEXT_STEPS: &str = "Your caseworker will contact you within 24-72 hours.";
const HIGH_PRIORITY_THRESHOLD: u8 = 4;

/// Stored assessment: the answers as submitted plus the score computed at intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub assessment_id: AssessmentId,
    pub answers: AnswerRecord,
    pub score: ScoreResult,
    pub plan: InterventionPlan,
    pub status: AssessmentStatus,
    pub scored_on: NaiveDate,
}

impl AssessmentRecord {
    pub fn status_view(&self) -> AssessmentStatusView {
        AssessmentStatusView {
            assessment_id: self.assessment_id.clone(),
            status: self.status.label(),
            total_score: self.score.total_score,
            max_score: self.score.max_score,
            vulnerability: self.score.vulnerability,
            recommendation: self.score.recommendation.clone(),
            next_steps: NEXT_STEPS,
        }
    }
}

/// Caseworker dashboard counts over assessments awaiting first contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSummary {
    pub pending: usize,
    pub high_priority: usize,
    pub by_vulnerability: Vec<VulnerabilityCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VulnerabilityCount {
    pub vulnerability: Vulnerability,
    pub vulnerability_label: &'static str,
    pub count: usize,
}

impl QueueSummary {
    pub fn from_pending(records: &[AssessmentRecord]) -> Self {
        let high_priority = records
            .iter()
            .filter(|record| {
                record.score.vulnerability.caseworker_priority() >= HIGH_PRIORITY_THRESHOLD
            })
            .count();

        let by_vulnerability = Vulnerability::ordered()
            .into_iter()
            .map(|vulnerability| VulnerabilityCount {
                vulnerability,
                vulnerability_label: vulnerability.label(),
                count: records
                    .iter()
                    .filter(|record| record.score.vulnerability == vulnerability)
                    .count(),
            })
            .collect();

        Self {
            pending: records.len(),
            high_priority,
            by_vulnerability,
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// Every record still awaiting first contact, in any order.
    fn pending(&self) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook that lands follow-up work in a caseworker's queue.
pub trait CaseworkerQueue: Send + Sync {
    fn enqueue(&self, item: CaseworkerActionItem) -> Result<(), QueueError>;
}

/// First-contact task created for every completed intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseworkerActionItem {
    pub assessment_id: AssessmentId,
    pub action_type: String,
    pub priority: u8,
    pub description: String,
    pub plan: InterventionPlan,
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("caseworker queue unavailable: {0}")]
    Transport(String),
}

/// Public status payload returned to the respondent.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub assessment_id: AssessmentId,
    pub status: &'static str,
    pub total_score: u8,
    pub max_score: u8,
    pub vulnerability: Vulnerability,
    pub recommendation: String,
    pub next_steps: &'static str,
}
