use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{AnswerRecord, AssessmentId, AssessmentStatus};
use super::repository::{
    AssessmentRecord, AssessmentRepository, CaseworkerActionItem, CaseworkerQueue, QueueError,
    QueueSummary, RepositoryError,
};
use super::scoring::{ScoreResult, ScoringEngine};

/// Service composing the scoring engine, repository and caseworker queue.
pub struct IntakeService<R, Q> {
    repository: Arc<R>,
    queue: Arc<Q>,
    reference_date: Option<NaiveDate>,
    sequence: AtomicU64,
}

impl<R, Q> IntakeService<R, Q>
where
    R: AssessmentRepository + 'static,
    Q: CaseworkerQueue + 'static,
{
    pub fn new(repository: Arc<R>, queue: Arc<Q>) -> Self {
        Self {
            repository,
            queue,
            reference_date: None,
            sequence: AtomicU64::new(1),
        }
    }

    /// Pin the scoring date instead of reading the local clock per call.
    pub fn with_reference_date(mut self, reference_date: Option<NaiveDate>) -> Self {
        self.reference_date = reference_date;
        self
    }

    fn engine(&self) -> ScoringEngine {
        match self.reference_date {
            Some(date) => ScoringEngine::new(date),
            None => ScoringEngine::today(),
        }
    }

    fn next_assessment_id(&self) -> AssessmentId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        AssessmentId(format!("asmt-{id:06}"))
    }

    /// Score answers without storing anything.
    pub fn score(&self, answers: &AnswerRecord) -> ScoreResult {
        self.engine().score(answers)
    }

    /// Score and store a completed intake, then queue first contact.
    pub fn submit(&self, answers: AnswerRecord) -> Result<AssessmentRecord, IntakeServiceError> {
        let engine = self.engine();
        let score = engine.score(&answers);
        let plan = score.intervention().plan();
        let assessment_id = self.next_assessment_id();

        let record = AssessmentRecord {
            assessment_id: assessment_id.clone(),
            answers,
            score,
            plan,
            status: AssessmentStatus::Assessed,
            scored_on: engine.reference_date(),
        };

        let stored = self.repository.insert(record)?;

        let vulnerability = stored.score.vulnerability;
        self.queue.enqueue(CaseworkerActionItem {
            assessment_id: assessment_id.clone(),
            action_type: "initial_contact".to_string(),
            priority: vulnerability.caseworker_priority(),
            description: format!(
                "New intake: {} vulnerability, score {}/{}",
                vulnerability.label(),
                stored.score.total_score,
                stored.score.max_score
            ),
            plan: stored.plan.clone(),
        })?;

        info!(
            assessment_id = %assessment_id.0,
            total_score = stored.score.total_score,
            vulnerability = vulnerability.label(),
            "intake completed"
        );

        Ok(stored)
    }

    pub fn get(&self, assessment_id: &AssessmentId) -> Result<AssessmentRecord, IntakeServiceError> {
        let record = self
            .repository
            .fetch(assessment_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Record that the caseworker reached the respondent.
    pub fn mark_contacted(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentRecord, IntakeServiceError> {
        let mut record = self.get(assessment_id)?;
        record.status = AssessmentStatus::Contacted;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Assessments still awaiting first contact, most vulnerable first.
    pub fn pending(&self, limit: usize) -> Result<Vec<AssessmentRecord>, IntakeServiceError> {
        let mut records = self.repository.pending()?;
        records.sort_by(|left, right| {
            right
                .score
                .total_score
                .cmp(&left.score.total_score)
                .then_with(|| left.assessment_id.0.cmp(&right.assessment_id.0))
        });
        records.truncate(limit);
        Ok(records)
    }

    /// Pending and high-priority counts across the whole queue.
    pub fn queue_summary(&self) -> Result<QueueSummary, IntakeServiceError> {
        let records = self.repository.pending()?;
        Ok(QueueSummary::from_pending(&records))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}
