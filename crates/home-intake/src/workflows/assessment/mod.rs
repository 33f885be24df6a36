//! Vulnerability triage for housing intake.
//!
//! Answers gathered across the five questionnaire sections arrive as one
//! [`AnswerRecord`]. The [`ScoringEngine`] turns them into a [`ScoreResult`];
//! the [`IntakeService`] stores the result and queues caseworker follow-up.

pub mod domain;
pub mod import;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Answer, AnswerRecord, AssessmentId, AssessmentStatus, NumericAnswer, SleepingLocation,
};
pub use import::{AnswerImportError, AnswerRecordImporter, ImportedAnswers};
pub use recommendation::{HousingIntervention, InterventionPlan, Vulnerability};
pub use repository::{
    AssessmentRecord, AssessmentRepository, AssessmentStatusView, CaseworkerActionItem,
    CaseworkerQueue, QueueError, QueueSummary, RepositoryError, VulnerabilityCount,
};
pub use router::assessment_router;
pub use scoring::{
    score, ScoreComponent, ScoreResult, ScoringEngine, ScoringRule, Section,
    SectionBreakdownEntry, SectionScores, MAX_SCORE,
};
pub use service::{IntakeService, IntakeServiceError};
