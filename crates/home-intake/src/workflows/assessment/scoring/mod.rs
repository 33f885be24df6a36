mod parsing;
mod rules;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::AnswerRecord;
use super::recommendation::{HousingIntervention, Vulnerability};

/// Highest attainable total across all sections.
pub const MAX_SCORE: u8 = 17;

/// Stateless triage scorer pinned to a reference date.
///
/// The reference date stands in for "today" when deriving the respondent's
/// age; everything else is a pure function of the answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringEngine {
    reference_date: NaiveDate,
}

impl ScoringEngine {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn score(&self, answers: &AnswerRecord) -> ScoreResult {
        let (section_scores, components) = rules::score_answers(answers, self.reference_date);
        let total_score = section_scores.total();
        let intervention = HousingIntervention::for_score(total_score);

        debug!(
            total_score,
            vulnerability = intervention.vulnerability().label(),
            rules_fired = components.len(),
            "assessment scored"
        );

        ScoreResult {
            total_score,
            max_score: MAX_SCORE,
            section_scores,
            recommendation: intervention.label().to_string(),
            recommendation_description: intervention.description().to_string(),
            vulnerability: intervention.vulnerability(),
            components,
        }
    }
}

/// Scores against the local calendar date.
pub fn score(answers: &AnswerRecord) -> ScoreResult {
    ScoringEngine::today().score(answers)
}

/// Questionnaire sections, in the order the form presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Presurvey,
    HousingHistory,
    Risks,
    DailyFunctioning,
    Wellness,
}

impl Section {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Presurvey,
            Self::HousingHistory,
            Self::Risks,
            Self::DailyFunctioning,
            Self::Wellness,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Presurvey => "Pre-Survey (Age)",
            Self::HousingHistory => "Housing History",
            Self::Risks => "Risks",
            Self::DailyFunctioning => "Daily Functioning",
            Self::Wellness => "Wellness",
        }
    }

    pub const fn max_points(self) -> u8 {
        match self {
            Self::Presurvey => 1,
            Self::HousingHistory => 2,
            Self::Risks => 4,
            Self::DailyFunctioning => 4,
            Self::Wellness => 6,
        }
    }
}

/// Per-section subtotals; serialized with the form's `sectionA`..`sectionD` keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScores {
    pub presurvey: u8,
    pub section_a: u8,
    pub section_b: u8,
    pub section_c: u8,
    pub section_d: u8,
}

impl SectionScores {
    pub fn get(&self, section: Section) -> u8 {
        match section {
            Section::Presurvey => self.presurvey,
            Section::HousingHistory => self.section_a,
            Section::Risks => self.section_b,
            Section::DailyFunctioning => self.section_c,
            Section::Wellness => self.section_d,
        }
    }

    pub(crate) fn add(&mut self, section: Section, points: u8) {
        let slot = match section {
            Section::Presurvey => &mut self.presurvey,
            Section::HousingHistory => &mut self.section_a,
            Section::Risks => &mut self.section_b,
            Section::DailyFunctioning => &mut self.section_c,
            Section::Wellness => &mut self.section_d,
        };
        *slot += points;
    }

    pub fn total(&self) -> u8 {
        Section::ordered()
            .into_iter()
            .map(|section| self.get(section))
            .sum()
    }

    /// Display rows pairing each subtotal with its label and ceiling.
    pub fn breakdown(&self) -> Vec<SectionBreakdownEntry> {
        Section::ordered()
            .into_iter()
            .map(|section| SectionBreakdownEntry {
                section,
                label: section.label(),
                score: self.get(section),
                max: section.max_points(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionBreakdownEntry {
    pub section: Section,
    pub label: &'static str,
    pub score: u8,
    pub max: u8,
}

/// Individual scoring rules, each worth one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    Age,
    SleepingLocation,
    Chronicity,
    EmergencyServiceUse,
    RiskOfHarm,
    LegalIssues,
    Exploitation,
    MoneyManagement,
    MeaningfulActivity,
    SelfCare,
    RelationshipBreakdown,
    PhysicalHealth,
    SubstanceUse,
    MentalHealth,
    TriMorbidity,
    Medications,
    AbuseTrauma,
}

impl ScoringRule {
    pub const fn section(self) -> Section {
        match self {
            Self::Age => Section::Presurvey,
            Self::SleepingLocation | Self::Chronicity => Section::HousingHistory,
            Self::EmergencyServiceUse | Self::RiskOfHarm | Self::LegalIssues | Self::Exploitation => {
                Section::Risks
            }
            Self::MoneyManagement
            | Self::MeaningfulActivity
            | Self::SelfCare
            | Self::RelationshipBreakdown => Section::DailyFunctioning,
            Self::PhysicalHealth
            | Self::SubstanceUse
            | Self::MentalHealth
            | Self::TriMorbidity
            | Self::Medications
            | Self::AbuseTrauma => Section::Wellness,
        }
    }
}

/// A rule that contributed to the total, kept for caseworker review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: ScoringRule,
    pub section: Section,
    pub points: u8,
    pub notes: String,
}

/// Score breakdown and recommendation for one completed questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub total_score: u8,
    pub max_score: u8,
    pub section_scores: SectionScores,
    pub recommendation: String,
    pub recommendation_description: String,
    pub vulnerability: Vulnerability,
    #[serde(default)]
    pub components: Vec<ScoreComponent>,
}

impl ScoreResult {
    pub fn intervention(&self) -> HousingIntervention {
        HousingIntervention::for_score(self.total_score)
    }

    pub fn fired(&self, rule: ScoringRule) -> bool {
        self.components.iter().any(|component| component.rule == rule)
    }
}
