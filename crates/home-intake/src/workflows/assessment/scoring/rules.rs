use chrono::NaiveDate;

use super::super::domain::{is_no, is_yes, AnswerRecord};
use super::parsing::{age_on, years_from_text};
use super::{ScoreComponent, ScoringRule, SectionScores};

const SENIOR_AGE: i32 = 60;
const CHRONIC_YEARS: f64 = 1.0;
const CHRONIC_EPISODES: u32 = 4;
const HIGH_SERVICE_CONTACTS: f64 = 4.0;

struct Tally {
    sections: SectionScores,
    components: Vec<ScoreComponent>,
}

impl Tally {
    fn award(&mut self, rule: ScoringRule, notes: String) {
        self.sections.add(rule.section(), 1);
        self.components.push(ScoreComponent {
            rule,
            section: rule.section(),
            points: 1,
            notes,
        });
    }
}

/// Evaluates every rule in questionnaire order.
pub(crate) fn score_answers(
    answers: &AnswerRecord,
    reference_date: NaiveDate,
) -> (SectionScores, Vec<ScoreComponent>) {
    let mut tally = Tally {
        sections: SectionScores::default(),
        components: Vec::new(),
    };

    // Presurvey
    if let Some(birth) = answers.birth_date() {
        let age = age_on(birth, reference_date);
        if age >= SENIOR_AGE {
            tally.award(ScoringRule::Age, format!("age {age} on {reference_date}"));
        }
    }

    // Section A: housing history
    if let Some(location) = answers.sleeping_location() {
        if !location.is_sheltered() {
            tally.award(
                ScoringRule::SleepingLocation,
                format!("sleeps outside shelter programs ({location:?})"),
            );
        }
    }

    let years = years_from_text(answers.length_homeless.as_deref().unwrap_or_default());
    let episodes = answers.homeless_episode_count();
    if years >= CHRONIC_YEARS || episodes >= CHRONIC_EPISODES {
        tally.award(
            ScoringRule::Chronicity,
            format!("{years:.2} years homeless, {episodes} episode(s)"),
        );
    }

    // Section B: risks
    let contacts = answers.service_contact_total();
    if contacts >= HIGH_SERVICE_CONTACTS {
        tally.award(
            ScoringRule::EmergencyServiceUse,
            format!("{contacts} emergency or institutional contacts in six months"),
        );
    }

    if is_yes(answers.attacked) || is_yes(answers.self_harm) {
        tally.award(
            ScoringRule::RiskOfHarm,
            "attacked or risk of harm to self or others".to_string(),
        );
    }

    if is_yes(answers.legal_issues) {
        tally.award(
            ScoringRule::LegalIssues,
            "legal issues may affect housing".to_string(),
        );
    }

    if is_yes(answers.forced) || is_yes(answers.risky_behaviors) {
        tally.award(
            ScoringRule::Exploitation,
            "coercion or risky survival behaviors".to_string(),
        );
    }

    // Section C: daily functioning
    if is_yes(answers.owe_money) || is_no(answers.has_income) {
        tally.award(
            ScoringRule::MoneyManagement,
            "owes money or has no income".to_string(),
        );
    }

    if is_no(answers.meaningful_activities) {
        tally.award(
            ScoringRule::MeaningfulActivity,
            "no meaningful daily activity".to_string(),
        );
    }

    if is_no(answers.self_care) {
        tally.award(
            ScoringRule::SelfCare,
            "unable to meet basic self-care".to_string(),
        );
    }

    if is_yes(answers.relationship_cause) {
        tally.award(
            ScoringRule::RelationshipBreakdown,
            "homelessness caused by relationship breakdown".to_string(),
        );
    }

    // Section D: wellness
    let physical = [
        answers.physical_health_eviction,
        answers.chronic_health,
        answers.hiv_aids_interest,
        answers.physical_disability,
        answers.avoids_help,
        answers.pregnant,
    ]
    .into_iter()
    .any(is_yes);
    if physical {
        tally.award(
            ScoringRule::PhysicalHealth,
            "physical health concern reported".to_string(),
        );
    }

    let substance = is_yes(answers.substance_eviction)
        || is_yes(answers.substance_housing_difficulty);
    if substance {
        tally.award(
            ScoringRule::SubstanceUse,
            "substance use affects housing".to_string(),
        );
    }

    let mental = [
        answers.mental_health_eviction,
        answers.head_injury,
        answers.learning_disability,
        answers.mental_health_need,
    ]
    .into_iter()
    .any(is_yes);
    if mental {
        tally.award(
            ScoringRule::MentalHealth,
            "mental health or cognitive concern reported".to_string(),
        );
    }

    if physical && substance && mental {
        tally.award(
            ScoringRule::TriMorbidity,
            "physical, substance and mental health concerns together".to_string(),
        );
    }

    if is_yes(answers.not_taking_meds) || is_yes(answers.misusing_meds) {
        tally.award(
            ScoringRule::Medications,
            "medication not taken as prescribed".to_string(),
        );
    }

    if is_yes(answers.abuse_trauma) {
        tally.award(
            ScoringRule::AbuseTrauma,
            "abuse or trauma linked to homelessness".to_string(),
        );
    }

    (tally.sections, tally.components)
}
