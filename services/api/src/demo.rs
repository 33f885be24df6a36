use crate::infra::{InMemoryAssessmentRepository, InMemoryCaseworkerQueue};
use chrono::{Local, NaiveDate};
use clap::Args;
use home_intake::config::AppConfig;
use home_intake::error::AppError;
use home_intake::telemetry::{self, LogSink};
use home_intake::workflows::assessment::{
    Answer, AnswerRecord, AnswerRecordImporter, AssessmentRepository, IntakeService,
    NumericAnswer, ScoreResult, ScoringEngine, Vulnerability,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding one answer record with the form's camelCase keys
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Date used to derive the respondent's age (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export whose header row uses the form's camelCase keys
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Date used to derive each respondent's age (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the rules that fired for each row
    #[arg(long)]
    pub(crate) show_components: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the scoring date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

/// CLI output goes to stdout, so logs are routed to stderr.
fn cli_engine(today: Option<NaiveDate>) -> Result<ScoringEngine, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    let today = today
        .or(config.scoring.reference_date)
        .unwrap_or_else(|| Local::now().date_naive());
    Ok(ScoringEngine::new(today))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { answers, today } = args;
    let engine = cli_engine(today)?;

    let raw = std::fs::read_to_string(&answers)?;
    let record: AnswerRecord = serde_json::from_str(&raw)?;
    let result = engine.score(&record);

    println!(
        "Vulnerability assessment for {} (scored on {})",
        answers.display(),
        engine.reference_date()
    );
    render_score(&result, true);
    render_plan(&result);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs {
        csv,
        today,
        show_components,
    } = args;
    let engine = cli_engine(today)?;

    let imported = AnswerRecordImporter::from_path(&csv)?;
    println!(
        "Scoring {} intake(s) from {} (scored on {})",
        imported.len(),
        csv.display(),
        engine.reference_date()
    );

    let mut tier_counts = [0usize; 3];
    for row in &imported {
        let result = engine.score(&row.answers);
        let slot = match result.vulnerability {
            Vulnerability::Low => 0,
            Vulnerability::Moderate => 1,
            Vulnerability::High => 2,
        };
        tier_counts[slot] += 1;
        println!(
            "\nRow {}: {}/{} -> {} ({})",
            row.row,
            result.total_score,
            result.max_score,
            result.recommendation,
            result.vulnerability.label()
        );
        render_score(&result, show_components);
    }

    println!(
        "\nSummary: {} low | {} moderate | {} high",
        tier_counts[0], tier_counts[1], tier_counts[2]
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = cli_engine(args.today)?;
    let today = engine.reference_date();

    println!("Housing intake triage demo (scored on {today})");
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let queue = Arc::new(InMemoryCaseworkerQueue::default());
    let service = IntakeService::new(repository.clone(), queue.clone())
        .with_reference_date(Some(today));

    for (label, answers) in demo_intakes(today) {
        println!("\n{label}");
        let record = match service.submit(answers) {
            Ok(record) => record,
            Err(err) => {
                println!("  Submission rejected: {}", err);
                continue;
            }
        };
        render_score(&record.score, true);

        match serde_json::to_string_pretty(&record.status_view()) {
            Ok(json) => println!("  Respondent status payload:\n{}", json),
            Err(err) => println!("  Respondent status payload unavailable: {}", err),
        }
    }

    let items = queue.items();
    if items.is_empty() {
        println!("\nCaseworker queue: empty");
    } else {
        println!("\nCaseworker queue:");
        for item in &items {
            println!(
                "  - [p{}] {} {}: {} ({})",
                item.priority,
                item.action_type,
                item.assessment_id.0,
                item.description,
                item.plan.timeline
            );
        }
    }

    let pending = match service.pending(10) {
        Ok(pending) => pending,
        Err(err) => {
            println!("  Worklist unavailable: {}", err);
            return Ok(());
        }
    };
    if let Some(first) = pending.first() {
        match service.mark_contacted(&first.assessment_id) {
            Ok(record) => println!(
                "\nCaseworker reached {} -> status {}",
                record.assessment_id.0,
                record.status.label()
            ),
            Err(err) => println!("\nContact could not be recorded: {}", err),
        }
    }

    match repository.pending() {
        Ok(remaining) => println!("Assessments still awaiting contact: {}", remaining.len()),
        Err(err) => println!("Repository unavailable: {}", err),
    }

    Ok(())
}

pub(crate) fn render_score(result: &ScoreResult, show_components: bool) {
    println!(
        "  Total: {}/{} | {} vulnerability",
        result.total_score,
        result.max_score,
        result.vulnerability.label()
    );
    println!("  Recommendation: {}", result.recommendation);
    println!("  {}", result.recommendation_description);
    println!("  Section breakdown:");
    for entry in result.section_scores.breakdown() {
        println!("    - {}: {}/{}", entry.label, entry.score, entry.max);
    }

    if show_components && !result.components.is_empty() {
        println!("  Rules that fired:");
        for component in &result.components {
            println!("    - {:?}: +{} ({})", component.rule, component.points, component.notes);
        }
    }
}

fn render_plan(result: &ScoreResult) {
    let plan = result.intervention().plan();
    println!("  Timeline: {}", plan.timeline);
    println!("  Immediate actions:");
    for action in &plan.immediate_actions {
        println!("    - {action}");
    }
    println!("  Support services: {}", plan.support_services.join(", "));
}

fn demo_intakes(today: NaiveDate) -> Vec<(&'static str, AnswerRecord)> {
    let sixty_five_years_ago = today
        .checked_sub_months(chrono::Months::new(65 * 12))
        .unwrap_or(today);

    let sheltered = AnswerRecord {
        sleeping_location: Some("shelters".to_string()),
        length_homeless: Some("3 months".to_string()),
        homeless_episodes: Some(NumericAnswer::from(1)),
        er_visits: Some(NumericAnswer::from(0)),
        attacked: Some(Answer::No),
        legal_issues: Some(Answer::No),
        owe_money: Some(Answer::No),
        has_income: Some(Answer::Yes),
        meaningful_activities: Some(Answer::Yes),
        self_care: Some(Answer::Yes),
        relationship_cause: Some(Answer::No),
        best_location: Some("Downtown drop-in center".to_string()),
        ..AnswerRecord::default()
    };

    let unsheltered = AnswerRecord {
        date_of_birth: Some(sixty_five_years_ago.format("%Y-%m-%d").to_string()),
        sleeping_location: Some("outdoors".to_string()),
        length_homeless: Some("3 years".to_string()),
        er_visits: Some(NumericAnswer::from("2")),
        ambulance: Some(NumericAnswer::from("1")),
        attacked: Some(Answer::Yes),
        legal_issues: Some(Answer::Yes),
        owe_money: Some(Answer::Yes),
        has_income: Some(Answer::Yes),
        meaningful_activities: Some(Answer::Yes),
        self_care: Some(Answer::Yes),
        chronic_health: Some(Answer::Yes),
        substance_eviction: Some(Answer::Yes),
        mental_health_eviction: Some(Answer::Yes),
        abuse_trauma: Some(Answer::Yes),
        best_time: Some("Mornings".to_string()),
        ..AnswerRecord::default()
    };

    vec![
        ("Intake 1: sheltered respondent", sheltered),
        ("Intake 2: older respondent sleeping outdoors", unsheltered),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_intakes_span_the_tiers() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 19).expect("valid date");
        let engine = ScoringEngine::new(today);

        let tiers: Vec<_> = demo_intakes(today)
            .into_iter()
            .map(|(_, answers)| engine.score(&answers).vulnerability)
            .collect();

        assert_eq!(tiers, vec![Vulnerability::Low, Vulnerability::High]);
    }
}
