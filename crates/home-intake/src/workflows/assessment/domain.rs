use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Tri-state questionnaire answer.
///
/// Values outside `yes`/`no`/`refused` deserialize as absent, so a stray
/// form value can never trigger a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    Refused,
}

impl Answer {
    /// Matches the literal form values only; `"Yes"` is not `"yes"`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "refused" => Some(Self::Refused),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Refused => "refused",
        }
    }
}

pub(crate) fn is_yes(answer: Option<Answer>) -> bool {
    answer == Some(Answer::Yes)
}

pub(crate) fn is_no(answer: Option<Answer>) -> bool {
    answer == Some(Answer::No)
}

fn lenient_answer<'de, D>(deserializer: D) -> Result<Option<Answer>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(value)) => Answer::parse(&value),
        _ => None,
    })
}

/// Numeric answer exactly as typed on the form: a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericAnswer {
    Number(f64),
    Text(String),
}

impl NumericAnswer {
    /// Whole-field numeric reading. Blank text is zero; anything that is not a
    /// finite, non-negative number is zero.
    pub fn as_quantity(&self) -> f64 {
        let value = match self {
            NumericAnswer::Number(value) => *value,
            NumericAnswer::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
        };

        if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        }
    }

    /// Leading-integer reading: `"4 times"` is 4, `"about 4"` is 0.
    pub fn as_leading_count(&self) -> u32 {
        match self {
            NumericAnswer::Number(value) if value.is_finite() && *value > 0.0 => {
                value.trunc().min(u32::MAX as f64) as u32
            }
            NumericAnswer::Number(_) => 0,
            NumericAnswer::Text(text) => {
                let trimmed = text.trim_start();
                let digits: String = trimmed
                    .strip_prefix('+')
                    .unwrap_or(trimmed)
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                if digits.is_empty() {
                    0
                } else {
                    digits.parse::<u32>().unwrap_or(u32::MAX)
                }
            }
        }
    }
}

/// Booleans, arrays and objects read as absent instead of failing the record.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<NumericAnswer>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(value)) => value.as_f64().map(NumericAnswer::Number),
        Some(serde_json::Value::String(value)) => Some(NumericAnswer::Text(value)),
        _ => None,
    })
}

impl From<u32> for NumericAnswer {
    fn from(value: u32) -> Self {
        NumericAnswer::Number(value as f64)
    }
}

impl From<&str> for NumericAnswer {
    fn from(value: &str) -> Self {
        NumericAnswer::Text(value.to_string())
    }
}

/// Where the respondent sleeps most frequently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SleepingLocation {
    Shelters,
    Transitional,
    SafeHaven,
    Outdoors,
    Other,
    Refused,
    Unlisted(String),
}

impl SleepingLocation {
    /// Case-insensitive exact match. Only an empty value is absent; padded
    /// values such as `"safe-haven "` are unlisted.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let normalized = raw.to_lowercase();
        let location = match normalized.as_str() {
            "shelters" => Self::Shelters,
            "transitional" => Self::Transitional,
            "safe-haven" => Self::SafeHaven,
            "outdoors" => Self::Outdoors,
            "other" => Self::Other,
            "refused" => Self::Refused,
            _ => Self::Unlisted(normalized),
        };
        Some(location)
    }

    /// Shelter-type programs; every other answer counts as unsheltered.
    pub fn is_sheltered(&self) -> bool {
        matches!(self, Self::Shelters | Self::Transitional | Self::SafeHaven)
    }
}

/// Completed questionnaire handed over by the form flow.
///
/// Field names follow the form's camelCase keys. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerRecord {
    pub date_of_birth: Option<String>,

    // Housing history
    pub sleeping_location: Option<String>,
    pub sleeping_location_other: Option<String>,
    pub length_homeless: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub homeless_episodes: Option<NumericAnswer>,

    // Risks: contacts in the past six months
    #[serde(deserialize_with = "lenient_count")]
    pub er_visits: Option<NumericAnswer>,
    #[serde(deserialize_with = "lenient_count")]
    pub ambulance: Option<NumericAnswer>,
    #[serde(deserialize_with = "lenient_count")]
    pub hospitalized: Option<NumericAnswer>,
    #[serde(deserialize_with = "lenient_count")]
    pub crisis_services: Option<NumericAnswer>,
    #[serde(deserialize_with = "lenient_count")]
    pub police_interactions: Option<NumericAnswer>,
    #[serde(deserialize_with = "lenient_count")]
    pub incarceration: Option<NumericAnswer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub attacked: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub self_harm: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub legal_issues: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub forced: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub risky_behaviors: Option<Answer>,

    // Daily functioning
    #[serde(deserialize_with = "lenient_answer")]
    pub owe_money: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub has_income: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub meaningful_activities: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub self_care: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub relationship_cause: Option<Answer>,

    // Wellness: physical health
    #[serde(deserialize_with = "lenient_answer")]
    pub physical_health_eviction: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub chronic_health: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub hiv_aids_interest: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub physical_disability: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub avoids_help: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub pregnant: Option<Answer>,

    // Wellness: substance use
    #[serde(deserialize_with = "lenient_answer")]
    pub substance_eviction: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub substance_housing_difficulty: Option<Answer>,

    // Wellness: mental health
    #[serde(deserialize_with = "lenient_answer")]
    pub mental_health_eviction: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub head_injury: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub learning_disability: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub mental_health_need: Option<Answer>,

    // Wellness: medications and trauma
    #[serde(deserialize_with = "lenient_answer")]
    pub not_taking_meds: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub misusing_meds: Option<Answer>,
    #[serde(deserialize_with = "lenient_answer")]
    pub abuse_trauma: Option<Answer>,

    // Contact details, never scored
    pub best_location: Option<String>,
    pub best_time: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_answer")]
    pub photo_consent: Option<Answer>,
}

impl AnswerRecord {
    /// Birth date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let raw = self.date_of_birth.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|value| value.date_naive())
            })
    }

    pub fn sleeping_location(&self) -> Option<SleepingLocation> {
        self.sleeping_location
            .as_deref()
            .and_then(SleepingLocation::parse)
    }

    pub fn homeless_episode_count(&self) -> u32 {
        self.homeless_episodes
            .as_ref()
            .map(NumericAnswer::as_leading_count)
            .unwrap_or(0)
    }

    /// Six-month total of emergency, crisis and justice-system contacts.
    pub fn service_contact_total(&self) -> f64 {
        [
            &self.er_visits,
            &self.ambulance,
            &self.hospitalized,
            &self.crisis_services,
            &self.police_interactions,
            &self.incarceration,
        ]
        .into_iter()
        .map(|count| count.as_ref().map(NumericAnswer::as_quantity).unwrap_or(0.0))
        .sum()
    }
}

/// Lifecycle of a stored assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Assessed,
    Contacted,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentStatus::Assessed => "assessed",
            AssessmentStatus::Contacted => "contacted",
        }
    }
}
