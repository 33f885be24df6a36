use serde::{Deserialize, Serialize};

/// Acuity band derived solely from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vulnerability {
    Low,
    Moderate,
    High,
}

impl Vulnerability {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Moderate, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Vulnerability::Low => "low",
            Vulnerability::Moderate => "moderate",
            Vulnerability::High => "high",
        }
    }

    /// Priority of the caseworker's first-contact action item (5 is highest).
    pub const fn caseworker_priority(self) -> u8 {
        match self {
            Vulnerability::High => 5,
            Vulnerability::Moderate | Vulnerability::Low => 3,
        }
    }
}

/// Housing-intervention tier recommended for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingIntervention {
    NoHousingIntervention,
    RapidReHousing,
    PermanentSupportiveHousing,
}

impl HousingIntervention {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::NoHousingIntervention,
            Self::RapidReHousing,
            Self::PermanentSupportiveHousing,
        ]
    }

    /// 0-3, 4-7 and 8 upward map to the three tiers.
    pub const fn for_score(total: u8) -> Self {
        match total {
            0..=3 => Self::NoHousingIntervention,
            4..=7 => Self::RapidReHousing,
            _ => Self::PermanentSupportiveHousing,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NoHousingIntervention => "No Housing Intervention",
            Self::RapidReHousing => "Rapid Re-Housing Assessment",
            Self::PermanentSupportiveHousing => "Permanent Supportive Housing Assessment",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::NoHousingIntervention => {
                "You may benefit from prevention services and community resources."
            }
            Self::RapidReHousing => {
                "You may be eligible for short to medium-term rental assistance with supportive services."
            }
            Self::PermanentSupportiveHousing => {
                "You may be eligible for long-term housing with ongoing supportive services (Housing First model)."
            }
        }
    }

    pub const fn vulnerability(self) -> Vulnerability {
        match self {
            Self::NoHousingIntervention => Vulnerability::Low,
            Self::RapidReHousing => Vulnerability::Moderate,
            Self::PermanentSupportiveHousing => Vulnerability::High,
        }
    }

    /// Caseworker follow-up plan for the tier.
    pub fn plan(self) -> InterventionPlan {
        let (immediate_actions, support_services, timeline) = match self {
            Self::PermanentSupportiveHousing => (HIGH_ACTIONS, HIGH_SERVICES, HIGH_TIMELINE),
            Self::RapidReHousing => (MODERATE_ACTIONS, MODERATE_SERVICES, MODERATE_TIMELINE),
            Self::NoHousingIntervention => (LOW_ACTIONS, LOW_SERVICES, LOW_TIMELINE),
        };

        InterventionPlan {
            intervention: self,
            vulnerability: self.vulnerability(),
            immediate_actions: immediate_actions.iter().map(|s| s.to_string()).collect(),
            support_services: support_services.iter().map(|s| s.to_string()).collect(),
            timeline: timeline.to_string(),
        }
    }
}

const HIGH_ACTIONS: &[&str] = &[
    "Contact emergency shelter for immediate placement",
    "Connect with healthcare services within 48 hours",
    "Begin permanent supportive housing application",
    "Schedule comprehensive needs assessment",
];
const HIGH_SERVICES: &[&str] = &[
    "Case management",
    "Mental health services",
    "Substance abuse treatment",
    "Medical care coordination",
    "Benefits enrollment",
];
const HIGH_TIMELINE: &str = "Immediate priority - contact within 24 hours";

const MODERATE_ACTIONS: &[&str] = &[
    "Schedule rapid re-housing assessment",
    "Connect with job training resources",
    "Identify temporary housing options",
    "Begin document collection process",
];
const MODERATE_SERVICES: &[&str] = &[
    "Employment assistance",
    "Financial literacy training",
    "Life skills coaching",
    "Healthcare navigation",
];
const MODERATE_TIMELINE: &str = "High priority - contact within 72 hours";

const LOW_ACTIONS: &[&str] = &[
    "Assess for diversion opportunities",
    "Connect with prevention services",
    "Provide resource navigation",
    "Schedule follow-up check-in",
];
const LOW_SERVICES: &[&str] = &[
    "Financial assistance",
    "Mediation services",
    "Resource referrals",
    "Community support groups",
];
const LOW_TIMELINE: &str = "Standard priority - contact within 1 week";

/// Follow-up actions a caseworker takes for a scored assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionPlan {
    pub intervention: HousingIntervention,
    pub vulnerability: Vulnerability,
    pub immediate_actions: Vec<String>,
    pub support_services: Vec<String>,
    pub timeline: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_partition_the_score_range() {
        let tiers: Vec<_> = (0..=17).map(HousingIntervention::for_score).collect();
        assert!(tiers[..=3]
            .iter()
            .all(|tier| *tier == HousingIntervention::NoHousingIntervention));
        assert!(tiers[4..=7]
            .iter()
            .all(|tier| *tier == HousingIntervention::RapidReHousing));
        assert!(tiers[8..]
            .iter()
            .all(|tier| *tier == HousingIntervention::PermanentSupportiveHousing));
    }

    #[test]
    fn vulnerability_tracks_tier_order() {
        let bands: Vec<_> = HousingIntervention::ordered()
            .into_iter()
            .map(HousingIntervention::vulnerability)
            .collect();
        assert_eq!(
            bands,
            vec![
                Vulnerability::Low,
                Vulnerability::Moderate,
                Vulnerability::High
            ]
        );
    }

    #[test]
    fn high_tier_plan_demands_same_day_contact() {
        let plan = HousingIntervention::PermanentSupportiveHousing.plan();
        assert_eq!(plan.vulnerability, Vulnerability::High);
        assert!(plan.timeline.contains("24 hours"));
        assert!(plan
            .support_services
            .iter()
            .any(|service| service == "Case management"));
        assert_eq!(plan.vulnerability.caseworker_priority(), 5);
    }

    #[test]
    fn vulnerability_serializes_lowercase() {
        let json = serde_json::to_string(&Vulnerability::Moderate).expect("serializes");
        assert_eq!(json, "\"moderate\"");
    }
}
