use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_WEIGHT: u8 = 5;
pub const MAX_WEIGHT: u8 = 50;
pub const TARGET_TOTAL_WEIGHT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("weight {weight} for {criterion} is outside 5..=50")]
    WeightOutOfRange {
        criterion: ScoringCriterion,
        weight: u8,
    },
    #[error("unknown scoring criterion '{0}'")]
    UnknownCriterion(String),
    #[error("rule set is missing {0}; every criterion must be enabled or disabled")]
    MissingCriterion(ScoringCriterion),
    #[error("attribute value {value} for {criterion} exceeds 100")]
    AttributeOutOfRange {
        criterion: ScoringCriterion,
        value: u8,
    },
}

/// Lead attribute a scoring rule weighs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringCriterion {
    Position,
    CompanySize,
    Industry,
    Location,
    ContactInfo,
}

impl ScoringCriterion {
    pub const ALL: [ScoringCriterion; 5] = [
        ScoringCriterion::Position,
        ScoringCriterion::CompanySize,
        ScoringCriterion::Industry,
        ScoringCriterion::Location,
        ScoringCriterion::ContactInfo,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ScoringCriterion::Position => "position",
            ScoringCriterion::CompanySize => "company_size",
            ScoringCriterion::Industry => "industry",
            ScoringCriterion::Location => "location",
            ScoringCriterion::ContactInfo => "contact_info",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            ScoringCriterion::Position => "Cargo/Posição",
            ScoringCriterion::CompanySize => "Tamanho da Empresa",
            ScoringCriterion::Industry => "Setor/Indústria",
            ScoringCriterion::Location => "Localização",
            ScoringCriterion::ContactInfo => "Informações de Contato",
        }
    }
}

impl fmt::Display for ScoringCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScoringCriterion {
    type Err = ScoringError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        ScoringCriterion::ALL
            .into_iter()
            .find(|criterion| criterion.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ScoringError::UnknownCriterion(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub weight: u8,
    pub enabled: bool,
}

impl ScoringRule {
    pub fn new(criterion: ScoringCriterion, weight: u8, enabled: bool) -> Result<Self, ScoringError> {
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
            return Err(ScoringError::WeightOutOfRange { criterion, weight });
        }
        Ok(Self { weight, enabled })
    }
}

/// Immutable rule set; edits produce a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ScoringCriterion, ScoringRule>",
    into = "BTreeMap<ScoringCriterion, ScoringRule>"
)]
pub struct ScoringRules {
    rules: BTreeMap<ScoringCriterion, ScoringRule>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        let rules = [
            (ScoringCriterion::Position, 30),
            (ScoringCriterion::CompanySize, 25),
            (ScoringCriterion::Industry, 20),
            (ScoringCriterion::Location, 10),
            (ScoringCriterion::ContactInfo, 15),
        ]
        .into_iter()
        .map(|(criterion, weight)| (criterion, ScoringRule { weight, enabled: true }))
        .collect();

        Self { rules }
    }
}

impl TryFrom<BTreeMap<ScoringCriterion, ScoringRule>> for ScoringRules {
    type Error = ScoringError;

    fn try_from(rules: BTreeMap<ScoringCriterion, ScoringRule>) -> Result<Self, Self::Error> {
        for criterion in ScoringCriterion::ALL {
            let rule = rules
                .get(&criterion)
                .ok_or(ScoringError::MissingCriterion(criterion))?;
            ScoringRule::new(criterion, rule.weight, rule.enabled)?;
        }
        Ok(Self { rules })
    }
}

impl From<ScoringRules> for BTreeMap<ScoringCriterion, ScoringRule> {
    fn from(value: ScoringRules) -> Self {
        value.rules
    }
}

impl ScoringRules {
    pub fn get(&self, criterion: ScoringCriterion) -> Option<ScoringRule> {
        self.rules.get(&criterion).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoringCriterion, ScoringRule)> + '_ {
        self.rules.iter().map(|(criterion, rule)| (*criterion, *rule))
    }

    pub fn enabled(&self) -> impl Iterator<Item = (ScoringCriterion, ScoringRule)> + '_ {
        self.iter().filter(|(_, rule)| rule.enabled)
    }

    pub fn with_weight(&self, criterion: ScoringCriterion, weight: u8) -> Result<Self, ScoringError> {
        let enabled = self.get(criterion).map(|rule| rule.enabled).unwrap_or(true);
        let rule = ScoringRule::new(criterion, weight, enabled)?;
        let mut rules = self.rules.clone();
        rules.insert(criterion, rule);
        Ok(Self { rules })
    }

    pub fn with_enabled(&self, criterion: ScoringCriterion, enabled: bool) -> Self {
        let mut rules = self.rules.clone();
        if let Some(rule) = rules.get_mut(&criterion) {
            rule.enabled = enabled;
        }
        Self { rules }
    }

    pub fn total_enabled_weight(&self) -> u32 {
        self.enabled().map(|(_, rule)| u32::from(rule.weight)).sum()
    }

    /// Advisory only; an off-target total is still scored.
    pub fn weight_warning(&self) -> Option<String> {
        let total = self.total_enabled_weight();
        (total != TARGET_TOTAL_WEIGHT).then(|| {
            format!("O peso total ({total}%) deve somar {TARGET_TOTAL_WEIGHT}% para melhor precisão")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sum_to_one_hundred() {
        let rules = ScoringRules::default();
        assert_eq!(rules.total_enabled_weight(), 100);
        assert!(rules.weight_warning().is_none());
        assert_eq!(
            rules.get(ScoringCriterion::Position),
            Some(ScoringRule {
                weight: 30,
                enabled: true
            })
        );
    }

    #[test]
    fn edits_return_new_values() {
        let original = ScoringRules::default();
        let edited = original
            .with_weight(ScoringCriterion::Location, 20)
            .expect("weight in range");
        assert_eq!(original.get(ScoringCriterion::Location).map(|r| r.weight), Some(10));
        assert_eq!(edited.get(ScoringCriterion::Location).map(|r| r.weight), Some(20));
        assert_eq!(edited.total_enabled_weight(), 110);
        assert!(edited.weight_warning().expect("warns").contains("110%"));

        let disabled = original.with_enabled(ScoringCriterion::Position, false);
        assert_eq!(disabled.total_enabled_weight(), 70);
        assert!(!disabled.get(ScoringCriterion::Position).expect("kept").enabled);
    }

    #[test]
    fn rejects_out_of_range_weights() {
        let rules = ScoringRules::default();
        assert_eq!(
            rules.with_weight(ScoringCriterion::Industry, 4),
            Err(ScoringError::WeightOutOfRange {
                criterion: ScoringCriterion::Industry,
                weight: 4
            })
        );
        assert!(rules.with_weight(ScoringCriterion::Industry, 51).is_err());
        assert!(rules.with_weight(ScoringCriterion::Industry, 50).is_ok());
    }

    #[test]
    fn deserialization_validates_weights() {
        let mut json = serde_json::to_value(ScoringRules::default()).expect("serializes");
        json["position"]["weight"] = serde_json::json!(50);
        json["location"]["enabled"] = serde_json::json!(false);
        let rules: ScoringRules = serde_json::from_value(json.clone()).expect("valid rules");
        assert_eq!(rules.total_enabled_weight(), 110);

        json["position"]["weight"] = serde_json::json!(80);
        assert!(serde_json::from_value::<ScoringRules>(json).is_err());
    }

    #[test]
    fn partial_rule_sets_are_rejected() {
        let mut partial = BTreeMap::from(ScoringRules::default());
        partial.remove(&ScoringCriterion::ContactInfo);
        assert_eq!(
            ScoringRules::try_from(partial),
            Err(ScoringError::MissingCriterion(ScoringCriterion::ContactInfo))
        );

        assert!(serde_json::from_str::<ScoringRules>(
            r#"{"position":{"weight":50,"enabled":true}}"#
        )
        .is_err());
        assert!(serde_json::from_str::<ScoringRules>("{}").is_err());
    }

    #[test]
    fn criterion_parses_from_key() {
        assert_eq!("contact_info".parse::<ScoringCriterion>(), Ok(ScoringCriterion::ContactInfo));
        assert!("salary".parse::<ScoringCriterion>().is_err());
    }
}
