//! Weighted lead qualification.
//!
//! A score is the sum of `attribute value * weight / 100` over the enabled rules,
//! rounded, then bucketed into a [`LeadCategory`]. Weights are not normalized, so
//! rule sets heavier than 100% can score above 100.

mod attributes;
mod category;
mod rules;

pub use attributes::{
    company_size_value, contact_value, industry_value, location_value, position_value,
    AttributeValues, LeadProfile,
};
pub use category::{LeadCategory, HOT_THRESHOLD, WARM_THRESHOLD};
pub use rules::{
    ScoringCriterion, ScoringError, ScoringRule, ScoringRules, MAX_WEIGHT, MIN_WEIGHT,
    TARGET_TOTAL_WEIGHT,
};

use crate::workflows::notifications::{Notification, NotificationAction};
use serde::Serialize;

/// Discrete contribution to a lead score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    pub criterion: ScoringCriterion,
    pub attribute_value: u8,
    pub weight: u8,
    pub contribution: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub total_score: u8,
    pub raw_total: f64,
    pub category: LeadCategory,
    pub components: Vec<ScoreComponent>,
}

/// Rounded weighted score for the enabled rules.
pub fn score(values: &AttributeValues, rules: &ScoringRules) -> Result<u8, ScoringError> {
    score_breakdown(values, rules).map(|breakdown| breakdown.total_score)
}

pub fn score_breakdown(
    values: &AttributeValues,
    rules: &ScoringRules,
) -> Result<ScoreBreakdown, ScoringError> {
    let mut components = Vec::new();
    let mut raw_total = 0.0;

    for (criterion, rule) in rules.enabled() {
        let Some(&value) = values.get(&criterion) else {
            continue;
        };
        if value > 100 {
            return Err(ScoringError::AttributeOutOfRange { criterion, value });
        }

        let contribution = f64::from(value) * f64::from(rule.weight) / 100.0;
        raw_total += contribution;
        components.push(ScoreComponent {
            criterion,
            attribute_value: value,
            weight: rule.weight,
            contribution,
            notes: format!(
                "{}: {value} pts at {}% weight",
                criterion.title(),
                rule.weight
            ),
        });
    }

    // at most 5 rules * 50% * 100 pts, so the sum fits in a u8
    let total_score = raw_total.round() as u8;
    Ok(ScoreBreakdown {
        total_score,
        raw_total,
        category: LeadCategory::from_score(total_score),
        components,
    })
}

/// Stateless scorer bound to one rule set.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    rules: ScoringRules,
}

impl ScoringEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn score_profile(&self, profile: &LeadProfile) -> Result<ScoreBreakdown, ScoringError> {
        score_breakdown(&profile.attribute_values(), &self.rules)
    }

    /// Replaces the rule set and returns the save confirmation plus any weight advisory.
    pub fn save_rules(self, rules: ScoringRules) -> (Self, Notification, Option<String>) {
        let warning = rules.weight_warning();
        (
            Self { rules },
            Notification::for_action(NotificationAction::RulesSaved),
            warning,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_marks() -> AttributeValues {
        ScoringCriterion::ALL
            .into_iter()
            .map(|criterion| (criterion, 100))
            .collect()
    }

    #[test]
    fn example_lead_scores_ninety_with_default_rules() {
        let breakdown = ScoringEngine::default()
            .score_profile(&LeadProfile::example())
            .expect("example scores");
        assert_eq!(breakdown.total_score, 90);
        assert_eq!(breakdown.category, LeadCategory::Quente);
        assert_eq!(breakdown.components.len(), 5);
    }

    #[test]
    fn disabled_rules_do_not_contribute() {
        let rules = ScoringRules::default().with_enabled(ScoringCriterion::Position, false);
        assert_eq!(score(&full_marks(), &rules), Ok(70));

        let none = ScoringCriterion::ALL
            .into_iter()
            .fold(ScoringRules::default(), |rules, criterion| {
                rules.with_enabled(criterion, false)
            });
        assert_eq!(score(&full_marks(), &none), Ok(0));
    }

    #[test]
    fn score_is_rounded_but_not_normalized() {
        let mut values = AttributeValues::new();
        values.insert(ScoringCriterion::Location, 55);
        let rules = ScoringRules::default().with_weight(ScoringCriterion::Location, 15).expect("weight");
        // 55 * 15 / 100 = 8.25
        assert_eq!(score(&values, &rules), Ok(8));

        let heavy = ScoringCriterion::ALL
            .into_iter()
            .try_fold(ScoringRules::default(), |rules, criterion| {
                rules.with_weight(criterion, MAX_WEIGHT)
            })
            .expect("max weights");
        let breakdown = score_breakdown(&full_marks(), &heavy).expect("scores");
        assert_eq!(breakdown.total_score, 250);
        assert_eq!(breakdown.raw_total, 250.0);
        assert_eq!(breakdown.category, LeadCategory::Quente);
    }

    #[test]
    fn score_is_monotonic_in_enabled_weights() {
        let mut values = LeadProfile::example().attribute_values();
        values.insert(ScoringCriterion::ContactInfo, 70);

        for criterion in ScoringCriterion::ALL {
            let mut previous = 0;
            for weight in (MIN_WEIGHT..=MAX_WEIGHT).step_by(5) {
                let rules = ScoringRules::default()
                    .with_weight(criterion, weight)
                    .expect("weight in range");
                let current = score(&values, &rules).expect("scores");
                assert!(current >= previous, "{criterion} at {weight}");
                previous = current;
            }
        }
    }

    #[test]
    fn rejects_attribute_values_above_one_hundred() {
        let mut values = full_marks();
        values.insert(ScoringCriterion::Industry, 120);
        assert_eq!(
            score(&values, &ScoringRules::default()),
            Err(ScoringError::AttributeOutOfRange {
                criterion: ScoringCriterion::Industry,
                value: 120
            })
        );
    }

    #[test]
    fn saving_rules_reports_weight_advisory() {
        let rules = ScoringRules::default()
            .with_weight(ScoringCriterion::Industry, 30)
            .expect("weight");
        let (engine, notification, warning) = ScoringEngine::default().save_rules(rules);
        assert_eq!(notification.title, "Regras de Qualificação Atualizadas");
        assert!(warning.is_some());
        assert_eq!(engine.rules().total_enabled_weight(), 110);
    }
}
