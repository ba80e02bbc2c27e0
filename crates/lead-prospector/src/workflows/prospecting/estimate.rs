use super::criteria::SearchCriteria;
use super::seed::{criteria_hash, draw};
use super::tables::{
    company_size_factor, industry_factor, location_factor, token_factor, BASE_LEADS,
    JOB_TITLE_WEIGHTS, KEYWORD_WEIGHTS,
};
use serde::{Deserialize, Serialize};

/// Display figures derived from a criteria snapshot. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub total_leads: u32,
    pub qualified_leads: u32,
    pub contacted_leads: u32,
    pub conversion_rate: String,
}

impl EstimateResult {
    /// Baseline shown while no search is configured.
    pub fn baseline() -> Self {
        Self {
            total_leads: 0,
            qualified_leads: 0,
            contacted_leads: 0,
            conversion_rate: format_rate(0.0),
        }
    }

    pub fn is_baseline(&self) -> bool {
        self.total_leads == 0
    }
}

/// Multiplicative factors that produced an estimate, for audit and display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateFactors {
    pub industry: f64,
    pub company_size: f64,
    pub location: f64,
    pub keywords: f64,
    pub job_titles: f64,
    pub variation: f64,
}

impl EstimateFactors {
    pub fn for_criteria(criteria: &SearchCriteria, seed: u32) -> Self {
        Self {
            industry: industry_factor(criteria.industry),
            company_size: company_size_factor(criteria.company_size),
            location: location_factor(&criteria.location),
            keywords: token_factor(&criteria.keyword_tokens(), KEYWORD_WEIGHTS),
            job_titles: token_factor(&criteria.job_title_tokens(), JOB_TITLE_WEIGHTS),
            variation: 0.8 + 0.4 * draw(seed, 0),
        }
    }

    pub fn product(&self) -> f64 {
        self.industry
            * self.company_size
            * self.location
            * self.keywords
            * self.job_titles
            * self.variation
    }
}

/// Seed derived from the criteria text; identical criteria share a seed.
pub fn criteria_seed(criteria: &SearchCriteria) -> u32 {
    criteria_hash(&criteria.seed_key())
}

pub fn estimate(criteria: &SearchCriteria) -> EstimateResult {
    estimate_seeded(criteria, criteria_seed(criteria))
}

pub fn estimate_seeded(criteria: &SearchCriteria, seed: u32) -> EstimateResult {
    if criteria.is_empty() {
        return EstimateResult::baseline();
    }

    let factors = EstimateFactors::for_criteria(criteria, seed);
    let total = (BASE_LEADS * factors.product()).round().max(1.0) as u32;

    let qualification_rate = 0.15 + 0.25 * draw(seed, 1);
    let qualified = ((f64::from(total) * qualification_rate).floor() as u32).clamp(1, total);

    let contact_rate = 0.35 + 0.20 * draw(seed, 2);
    let contacted = ((f64::from(qualified) * contact_rate).floor() as u32).clamp(1, qualified);

    EstimateResult {
        total_leads: total,
        qualified_leads: qualified,
        contacted_leads: contacted,
        conversion_rate: format_rate(f64::from(qualified) / f64::from(total) * 100.0),
    }
}

fn format_rate(rate: f64) -> String {
    format!("{rate:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::prospecting::criteria::{CompanySize, Industry};

    fn sample() -> SearchCriteria {
        SearchCriteria::default()
            .with_keywords("diretor de marketing, CEO")
            .with_location("Belo Horizonte, MG")
            .with_industry(Some(Industry::Finance))
            .with_company_size(Some(CompanySize::Small))
    }

    #[test]
    fn empty_criteria_returns_baseline() {
        let first = estimate(&SearchCriteria::default());
        let second = estimate(&SearchCriteria::default());
        assert_eq!(first, EstimateResult::baseline());
        assert_eq!(first, second);
        assert_eq!(first.conversion_rate, "0.0");
    }

    #[test]
    fn identical_criteria_reproduce_identical_estimates() {
        assert_eq!(estimate(&sample()), estimate(&sample()));
        assert_eq!(estimate_seeded(&sample(), 42), estimate_seeded(&sample(), 42));
    }

    #[test]
    fn counts_are_nested_and_floored_at_one() {
        let smallest = SearchCriteria::default()
            .with_industry(Some(Industry::Telecom))
            .with_company_size(Some(CompanySize::Corporation))
            .with_location("Lisboa");
        for seed in 0..200 {
            let result = estimate_seeded(&smallest, seed);
            assert!(result.total_leads >= 1);
            assert!(result.qualified_leads >= 1);
            assert!(result.contacted_leads >= 1);
            assert!(result.qualified_leads <= result.total_leads);
            assert!(result.contacted_leads <= result.qualified_leads);
        }
    }

    #[test]
    fn conversion_rate_has_one_decimal() {
        let result = estimate(&sample());
        let (_, decimals) = result
            .conversion_rate
            .split_once('.')
            .expect("decimal point present");
        assert_eq!(decimals.len(), 1);
    }

    #[test]
    fn variation_stays_within_twenty_percent() {
        for seed in 0..500 {
            let factors = EstimateFactors::for_criteria(&sample(), seed);
            assert!((0.8..1.2).contains(&factors.variation));
        }
    }
}
