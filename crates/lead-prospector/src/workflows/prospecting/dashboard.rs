use super::criteria::{Industry, SearchCriteria};
use super::estimate::{criteria_seed, estimate_seeded, EstimateResult};
use super::leads::{generate_leads, SyntheticLead, DEFAULT_LEAD_COUNT};
use super::seed::draw;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

pub const WEEKLY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceShare {
    pub name: &'static str,
    pub value: u8,
    pub color: &'static str,
}

/// Lead origin split; tech-heavy industries lean on LinkedIn and Apollo.
pub fn source_distribution(industry: Option<Industry>) -> Vec<SourceShare> {
    let [linkedin, apollo, zoominfo, others] = match industry {
        Some(Industry::Technology) | Some(Industry::Saas) => [55, 35, 8, 2],
        _ => [45, 30, 15, 10],
    };

    vec![
        SourceShare {
            name: "LinkedIn",
            value: linkedin,
            color: "#0077B5",
        },
        SourceShare {
            name: "Apollo.io",
            value: apollo,
            color: "#FF6B35",
        },
        SourceShare {
            name: "ZoomInfo",
            value: zoominfo,
            color: "#00C896",
        },
        SourceShare {
            name: "Outros",
            value: others,
            color: "#6B73FF",
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyActivity {
    pub day: &'static str,
    pub date: String,
    pub leads: u32,
    pub qualified: u32,
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Dom",
        Weekday::Mon => "Seg",
        Weekday::Tue => "Ter",
        Weekday::Wed => "Qua",
        Weekday::Thu => "Qui",
        Weekday::Fri => "Sex",
        Weekday::Sat => "Sáb",
    }
}

fn weekday_multiplier(weekday: Weekday) -> f64 {
    match weekday {
        Weekday::Sun => 0.0,
        Weekday::Mon => 1.0,
        Weekday::Tue => 1.2,
        Weekday::Wed => 1.1,
        Weekday::Thu => 1.3,
        Weekday::Fri => 1.0,
        Weekday::Sat => 0.7,
    }
}

/// Seven days of collected vs qualified counts, oldest first, ending at `today`.
pub fn weekly_activity(criteria: &SearchCriteria, seed: u32, today: NaiveDate) -> Vec<WeeklyActivity> {
    let keyword_multiplier = if criteria.keywords.trim().is_empty() {
        1.0
    } else {
        1.5
    };

    (0..WEEKLY_WINDOW_DAYS)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            let weekday = date.weekday();
            let multiplier = keyword_multiplier * weekday_multiplier(weekday);
            let day_seed = seed.wrapping_add(date.ordinal());

            let leads = ((35.0 + draw(day_seed, 11) * 40.0) * multiplier).round() as u32;
            let qualified = ((10.0 + draw(day_seed, 12) * 20.0) * multiplier).round() as u32;

            WeeklyActivity {
                day: weekday_label(weekday),
                date: date.format("%d/%m/%Y").to_string(),
                leads,
                qualified: qualified.min(leads),
            }
        })
        .collect()
}

/// Everything the analytics view renders for one criteria snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub filtered: bool,
    pub estimate: EstimateResult,
    pub source_distribution: Vec<SourceShare>,
    pub weekly: Vec<WeeklyActivity>,
    pub top_leads: Vec<SyntheticLead>,
}

impl DashboardSnapshot {
    pub fn build(criteria: &SearchCriteria, today: NaiveDate) -> Self {
        let seed = criteria_seed(criteria);
        Self {
            filtered: criteria.narrows_results(),
            estimate: estimate_seeded(criteria, seed),
            source_distribution: source_distribution(criteria.industry),
            weekly: weekly_activity(criteria, seed, today),
            top_leads: generate_leads(criteria, seed, DEFAULT_LEAD_COUNT),
        }
    }

    pub fn weekly_totals(&self) -> (u32, u32) {
        self.weekly.iter().fold((0, 0), |(leads, qualified), day| {
            (leads + day.leads, qualified + day.qualified)
        })
    }
}
