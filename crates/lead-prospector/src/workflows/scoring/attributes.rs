use super::rules::ScoringCriterion;
use crate::workflows::prospecting::criteria::blank_as_none;
use crate::workflows::prospecting::leads::ascii_fold;
use crate::workflows::prospecting::{CompanySize, Industry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute value (0-100) per criterion, as fed to the score calculator.
pub type AttributeValues = BTreeMap<ScoringCriterion, u8>;

/// Contact as known to the qualification step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadProfile {
    pub name: String,
    pub position: String,
    pub company: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub company_size: Option<CompanySize>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub industry: Option<Industry>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl LeadProfile {
    /// Sample contact shown next to the rule editor.
    pub fn example() -> Self {
        Self {
            name: "João Silva".to_string(),
            position: "CEO".to_string(),
            company: "TechStart Brasil".to_string(),
            company_size: Some(CompanySize::for_employees(150)),
            industry: Some(Industry::Saas),
            location: "São Paulo, SP".to_string(),
            email: Some("joao@techstart.com.br".to_string()),
            phone: Some("+55 11 99999-9999".to_string()),
        }
    }

    pub fn attribute_values(&self) -> AttributeValues {
        ScoringCriterion::ALL
            .into_iter()
            .map(|criterion| (criterion, self.attribute_value(criterion)))
            .collect()
    }

    pub fn attribute_value(&self, criterion: ScoringCriterion) -> u8 {
        match criterion {
            ScoringCriterion::Position => position_value(&self.position),
            ScoringCriterion::CompanySize => company_size_value(self.company_size),
            ScoringCriterion::Industry => industry_value(self.industry),
            ScoringCriterion::Location => location_value(&self.location),
            ScoringCriterion::ContactInfo => {
                contact_value(has_text(&self.email), has_text(&self.phone))
            }
        }
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.trim().is_empty())
}

const POSITION_TIERS: &[(&[&str], u8)] = &[
    (&["ceo", "founder", "fundador", "chief", "presidente"], 100),
    (&["diretor", "diretora", "director", "vp", "head"], 90),
    (&["gerente", "manager", "coordenador", "coordenadora"], 70),
    (&["analista", "analyst"], 40),
];

const OTHER_POSITION: u8 = 20;

fn words(value: &str) -> Vec<String> {
    ascii_fold(&value.to_lowercase())
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn position_value(position: &str) -> u8 {
    let words = words(position);
    POSITION_TIERS
        .iter()
        .find(|(terms, _)| terms.iter().any(|term| words.iter().any(|word| word == term)))
        .map(|(_, value)| *value)
        .unwrap_or(if words.is_empty() { 0 } else { OTHER_POSITION })
}

pub fn company_size_value(size: Option<CompanySize>) -> u8 {
    match size {
        Some(CompanySize::Corporation) => 100,
        Some(CompanySize::Enterprise) => 80,
        Some(CompanySize::Medium) | Some(CompanySize::Large) => 60,
        Some(CompanySize::Micro) | Some(CompanySize::Small) => 30,
        None => 0,
    }
}

pub fn industry_value(industry: Option<Industry>) -> u8 {
    match industry {
        Some(Industry::Technology) | Some(Industry::Saas) => 100,
        Some(Industry::Health) => 90,
        Some(Industry::Finance) => 85,
        Some(_) => 50,
        None => 0,
    }
}

const SOUTH: &[&str] = &["curitiba", "porto alegre", "florianopolis", "pr", "rs", "sc"];

pub fn location_value(location: &str) -> u8 {
    let folded = ascii_fold(&location.to_lowercase());
    if folded.trim().is_empty() {
        return 0;
    }
    let words = words(location);
    let has_word = |word: &str| words.iter().any(|candidate| candidate == word);

    if folded.contains("sao paulo") || has_word("sp") {
        100
    } else if folded.contains("rio de janeiro") || has_word("rj") {
        90
    } else if SOUTH
        .iter()
        .any(|place| if place.len() == 2 { has_word(place) } else { folded.contains(place) })
    {
        80
    } else {
        60
    }
}

pub fn contact_value(has_email: bool, has_phone: bool) -> u8 {
    match (has_email, has_phone) {
        (true, true) => 100,
        (true, false) => 70,
        (false, true) => 50,
        (false, false) => 0,
    }
}
