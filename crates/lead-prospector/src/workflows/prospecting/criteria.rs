use crate::workflows::notifications::{Notification, NotificationAction};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validation failures raised at the criteria form edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("unknown industry '{0}'")]
    UnknownIndustry(String),
    #[error("unknown company size '{0}'")]
    UnknownCompanySize(String),
    #[error("at least one prospecting criterion must be filled in")]
    NoCriteria,
}

/// Industries offered by the criteria form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Industry {
    Technology,
    Health,
    Finance,
    ECommerce,
    Marketing,
    Consulting,
    Education,
    Manufacturing,
    Retail,
    RealEstate,
    Telecom,
    Saas,
}

impl Industry {
    pub const ALL: [Industry; 12] = [
        Industry::Technology,
        Industry::Health,
        Industry::Finance,
        Industry::ECommerce,
        Industry::Marketing,
        Industry::Consulting,
        Industry::Education,
        Industry::Manufacturing,
        Industry::Retail,
        Industry::RealEstate,
        Industry::Telecom,
        Industry::Saas,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Industry::Technology => "Tecnologia",
            Industry::Health => "Saúde",
            Industry::Finance => "Finanças",
            Industry::ECommerce => "E-commerce",
            Industry::Marketing => "Marketing",
            Industry::Consulting => "Consultoria",
            Industry::Education => "Educação",
            Industry::Manufacturing => "Manufatura",
            Industry::Retail => "Varejo",
            Industry::RealEstate => "Imobiliário",
            Industry::Telecom => "Telecom",
            Industry::Saas => "SaaS",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = CriteriaError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Industry::ALL
            .into_iter()
            .find(|industry| industry.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CriteriaError::UnknownIndustry(trimmed.to_string()))
    }
}

/// Head-count bands offered by the criteria form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompanySize {
    Micro,
    Small,
    Medium,
    Large,
    Enterprise,
    Corporation,
}

impl CompanySize {
    pub const ALL: [CompanySize; 6] = [
        CompanySize::Micro,
        CompanySize::Small,
        CompanySize::Medium,
        CompanySize::Large,
        CompanySize::Enterprise,
        CompanySize::Corporation,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CompanySize::Micro => "1-10 funcionários",
            CompanySize::Small => "11-50 funcionários",
            CompanySize::Medium => "51-200 funcionários",
            CompanySize::Large => "201-500 funcionários",
            CompanySize::Enterprise => "501-1000 funcionários",
            CompanySize::Corporation => "1000+ funcionários",
        }
    }

    /// Band containing a raw employee count.
    pub const fn for_employees(count: u32) -> Self {
        match count {
            0..=10 => CompanySize::Micro,
            11..=50 => CompanySize::Small,
            51..=200 => CompanySize::Medium,
            201..=500 => CompanySize::Large,
            501..=1000 => CompanySize::Enterprise,
            _ => CompanySize::Corporation,
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CompanySize {
    type Err = CriteriaError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        CompanySize::ALL
            .into_iter()
            .find(|size| {
                let label = size.label();
                label == trimmed || label.split(' ').next() == Some(trimmed)
            })
            .ok_or_else(|| CriteriaError::UnknownCompanySize(trimmed.to_string()))
    }
}

macro_rules! label_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

label_serde!(Industry);
label_serde!(CompanySize);

/// Snapshot of the prospecting form. Replaced wholesale on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub company_size: Option<CompanySize>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub industry: Option<Industry>,
    #[serde(default)]
    pub job_titles: String,
}

pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl SearchCriteria {
    pub fn with_keywords(self, keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            ..self
        }
    }

    pub fn with_location(self, location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..self
        }
    }

    pub fn with_company_size(self, company_size: Option<CompanySize>) -> Self {
        Self {
            company_size,
            ..self
        }
    }

    pub fn with_industry(self, industry: Option<Industry>) -> Self {
        Self { industry, ..self }
    }

    pub fn with_job_titles(self, job_titles: impl Into<String>) -> Self {
        Self {
            job_titles: job_titles.into(),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.trim().is_empty()
            && self.location.trim().is_empty()
            && self.job_titles.trim().is_empty()
            && self.company_size.is_none()
            && self.industry.is_none()
    }

    /// Concatenated field text the deterministic seed is hashed from.
    pub fn seed_key(&self) -> String {
        let mut key = String::with_capacity(
            self.keywords.len() + self.location.len() + self.job_titles.len() + 48,
        );
        key.push_str(&self.keywords);
        key.push_str(&self.location);
        key.push_str(self.company_size.map(CompanySize::label).unwrap_or(""));
        key.push_str(self.industry.map(Industry::label).unwrap_or(""));
        key.push_str(&self.job_titles);
        key
    }

    pub fn keyword_tokens(&self) -> Vec<&str> {
        comma_tokens(&self.keywords)
    }

    pub fn job_title_tokens(&self) -> Vec<&str> {
        comma_tokens(&self.job_titles)
    }

    /// First comma segment of the location, if any.
    pub fn primary_location(&self) -> Option<&str> {
        self.location
            .split(',')
            .next()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
    }

    /// True when the dashboard should present results as filtered.
    pub fn narrows_results(&self) -> bool {
        !self.keywords.trim().is_empty()
            || !self.location.trim().is_empty()
            || self.industry.is_some()
    }

    /// Validates the form before saving and returns the confirmation to show.
    pub fn save(&self) -> Result<Notification, CriteriaError> {
        if self.is_empty() {
            return Err(CriteriaError::NoCriteria);
        }
        Ok(Notification::for_action(NotificationAction::CriteriaSaved))
    }
}

fn comma_tokens(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criteria_are_empty() {
        let criteria = SearchCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(criteria.seed_key(), "");

        let whitespace = SearchCriteria::default().with_keywords("   ").with_location(" ");
        assert!(whitespace.is_empty());
    }

    #[test]
    fn seed_key_concatenates_fields_in_form_order() {
        let criteria = SearchCriteria::default()
            .with_industry(Some(Industry::Technology))
            .with_company_size(Some(CompanySize::Micro))
            .with_location("São Paulo");
        assert_eq!(
            criteria.seed_key(),
            "São Paulo1-10 funcionáriosTecnologia"
        );
    }

    #[test]
    fn tokens_ignore_blank_segments() {
        let criteria = SearchCriteria::default().with_keywords(" CEO, ,diretor de vendas,, ");
        assert_eq!(criteria.keyword_tokens(), vec!["CEO", "diretor de vendas"]);
        assert!(criteria.job_title_tokens().is_empty());
    }

    #[test]
    fn deserializes_labels_and_blank_selects() {
        let criteria: SearchCriteria = serde_json::from_str(
            r#"{"keywords":"ceo","location":"","companySize":"","industry":"Saúde","jobTitles":""}"#,
        )
        .expect("criteria parse");
        assert_eq!(criteria.industry, Some(Industry::Health));
        assert_eq!(criteria.company_size, None);

        let error = serde_json::from_str::<SearchCriteria>(r#"{"industry":"Mineração"}"#)
            .expect_err("unknown industry rejected");
        assert!(error.to_string().contains("unknown industry"));
    }

    #[test]
    fn company_size_accepts_short_band_and_employee_counts() {
        assert_eq!("1000+".parse::<CompanySize>(), Ok(CompanySize::Corporation));
        assert_eq!(
            "51-200 funcionários".parse::<CompanySize>(),
            Ok(CompanySize::Medium)
        );
        assert_eq!(CompanySize::for_employees(150), CompanySize::Medium);
        assert_eq!(CompanySize::for_employees(1001), CompanySize::Corporation);
    }

    #[test]
    fn save_requires_a_criterion() {
        assert_eq!(
            SearchCriteria::default().save(),
            Err(CriteriaError::NoCriteria)
        );
        let notification = SearchCriteria::default()
            .with_industry(Some(Industry::Retail))
            .save()
            .expect("saves");
        assert_eq!(notification.title, "Configuração Salva");
    }

    #[test]
    fn primary_location_takes_first_segment() {
        let criteria = SearchCriteria::default().with_location(" Curitiba , PR");
        assert_eq!(criteria.primary_location(), Some("Curitiba"));
        assert_eq!(SearchCriteria::default().primary_location(), None);
    }
}
