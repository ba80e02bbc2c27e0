//! Lead import from an Apollo.io contacts export.

mod mapping;
mod normalizer;
mod parser;

use crate::config::CollectionSettings;
use crate::workflows::scoring::{
    LeadProfile, ScoreBreakdown, ScoringEngine, ScoringError, ScoringRules,
};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use parser::ApolloContact;

#[derive(Debug)]
pub enum ApolloLeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Scoring(ScoringError),
}

impl std::fmt::Display for ApolloLeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApolloLeadImportError::Io(err) => write!(f, "failed to read Apollo export: {}", err),
            ApolloLeadImportError::Csv(err) => write!(f, "invalid Apollo CSV data: {}", err),
            ApolloLeadImportError::Scoring(err) => write!(f, "failed to score Apollo lead: {}", err),
        }
    }
}

impl std::error::Error for ApolloLeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApolloLeadImportError::Io(err) => Some(err),
            ApolloLeadImportError::Csv(err) => Some(err),
            ApolloLeadImportError::Scoring(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ApolloLeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ApolloLeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<ScoringError> for ApolloLeadImportError {
    fn from(err: ScoringError) -> Self {
        Self::Scoring(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredLead {
    pub profile: LeadProfile,
    pub score: ScoreBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub rows: usize,
    pub duplicates: usize,
    pub invalid_emails: usize,
    pub leads: Vec<ScoredLead>,
}

pub struct ApolloLeadImporter;

impl ApolloLeadImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        rules: &ScoringRules,
        settings: &CollectionSettings,
    ) -> Result<ImportSummary, ApolloLeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, rules, settings)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        rules: &ScoringRules,
        settings: &CollectionSettings,
    ) -> Result<ImportSummary, ApolloLeadImportError> {
        let engine = ScoringEngine::new(rules.clone());
        let mut seen_emails: HashSet<String> = HashSet::new();
        let mut summary = ImportSummary::default();

        for contact in parser::parse_contacts(reader)? {
            summary.rows += 1;

            if let Some(email) = contact.email.as_deref() {
                if settings.email_validation && !normalizer::is_valid_email(email) {
                    tracing::debug!(email, "skipping Apollo row with malformed email");
                    summary.invalid_emails += 1;
                    continue;
                }
                if settings.deduplication && !seen_emails.insert(email.to_string()) {
                    summary.duplicates += 1;
                    continue;
                }
            }

            let profile = into_profile(contact);
            let score = engine.score_profile(&profile)?;
            summary.leads.push(ScoredLead { profile, score });
        }

        summary
            .leads
            .sort_by(|a, b| b.score.total_score.cmp(&a.score.total_score));
        Ok(summary)
    }
}

fn into_profile(contact: ApolloContact) -> LeadProfile {
    LeadProfile {
        name: contact.name,
        position: contact.title,
        company: contact.company,
        company_size: contact.company_size,
        industry: contact.industry,
        location: contact.location,
        email: contact.email,
        phone: contact.phone,
    }
}
