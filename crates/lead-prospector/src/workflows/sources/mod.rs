//! Catalog of the B2B data providers shown on the data-source view.
//!
//! Providers are display entries only: toggling, saving keys, and "testing" a
//! connection update local state and produce confirmations. No request ever
//! leaves the process.

use crate::workflows::notifications::{Notification, NotificationAction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("unknown data source '{0}'")]
    UnknownSource(String),
    #[error("{0} is disabled; enable it before changing its API key")]
    SourceDisabled(SourceId),
    #[error("{0} must be enabled and configured before testing the connection")]
    NotConnectable(SourceId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    Apollo,
    Linkedin,
    Zoominfo,
    Hunter,
}

impl SourceId {
    pub const fn key(self) -> &'static str {
        match self {
            SourceId::Apollo => "apollo",
            SourceId::Linkedin => "linkedin",
            SourceId::Zoominfo => "zoominfo",
            SourceId::Hunter => "hunter",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SourceId {
    type Err = SourceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "apollo" => Ok(SourceId::Apollo),
            "linkedin" => Ok(SourceId::Linkedin),
            "zoominfo" => Ok(SourceId::Zoominfo),
            "hunter" => Ok(SourceId::Hunter),
            _ => Err(SourceError::UnknownSource(raw.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Active,
    Inactive,
    Error,
}

impl SourceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SourceStatus::Active => "Ativo",
            SourceStatus::Inactive => "Inativo",
            SourceStatus::Error => "Erro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    pub used: u32,
    pub total: u32,
}

impl Quota {
    pub fn usage_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.used) / f64::from(self.total) * 100.0
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.used)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: SourceId,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub configured: bool,
    #[serde(default, skip_serializing)]
    pub api_key: String,
    pub status: SourceStatus,
    pub last_sync: String,
    pub quota: Quota,
    pub features: Vec<String>,
}

impl DataSource {
    pub fn can_test_connection(&self) -> bool {
        self.enabled && self.configured
    }

    /// Key with everything but the first and last three characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        if chars.len() <= 6 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        format!("{head}{}{tail}", "*".repeat(chars.len() - 6))
    }
}

#[allow(clippy::too_many_arguments)]
fn source(
    id: SourceId,
    name: &str,
    description: &str,
    enabled: bool,
    api_key: &str,
    last_sync: &str,
    quota: Quota,
    features: &[&str],
) -> DataSource {
    let configured = !api_key.is_empty();
    DataSource {
        id,
        name: name.to_string(),
        description: description.to_string(),
        enabled,
        configured,
        api_key: api_key.to_string(),
        status: if configured {
            SourceStatus::Active
        } else {
            SourceStatus::Inactive
        },
        last_sync: last_sync.to_string(),
        quota,
        features: features.iter().map(|feature| feature.to_string()).collect(),
    }
}

/// Immutable list of providers; every operation returns a new catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCatalog {
    sources: Vec<DataSource>,
}

impl SourceCatalog {
    pub fn standard() -> Self {
        Self {
            sources: vec![
                source(
                    SourceId::Apollo,
                    "Apollo.io",
                    "Plataforma líder em dados de contatos B2B",
                    true,
                    "ap-demo-key-xyz",
                    "2 horas atrás",
                    Quota {
                        used: 2840,
                        total: 5000,
                    },
                    &["Busca por empresa", "Contatos diretos", "Email finder", "Enriquecimento"],
                ),
                source(
                    SourceId::Linkedin,
                    "LinkedIn Sales Navigator",
                    "Rede profissional com dados ricos de perfis",
                    true,
                    "",
                    "Nunca",
                    Quota { used: 0, total: 1000 },
                    &["Busca avançada", "Perfis detalhados", "Conexões", "InMail"],
                ),
                source(
                    SourceId::Zoominfo,
                    "ZoomInfo",
                    "Base de dados B2B com informações empresariais",
                    false,
                    "",
                    "Nunca",
                    Quota { used: 0, total: 2000 },
                    &["Dados empresariais", "Tecnografias", "Intent data", "Hierarquia"],
                ),
                source(
                    SourceId::Hunter,
                    "Hunter.io",
                    "Especialista em descoberta e verificação de emails",
                    true,
                    "hun-demo-key-abc",
                    "1 hora atrás",
                    Quota { used: 180, total: 500 },
                    &["Email finder", "Verificação", "Domain search", "Bulk tasks"],
                ),
            ],
        }
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    pub fn get(&self, id: SourceId) -> Option<&DataSource> {
        self.sources.iter().find(|source| source.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|source| source.enabled && source.status == SourceStatus::Active)
            .count()
    }

    fn updated<F>(&self, id: SourceId, update: F) -> Self
    where
        F: Fn(&DataSource) -> DataSource,
    {
        Self {
            sources: self
                .sources
                .iter()
                .map(|source| {
                    if source.id == id {
                        update(source)
                    } else {
                        source.clone()
                    }
                })
                .collect(),
        }
    }

    fn require(&self, id: SourceId) -> Result<&DataSource, SourceError> {
        self.get(id)
            .ok_or_else(|| SourceError::UnknownSource(id.key().to_string()))
    }

    pub fn toggle(&self, id: SourceId) -> Result<(Self, Notification), SourceError> {
        self.require(id)?;
        let catalog = self.updated(id, |source| DataSource {
            enabled: !source.enabled,
            ..source.clone()
        });
        Ok((
            catalog,
            Notification::for_action(NotificationAction::SourceToggled),
        ))
    }

    pub fn save_api_key(
        &self,
        id: SourceId,
        api_key: &str,
    ) -> Result<(Self, Notification), SourceError> {
        let current = self.require(id)?;
        if !current.enabled {
            return Err(SourceError::SourceDisabled(id));
        }

        let api_key = api_key.trim();
        let catalog = self.updated(id, |source| DataSource {
            api_key: api_key.to_string(),
            configured: !api_key.is_empty(),
            status: if api_key.is_empty() {
                SourceStatus::Inactive
            } else {
                SourceStatus::Active
            },
            ..source.clone()
        });
        Ok((
            catalog,
            Notification::for_action(NotificationAction::ApiKeySaved),
        ))
    }

    /// Simulated check; returns the "testing" and "succeeded" confirmations in order.
    pub fn test_connection(&self, id: SourceId) -> Result<[Notification; 2], SourceError> {
        let current = self.require(id)?;
        if !current.can_test_connection() {
            return Err(SourceError::NotConnectable(id));
        }
        Ok([
            Notification::for_action(NotificationAction::ConnectionTesting),
            Notification::for_action(NotificationAction::ConnectionSucceeded),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_matches_dashboard_defaults() {
        let catalog = SourceCatalog::standard();
        assert_eq!(catalog.sources().len(), 4);
        let apollo = catalog.get(SourceId::Apollo).expect("apollo listed");
        assert!(apollo.configured);
        assert_eq!(apollo.status, SourceStatus::Active);
        assert!((apollo.quota.usage_pct() - 56.8).abs() < 1e-9);
        assert_eq!(catalog.active_count(), 2);
    }

    #[test]
    fn toggle_returns_new_catalog() {
        let catalog = SourceCatalog::standard();
        let (toggled, notification) = catalog.toggle(SourceId::Zoominfo).expect("toggles");
        assert!(!catalog.get(SourceId::Zoominfo).expect("listed").enabled);
        assert!(toggled.get(SourceId::Zoominfo).expect("listed").enabled);
        assert_eq!(notification.title, "Fonte Atualizada");
    }

    #[test]
    fn saving_a_key_configures_the_source() {
        let catalog = SourceCatalog::standard();
        let (catalog, _) = catalog
            .save_api_key(SourceId::Linkedin, "li-0123456789")
            .expect("key saved");
        let linkedin = catalog.get(SourceId::Linkedin).expect("listed");
        assert!(linkedin.configured);
        assert_eq!(linkedin.status, SourceStatus::Active);
        assert_eq!(linkedin.masked_api_key(), "li-*******789");

        let (catalog, _) = catalog
            .save_api_key(SourceId::Linkedin, "  ")
            .expect("key cleared");
        let linkedin = catalog.get(SourceId::Linkedin).expect("listed");
        assert!(!linkedin.configured);
        assert_eq!(linkedin.status, SourceStatus::Inactive);
    }

    #[test]
    fn disabled_sources_reject_keys_and_tests() {
        let catalog = SourceCatalog::standard();
        assert_eq!(
            catalog.save_api_key(SourceId::Zoominfo, "zi-key"),
            Err(SourceError::SourceDisabled(SourceId::Zoominfo))
        );
        assert_eq!(
            catalog.test_connection(SourceId::Linkedin),
            Err(SourceError::NotConnectable(SourceId::Linkedin))
        );

        let [testing, succeeded] = catalog
            .test_connection(SourceId::Hunter)
            .expect("hunter is connectable");
        assert_eq!(testing.title, "Testando Conexão");
        assert_eq!(succeeded.title, "Conexão Bem-sucedida");
    }

    #[test]
    fn parses_source_ids() {
        assert_eq!("Apollo".parse::<SourceId>(), Ok(SourceId::Apollo));
        assert_eq!(
            "clearbit".parse::<SourceId>(),
            Err(SourceError::UnknownSource("clearbit".to_string()))
        );
    }
}
