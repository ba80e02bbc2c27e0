use chrono::{Local, NaiveDate};
use lead_prospector::config::CollectionSettings;
use lead_prospector::workflows::scoring::ScoringEngine;
use lead_prospector::workflows::sources::SourceCatalog;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) collection: CollectionSettings,
    pub(crate) sources: Arc<RwLock<SourceCatalog>>,
    pub(crate) scoring: Arc<RwLock<ScoringEngine>>,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle, collection: CollectionSettings) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            collection,
            sources: Arc::new(RwLock::new(SourceCatalog::standard())),
            scoring: Arc::new(RwLock::new(ScoringEngine::default())),
        }
    }
}

// Every writer swaps in a fully built value, so a poisoned lock still holds a consistent one.
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    AppState::new(recorder.handle(), CollectionSettings::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date(" 2025-09-24 "),
            Ok(NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid date"))
        );
        assert!(parse_date("24/09/2025").is_err());
    }
}
