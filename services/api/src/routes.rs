use crate::infra::{deserialize_optional_date, read, today_or_local, write, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use lead_prospector::error::AppError;
use lead_prospector::workflows::apollo::{ApolloLeadImporter, ImportSummary};
use lead_prospector::workflows::notifications::Notification;
use lead_prospector::workflows::prospecting::{
    criteria_seed, estimate_seeded, generate_leads, DashboardSnapshot, EstimateFactors,
    EstimateResult, SearchCriteria, SyntheticLead, DEFAULT_LEAD_COUNT, MAX_LEAD_COUNT,
};
use lead_prospector::workflows::scoring::{
    score_breakdown, AttributeValues, LeadCategory, LeadProfile, ScoreBreakdown, ScoringRules,
};
use lead_prospector::workflows::sources::{DataSource, SourceError, SourceId};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::{info, warn};

pub(crate) fn application_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/prospecting/estimate", post(estimate_endpoint))
        .route("/api/v1/prospecting/leads", post(leads_endpoint))
        .route("/api/v1/prospecting/criteria", post(save_criteria_endpoint))
        .route("/api/v1/dashboard", post(dashboard_endpoint))
        .route(
            "/api/v1/scoring/rules",
            get(scoring_rules_endpoint).post(save_scoring_rules_endpoint),
        )
        .route("/api/v1/scoring/score", post(score_endpoint))
        .route("/api/v1/sources", get(sources_endpoint))
        .route("/api/v1/sources/:id/toggle", post(toggle_source_endpoint))
        .route("/api/v1/sources/:id/api-key", post(save_api_key_endpoint))
        .route("/api/v1/sources/:id/test", post(test_source_endpoint))
        .route("/api/v1/apollo/import", post(apollo_import_endpoint))
        .layer(Extension(state))
}

fn log_notification(notification: &Notification) {
    info!(
        title = %notification.title,
        level = ?notification.level,
        "{}",
        notification.description
    );
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EstimateResponse {
    #[serde(flatten)]
    pub(crate) estimate: EstimateResult,
    pub(crate) seed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) factors: Option<EstimateFactors>,
}

pub(crate) async fn estimate_endpoint(
    payload: Result<Json<SearchCriteria>, JsonRejection>,
) -> Result<Json<EstimateResponse>, AppError> {
    let Json(criteria) = payload?;
    let seed = criteria_seed(&criteria);
    let factors = (!criteria.is_empty()).then(|| EstimateFactors::for_criteria(&criteria, seed));
    Ok(Json(EstimateResponse {
        estimate: estimate_seeded(&criteria, seed),
        seed,
        factors,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeadsRequest {
    #[serde(flatten)]
    pub(crate) criteria: SearchCriteria,
    #[serde(default)]
    pub(crate) count: Option<usize>,
}

pub(crate) async fn leads_endpoint(
    payload: Result<Json<LeadsRequest>, JsonRejection>,
) -> Result<Json<Vec<SyntheticLead>>, AppError> {
    let Json(payload) = payload?;
    let count = payload
        .count
        .unwrap_or(DEFAULT_LEAD_COUNT)
        .min(MAX_LEAD_COUNT);
    let seed = criteria_seed(&payload.criteria);
    Ok(Json(generate_leads(&payload.criteria, seed, count)))
}

pub(crate) async fn save_criteria_endpoint(
    payload: Result<Json<SearchCriteria>, JsonRejection>,
) -> Result<Json<Notification>, AppError> {
    let Json(criteria) = payload?;
    match criteria.save() {
        Ok(notification) => {
            log_notification(&notification);
            Ok(Json(notification))
        }
        Err(err) => {
            warn!(error = %err, "rejected empty prospecting criteria");
            Err(err.into())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardRequest {
    #[serde(flatten)]
    pub(crate) criteria: SearchCriteria,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn dashboard_endpoint(
    payload: Result<Json<DashboardRequest>, JsonRejection>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let Json(payload) = payload?;
    let today = today_or_local(payload.today);
    Ok(Json(DashboardSnapshot::build(&payload.criteria, today)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryView {
    pub(crate) category: LeadCategory,
    pub(crate) range: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoringRulesResponse {
    pub(crate) rules: ScoringRules,
    pub(crate) total_weight: u32,
    pub(crate) warning: Option<String>,
    pub(crate) categories: Vec<CategoryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notification: Option<Notification>,
}

impl ScoringRulesResponse {
    fn new(rules: ScoringRules, notification: Option<Notification>) -> Self {
        let categories = [LeadCategory::Quente, LeadCategory::Morno, LeadCategory::Frio]
            .into_iter()
            .map(|category| CategoryView {
                category,
                range: category.range_label(),
            })
            .collect();
        Self {
            total_weight: rules.total_enabled_weight(),
            warning: rules.weight_warning(),
            rules,
            categories,
            notification,
        }
    }
}

pub(crate) async fn scoring_rules_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<ScoringRulesResponse> {
    let rules = read(&state.scoring).rules().clone();
    Json(ScoringRulesResponse::new(rules, None))
}

pub(crate) async fn save_scoring_rules_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ScoringRules>, JsonRejection>,
) -> Result<Json<ScoringRulesResponse>, AppError> {
    let Json(rules) = payload?;
    let mut engine = write(&state.scoring);
    let (saved, notification, warning) = engine.clone().save_rules(rules);
    *engine = saved;

    log_notification(&notification);
    if let Some(warning) = warning.as_deref() {
        warn!(%warning, "scoring weights do not sum to the target");
    }
    Ok(Json(ScoringRulesResponse::new(
        engine.rules().clone(),
        Some(notification),
    )))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) rules: Option<ScoringRules>,
    #[serde(default)]
    pub(crate) profile: Option<LeadProfile>,
    #[serde(default)]
    pub(crate) values: Option<AttributeValues>,
}

pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreBreakdown>, AppError> {
    let Json(payload) = payload?;
    let rules = match payload.rules {
        Some(rules) => rules,
        None => read(&state.scoring).rules().clone(),
    };
    let values = match (payload.values, payload.profile) {
        (Some(values), _) => values,
        (None, Some(profile)) => profile.attribute_values(),
        (None, None) => LeadProfile::example().attribute_values(),
    };
    Ok(Json(score_breakdown(&values, &rules)?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SourceView {
    #[serde(flatten)]
    pub(crate) source: DataSource,
    pub(crate) masked_api_key: String,
    pub(crate) quota_usage_pct: f64,
}

impl From<&DataSource> for SourceView {
    fn from(source: &DataSource) -> Self {
        Self {
            masked_api_key: source.masked_api_key(),
            quota_usage_pct: source.quota.usage_pct(),
            source: source.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SourcesResponse {
    pub(crate) active: usize,
    pub(crate) sources: Vec<SourceView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SourceActionResponse {
    pub(crate) source: SourceView,
    pub(crate) notifications: Vec<Notification>,
}

pub(crate) async fn sources_endpoint(Extension(state): Extension<AppState>) -> Json<SourcesResponse> {
    let catalog = read(&state.sources);
    Json(SourcesResponse {
        active: catalog.active_count(),
        sources: catalog.sources().iter().map(SourceView::from).collect(),
    })
}

fn source_view(state: &AppState, id: SourceId) -> Result<SourceView, AppError> {
    let catalog = read(&state.sources);
    let source = catalog
        .get(id)
        .ok_or_else(|| SourceError::UnknownSource(id.to_string()))?;
    Ok(SourceView::from(source))
}

pub(crate) async fn toggle_source_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SourceActionResponse>, AppError> {
    let id: SourceId = id.parse()?;
    let notification = {
        let mut catalog = write(&state.sources);
        let (updated, notification) = catalog.toggle(id)?;
        *catalog = updated;
        notification
    };
    log_notification(&notification);

    Ok(Json(SourceActionResponse {
        source: source_view(&state, id)?,
        notifications: vec![notification],
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiKeyRequest {
    pub(crate) api_key: String,
}

pub(crate) async fn save_api_key_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ApiKeyRequest>, JsonRejection>,
) -> Result<Json<SourceActionResponse>, AppError> {
    let Json(payload) = payload?;
    let id: SourceId = id.parse()?;
    let notification = {
        let mut catalog = write(&state.sources);
        let (updated, notification) = catalog.save_api_key(id, &payload.api_key)?;
        *catalog = updated;
        notification
    };
    log_notification(&notification);

    Ok(Json(SourceActionResponse {
        source: source_view(&state, id)?,
        notifications: vec![notification],
    }))
}

pub(crate) async fn test_source_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SourceActionResponse>, AppError> {
    let id: SourceId = id.parse()?;
    let notifications = read(&state.sources).test_connection(id)?;
    notifications.iter().for_each(log_notification);

    Ok(Json(SourceActionResponse {
        source: source_view(&state, id)?,
        notifications: notifications.to_vec(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApolloImportRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) rules: Option<ScoringRules>,
}

pub(crate) async fn apollo_import_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ApolloImportRequest>, JsonRejection>,
) -> Result<Json<ImportSummary>, AppError> {
    let Json(payload) = payload?;
    let rules = match payload.rules {
        Some(rules) => rules,
        None => read(&state.scoring).rules().clone(),
    };
    let reader = Cursor::new(payload.csv.into_bytes());
    let summary = ApolloLeadImporter::from_reader(reader, &rules, &state.collection)?;

    info!(
        rows = summary.rows,
        imported = summary.leads.len(),
        duplicates = summary.duplicates,
        invalid_emails = summary.invalid_emails,
        "apollo export imported"
    );
    Ok(Json(summary))
}
