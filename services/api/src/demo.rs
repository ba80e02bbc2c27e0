use crate::cli::CriteriaArgs;
use crate::infra::{parse_date, today_or_local};
use chrono::{Local, NaiveDate};
use clap::Args;
use lead_prospector::config::AppConfig;
use lead_prospector::error::AppError;
use lead_prospector::workflows::apollo::ApolloLeadImporter;
use lead_prospector::workflows::notifications::{Notification, NotificationAction};
use lead_prospector::workflows::prospecting::{
    criteria_seed, estimate, generate_leads, leads_found, CompanySize, DashboardSnapshot,
    EstimateFactors, EstimateResult, Industry, ProspectingRun, SearchCriteria, SyntheticLead,
    DEFAULT_LEAD_COUNT, MAX_LEAD_COUNT,
};
use lead_prospector::workflows::scoring::{
    LeadProfile, ScoreBreakdown, ScoringCriterion, ScoringEngine, ScoringError, ScoringRules,
};
use lead_prospector::workflows::sources::SourceCatalog;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct LeadsArgs {
    #[command(flatten)]
    pub(crate) criteria: CriteriaArgs,
    /// Number of leads to generate (at most 50)
    #[arg(long, default_value_t = DEFAULT_LEAD_COUNT, value_parser = parse_lead_count)]
    pub(crate) count: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Override a rule weight, e.g. --weight position=40 (5-50)
    #[arg(long = "weight", value_parser = parse_weight)]
    pub(crate) weights: Vec<(ScoringCriterion, u8)>,
    /// Disable a rule, e.g. --disable location
    #[arg(long = "disable")]
    pub(crate) disabled: Vec<ScoringCriterion>,
}

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    #[command(flatten)]
    pub(crate) criteria: CriteriaArgs,
    /// Last day of the weekly series (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Apollo.io contacts export to import
    #[arg(long)]
    pub(crate) apollo_csv: PathBuf,
    /// Only print the top N scored leads
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ProspectArgs {
    #[command(flatten)]
    pub(crate) criteria: CriteriaArgs,
    /// Delay between progress updates in milliseconds
    #[arg(long, default_value_t = 300)]
    pub(crate) tick_ms: u64,
}

fn parse_lead_count(raw: &str) -> Result<usize, String> {
    let count: usize = raw
        .trim()
        .parse()
        .map_err(|err| format!("invalid lead count '{raw}' ({err})"))?;
    if count > MAX_LEAD_COUNT {
        return Err(format!("at most {MAX_LEAD_COUNT} leads can be generated, got {count}"));
    }
    Ok(count)
}

fn parse_weight(raw: &str) -> Result<(ScoringCriterion, u8), String> {
    let (criterion, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected criterion=weight, got '{raw}'"))?;
    let criterion: ScoringCriterion = criterion.parse().map_err(|err: ScoringError| err.to_string())?;
    let weight: u8 = weight
        .trim()
        .parse()
        .map_err(|err| format!("invalid weight '{weight}' ({err})"))?;
    Ok((criterion, weight))
}

pub(crate) fn run_estimate(args: CriteriaArgs) -> Result<(), AppError> {
    let criteria = args.into_criteria();
    render_estimate(&criteria, &estimate(&criteria));
    Ok(())
}

pub(crate) fn run_leads(args: LeadsArgs) -> Result<(), AppError> {
    let criteria = args.criteria.into_criteria();
    let leads = generate_leads(&criteria, criteria_seed(&criteria), args.count);
    println!("Top leads ({})", leads.len());
    render_leads(&leads);
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let rules = build_rules(&args)?;
    let (engine, notification, warning) = ScoringEngine::default().save_rules(rules);
    render_notification(&notification);
    if let Some(warning) = warning {
        println!("  ! {warning}");
    }

    let profile = LeadProfile::example();
    println!(
        "\nExample lead: {} ({}, {})",
        profile.name, profile.position, profile.company
    );
    render_breakdown(&engine.score_profile(&profile)?);
    Ok(())
}

fn build_rules(args: &ScoreArgs) -> Result<ScoringRules, ScoringError> {
    let rules = args
        .weights
        .iter()
        .try_fold(ScoringRules::default(), |rules, (criterion, weight)| {
            rules.with_weight(*criterion, *weight)
        })?;
    Ok(args
        .disabled
        .iter()
        .fold(rules, |rules, criterion| rules.with_enabled(*criterion, false)))
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let criteria = args.criteria.into_criteria();
    let snapshot = DashboardSnapshot::build(&criteria, today_or_local(args.today));
    render_dashboard(&snapshot);
    Ok(())
}

pub(crate) fn run_sources() -> Result<(), AppError> {
    render_sources(&SourceCatalog::standard());
    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let summary = ApolloLeadImporter::from_path(
        &args.apollo_csv,
        &ScoringRules::default(),
        &config.collection,
    )?;

    println!("Apollo import: {}", args.apollo_csv.display());
    println!(
        "  Rows: {} | Imported: {} | Duplicates: {} | Invalid emails: {}",
        summary.rows,
        summary.leads.len(),
        summary.duplicates,
        summary.invalid_emails
    );

    let limit = args.limit.unwrap_or(summary.leads.len());
    for lead in summary.leads.iter().take(limit) {
        println!(
            "  {:>3} pts [{}] {} - {} @ {}",
            lead.score.total_score,
            lead.score.category.label(),
            lead.profile.name,
            lead.profile.position,
            lead.profile.company
        );
    }
    Ok(())
}

pub(crate) async fn run_prospect(args: ProspectArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let criteria = args.criteria.into_criteria();
    let saved = match criteria.save() {
        Ok(notification) => notification,
        Err(err) => {
            render_notification(&Notification::for_action(NotificationAction::CriteriaEmpty));
            return Err(err.into());
        }
    };
    render_notification(&saved);

    let estimate = estimate(&criteria);
    let found = leads_found(estimate.qualified_leads, config.collection.daily_lead_limit);
    let (run, started) = ProspectingRun::start(found);
    render_notification(&started);

    let period = Duration::from_millis(args.tick_ms.max(1));
    drive_run(run, period, tokio::signal::ctrl_c()).await;
    Ok(())
}

/// Ticks `run` until it completes or `stop` resolves, which resets it to idle.
async fn drive_run<F>(mut run: ProspectingRun, period: Duration, stop: F) -> ProspectingRun
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(stop);
    let mut listening = true;
    let mut interval = tokio::time::interval(period);
    interval.tick().await;

    while run.is_running() {
        tokio::select! {
            _ = interval.tick() => {
                let (next, notification) = run.tick();
                run = next;
                println!("  [{:<10}] {:>3}%", "#".repeat(usize::from(run.progress() / 10)), run.progress());
                if let Some(notification) = notification {
                    render_notification(&notification);
                }
            }
            signal = &mut stop, if listening => match signal {
                Ok(()) => {
                    let (stopped, notification) = run.stop();
                    render_notification(&notification);
                    return stopped;
                }
                Err(err) => {
                    warn!(error = %err, "ctrl-c handler unavailable; run cannot be stopped early");
                    listening = false;
                }
            },
        }
    }
    run
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let criteria = SearchCriteria::default()
        .with_keywords("CEO, diretor")
        .with_location("São Paulo, SP")
        .with_company_size(Some(CompanySize::Small))
        .with_industry(Some(Industry::Technology));

    println!("Lead prospecting demo");
    render_estimate(&criteria, &estimate(&criteria));

    println!("\nQualification rules");
    let engine = ScoringEngine::default();
    for (criterion, rule) in engine.rules().iter() {
        println!("  {:<24} {:>3}%", criterion.title(), rule.weight);
    }
    let profile = LeadProfile::example();
    println!("Example lead: {} ({})", profile.name, profile.company);
    render_breakdown(&engine.score_profile(&profile)?);

    println!();
    render_sources(&SourceCatalog::standard());

    println!();
    render_dashboard(&DashboardSnapshot::build(&criteria, today));
    Ok(())
}

fn render_notification(notification: &Notification) {
    println!("» {}: {}", notification.title, notification.description);
}

fn render_estimate(criteria: &SearchCriteria, result: &EstimateResult) {
    println!("Lead estimate");
    if result.is_baseline() {
        println!("  No criteria configured; fill in at least one field to estimate.");
        return;
    }
    println!("  Total leads:     {}", result.total_leads);
    println!("  Qualified leads: {}", result.qualified_leads);
    println!("  Contacted leads: {}", result.contacted_leads);
    println!("  Conversion rate: {}%", result.conversion_rate);

    let factors = EstimateFactors::for_criteria(criteria, criteria_seed(criteria));
    println!(
        "  Factors: industry {:.2} | size {:.2} | location {:.2} | keywords {:.2} | titles {:.2} | variation {:.2}",
        factors.industry,
        factors.company_size,
        factors.location,
        factors.keywords,
        factors.job_titles,
        factors.variation
    );
}

fn render_leads(leads: &[SyntheticLead]) {
    for lead in leads {
        println!(
            "  {:>2} [{}] {} - {} @ {} <{}> {}",
            lead.score,
            lead.status.label(),
            lead.name,
            lead.position,
            lead.company,
            lead.email,
            lead.phone
        );
    }
}

fn render_breakdown(breakdown: &ScoreBreakdown) {
    for component in &breakdown.components {
        println!("  - {} => {:.1}", component.notes, component.contribution);
    }
    println!(
        "  Score: {} ({}, {})",
        breakdown.total_score,
        breakdown.category.label(),
        breakdown.category.range_label()
    );
}

fn render_sources(catalog: &SourceCatalog) {
    println!("Data sources ({} active)", catalog.active_count());
    for source in catalog.sources() {
        println!(
            "  {:<26} {:<8} {} quota {}/{} ({:.1}%) last sync: {}",
            source.name,
            source.status.label(),
            if source.enabled { "on " } else { "off" },
            source.quota.used,
            source.quota.total,
            source.quota.usage_pct(),
            source.last_sync
        );
    }
}

fn render_dashboard(snapshot: &DashboardSnapshot) {
    println!(
        "Dashboard{}",
        if snapshot.filtered { " (filtered)" } else { "" }
    );
    println!(
        "  Leads: {} total, {} qualified, {}% conversion",
        snapshot.estimate.total_leads,
        snapshot.estimate.qualified_leads,
        snapshot.estimate.conversion_rate
    );

    println!("  Source distribution:");
    for share in &snapshot.source_distribution {
        println!("    {:<12} {:>3}%", share.name, share.value);
    }

    println!("  Weekly activity:");
    for day in &snapshot.weekly {
        println!(
            "    {} {}  {:>3} leads  {:>3} qualified",
            day.day, day.date, day.leads, day.qualified
        );
    }
    let (leads, qualified) = snapshot.weekly_totals();
    println!("    Week total: {leads} leads, {qualified} qualified");

    println!("  Top leads:");
    render_leads(&snapshot.top_leads);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_flags_parse_criterion_and_value() {
        assert_eq!(
            parse_weight("position=40"),
            Ok((ScoringCriterion::Position, 40))
        );
        assert!(parse_weight("position").is_err());
        assert!(parse_weight("salary=10").is_err());
        assert!(parse_weight("location=abc").is_err());
    }

    #[test]
    fn lead_count_flag_is_capped() {
        assert_eq!(parse_lead_count("12"), Ok(12));
        assert_eq!(parse_lead_count("50"), Ok(MAX_LEAD_COUNT));
        assert!(parse_lead_count("51").is_err());
        assert!(parse_lead_count("-1").is_err());
    }

    #[tokio::test]
    async fn stop_signal_interrupts_a_running_pass() {
        let (run, _) = ProspectingRun::start(40);
        let stopped = drive_run(
            run,
            Duration::from_secs(3600),
            std::future::ready(Ok(())),
        )
        .await;
        assert_eq!(stopped, ProspectingRun::Idle);
    }

    #[tokio::test]
    async fn pass_completes_without_a_stop_signal() {
        let (run, _) = ProspectingRun::start(40);
        let done = drive_run(
            run,
            Duration::from_millis(1),
            std::future::pending::<std::io::Result<()>>(),
        )
        .await;
        assert_eq!(done, ProspectingRun::Completed { found: 40 });
    }

    #[tokio::test]
    async fn unavailable_signal_handler_lets_the_pass_finish() {
        let (run, _) = ProspectingRun::start(12);
        let failing = std::future::ready(Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no signal handler",
        )));
        let done = drive_run(run, Duration::from_millis(1), failing).await;
        assert_eq!(done, ProspectingRun::Completed { found: 12 });
    }

    #[test]
    fn score_flags_build_rules() {
        let args = ScoreArgs {
            weights: vec![(ScoringCriterion::Location, 20)],
            disabled: vec![ScoringCriterion::ContactInfo],
        };
        let rules = build_rules(&args).expect("valid overrides");
        assert_eq!(rules.total_enabled_weight(), 95);

        let out_of_range = ScoreArgs {
            weights: vec![(ScoringCriterion::Location, 60)],
            ..ScoreArgs::default()
        };
        assert!(build_rules(&out_of_range).is_err());
    }
}
