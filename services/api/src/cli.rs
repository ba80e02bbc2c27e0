use crate::demo::{
    run_dashboard, run_demo, run_estimate, run_import, run_leads, run_prospect, run_score,
    run_sources, DashboardArgs, ImportArgs, LeadsArgs, ProspectArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_prospector::error::AppError;
use lead_prospector::workflows::prospecting::{CompanySize, Industry, SearchCriteria};

#[derive(Parser, Debug)]
#[command(
    name = "Lead Prospector",
    about = "Estimate, score, and preview B2B leads from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate lead volume for a set of prospecting criteria
    Estimate(CriteriaArgs),
    /// Preview synthetic top leads for a set of criteria
    Leads(LeadsArgs),
    /// Score the example lead with adjustable rule weights
    Score(ScoreArgs),
    /// Render the analytics dashboard figures
    Dashboard(DashboardArgs),
    /// List the configured data sources
    Sources,
    /// Import and score contacts from an Apollo.io CSV export
    Import(ImportArgs),
    /// Simulate a prospecting run with live progress
    Prospect(ProspectArgs),
    /// Walk through estimate, scoring, sources, and dashboard in one pass
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

/// Prospecting form fields shared by the criteria-driven commands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CriteriaArgs {
    /// Comma-separated keywords, e.g. "CEO, fintech"
    #[arg(long, default_value = "")]
    pub(crate) keywords: String,
    /// City or region, e.g. "São Paulo, SP"
    #[arg(long, default_value = "")]
    pub(crate) location: String,
    /// Company size band, e.g. "1-10 funcionários" or "1-10"
    #[arg(long)]
    pub(crate) company_size: Option<CompanySize>,
    /// Industry label, e.g. "Tecnologia"
    #[arg(long)]
    pub(crate) industry: Option<Industry>,
    /// Comma-separated job titles
    #[arg(long, default_value = "")]
    pub(crate) job_titles: String,
}

impl CriteriaArgs {
    pub(crate) fn into_criteria(self) -> SearchCriteria {
        SearchCriteria::default()
            .with_keywords(self.keywords)
            .with_location(self.location)
            .with_company_size(self.company_size)
            .with_industry(self.industry)
            .with_job_titles(self.job_titles)
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Leads(args) => run_leads(args),
        Command::Score(args) => run_score(args),
        Command::Dashboard(args) => run_dashboard(args),
        Command::Sources => run_sources(),
        Command::Import(args) => run_import(args),
        Command::Prospect(args) => run_prospect(args).await,
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn criteria_flags_parse_labels() {
        let cli = Cli::try_parse_from([
            "lead-prospector",
            "estimate",
            "--industry",
            "Tecnologia",
            "--company-size",
            "1-10",
            "--location",
            "São Paulo",
        ])
        .expect("arguments parse");

        let Some(Command::Estimate(args)) = cli.command else {
            panic!("expected estimate command");
        };
        let criteria = args.into_criteria();
        assert_eq!(criteria.industry, Some(Industry::Technology));
        assert_eq!(criteria.company_size, Some(CompanySize::Micro));
        assert_eq!(criteria.location, "São Paulo");
    }

    #[test]
    fn lead_count_above_the_cap_is_a_usage_error() {
        assert!(Cli::try_parse_from(["lead-prospector", "leads", "--count", "51"]).is_err());
        let cli = Cli::try_parse_from(["lead-prospector", "leads", "--count", "50"])
            .expect("count within cap");
        let Some(Command::Leads(args)) = cli.command else {
            panic!("expected leads command");
        };
        assert_eq!(args.count, 50);
    }

    #[test]
    fn unknown_industry_is_a_usage_error() {
        assert!(Cli::try_parse_from(["lead-prospector", "estimate", "--industry", "Mineração"]).is_err());
    }
}
