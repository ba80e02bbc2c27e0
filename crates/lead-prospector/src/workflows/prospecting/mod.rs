//! Criteria-driven estimates and synthetic dashboard data.
//!
//! Everything here is a pure function of a [`SearchCriteria`] snapshot and a seed
//! hashed from it, so repeated renders of the same form show the same figures.

pub mod criteria;
pub mod dashboard;
pub mod estimate;
pub mod leads;
pub mod run;
pub mod seed;
pub mod tables;

pub use criteria::{CompanySize, CriteriaError, Industry, SearchCriteria};
pub use dashboard::{source_distribution, weekly_activity, DashboardSnapshot, SourceShare, WeeklyActivity};
pub use estimate::{criteria_seed, estimate, estimate_seeded, EstimateFactors, EstimateResult};
pub use leads::{generate_leads, LeadStatus, SyntheticLead, DEFAULT_LEAD_COUNT, MAX_LEAD_COUNT};
pub use run::{leads_found, ProspectingRun};
