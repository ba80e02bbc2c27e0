use crate::workflows::notifications::{Notification, NotificationAction};
use serde::Serialize;

pub const PROGRESS_STEP: u8 = 10;

/// Display-only progress of a prospecting pass. Each transition returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProspectingRun {
    #[default]
    Idle,
    Running {
        progress: u8,
        found: u32,
    },
    Completed {
        found: u32,
    },
}

impl ProspectingRun {
    pub fn start(found: u32) -> (Self, Notification) {
        (
            ProspectingRun::Running { progress: 0, found },
            Notification::for_action(NotificationAction::ProspectingStarted),
        )
    }

    /// Advances by one step; reaching 100% completes the run.
    pub fn tick(self) -> (Self, Option<Notification>) {
        match self {
            ProspectingRun::Running { progress, found } => {
                let progress = progress.saturating_add(PROGRESS_STEP).min(100);
                if progress >= 100 {
                    (
                        ProspectingRun::Completed { found },
                        Some(Notification::for_action(
                            NotificationAction::ProspectingCompleted { leads: found },
                        )),
                    )
                } else {
                    (ProspectingRun::Running { progress, found }, None)
                }
            }
            other => (other, None),
        }
    }

    pub fn stop(self) -> (Self, Notification) {
        (
            ProspectingRun::Idle,
            Notification::for_action(NotificationAction::ProspectingStopped),
        )
    }

    pub fn progress(&self) -> u8 {
        match self {
            ProspectingRun::Idle => 0,
            ProspectingRun::Running { progress, .. } => *progress,
            ProspectingRun::Completed { .. } => 100,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ProspectingRun::Running { .. })
    }
}

/// Leads a completed pass reports: qualified estimate capped by the daily limit.
pub fn leads_found(qualified_leads: u32, daily_lead_limit: u32) -> u32 {
    qualified_leads.min(daily_lead_limit)
}
