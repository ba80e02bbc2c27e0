use serde::{Deserialize, Serialize};

pub const HOT_THRESHOLD: u8 = 80;
pub const WARM_THRESHOLD: u8 = 60;

/// Qualification bucket for a weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadCategory {
    Quente,
    Morno,
    Frio,
}

impl LeadCategory {
    /// Lower bounds are inclusive: 80 is hot, 60 is warm.
    pub const fn from_score(score: u8) -> Self {
        if score >= HOT_THRESHOLD {
            LeadCategory::Quente
        } else if score >= WARM_THRESHOLD {
            LeadCategory::Morno
        } else {
            LeadCategory::Frio
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LeadCategory::Quente => "Quente",
            LeadCategory::Morno => "Morno",
            LeadCategory::Frio => "Frio",
        }
    }

    pub const fn range_label(self) -> &'static str {
        match self {
            LeadCategory::Quente => "80-100 pts",
            LeadCategory::Morno => "60-79 pts",
            LeadCategory::Frio => "0-59 pts",
        }
    }
}
