use super::criteria::{CompanySize, Industry};

pub const BASE_LEADS: f64 = 500.0;

/// Applied to any non-empty location that matches no known city.
pub const UNKNOWN_LOCATION_FACTOR: f64 = 0.7;

pub const HIGH_DEMAND_TERMS: &[&str] = &["ceo", "diretor", "gerente", "coordenador", "analista"];

/// Per-token weight for the keyword and job-title factors.
#[derive(Debug, Clone, Copy)]
pub struct TokenWeights {
    pub high_demand: f64,
    pub standard: f64,
}

pub const KEYWORD_WEIGHTS: TokenWeights = TokenWeights {
    high_demand: 0.15,
    standard: 0.08,
};

pub const JOB_TITLE_WEIGHTS: TokenWeights = TokenWeights {
    high_demand: 0.20,
    standard: 0.10,
};

pub const INDUSTRY_FACTORS: &[(Industry, f64)] = &[
    (Industry::Technology, 2.8),
    (Industry::Saas, 2.5),
    (Industry::Finance, 2.0),
    (Industry::ECommerce, 1.8),
    (Industry::Marketing, 1.6),
    (Industry::Health, 1.5),
    (Industry::Consulting, 1.4),
    (Industry::Retail, 1.2),
    (Industry::Education, 1.1),
    (Industry::Manufacturing, 1.0),
    (Industry::RealEstate, 0.5),
    (Industry::Telecom, 0.3),
];

// smaller companies are more numerous, hence the inverse ordering
pub const COMPANY_SIZE_FACTORS: &[(CompanySize, f64)] = &[
    (CompanySize::Micro, 3.2),
    (CompanySize::Small, 2.4),
    (CompanySize::Medium, 1.6),
    (CompanySize::Large, 1.0),
    (CompanySize::Enterprise, 0.5),
    (CompanySize::Corporation, 0.2),
];

/// A known city with its spellings and estimate factor.
#[derive(Debug, Clone, Copy)]
pub struct CityFactor {
    pub city: &'static str,
    pub aliases: &'static [&'static str],
    pub factor: f64,
}

pub const CITY_FACTORS: &[CityFactor] = &[
    CityFactor {
        city: "São Paulo",
        aliases: &["são paulo", "sao paulo"],
        factor: 2.5,
    },
    CityFactor {
        city: "Rio de Janeiro",
        aliases: &["rio de janeiro"],
        factor: 2.0,
    },
    CityFactor {
        city: "Belo Horizonte",
        aliases: &["belo horizonte"],
        factor: 1.5,
    },
    CityFactor {
        city: "Brasília",
        aliases: &["brasília", "brasilia"],
        factor: 1.4,
    },
    CityFactor {
        city: "Curitiba",
        aliases: &["curitiba"],
        factor: 1.3,
    },
    CityFactor {
        city: "Porto Alegre",
        aliases: &["porto alegre"],
        factor: 1.3,
    },
    CityFactor {
        city: "Campinas",
        aliases: &["campinas"],
        factor: 1.1,
    },
    CityFactor {
        city: "Salvador",
        aliases: &["salvador"],
        factor: 1.0,
    },
    CityFactor {
        city: "Recife",
        aliases: &["recife"],
        factor: 1.0,
    },
    CityFactor {
        city: "Fortaleza",
        aliases: &["fortaleza"],
        factor: 0.9,
    },
    CityFactor {
        city: "Florianópolis",
        aliases: &["florianópolis", "florianopolis"],
        factor: 0.8,
    },
    CityFactor {
        city: "Manaus",
        aliases: &["manaus"],
        factor: 0.6,
    },
];

pub fn industry_factor(industry: Option<Industry>) -> f64 {
    industry
        .and_then(|industry| {
            INDUSTRY_FACTORS
                .iter()
                .find(|(candidate, _)| *candidate == industry)
                .map(|(_, factor)| *factor)
        })
        .unwrap_or(1.0)
}

pub fn company_size_factor(size: Option<CompanySize>) -> f64 {
    size.and_then(|size| {
        COMPANY_SIZE_FACTORS
            .iter()
            .find(|(candidate, _)| *candidate == size)
            .map(|(_, factor)| *factor)
    })
    .unwrap_or(1.0)
}

/// First city whose alias appears in `location`, case-insensitively.
pub fn match_city(location: &str) -> Option<&'static CityFactor> {
    let lowered = location.to_lowercase();
    CITY_FACTORS
        .iter()
        .find(|entry| entry.aliases.iter().any(|alias| lowered.contains(alias)))
}

pub fn location_factor(location: &str) -> f64 {
    if location.trim().is_empty() {
        return 1.0;
    }
    match_city(location)
        .map(|entry| entry.factor)
        .unwrap_or(UNKNOWN_LOCATION_FACTOR)
}

pub fn is_high_demand(token: &str) -> bool {
    let lowered = token.to_lowercase();
    HIGH_DEMAND_TERMS.iter().any(|term| lowered.contains(term))
}

/// `1 + tokens * weight`, with the higher weight when any token is high demand.
pub fn token_factor(tokens: &[&str], weights: TokenWeights) -> f64 {
    if tokens.is_empty() {
        return 1.0;
    }
    let weight = if tokens.iter().any(|token| is_high_demand(token)) {
        weights.high_demand
    } else {
        weights.standard
    };
    1.0 + tokens.len() as f64 * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_enum_variant_has_a_factor() {
        for industry in Industry::ALL {
            assert!(INDUSTRY_FACTORS.iter().any(|(entry, _)| *entry == industry));
        }
        for size in CompanySize::ALL {
            assert!(COMPANY_SIZE_FACTORS.iter().any(|(entry, _)| *entry == size));
        }
    }

    #[test]
    fn factors_stay_within_documented_ranges() {
        assert!(INDUSTRY_FACTORS
            .iter()
            .all(|(_, factor)| (0.3..=2.8).contains(factor)));
        assert!(COMPANY_SIZE_FACTORS
            .iter()
            .all(|(_, factor)| (0.2..=3.2).contains(factor)));
        assert!(CITY_FACTORS
            .iter()
            .all(|entry| (0.6..=2.5).contains(&entry.factor)));
    }

    #[test]
    fn company_size_factor_decreases_with_size() {
        let factors: Vec<f64> = CompanySize::ALL
            .into_iter()
            .map(|size| company_size_factor(Some(size)))
            .collect();
        assert!(factors.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn location_matches_case_insensitively_and_without_accents() {
        assert_eq!(location_factor("SÃO PAULO, SP"), 2.5);
        assert_eq!(location_factor("sao paulo"), 2.5);
        assert_eq!(location_factor("Zona Sul, Rio de Janeiro"), 2.0);
        assert_eq!(location_factor("Lisboa"), UNKNOWN_LOCATION_FACTOR);
        assert_eq!(location_factor("  "), 1.0);
    }

    #[test]
    fn high_demand_tokens_raise_the_weight() {
        assert_eq!(token_factor(&[], KEYWORD_WEIGHTS), 1.0);
        let plain = token_factor(&["founder", "growth"], KEYWORD_WEIGHTS);
        let hot = token_factor(&["founder", "Diretor de TI"], KEYWORD_WEIGHTS);
        assert!((plain - 1.16).abs() < 1e-9);
        assert!((hot - 1.30).abs() < 1e-9);
    }
}
