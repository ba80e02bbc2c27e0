use super::criteria::{Industry, SearchCriteria};
use super::seed::{draw, pick};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEAD_COUNT: usize = 4;
pub const MAX_LEAD_COUNT: usize = 50;

/// Seed distance between consecutive generated records.
const RECORD_STRIDE: u32 = 10;

const FIRST_NAME: u32 = 1;
const LAST_NAME: u32 = 2;
const POSITION: u32 = 3;
const COMPANY: u32 = 4;
const SCORE: u32 = 5;
const PHONE_PREFIX: u32 = 6;
const PHONE_LINE: u32 = 7;

/// Display temperature attached to generated leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    Quente,
    Morno,
    Frio,
}

impl LeadStatus {
    /// Generator thresholds: above 85 is hot, above 75 is warm.
    pub const fn for_generated_score(score: u8) -> Self {
        if score > 85 {
            LeadStatus::Quente
        } else if score > 75 {
            LeadStatus::Morno
        } else {
            LeadStatus::Frio
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::Quente => "Quente",
            LeadStatus::Morno => "Morno",
            LeadStatus::Frio => "Frio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticLead {
    pub name: String,
    pub company: String,
    pub position: String,
    pub score: u8,
    pub email: String,
    pub phone: String,
    pub status: LeadStatus,
}

struct Vocabulary {
    positions: &'static [&'static str],
    companies: &'static [&'static str],
}

const FIRST_NAMES: &[&str] = &[
    "Maria", "João", "Ana", "Carlos", "Fernanda", "Rafael", "Juliana", "Lucas", "Patrícia",
    "Bruno", "Camila", "Ricardo",
];

const LAST_NAMES: &[&str] = &[
    "Silva", "Santos", "Oliveira", "Costa", "Lima", "Pereira", "Almeida", "Ferreira", "Rodrigues",
    "Gomes", "Ribeiro", "Carvalho",
];

const DEFAULT_VOCABULARY: Vocabulary = Vocabulary {
    positions: &[
        "CEO & Founder",
        "Diretora de Marketing",
        "VP de Vendas",
        "Head of Growth",
        "Gerente Comercial",
    ],
    companies: &["TechCorp", "Fintech Solutions", "E-commerce Plus", "SaaS Innovations"],
};

fn vocabulary(industry: Option<Industry>) -> &'static Vocabulary {
    const TECHNOLOGY: Vocabulary = Vocabulary {
        positions: &["CTO", "Head of Engineering", "Diretor de TI", "CEO & Founder", "Gerente de Produto"],
        companies: &["Tech Solutions", "CloudWare", "DataSystems", "DevHouse"],
    };
    const SAAS: Vocabulary = Vocabulary {
        positions: &["Head of Growth", "VP de Vendas", "CEO & Founder", "Gerente de Customer Success"],
        companies: &["SaaS Innovations", "StackFlow", "Plataforma Cloud", "SubscribeIt"],
    };
    const FINANCE: Vocabulary = Vocabulary {
        positions: &["CFO", "Diretor Financeiro", "Gerente de Riscos", "Analista de Investimentos"],
        companies: &["Financial Services", "Fintech Solutions", "Capital Invest", "BancoDigital"],
    };
    const HEALTH: Vocabulary = Vocabulary {
        positions: &["Diretora Clínica", "Gerente de Operações", "CEO", "Coordenador de TI"],
        companies: &["HealthTech", "Clínica Integrada", "MedData", "BioCare"],
    };
    const ECOMMERCE: Vocabulary = Vocabulary {
        positions: &["Head de E-commerce", "Gerente de Marketplace", "VP de Vendas", "CEO"],
        companies: &["E-commerce Plus", "Loja Express", "ShopNow", "VendaFacil"],
    };
    const MARKETING: Vocabulary = Vocabulary {
        positions: &["Diretora de Marketing", "Head of Brand", "Gerente de Mídia", "CMO"],
        companies: &["Marketing Pro", "Agência Criativa", "BrandLab", "MidiaMax"],
    };

    match industry {
        Some(Industry::Technology) => &TECHNOLOGY,
        Some(Industry::Saas) => &SAAS,
        Some(Industry::Finance) => &FINANCE,
        Some(Industry::Health) => &HEALTH,
        Some(Industry::ECommerce) => &ECOMMERCE,
        Some(Industry::Marketing) => &MARKETING,
        _ => &DEFAULT_VOCABULARY,
    }
}

/// Generates `count` display leads for the criteria, ordered by score.
pub fn generate_leads(criteria: &SearchCriteria, seed: u32, count: usize) -> Vec<SyntheticLead> {
    let vocabulary = vocabulary(criteria.industry);
    let location = criteria.primary_location();

    let mut leads: Vec<SyntheticLead> = (0..count)
        .map(|index| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            let record_seed = seed.wrapping_add(index.wrapping_mul(RECORD_STRIDE));
            synthesize(vocabulary, location, record_seed, index)
        })
        .collect();

    leads.sort_by(|left, right| right.score.cmp(&left.score));
    leads
}

fn synthesize(
    vocabulary: &Vocabulary,
    location: Option<&str>,
    seed: u32,
    index: u32,
) -> SyntheticLead {
    let first = pick(FIRST_NAMES, seed, FIRST_NAME).copied().unwrap_or("Maria");
    let last = pick(LAST_NAMES, seed, LAST_NAME).copied().unwrap_or("Silva");
    let position = pick(vocabulary.positions, seed, POSITION)
        .copied()
        .unwrap_or("CEO");
    let company_base = pick(vocabulary.companies, seed, COMPANY)
        .copied()
        .unwrap_or("TechCorp");

    let company = match location {
        Some(location) => format!("{company_base} {location}"),
        None => company_base.to_string(),
    };

    let score = 60 + (draw(seed, SCORE) * 40.0).floor() as u8;
    let email = format!(
        "{}.{}@{}.com",
        slug(first),
        slug(last),
        slug(company_base)
    );
    let prefix = 10_000 + (draw(seed, PHONE_PREFIX) * 90_000.0).floor() as u32;
    let line = 1_000 + (draw(seed, PHONE_LINE) * 9_000.0).floor() as u32;
    let phone = format!("+55 {} {prefix}-{line}", 11 + index);

    SyntheticLead {
        name: format!("{first} {last}"),
        company,
        position: position.to_string(),
        score,
        email,
        phone,
        status: LeadStatus::for_generated_score(score),
    }
}

/// Lowercase, accent-free, `[a-z0-9]` only.
pub(crate) fn slug(value: &str) -> String {
    ascii_fold(value)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Replaces the Portuguese diacritics with their base letters.
pub(crate) fn ascii_fold(value: &str) -> String {
    value
        .chars()
        .map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech_in_sao_paulo() -> SearchCriteria {
        SearchCriteria::default()
            .with_industry(Some(Industry::Technology))
            .with_location("São Paulo, SP")
    }

    #[test]
    fn generates_requested_count_sorted_by_score() {
        let leads = generate_leads(&tech_in_sao_paulo(), 1234, DEFAULT_LEAD_COUNT);
        assert_eq!(leads.len(), DEFAULT_LEAD_COUNT);
        assert!(leads.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert!(generate_leads(&tech_in_sao_paulo(), 1234, 0).is_empty());
    }

    #[test]
    fn same_seed_reproduces_the_same_leads() {
        assert_eq!(
            generate_leads(&tech_in_sao_paulo(), 99, 6),
            generate_leads(&tech_in_sao_paulo(), 99, 6)
        );
    }

    #[test]
    fn company_carries_the_first_location_segment() {
        for lead in generate_leads(&tech_in_sao_paulo(), 7, 4) {
            assert!(lead.company.ends_with(" São Paulo"), "{}", lead.company);
            assert!(!lead.company.contains("SP"));
        }
        for lead in generate_leads(&SearchCriteria::default(), 7, 4) {
            assert!(DEFAULT_VOCABULARY.companies.contains(&lead.company.as_str()));
        }
    }

    #[test]
    fn emails_and_phones_follow_patterns() {
        for (index, lead) in generate_leads(&tech_in_sao_paulo(), 555, 4)
            .into_iter()
            .enumerate()
        {
            assert!(lead.email.is_ascii());
            assert!(lead.email.ends_with(".com"));
            let (local, _) = lead.email.split_once('@').expect("email has domain");
            assert_eq!(local.matches('.').count(), 1);

            let parts: Vec<&str> = lead.phone.split(' ').collect();
            assert_eq!(parts[0], "+55");
            let area: u32 = parts[1].parse().expect("area code numeric");
            assert!((11..15).contains(&area), "index {index} area {area}");
            let (prefix, line) = parts[2].split_once('-').expect("line separator");
            assert_eq!(prefix.len(), 5);
            assert_eq!(line.len(), 4);
        }
    }

    #[test]
    fn status_follows_generator_thresholds() {
        assert_eq!(LeadStatus::for_generated_score(86), LeadStatus::Quente);
        assert_eq!(LeadStatus::for_generated_score(85), LeadStatus::Morno);
        assert_eq!(LeadStatus::for_generated_score(76), LeadStatus::Morno);
        assert_eq!(LeadStatus::for_generated_score(75), LeadStatus::Frio);

        for lead in generate_leads(&tech_in_sao_paulo(), 31, 8) {
            assert!((60..100).contains(&lead.score));
            assert_eq!(lead.status, LeadStatus::for_generated_score(lead.score));
        }
    }

    #[test]
    fn slug_folds_accents() {
        assert_eq!(slug("João"), "joao");
        assert_eq!(slug("Clínica Integrada"), "clinicaintegrada");
        assert_eq!(slug("E-commerce Plus"), "ecommerceplus");
    }
}
