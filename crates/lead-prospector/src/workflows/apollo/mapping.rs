use super::normalizer::normalize_label;
use crate::workflows::prospecting::Industry;
use std::collections::HashMap;
use std::sync::OnceLock;

static APOLLO_INDUSTRY_MAP: OnceLock<HashMap<String, Industry>> = OnceLock::new();

pub(crate) fn industry_for_normalized(normalized: &str) -> Option<Industry> {
    apollo_industry_map().get(normalized).copied()
}

fn apollo_industry_map() -> &'static HashMap<String, Industry> {
    APOLLO_INDUSTRY_MAP.get_or_init(|| {
        const APOLLO_INDUSTRIES: &[(&str, Industry)] = &[
            // Technology
            ("Information Technology & Services", Industry::Technology),
            ("Information Technology and Services", Industry::Technology),
            ("Internet", Industry::Technology),
            ("Computer Hardware", Industry::Technology),
            ("Computer & Network Security", Industry::Technology),
            ("Technology", Industry::Technology),
            ("Computer Software", Industry::Saas),
            ("Software", Industry::Saas),
            ("Software as a Service", Industry::Saas),
            // Health
            ("Hospital & Health Care", Industry::Health),
            ("Hospital and Health Care", Industry::Health),
            ("Medical Devices", Industry::Health),
            ("Health, Wellness & Fitness", Industry::Health),
            ("Pharmaceuticals", Industry::Health),
            ("Healthcare", Industry::Health),
            // Finance
            ("Financial Services", Industry::Finance),
            ("Banking", Industry::Finance),
            ("Insurance", Industry::Finance),
            ("Investment Management", Industry::Finance),
            ("Fintech", Industry::Finance),
            // Commerce
            ("E-Commerce", Industry::ECommerce),
            ("Ecommerce", Industry::ECommerce),
            ("Retail", Industry::Retail),
            ("Consumer Goods", Industry::Retail),
            // Services
            ("Marketing & Advertising", Industry::Marketing),
            ("Marketing and Advertising", Industry::Marketing),
            ("Management Consulting", Industry::Consulting),
            ("Consulting", Industry::Consulting),
            ("Education Management", Industry::Education),
            ("Higher Education", Industry::Education),
            ("E-Learning", Industry::Education),
            // Industry
            ("Machinery", Industry::Manufacturing),
            ("Mechanical or Industrial Engineering", Industry::Manufacturing),
            ("Industrial Automation", Industry::Manufacturing),
            ("Automotive", Industry::Manufacturing),
            ("Real Estate", Industry::RealEstate),
            ("Commercial Real Estate", Industry::RealEstate),
            ("Telecommunications", Industry::Telecom),
            ("Wireless", Industry::Telecom),
        ];

        let mut map = HashMap::with_capacity(APOLLO_INDUSTRIES.len() + Industry::ALL.len());
        for industry in Industry::ALL {
            map.insert(normalize_label(industry.label()), industry);
        }
        for (name, industry) in APOLLO_INDUSTRIES {
            map.insert(normalize_label(name), *industry);
        }
        map
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(name: &str) -> Option<Industry> {
    industry_for_normalized(&normalize_label(name))
}
