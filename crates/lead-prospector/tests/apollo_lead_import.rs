use lead_prospector::config::CollectionSettings;
use lead_prospector::workflows::apollo::{ApolloLeadImportError, ApolloLeadImporter, ImportSummary};
use lead_prospector::workflows::prospecting::{CompanySize, Industry};
use lead_prospector::workflows::scoring::{LeadCategory, ScoringCriterion, ScoringRules};

fn import_fixture(settings: &CollectionSettings) -> ImportSummary {
    let data = include_bytes!("fixtures/apollo_contacts.csv");
    ApolloLeadImporter::from_reader(&data[..], &ScoringRules::default(), settings)
        .expect("apollo export imports")
}

#[test]
fn importer_handles_full_apollo_export() {
    let summary = import_fixture(&CollectionSettings::default());

    assert_eq!(summary.rows, 7);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.invalid_emails, 1);
    assert_eq!(summary.leads.len(), 5);

    let scores: Vec<u8> = summary
        .leads
        .iter()
        .map(|lead| lead.score.total_score)
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));

    let top = &summary.leads[0];
    assert_eq!(top.profile.name, "Mariana Costa");
    assert_eq!(top.profile.industry, Some(Industry::Saas));
    assert_eq!(top.profile.company_size, Some(CompanySize::Corporation));
    assert_eq!(top.score.category, LeadCategory::Quente);
}

#[test]
fn leads_without_email_are_kept() {
    let summary = import_fixture(&CollectionSettings::default());
    let camila = summary
        .leads
        .iter()
        .find(|lead| lead.profile.name == "Camila Rocha")
        .expect("lead without email imported");
    assert!(camila.profile.email.is_none());
    assert_eq!(camila.profile.location, "Porto Alegre, RS");
}

#[test]
fn disabled_checks_keep_every_row() {
    let settings = CollectionSettings {
        deduplication: false,
        email_validation: false,
        ..CollectionSettings::default()
    };
    let summary = import_fixture(&settings);
    assert_eq!(summary.duplicates, 0);
    assert_eq!(summary.invalid_emails, 0);
    assert_eq!(summary.leads.len(), 7);
}

#[test]
fn active_rules_drive_import_scores() {
    let data = include_bytes!("fixtures/apollo_contacts.csv");
    let rules = ScoringRules::default().with_enabled(ScoringCriterion::Position, false);
    let summary =
        ApolloLeadImporter::from_reader(&data[..], &rules, &CollectionSettings::default())
            .expect("apollo export imports");

    assert!(summary
        .leads
        .iter()
        .all(|lead| lead.score.components.len() == 4));
}

#[test]
fn ragged_rows_are_reported_as_csv_errors() {
    let csv = "First Name,Email\nAna,ana@empresa.com,extra\n";
    let error = ApolloLeadImporter::from_reader(
        csv.as_bytes(),
        &ScoringRules::default(),
        &CollectionSettings::default(),
    )
    .expect_err("ragged row rejected");

    match error {
        ApolloLeadImportError::Csv(_) => {}
        other => panic!("expected csv error, got {other:?}"),
    }
}
