use keuzetool::config::CatalogConfig;
use keuzetool::core::filter_url::{advice_url, build_filter_url};
use keuzetool::domain::model::{Advice, ModulePick, Selection};

fn config() -> CatalogConfig {
    CatalogConfig::embedded().unwrap()
}

const BASE: &str =
    "https://www.lis.nl/lis-voor-werkenden-maatwerkprogramma-s-hightechsector/programma-aanbod/";

#[test]
fn no_selection_falls_back_to_bare_base_url() {
    let url = build_filter_url(&config(), &[], &[]);
    assert_eq!(url, BASE);
    assert!(!url.contains('?'));
}

#[test]
fn single_track_builds_programme_segment_only() {
    let url = build_filter_url(&config(), &["A".to_string()], &[]);
    assert_eq!(url, format!("{}persoonlijk-advies-def/?filter=programma-s:npi-engineer", BASE));
    assert!(!url.contains("losse-modules"));
}

#[test]
fn module_label_is_stripped_and_normalized() {
    let picks = vec![ModulePick::Label("CMM meten en controleren (C)".to_string())];
    let url = build_filter_url(&config(), &[], &picks);
    assert_eq!(
        url,
        format!("{}persoonlijk-advies-def/?filter=losse-modules:cmm-meten-en-controleren", BASE)
    );
}

#[test]
fn tracks_come_before_modules_joined_by_semicolon() {
    let config = config();
    let picks = vec![
        ModulePick::Module(config.module("iso").unwrap().clone()),
        ModulePick::Label("Technische materiaalkeuze (B)".to_string()),
    ];
    let url = build_filter_url(&config, &["B".to_string(), "C".to_string()], &picks);
    assert_eq!(
        url,
        format!(
            "{}persoonlijk-advies-def/?filter=programma-s:product-engineer,cnc-operator;\
             losse-modules:iso9000-en-ce,technische-materiaalkeuze",
            BASE
        )
    );
}

#[test]
fn diacritics_in_labels_are_folded() {
    let picks = vec![ModulePick::Label("Efficiënt één module (A)".to_string())];
    let url = build_filter_url(&config(), &[], &picks);
    assert!(url.ends_with("losse-modules:efficient-een-module"));
}

#[test]
fn unknown_track_codes_are_skipped_silently() {
    let url = build_filter_url(&config(), &["X".to_string(), "C".to_string()], &[]);
    assert!(url.ends_with("filter=programma-s:cnc-operator"));
}

#[test]
fn all_unknown_tracks_and_no_modules_yields_bare_base_url() {
    let url = build_filter_url(&config(), &["X".to_string(), "Y".to_string()], &[]);
    assert_eq!(url, BASE);
}

#[test]
fn duplicate_track_codes_are_deduplicated_in_input_order() {
    let codes = vec!["C".to_string(), "A".to_string(), "C".to_string()];
    let url = build_filter_url(&config(), &codes, &[]);
    assert!(url.ends_with("programma-s:cnc-operator,npi-engineer"));
}

#[test]
fn advice_url_resolves_recommended_keys_against_catalog() {
    let config = config();
    let advice = Advice {
        created_at: chrono::Utc::now(),
        selection: Selection {
            interests: vec!["C".to_string()],
            ..Default::default()
        },
        recommended: vec!["cmm".to_string(), "no-such-key".to_string()],
    };

    let url = advice_url(&config, &advice);
    assert!(url.contains("programma-s:cnc-operator"));
    assert!(url.contains("losse-modules:cmm-meten-en-controleren"));
    assert!(!url.contains("no-such-key"));
}

#[test]
fn purely_parenthetical_labels_produce_no_empty_slugs() {
    let picks = vec![
        ModulePick::Label("(C)".to_string()),
        ModulePick::Label("CNC automation (C)".to_string()),
    ];
    let url = build_filter_url(&config(), &[], &picks);
    assert!(url.ends_with("?filter=losse-modules:cnc-automation"));

    let only_parens = vec![ModulePick::Label("(C)".to_string())];
    assert_eq!(build_filter_url(&config(), &[], &only_parens), BASE);
}
