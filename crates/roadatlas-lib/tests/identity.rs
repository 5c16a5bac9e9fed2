use std::path::PathBuf;

use chrono::NaiveDate;
use roadatlas_lib::CountryRegistry;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/state_name.tsv")
}

#[test]
fn only_current_states_survive_the_reference_date() {
    let registry = CountryRegistry::from_path(&fixture_path()).expect("registry loads");
    assert_eq!(registry.len(), 9);
    assert!(registry.contains_name("United States of America"));
    assert!(!registry.contains_name("Prussia"));
    assert!(!registry.contains_name("United Provinces of Central America"));
    assert!(!registry.contains_name("Yugoslavia"));
}

#[test]
fn unparseable_end_date_skips_the_row() {
    let registry = CountryRegistry::from_path(&fixture_path()).expect("registry loads");
    assert!(!registry.contains_name("Baddatia"));
}

#[test]
fn code_and_name_lookups_are_case_insensitive() {
    let registry = CountryRegistry::from_path(&fixture_path()).expect("registry loads");
    assert_eq!(registry.code_for_name("canada"), Some("CAN"));
    assert_eq!(registry.code_for_name("GERMANY"), Some("GFR"));
    assert_eq!(registry.name_for_code("gfr"), Some("German Federal Republic"));
}

#[test]
fn alternate_reference_date_selects_a_different_epoch() {
    let reference = NaiveDate::from_ymd_opt(2006, 6, 4).expect("valid date");
    let registry =
        CountryRegistry::from_path_at(&fixture_path(), reference).expect("registry loads");
    assert!(registry.contains_name("Yugoslavia"));
    assert!(!registry.contains_name("Canada"));
}

#[test]
fn fuzzy_matches_rank_exactish_spellings_first() {
    let registry = CountryRegistry::from_path(&fixture_path()).expect("registry loads");
    let matches = registry.fuzzy_matches("Mexic", 3);
    assert_eq!(matches.first().map(String::as_str), Some("Mexico"));
}
