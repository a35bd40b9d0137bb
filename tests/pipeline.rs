use obesity_dashboard::config::DashboardConfig;
use obesity_dashboard::data::{
    region, DataLoader, DataPipeline, FilterConstraints, LoaderError, SourceKind, SourcePaths,
    ValueRange, INCOME_STEP,
};
use std::path::{Path, PathBuf};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn states(records: &[obesity_dashboard::data::Record]) -> Vec<&str> {
    records.iter().map(|r| r.state.as_str()).collect()
}

#[test]
fn test_loaded_states_are_trimmed() {
    let paths = SourcePaths::in_dir(&fixtures());
    for kind in SourceKind::ALL {
        let table = DataLoader::load_source(kind, paths.get(kind)).unwrap();
        assert!(!table.is_empty());
        for row in &table.rows {
            assert_eq!(row.state, row.state.trim(), "{} source", kind);
        }
    }
}

#[test]
fn test_unified_table_is_inner_join() {
    let dataset = DataPipeline::run(&SourcePaths::in_dir(&fixtures())).unwrap();

    assert_eq!(
        states(&dataset.unified),
        vec![
            "Alabama",
            "Alaska",
            "Colorado",
            "District of Columbia",
            "Puerto Rico",
            "Vermont",
            "West Virginia",
            "United States",
        ]
    );
    // Kentucky has obesity and GDP rows but no household row
    assert!(dataset.unified.iter().all(|r| r.state != "Kentucky"));
}

#[test]
fn test_coercion_failures_keep_rows() {
    let dataset = DataPipeline::run(&SourcePaths::in_dir(&fixtures())).unwrap();

    let puerto_rico = dataset
        .unified
        .iter()
        .find(|r| r.state == "Puerto Rico")
        .unwrap();
    assert_eq!(puerto_rico.prevalence, Some(33.7));
    assert_eq!(puerto_rico.median_household_income, None);
    assert_eq!(puerto_rico.gdp_2023, Some(113434.0));

    let national = dataset
        .unified
        .iter()
        .find(|r| r.state == "United States")
        .unwrap();
    assert_eq!(national.prevalence, None);
}

#[test]
fn test_region_table() {
    let dataset = DataPipeline::run(&SourcePaths::in_dir(&fixtures())).unwrap();

    let codes: Vec<&str> = dataset.regions.iter().map(|r| r.code()).collect();
    assert_eq!(codes, vec!["AL", "AK", "CO", "DC", "PR", "VT", "WV"]);
    assert!(codes.iter().all(|c| region::is_region_code(c)));
}

#[test]
fn test_default_filter() {
    let dataset = DataPipeline::run(&SourcePaths::in_dir(&fixtures())).unwrap();
    let defaults = FilterConstraints::defaults_for(&dataset.unified, INCOME_STEP);

    assert_eq!(defaults.prevalence, ValueRange::new(23.0, 42.0));
    assert_eq!(defaults.income, ValueRange::new(55217.0, 101027.0));

    // Rows with a missing measure cannot satisfy the ranges
    assert_eq!(
        states(&dataset.filter(&defaults)),
        vec![
            "Alabama",
            "Alaska",
            "Colorado",
            "District of Columbia",
            "Vermont",
            "West Virginia",
        ]
    );
}

#[test]
fn test_range_and_state_filters() {
    let dataset = DataPipeline::run(&SourcePaths::in_dir(&fixtures())).unwrap();
    let defaults = FilterConstraints::defaults_for(&dataset.unified, INCOME_STEP);

    let high_prevalence = FilterConstraints {
        prevalence: ValueRange::new(35.0, 42.0),
        ..defaults.clone()
    };
    let filtered = dataset.filter(&high_prevalence);
    assert_eq!(states(&filtered), vec!["Alabama", "West Virginia"]);
    assert_eq!(high_prevalence.apply(&filtered), filtered);

    let selected = defaults.clone().with_states(["Vermont", "Alaska"]);
    assert_eq!(states(&dataset.filter(&selected)), vec!["Alaska", "Vermont"]);

    let nobody = FilterConstraints {
        income: ValueRange::new(0.0, 1000.0),
        ..defaults
    };
    assert!(dataset.filter(&nobody).is_empty());
}

#[test]
fn test_missing_column_is_schema_error() {
    let result = DataPipeline::run(&SourcePaths::in_dir(&fixtures().join("missing_column")));
    match result {
        Err(LoaderError::SchemaError { kind, column }) => {
            assert_eq!(kind, SourceKind::Obesity);
            assert_eq!(column, "Prevalence");
        }
        other => panic!("expected schema error, got {:?}", other.map(|d| d.unified.len())),
    }
}

#[test]
fn test_missing_directory_is_source_unavailable() {
    let config = DashboardConfig::from_args(vec![fixtures()
        .join("no_such_dir")
        .to_string_lossy()
        .to_string()])
    .unwrap();

    let result = DataPipeline::run(&config.source_paths());
    assert!(matches!(result, Err(LoaderError::SourceUnavailable { .. })));
}
