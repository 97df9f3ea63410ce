//! Tests for fixed-value imputation on the housing table

use hausprep::pipeline::{
    add_log_columns, apply_imputation, ensure_no_missing, select_columns, ImputeRule,
    NonPositivePolicy, PipelineConfig, PipelineError,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

/// Selected and log-augmented table, ready for imputation
fn working_table() -> (DataFrame, PipelineConfig) {
    let config = PipelineConfig::default();
    let mut df = select_columns(&common::create_house_dataframe(), &config.selected_columns).unwrap();
    add_log_columns(&mut df, &config.positive_valued_columns, config.non_positive_policy).unwrap();
    (df, config)
}

#[test]
fn test_default_rules_fill_every_gap() {
    let (mut df, config) = working_table();

    let counts = apply_imputation(&mut df, &config.imputation).unwrap();

    assert_eq!(
        counts,
        vec![
            ("LotFrontage".to_string(), 2),
            ("LogLotFrontage".to_string(), 2),
            ("GarageType".to_string(), 2),
        ]
    );
    for name in ["LotFrontage", "LogLotFrontage", "GarageType"] {
        assert_eq!(df.column(name).unwrap().null_count(), 0, "{} still has nulls", name);
    }
}

#[test]
fn test_filled_values_are_the_configured_constants() {
    let (mut df, config) = working_table();
    apply_imputation(&mut df, &config.imputation).unwrap();

    let frontage = common::f64_values(&df, "LotFrontage");
    let log_frontage = common::f64_values(&df, "LogLotFrontage");
    assert_eq!(frontage[7], 0.0);
    assert_eq!(frontage[14], 0.0);
    assert_eq!(log_frontage[7], 0.0);
    assert_eq!(log_frontage[14], 0.0);

    let garage: Vec<&str> = df
        .column("GarageType")
        .unwrap()
        .str()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(garage[12], "None");
    assert_eq!(garage[15], "None");
    assert_eq!(garage[0], "Attchd");
}

#[test]
fn test_present_values_untouched() {
    let (mut df, config) = working_table();
    let area_before = common::f64_values(&df, "LogLotArea");
    let quality_before = common::f64_values(&df, "OverallQual");

    apply_imputation(&mut df, &config.imputation).unwrap();

    assert_eq!(common::f64_values(&df, "LogLotArea"), area_before);
    assert_eq!(common::f64_values(&df, "OverallQual"), quality_before);
    assert!((common::f64_values(&df, "LogLotFrontage")[0] - 65f64.log10()).abs() < 1e-12);
}

#[test]
fn test_column_without_rule_is_reported() {
    let config = PipelineConfig::default();
    let mut raw = common::create_house_dataframe();
    raw.with_column(Column::new(
        "Fireplaces".into(),
        (0..common::HOUSE_ROWS as i64)
            .map(|i| if i == 3 { None } else { Some(i % 3) })
            .collect::<Vec<_>>(),
    ))
    .unwrap();

    let mut df = select_columns(&raw, &config.selected_columns).unwrap();
    add_log_columns(&mut df, &config.positive_valued_columns, NonPositivePolicy::Reject).unwrap();
    apply_imputation(&mut df, &config.imputation).unwrap();

    let err = ensure_no_missing(&df, &config.numeric_feature_columns()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<PipelineError>(),
        Some(&PipelineError::UnexpectedMissing {
            column: "Fireplaces".to_string(),
            count: 1,
        })
    );
}

#[test]
fn test_rule_for_missing_column_fails() {
    let (mut df, _) = working_table();

    let result = apply_imputation(&mut df, &[ImputeRule::number("PoolArea", 0.0)]);

    assert!(result.is_err());
}
