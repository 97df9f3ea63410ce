//! Tests for log10 column derivation

use hausprep::pipeline::{
    add_log_columns, select_columns, NonPositivePolicy, PipelineConfig, PipelineError,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_log_columns_appended_for_every_positive_column() {
    let config = PipelineConfig::default();
    let mut df = select_columns(&common::create_house_dataframe(), &config.selected_columns).unwrap();

    add_log_columns(&mut df, &config.positive_valued_columns, NonPositivePolicy::Reject).unwrap();

    common::assert_shape(&df, common::HOUSE_ROWS, 20);
    common::assert_has_columns(
        &df,
        &["LogSalePrice", "LogLotFrontage", "LogLotArea", "LogGrLivArea"],
    );
    // Originals stay in the working table
    common::assert_has_columns(&df, &["SalePrice", "LotFrontage", "LotArea", "GrLivArea"]);
}

#[test]
fn test_reference_house_log_values() {
    let config = PipelineConfig::default();
    let mut df = select_columns(&common::create_house_dataframe(), &config.selected_columns).unwrap();
    add_log_columns(&mut df, &config.positive_valued_columns, NonPositivePolicy::Reject).unwrap();

    let price = common::f64_values(&df, "LogSalePrice")[0];
    let area = common::f64_values(&df, "LogLotArea")[0];
    let living = common::f64_values(&df, "LogGrLivArea")[0];

    assert!((price - 208500f64.log10()).abs() < 1e-12);
    assert!((price - 5.3191).abs() < 1e-4, "LogSalePrice = {}", price);
    assert!((area - 3.9269).abs() < 1e-4, "LogLotArea = {}", area);
    assert!((living - 3.2330).abs() < 1e-4, "LogGrLivArea = {}", living);
}

#[test]
fn test_nulls_stay_null() {
    let config = PipelineConfig::default();
    let mut df = select_columns(&common::create_house_dataframe(), &config.selected_columns).unwrap();
    add_log_columns(&mut df, &config.positive_valued_columns, NonPositivePolicy::Reject).unwrap();

    let log_frontage = df.column("LogLotFrontage").unwrap();
    assert_eq!(log_frontage.null_count(), 2);
    assert_eq!(log_frontage.dtype(), &DataType::Float64);
}

#[test]
fn test_zero_value_rejected_and_frame_untouched() {
    let mut df = df! {
        "LotArea" => [8450i64, 9600, 11250],
        "GrLivArea" => [1710i64, 0, 1786],
    }
    .unwrap();

    let err = add_log_columns(
        &mut df,
        &strings(&["LotArea", "GrLivArea"]),
        NonPositivePolicy::Reject,
    )
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<PipelineError>(),
        Some(&PipelineError::NonPositive {
            column: "GrLivArea".to_string(),
            count: 1,
            first_row: 1,
        })
    );
    // LotArea was valid, but nothing is appended when any column fails
    assert_eq!(df.width(), 2);
}

#[test]
fn test_negative_values_counted() {
    let mut df = df! { "SalePrice" => [-1.0f64, 200000.0, -5.0, 0.0] }.unwrap();

    let err = add_log_columns(&mut df, &strings(&["SalePrice"]), NonPositivePolicy::Reject)
        .unwrap_err();

    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::NonPositive { count, first_row, .. }) => {
            assert_eq!(*count, 3);
            assert_eq!(*first_row, 0);
        }
        other => panic!("Expected NonPositive error, got {:?}", other),
    }
}

#[test]
fn test_passthrough_keeps_non_finite_results() {
    let mut df = df! { "LotArea" => [100.0f64, 0.0, -10.0] }.unwrap();

    add_log_columns(&mut df, &strings(&["LotArea"]), NonPositivePolicy::Passthrough).unwrap();

    let logs: Vec<Option<f64>> = df
        .column("LogLotArea")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(logs[0], Some(2.0));
    assert_eq!(logs[1], Some(f64::NEG_INFINITY));
    assert!(logs[2].unwrap().is_nan());
}

#[test]
fn test_non_numeric_column_is_an_error() {
    let mut df = df! { "MSZoning" => ["RL", "RM"] }.unwrap();

    let result = add_log_columns(&mut df, &strings(&["MSZoning"]), NonPositivePolicy::Reject);

    assert!(result.is_err());
}
