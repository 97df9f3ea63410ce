//! Shared test utilities and fixture generators

#![allow(dead_code)]

use hausprep::pipeline::PipelineConfig;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Number of rows in `create_house_dataframe`
pub const HOUSE_ROWS: usize = 16;

/// Create a small housing DataFrame with known characteristics
///
/// This DataFrame includes:
/// - Row 0: the reference house (SalePrice 208500, MSZoning RL, ...)
/// - Rows 7 and 14: missing `LotFrontage`
/// - Rows 12 and 15: missing `GarageType`
/// - Categories: MSZoning {RL, RM, C (all), FV}, RoofStyle {Gable, Hip},
///   GarageType {Attchd, Detchd, BuiltIn} + imputed "None",
///   HouseStyle {2Story, 1Story, 1.5Fin, 1.5Unf}
/// - Two extra columns (`Id`, `Street`) that the pipeline must ignore
pub fn create_house_dataframe() -> DataFrame {
    df! {
        "Id" => (1i64..=16).collect::<Vec<_>>(),
        "SalePrice" => [208500i64, 181500, 223500, 140000, 250000, 143000, 307000, 200000,
                        129900, 118000, 129500, 345000, 90000, 279500, 157000, 132000],
        "MSZoning" => ["RL", "RL", "RL", "RL", "RL", "RL", "RL", "RL",
                       "RM", "RL", "RL", "RL", "C (all)", "FV", "RL", "RM"],
        "LotFrontage" => [Some(65i64), Some(80), Some(68), Some(60), Some(84), Some(85), Some(75), None,
                          Some(51), Some(50), Some(70), Some(85), Some(60), Some(91), None, Some(51)],
        "LotArea" => [8450i64, 9600, 11250, 9550, 14260, 14115, 10084, 10382,
                      6120, 7420, 11200, 11924, 8400, 10652, 10920, 6120],
        "Street" => ["Pave"; 16],
        "GrLivArea" => [1710i64, 1262, 1786, 1717, 2198, 1362, 1694, 2090,
                        1774, 1077, 1040, 2324, 1000, 1494, 1253, 854],
        "OverallQual" => [7i64, 6, 7, 7, 8, 5, 8, 7, 7, 5, 5, 9, 4, 7, 6, 4],
        "OverallCond" => [5i64, 8, 5, 5, 5, 5, 5, 6, 5, 6, 5, 5, 4, 5, 5, 5],
        "YearBuilt" => [2003i64, 1976, 2001, 1915, 2000, 1993, 2004, 1973,
                        1931, 1939, 1965, 2005, 1920, 2006, 1960, 1929],
        "YearRemodAdd" => [2003i64, 1976, 2002, 1970, 2000, 1995, 2005, 1973,
                           1950, 1950, 1965, 2006, 1950, 2007, 1960, 2001],
        "RoofStyle" => ["Gable", "Gable", "Gable", "Gable", "Gable", "Gable", "Gable", "Gable",
                        "Gable", "Gable", "Hip", "Hip", "Gable", "Gable", "Hip", "Gable"],
        "FullBath" => [2i64, 2, 2, 1, 2, 1, 2, 2, 2, 1, 1, 3, 1, 2, 1, 1],
        "BedroomAbvGr" => [3i64, 3, 3, 3, 4, 1, 3, 3, 2, 2, 3, 4, 2, 3, 2, 2],
        "TotRmsAbvGrd" => [8i64, 6, 6, 7, 9, 5, 7, 7, 8, 5, 5, 11, 5, 7, 5, 5],
        "Fireplaces" => [0i64, 1, 1, 1, 1, 0, 1, 2, 2, 2, 0, 2, 0, 1, 1, 0],
        "GarageType" => [Some("Attchd"), Some("Attchd"), Some("Attchd"), Some("Detchd"),
                         Some("Attchd"), Some("Attchd"), Some("Attchd"), Some("Attchd"),
                         Some("Detchd"), Some("Attchd"), Some("Detchd"), Some("BuiltIn"),
                         None, Some("Attchd"), Some("Attchd"), None],
        "HouseStyle" => ["2Story", "1Story", "2Story", "2Story", "2Story", "1.5Fin", "1Story", "2Story",
                         "1.5Fin", "1.5Unf", "1Story", "2Story", "1Story", "1Story", "1Story", "1.5Fin"],
    }
    .unwrap()
}

/// Create a larger random housing DataFrame with the required schema
pub fn create_large_house_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let zones = ["RL", "RM", "FV", "RH", "C (all)"];
    let roofs = ["Gable", "Hip", "Flat", "Gambrel"];
    let garages = ["Attchd", "Detchd", "BuiltIn", "CarPort", "Basment"];
    let styles = ["1Story", "2Story", "1.5Fin", "SLvl", "SFoyer"];

    let mut pick = |options: &[&'static str]| -> Vec<&'static str> {
        (0..rows)
            .map(|_| options[rng.gen_range(0..options.len())])
            .collect()
    };
    let zoning = pick(&zones[..]);
    let roof = pick(&roofs[..]);
    let style = pick(&styles[..]);

    let garage: Vec<Option<&str>> = (0..rows)
        .map(|_| {
            if rng.gen_bool(0.05) {
                None
            } else {
                Some(garages[rng.gen_range(0..garages.len())])
            }
        })
        .collect();
    let frontage: Vec<Option<i64>> = (0..rows)
        .map(|_| {
            if rng.gen_bool(0.15) {
                None
            } else {
                Some(rng.gen_range(21..200))
            }
        })
        .collect();

    let mut ints = |low: i64, high: i64| -> Vec<i64> {
        (0..rows).map(|_| rng.gen_range(low..high)).collect()
    };

    df! {
        "SalePrice" => ints(35000, 755000),
        "MSZoning" => zoning,
        "LotFrontage" => frontage,
        "LotArea" => ints(1300, 215000),
        "GrLivArea" => ints(334, 5642),
        "OverallQual" => ints(1, 11),
        "OverallCond" => ints(1, 10),
        "YearBuilt" => ints(1872, 2011),
        "YearRemodAdd" => ints(1950, 2011),
        "RoofStyle" => roof,
        "FullBath" => ints(0, 4),
        "BedroomAbvGr" => ints(0, 9),
        "TotRmsAbvGrd" => ints(2, 15),
        "Fireplaces" => ints(0, 4),
        "GarageType" => garage,
        "HouseStyle" => style,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("house_prices.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary CSV file that writes missing values as `NA`
pub fn create_temp_csv_with_na(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("house_prices.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file)
        .with_null_value("NA".to_string())
        .finish(df)
        .unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("house_prices.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Default configuration with every path redirected into `dir`
pub fn config_in(dir: &Path, input: &Path) -> PipelineConfig {
    PipelineConfig {
        input_path: input.to_path_buf(),
        train_output_path: dir.join("train").join("train.csv"),
        validation_output_path: dir.join("validation").join("validation.csv"),
        ..Default::default()
    }
}

/// Parse a headerless numeric CSV file into rows of f64
pub fn read_numeric_rows(path: &Path) -> Vec<Vec<f64>> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| {
            line.split(',')
                .map(|v| v.parse::<f64>().unwrap_or_else(|_| panic!("not a number: '{}'", v)))
                .collect()
        })
        .collect()
}

/// Values of a Float64 (or castable) column without nulls
pub fn f64_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
