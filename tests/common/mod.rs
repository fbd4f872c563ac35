//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use tempfile::TempDir;

/// Deterministic noise values with negligible correlation to anything
const NOISE: [f64; 10] = [0.3, -1.2, 0.8, 0.5, -0.7, 1.1, -0.2, 0.9, -1.5, 0.4];

/// Create a transactions DataFrame with known characteristics
///
/// 40 rows, alternating binary `Class`:
/// - `Time`: seconds since the first observation, spread over many hours
/// - `Amount`: class 0 around 100, class 1 around 6 (clear mean difference)
/// - `V1`: strongly separated by class (strong positive point-biserial r)
/// - `V2`: negated `V1` (strong negative r)
/// - `V3`: deterministic noise (weak r)
pub fn create_transactions_dataframe() -> DataFrame {
    let n = 40usize;
    let mut time = Vec::with_capacity(n);
    let mut amount = Vec::with_capacity(n);
    let mut class = Vec::with_capacity(n);
    let mut v1 = Vec::with_capacity(n);
    let mut v2 = Vec::with_capacity(n);
    let mut v3 = Vec::with_capacity(n);

    for i in 0..n {
        let label = (i % 2) as i32;
        class.push(label);
        time.push(i as f64 * 1850.0);

        let (a, v) = if label == 0 {
            (100.0 + (i % 7) as f64, 1.0 + i as f64 * 0.1)
        } else {
            (5.0 + (i % 3) as f64, 15.0 + i as f64 * 0.1)
        };
        amount.push(a);
        v1.push(v);
        v2.push(-v + 0.25);
        v3.push(NOISE[i % NOISE.len()]);
    }

    df! {
        "Time" => time,
        "Amount" => amount,
        "Class" => class,
        "V1" => v1,
        "V2" => v2,
        "V3" => v3,
    }
    .unwrap()
}

/// Create a small DataFrame mixing numeric, string, and null values
pub fn create_mixed_dataframe() -> DataFrame {
    df! {
        "id" => [1i64, 2, 3, 4, 5],
        "amount" => [Some(10.0f64), Some(20.0), None, Some(40.0), Some(30.0)],
        "merchant" => [Some("acme"), Some("globex"), Some("acme"), None, Some("initech")],
        "flag" => [0i32, 1, 0, 0, 1],
    }
    .unwrap()
}

/// Write a DataFrame to a CSV file inside a fresh temp directory
pub fn write_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transactions.csv");
    let mut file = File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    (dir, path)
}
