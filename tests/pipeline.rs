//! End-to-end pipeline tests: pasted text in, renderable records out.
//!
//! The reference date is injected everywhere so these are pure functions
//! of their inputs.

use chrono::NaiveDate;

use volcore::horizon::Horizon;
use volcore::join::{build_dashboard_snapshot, join_implied_volatility};
use volcore::model::{OptionType, RawSimulationRow, RawVolatilityData, StockData};
use volcore::resample::resample;
use volcore::tabular::{parse_implied_volatility, parse_price_movement, parse_simulation};

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
}

fn stock() -> StockData {
    StockData {
        ticker: "CUSTOM".to_string(),
        price: 221.81,
        price_change: 3.25,
        price_change_percent: 1.49,
        updated_at: "2025-04-01T00:00:00Z".to_string(),
    }
}

/// Build a dense daily simulation paste block: `days` rows, three trials.
fn simulation_text(days: usize) -> String {
    let mut text = String::from("Date\tSimulation 1\tSimulation 2\tSimulation 3");
    for i in 0..days {
        let date = reference() + chrono::Duration::days(i as i64 + 1);
        text.push_str(&format!(
            "\n{}\t{:.2}\t{:.2}\t{:.2}",
            date.format("%Y-%m-%d"),
            220.0 + i as f64,
            225.0 + i as f64,
            215.0 + i as f64,
        ));
    }
    text
}

#[test]
fn paste_to_joined_records() {
    let iv_text = "Expiration\tStrike\tType\tIV\n\
                   2025-04-17\t650.0\tc\t28.26\n\
                   2025-05-16\t650.0\tp\t25.40\n\
                   2025-09-28\t650.0\tc\t20.10";
    let movement_text = "Date\tMovement\n2025-04-17\t44.97\n2025-05-16\t96.31";

    let rows = parse_implied_volatility(iv_text);
    let movements = parse_price_movement(movement_text);
    let joined = join_implied_volatility(&rows, &movements, reference());

    assert_eq!(joined.len(), 3);
    assert_eq!(joined[0].option_type, OptionType::Call);
    assert_eq!(joined[0].movement, 44.97);
    assert_eq!(joined[0].label, Horizon::Nearest);
    assert_eq!(joined[1].option_type, OptionType::Put);
    assert_eq!(joined[1].label, Horizon::ThreeMonths);
    // No movement row for the last expiration: defaults to zero.
    assert_eq!(joined[2].movement, 0.0);
    assert_eq!(joined[2].label, Horizon::SixMonths);
}

#[test]
fn malformed_table_degrades_to_empty_join() {
    let iv_text = "Expiration\tStrike\tType\tIV\n2025-04-17\tNaN-ish\tc\t28.26";
    let rows = parse_implied_volatility(iv_text);
    assert!(rows.is_empty());
    let joined = join_implied_volatility(&rows, &[], reference());
    assert!(joined.is_empty());
}

#[test]
fn ninety_day_paste_resamples_to_fourteen_points() {
    let table = parse_simulation(&simulation_text(90));
    assert_eq!(table.rows.len(), 90);
    let points = resample(&table.rows, reference());
    assert_eq!(points.len(), 14);

    // Median of {220+i, 225+i, 215+i} is 220+i; first and last points pin
    // the stride endpoints.
    assert_eq!(points[0].median, 220.0);
    assert_eq!(points[13].median, 309.0);
}

#[test]
fn resampled_labels_use_relative_time() {
    let table = parse_simulation(&simulation_text(40));
    let points = resample(&table.rows, reference());
    // First row is one day out, later points fall in week/month buckets.
    assert_eq!(points[0].timestamp, "1 days");
    assert!(points.iter().any(|p| p.timestamp.ends_with("weeks")));
    assert!(points.last().unwrap().timestamp.ends_with("months"));
}

#[test]
fn full_snapshot_from_raw_tables() {
    let raw = RawVolatilityData {
        implied_volatility_table: parse_implied_volatility(
            "Expiration\tStrike\tType\tIV\n2025-04-17\t650.0\tc\t28.26",
        ),
        expected_price_movement: parse_price_movement("Date\tMovement\n2025-04-17\t44.97"),
        monte_carlo_simulations: vec![RawSimulationRow {
            date: "2025-04-02".to_string(),
            trials: [
                ("Simulation 1".to_string(), 100.0),
                ("Simulation 2".to_string(), 110.0),
                ("Simulation 3".to_string(), 120.0),
            ]
            .into_iter()
            .collect(),
        }],
    };

    let snap = build_dashboard_snapshot(
        "CUSTOM",
        stock(),
        &raw,
        volcore::fallback::historical_volatility(),
        volcore::fallback::comparison(),
        reference(),
    );

    assert_eq!(snap.ticker, "CUSTOM");
    assert_eq!(snap.implied_volatility.len(), 1);
    assert_eq!(snap.implied_volatility[0].movement, 44.97);
    assert_eq!(snap.monte_carlo_simulation.len(), 1);
    assert_eq!(snap.monte_carlo_simulation[0].lower05, 100.0);
    assert_eq!(snap.monte_carlo_simulation[0].median, 110.0);
    assert_eq!(snap.monte_carlo_simulation[0].upper95, 120.0);
    assert_eq!(snap.historical_volatility.len(), 2);
    assert_eq!(snap.volatility_comparison.len(), 6);

    // The session payload round-trips through JSON with wire names intact.
    let json = serde_json::to_value(&snap).unwrap();
    assert!(json.get("stockData").is_some());
    assert!(json.get("impliedVolatility").is_some());
    assert!(json.get("monteCarloSimulation").is_some());
    assert_eq!(json["impliedVolatility"][0]["label"], "Nearest");
    assert_eq!(json["impliedVolatility"][0]["type"], "Call");
}
