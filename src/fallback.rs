//! Fixed fallback payloads substituted when the backend is absent or
//! returns something unusable. Downstream consumers have no failure path
//! of their own, so every fetch must yield renderable data.

use crate::logging::ts_now;
use crate::model::{
    HistoricalVolatilityRecord, ImpliedVolatilityRecord, ImpliedVolatilityRow, OptionType, PriceMovementRecord,
    RawSimulationRow, RawVolatilityData, ResampledSimulationPoint, StockData, VolatilityComparisonRecord,
    VolatilityMetricsData,
};
use crate::horizon::Horizon;

pub fn stock_data(ticker: &str) -> StockData {
    StockData {
        ticker: ticker.to_string(),
        price: 221.81,
        price_change: 3.25,
        price_change_percent: 1.49,
        updated_at: ts_now(),
    }
}

pub fn volatility_metrics(ticker: &str) -> VolatilityMetricsData {
    VolatilityMetricsData {
        stock_data: stock_data(ticker),
        implied_volatility: vec![
            iv("2025-04-17", 650.0, 28.26, 44.97, Horizon::Nearest),
            iv("2025-08-15", 650.0, 23.82, 96.31, Horizon::ThreeMonths),
            iv("2025-12-19", 650.0, 19.60, 108.86, Horizon::SixMonths),
            iv("2025-12-19", 650.0, 19.60, 108.86, Horizon::OneYear),
        ],
        historical_volatility: vec![
            HistoricalVolatilityRecord {
                period: "30-Day".to_string(),
                volatility: 33.04,
                movement: 73.91,
            },
            HistoricalVolatilityRecord {
                period: "1-Year".to_string(),
                volatility: 26.90,
                movement: 174.38,
            },
        ],
        monte_carlo_simulation: vec![
            sim_point("1 days", 221.0, 215.2, 228.4),
            sim_point("1 weeks", 223.5, 210.8, 237.1),
            sim_point("2 weeks", 224.9, 206.3, 244.6),
            sim_point("1 months", 227.2, 199.5, 256.0),
            sim_point("2 months", 230.8, 190.1, 271.9),
            sim_point("3 months", 233.4, 182.7, 288.3),
        ],
        volatility_comparison: comparison(),
    }
}

pub fn raw_volatility_data() -> RawVolatilityData {
    RawVolatilityData {
        implied_volatility_table: vec![
            raw_iv("2025-04-17", 650.0, "c", 28.26),
            raw_iv("2025-08-15", 650.0, "c", 23.82),
            raw_iv("2025-12-19", 650.0, "c", 19.60),
        ],
        expected_price_movement: vec![
            movement("2025-04-17", 44.97),
            movement("2025-08-15", 96.31),
            movement("2025-12-19", 108.86),
        ],
        monte_carlo_simulations: sample_simulations(),
    }
}

pub fn historical_volatility() -> Vec<HistoricalVolatilityRecord> {
    vec![
        HistoricalVolatilityRecord {
            period: "30-Day".to_string(),
            volatility: 30.5,
            movement: 67.65,
        },
        HistoricalVolatilityRecord {
            period: "1-Year".to_string(),
            volatility: 26.2,
            movement: 168.93,
        },
    ]
}

pub fn comparison() -> Vec<VolatilityComparisonRecord> {
    vec![
        cmp("Last Month", 27.5, 30.2),
        cmp("2 Months Ago", 25.8, 28.7),
        cmp("3 Months Ago", 26.2, 27.3),
        cmp("4 Months Ago", 24.1, 25.8),
        cmp("5 Months Ago", 22.9, 24.2),
        cmp("6 Months Ago", 23.5, 22.1),
    ]
}

fn iv(date: &str, strike: f64, volatility: f64, movement: f64, label: Horizon) -> ImpliedVolatilityRecord {
    ImpliedVolatilityRecord {
        date: date.to_string(),
        strike,
        option_type: OptionType::Call,
        volatility,
        movement,
        label,
    }
}

fn raw_iv(date: &str, strike: f64, code: &str, volatility: f64) -> ImpliedVolatilityRow {
    ImpliedVolatilityRow {
        date: date.to_string(),
        strike,
        option_type: OptionType::from_code(code),
        volatility,
    }
}

fn movement(date: &str, movement: f64) -> PriceMovementRecord {
    PriceMovementRecord {
        date: date.to_string(),
        movement,
    }
}

fn cmp(date: &str, implied: f64, historical: f64) -> VolatilityComparisonRecord {
    VolatilityComparisonRecord {
        date: date.to_string(),
        implied,
        historical,
    }
}

fn sim_point(timestamp: &str, median: f64, lower05: f64, upper95: f64) -> ResampledSimulationPoint {
    ResampledSimulationPoint {
        timestamp: timestamp.to_string(),
        median,
        lower05,
        upper95,
        values: vec![lower05, median, upper95],
    }
}

fn sample_simulations() -> Vec<RawSimulationRow> {
    // A small dense table: ten daily rows, three trials each.
    let base = [
        ("2025-04-02", [221.4, 222.9, 220.3]),
        ("2025-04-03", [222.1, 224.0, 219.8]),
        ("2025-04-04", [223.0, 225.6, 218.9]),
        ("2025-04-05", [222.6, 226.8, 217.5]),
        ("2025-04-06", [224.2, 228.1, 216.9]),
        ("2025-04-07", [225.0, 229.4, 216.2]),
        ("2025-04-08", [225.8, 231.0, 215.4]),
        ("2025-04-09", [226.3, 232.7, 214.8]),
        ("2025-04-10", [227.1, 234.2, 214.1]),
        ("2025-04-11", [228.0, 235.9, 213.3]),
    ];
    base.iter()
        .map(|(date, trials)| RawSimulationRow {
            date: date.to_string(),
            trials: trials
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("Simulation {}", i + 1), *v))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_metrics_cover_all_sections() {
        let data = volatility_metrics("PH");
        assert_eq!(data.stock_data.ticker, "PH");
        assert_eq!(data.implied_volatility.len(), 4);
        assert_eq!(data.historical_volatility.len(), 2);
        assert!(!data.monte_carlo_simulation.is_empty());
        assert_eq!(data.volatility_comparison.len(), 6);
    }

    #[test]
    fn test_fallback_raw_tables_join_cleanly() {
        let raw = raw_volatility_data();
        assert_eq!(raw.implied_volatility_table.len(), raw.expected_price_movement.len());
        for row in &raw.monte_carlo_simulations {
            assert_eq!(row.trial_count(), 3);
        }
    }
}
