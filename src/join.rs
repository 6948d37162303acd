//! Joining raw tables into presentation-ready records, and assembly of the
//! combined dashboard snapshot that gets saved to the session.

use chrono::NaiveDate;

use crate::horizon::Horizon;
use crate::model::{
    simulation_table_from_raw, DashboardSnapshot, HistoricalVolatilityRecord, ImpliedVolatilityRecord,
    ImpliedVolatilityRow, PriceMovementRecord, RawVolatilityData, StockData, VolatilityComparisonRecord,
};
use crate::resample::resample;

/// Attach expected price movement and a horizon label to each raw
/// implied-volatility row.
///
/// Movements join on exact date-string equality; the first matching record
/// wins. A date with no movement record gets 0.0: a stock with no modeled
/// movement for an expiration is valid, if degenerate, input.
pub fn join_implied_volatility(
    rows: &[ImpliedVolatilityRow],
    movements: &[PriceMovementRecord],
    reference: NaiveDate,
) -> Vec<ImpliedVolatilityRecord> {
    rows.iter()
        .map(|row| {
            let movement = movements
                .iter()
                .find(|m| m.date == row.date)
                .map(|m| m.movement)
                .unwrap_or(0.0);
            ImpliedVolatilityRecord {
                date: row.date.clone(),
                strike: row.strike,
                option_type: row.option_type,
                volatility: row.volatility,
                movement,
                label: Horizon::classify(&row.date, reference),
            }
        })
        .collect()
}

/// Assemble the combined session payload from raw tables: join the implied
/// volatility table with expected movements and resample the Monte Carlo
/// table, then bundle the pieces under the ticker.
pub fn build_dashboard_snapshot(
    ticker: &str,
    stock_data: StockData,
    raw: &RawVolatilityData,
    historical_volatility: Vec<HistoricalVolatilityRecord>,
    volatility_comparison: Vec<VolatilityComparisonRecord>,
    reference: NaiveDate,
) -> DashboardSnapshot {
    let implied_volatility =
        join_implied_volatility(&raw.implied_volatility_table, &raw.expected_price_movement, reference);
    let table = simulation_table_from_raw(&raw.monte_carlo_simulations);
    let monte_carlo_simulation = resample(&table.rows, reference);
    DashboardSnapshot {
        ticker: ticker.to_string(),
        stock_data,
        implied_volatility,
        historical_volatility,
        monte_carlo_simulation,
        volatility_comparison,
    }
}
