//! Wire and pipeline data model.
//!
//! Field names follow the backend's JSON (camelCase, plus the legacy
//! `expirationDate`/`strikePrice` names on the raw tables) so payloads
//! round-trip against the collaborator unchanged.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::horizon::Horizon;

// =============================================================================
// Option type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Normalize the backend's single-character code: `c` is a call,
    /// anything else is a put.
    pub fn from_code(code: &str) -> Self {
        if code == "c" {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

impl Serialize for OptionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OptionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // Accept both the wire code and the display form.
        Ok(match s.as_str() {
            "c" | "C" | "Call" | "call" => OptionType::Call,
            _ => OptionType::Put,
        })
    }
}

// =============================================================================
// Stock overview
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockData {
    pub ticker: String,
    pub price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    /// ISO-8601 datetime string.
    pub updated_at: String,
}

// =============================================================================
// Implied volatility
// =============================================================================

/// A raw implied-volatility table row, before movement and horizon are
/// attached by the join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolatilityRow {
    #[serde(rename = "expirationDate")]
    pub date: String,
    #[serde(rename = "strikePrice")]
    pub strike: f64,
    #[serde(rename = "optionType")]
    pub option_type: OptionType,
    #[serde(rename = "impliedVolatility")]
    pub volatility: f64,
}

/// A joined implied-volatility record: movement and horizon label attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolatilityRecord {
    pub date: String,
    pub strike: f64,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub volatility: f64,
    pub movement: f64,
    pub label: Horizon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceMovementRecord {
    #[serde(rename = "expirationDate")]
    pub date: String,
    #[serde(rename = "expectedPriceMovement")]
    pub movement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalVolatilityRecord {
    pub period: String,
    pub volatility: f64,
    pub movement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityComparisonRecord {
    pub date: String,
    pub implied: f64,
    pub historical: f64,
}

// =============================================================================
// Monte Carlo simulation
// =============================================================================

/// A simulation row as the backend ships it: a date plus one column per
/// trial, keyed "Simulation 1".."Simulation N".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSimulationRow {
    pub date: String,
    #[serde(flatten)]
    pub trials: BTreeMap<String, f64>,
}

/// A parsed simulation row: trial values ordered by the header's columns.
/// A row shorter than the header leaves the missing trials `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRow {
    pub date: String,
    pub values: Vec<Option<f64>>,
}

/// A full simulation table: trial names from the header plus rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationTable {
    pub trials: Vec<String>,
    pub rows: Vec<SimulationRow>,
}

/// One sparse time point of the resampled simulation with its summary
/// statistics attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledSimulationPoint {
    pub timestamp: String,
    pub median: f64,
    pub lower05: f64,
    pub upper95: f64,
    pub values: Vec<f64>,
}

// =============================================================================
// Aggregate payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityMetricsData {
    pub stock_data: StockData,
    pub implied_volatility: Vec<ImpliedVolatilityRecord>,
    pub historical_volatility: Vec<HistoricalVolatilityRecord>,
    pub monte_carlo_simulation: Vec<ResampledSimulationPoint>,
    pub volatility_comparison: Vec<VolatilityComparisonRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVolatilityData {
    pub implied_volatility_table: Vec<ImpliedVolatilityRow>,
    pub expected_price_movement: Vec<PriceMovementRecord>,
    pub monte_carlo_simulations: Vec<RawSimulationRow>,
}

/// The combined payload written wholesale to the session store on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub ticker: String,
    pub stock_data: StockData,
    pub implied_volatility: Vec<ImpliedVolatilityRecord>,
    pub historical_volatility: Vec<HistoricalVolatilityRecord>,
    pub monte_carlo_simulation: Vec<ResampledSimulationPoint>,
    pub volatility_comparison: Vec<VolatilityComparisonRecord>,
}

impl RawSimulationRow {
    /// Trial count is read from the row's keys the way the dashboard reads
    /// it from the first row of the table: count of "Simulation *" columns.
    pub fn trial_count(&self) -> usize {
        self.trials.keys().filter(|k| k.starts_with("Simulation")).count()
    }

    /// Convert to the positional form given a total trial count. Trials are
    /// looked up by the conventional "Simulation {i}" key; absent keys stay
    /// absent.
    pub fn to_simulation_row(&self, total_trials: usize) -> SimulationRow {
        let values = (1..=total_trials)
            .map(|i| self.trials.get(&format!("Simulation {}", i)).copied())
            .collect();
        SimulationRow {
            date: self.date.clone(),
            values,
        }
    }
}

/// Convert the backend's raw simulation rows into a positional table. The
/// trial count comes from the first row only (table schema), matching how
/// the dashboard derives it.
pub fn simulation_table_from_raw(rows: &[RawSimulationRow]) -> SimulationTable {
    let total = rows.first().map(|r| r.trial_count()).unwrap_or(0);
    SimulationTable {
        trials: (1..=total).map(|i| format!("Simulation {}", i)).collect(),
        rows: rows.iter().map(|r| r.to_simulation_row(total)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_from_code() {
        assert_eq!(OptionType::from_code("c"), OptionType::Call);
        assert_eq!(OptionType::from_code("p"), OptionType::Put);
        assert_eq!(OptionType::from_code("x"), OptionType::Put);
        assert_eq!(OptionType::from_code(""), OptionType::Put);
    }

    #[test]
    fn test_option_type_wire_round_trip() {
        let json = serde_json::to_string(&OptionType::Call).unwrap();
        assert_eq!(json, "\"Call\"");
        let back: OptionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OptionType::Call);
        // Backend code form decodes too
        let from_code: OptionType = serde_json::from_str("\"c\"").unwrap();
        assert_eq!(from_code, OptionType::Call);
    }

    #[test]
    fn test_stock_data_wire_names() {
        let data = StockData {
            ticker: "PH".to_string(),
            price: 221.81,
            price_change: 3.25,
            price_change_percent: 1.49,
            updated_at: "2025-04-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("priceChange").is_some());
        assert!(json.get("priceChangePercent").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_raw_row_wire_names() {
        let json = r#"{"expirationDate":"2025-04-17","strikePrice":650.0,"optionType":"c","impliedVolatility":28.26}"#;
        let row: ImpliedVolatilityRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.date, "2025-04-17");
        assert_eq!(row.strike, 650.0);
        assert_eq!(row.option_type, OptionType::Call);
        assert_eq!(row.volatility, 28.26);
    }

    #[test]
    fn test_simulation_row_flatten() {
        let json = r#"{"date":"2025-04-01","Simulation 1":100.5,"Simulation 2":101.2}"#;
        let row: RawSimulationRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.trial_count(), 2);
        let sim = row.to_simulation_row(3);
        assert_eq!(sim.values, vec![Some(100.5), Some(101.2), None]);
    }

    #[test]
    fn test_simulation_table_schema_from_first_row() {
        let rows = vec![
            RawSimulationRow {
                date: "2025-04-01".to_string(),
                trials: [("Simulation 1".to_string(), 100.0), ("Simulation 2".to_string(), 101.0)]
                    .into_iter()
                    .collect(),
            },
            RawSimulationRow {
                date: "2025-04-02".to_string(),
                trials: [("Simulation 1".to_string(), 102.0)].into_iter().collect(),
            },
        ];
        let table = simulation_table_from_raw(&rows);
        assert_eq!(table.trials.len(), 2);
        assert_eq!(table.rows[1].values, vec![Some(102.0), None]);
    }
}
