//! Tab-separated table ingestion.
//!
//! Input is pasted spreadsheet text: a header line followed by data lines
//! split on single tabs. The header of the implied-volatility and
//! price-movement tables is discarded unvalidated; the simulation table's
//! header names the trial columns.
//!
//! Failure policy: a table either parses completely or comes back empty
//! with a user-visible warning. Partial output mixing parsed rows with
//! garbage is never produced, and the caller never sees a panic.

use thiserror::Error;

use crate::logging::{obj, v_str, warn_user, Domain};
use crate::model::{ImpliedVolatilityRow, OptionType, PriceMovementRecord, SimulationRow, SimulationTable};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("input is empty")]
    EmptyInput,
    #[error("line {line}: expected {expected} fields, got {got}")]
    MissingFields { line: usize, expected: usize, got: usize },
    #[error("line {line}: {column} is not a number: {value:?}")]
    BadNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
}

fn parse_f64(raw: &str, line: usize, column: &'static str) -> Result<f64, ParseError> {
    raw.parse::<f64>().map_err(|_| ParseError::BadNumber {
        line,
        column,
        value: raw.to_string(),
    })
}

/// Trim the whole block once, then split into lines. The first line is the
/// header. No per-field trimming beyond what the tab split implies.
fn data_lines(text: &str) -> Result<Vec<(usize, &str)>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    // Header occupies line 1; data starts at line 2.
    Ok(trimmed.lines().enumerate().skip(1).map(|(i, l)| (i + 1, l)).collect())
}

fn header_line(text: &str) -> Result<&str, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(trimmed.lines().next().unwrap_or(""))
}

// =============================================================================
// Implied volatility table: date \t strike \t optionType \t volatility
// =============================================================================

pub fn try_parse_implied_volatility(text: &str) -> Result<Vec<ImpliedVolatilityRow>, ParseError> {
    let mut rows = Vec::new();
    for (line_no, line) in data_lines(text)? {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 4 {
            return Err(ParseError::MissingFields {
                line: line_no,
                expected: 4,
                got: fields.len(),
            });
        }
        rows.push(ImpliedVolatilityRow {
            date: fields[0].to_string(),
            strike: parse_f64(fields[1], line_no, "strike")?,
            option_type: OptionType::from_code(fields[2]),
            volatility: parse_f64(fields[3], line_no, "volatility")?,
        });
    }
    Ok(rows)
}

/// Warn-and-empty wrapper around [`try_parse_implied_volatility`].
pub fn parse_implied_volatility(text: &str) -> Vec<ImpliedVolatilityRow> {
    match try_parse_implied_volatility(text) {
        Ok(rows) => rows,
        Err(err) => {
            warn_user(
                Domain::Parse,
                "table_rejected",
                "implied volatility table could not be parsed",
                obj(&[("table", v_str("implied_volatility")), ("error", v_str(&err.to_string()))]),
            );
            Vec::new()
        }
    }
}

// =============================================================================
// Price movement table: date \t movement
// =============================================================================

pub fn try_parse_price_movement(text: &str) -> Result<Vec<PriceMovementRecord>, ParseError> {
    let mut rows = Vec::new();
    for (line_no, line) in data_lines(text)? {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(ParseError::MissingFields {
                line: line_no,
                expected: 2,
                got: fields.len(),
            });
        }
        rows.push(PriceMovementRecord {
            date: fields[0].to_string(),
            movement: parse_f64(fields[1], line_no, "movement")?,
        });
    }
    Ok(rows)
}

/// Warn-and-empty wrapper around [`try_parse_price_movement`].
pub fn parse_price_movement(text: &str) -> Vec<PriceMovementRecord> {
    match try_parse_price_movement(text) {
        Ok(rows) => rows,
        Err(err) => {
            warn_user(
                Domain::Parse,
                "table_rejected",
                "expected price movement table could not be parsed",
                obj(&[("table", v_str("price_movement")), ("error", v_str(&err.to_string()))]),
            );
            Vec::new()
        }
    }
}

// =============================================================================
// Monte Carlo table: date \t trial-1 \t trial-2 \t ...
// =============================================================================

/// The header's trailing columns name the simulation trials; each data
/// row's trailing fields are assigned positionally. A short row leaves its
/// missing trials absent, not zero-filled. The trial count is table schema:
/// it comes from the header only and is not re-validated per row.
pub fn try_parse_simulation(text: &str) -> Result<SimulationTable, ParseError> {
    let header: Vec<&str> = header_line(text)?.split('\t').collect();
    let trials: Vec<String> = header.iter().skip(1).map(|s| s.to_string()).collect();

    let mut rows = Vec::new();
    for (line_no, line) in data_lines(text)? {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.is_empty() || fields[0].is_empty() {
            return Err(ParseError::MissingFields {
                line: line_no,
                expected: 1,
                got: 0,
            });
        }
        let mut values = Vec::with_capacity(trials.len());
        for i in 0..trials.len() {
            match fields.get(i + 1) {
                Some(raw) => values.push(Some(parse_f64(raw, line_no, "trial value")?)),
                None => values.push(None),
            }
        }
        rows.push(SimulationRow {
            date: fields[0].to_string(),
            values,
        });
    }
    Ok(SimulationTable { trials, rows })
}

/// Warn-and-empty wrapper around [`try_parse_simulation`].
pub fn parse_simulation(text: &str) -> SimulationTable {
    match try_parse_simulation(text) {
        Ok(table) => table,
        Err(err) => {
            warn_user(
                Domain::Parse,
                "table_rejected",
                "Monte Carlo simulation table could not be parsed",
                obj(&[("table", v_str("simulation")), ("error", v_str(&err.to_string()))]),
            );
            SimulationTable::default()
        }
    }
}
