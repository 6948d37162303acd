use anyhow::{Context, Result};
use chrono::Utc;

use volcore::config::Config;
use volcore::fetch::{probe, raw_volatility_data_or_fallback, stock_or_fallback, HttpBackend};
use volcore::join::build_dashboard_snapshot;
use volcore::logging::{log, obj, v_str, Domain, Level};
use volcore::session::SessionStore;
use volcore::snapshot::SnapshotCell;
use volcore::{fallback, model::DashboardSnapshot};

/// Headless driver: one fetch → transform → persist cycle for the
/// configured ticker, snapshot JSON on stdout.
#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[("ticker", v_str(&cfg.ticker)), ("base_url", v_str(&cfg.base_url))]),
    );

    let backend = HttpBackend::new(cfg.clone());
    let status = probe(&backend, &cfg.ticker).await;
    log(
        Level::Info,
        Domain::System,
        "backend_status",
        obj(&[("status", v_str(&format!("{:?}", status)))]),
    );

    let mut store = SessionStore::open(&cfg)?;
    store.init()?;

    let cell: SnapshotCell<DashboardSnapshot> = SnapshotCell::new();
    let token = cell.issue();

    let stock = stock_or_fallback(&backend, &cfg.ticker).await;
    let raw = raw_volatility_data_or_fallback(&backend).await;

    let reference = Utc::now().date_naive();
    let snapshot = build_dashboard_snapshot(
        &cfg.ticker,
        stock,
        &raw,
        fallback::historical_volatility(),
        fallback::comparison(),
        reference,
    );
    cell.apply(token, snapshot);

    let snapshot = cell.get().context("no snapshot applied")?;
    store.save(&snapshot)?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
