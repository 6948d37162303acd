//! Data core of a stock-volatility dashboard.
//!
//! The rendering layer is an external collaborator; this crate owns
//! everything between raw inputs and renderable records:
//!
//! - tab-separated table ingestion ([`tabular`])
//! - sample summary statistics ([`stats`])
//! - simulation downsampling ([`resample`])
//! - implied-volatility / price-movement joining ([`join`])
//! - horizon and relative-time classification ([`horizon`])
//! - backend fetching with fixed-payload fallback ([`fetch`], [`fallback`])
//! - latest-wins response sequencing ([`snapshot`])
//! - wholesale session-blob persistence ([`session`])

pub mod config;
pub mod fallback;
pub mod fetch;
pub mod horizon;
pub mod join;
pub mod logging;
pub mod model;
pub mod resample;
pub mod session;
pub mod snapshot;
pub mod stats;
pub mod tabular;
