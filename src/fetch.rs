//! Backend data fetching.
//!
//! The transport returns typed errors so the logs can distinguish "backend
//! absent" from "backend returned garbage", but the public `_or_fallback`
//! operations keep the dashboard contract: any failure substitutes the
//! fixed fallback payload and the caller never observes a failed fetch.
//!
//! One outstanding request per user action; no retry, no timeout loop, no
//! cancellation at this layer. Races between repeated triggers are settled
//! by the token-sequenced snapshot cell, not here.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::Config;
use crate::fallback;
use crate::logging::{log, obj, v_str, warn_user, Domain, Level};
use crate::model::{RawVolatilityData, StockData, VolatilityMetricsData};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("backend returned HTTP {0}")]
    Status(u16),
    #[error("response did not decode: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Seam to the analytics backend. Tests substitute a stub; production uses
/// [`HttpBackend`].
#[async_trait]
pub trait Backend: Send + Sync {
    async fn stock(&self, ticker: &str) -> Result<StockData, FetchError>;
    async fn volatility_metrics(&self, ticker: &str) -> Result<VolatilityMetricsData, FetchError>;
    async fn raw_volatility_data(&self) -> Result<RawVolatilityData, FetchError>;
}

pub struct HttpBackend {
    client: Client,
    cfg: Config,
}

impl HttpBackend {
    pub fn new(cfg: Config) -> Self {
        Self {
            client: Client::new(),
            cfg,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self
            .cfg
            .endpoint(path)
            .map_err(|e| FetchError::Network(e.to_string()))?;
        log(
            Level::Debug,
            Domain::Fetch,
            "request",
            obj(&[("url", v_str(url.as_str()))]),
        );
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        resp.json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn stock(&self, ticker: &str) -> Result<StockData, FetchError> {
        self.get_json(&format!("/api/stock/{}", ticker)).await
    }

    async fn volatility_metrics(&self, ticker: &str) -> Result<VolatilityMetricsData, FetchError> {
        self.get_json(&format!("/api/volatility-metrics/{}", ticker)).await
    }

    async fn raw_volatility_data(&self) -> Result<RawVolatilityData, FetchError> {
        self.get_json("/api/raw-volatility-data").await
    }
}

fn log_substitution(endpoint: &str, err: &FetchError) {
    warn_user(
        Domain::Fetch,
        "fallback_substituted",
        "backend data unavailable, showing sample data",
        obj(&[
            ("endpoint", v_str(endpoint)),
            ("kind", v_str(err.kind())),
            ("error", v_str(&err.to_string())),
        ]),
    );
}

// =============================================================================
// Fallback-preserving operations
// =============================================================================

pub async fn stock_or_fallback(backend: &dyn Backend, ticker: &str) -> StockData {
    match backend.stock(ticker).await {
        Ok(data) => data,
        Err(err) => {
            log_substitution("stock", &err);
            fallback::stock_data(ticker)
        }
    }
}

pub async fn volatility_metrics_or_fallback(backend: &dyn Backend, ticker: &str) -> VolatilityMetricsData {
    match backend.volatility_metrics(ticker).await {
        Ok(data) => data,
        Err(err) => {
            log_substitution("volatility_metrics", &err);
            fallback::volatility_metrics(ticker)
        }
    }
}

pub async fn raw_volatility_data_or_fallback(backend: &dyn Backend) -> RawVolatilityData {
    match backend.raw_volatility_data().await {
        Ok(data) => data,
        Err(err) => {
            log_substitution("raw_volatility_data", &err);
            fallback::raw_volatility_data()
        }
    }
}

/// Connection check on startup: one metrics request, status only. The
/// result drives the "waiting for backend" notice, nothing else.
pub async fn probe(backend: &dyn Backend, ticker: &str) -> ConnectionStatus {
    match backend.volatility_metrics(ticker).await {
        Ok(_) => ConnectionStatus::Connected,
        Err(err) => {
            log(
                Level::Info,
                Domain::Fetch,
                "probe_failed",
                obj(&[("kind", v_str(err.kind()))]),
            );
            ConnectionStatus::Disconnected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingBackend(fn() -> FetchError);

    #[async_trait]
    impl Backend for FailingBackend {
        async fn stock(&self, _ticker: &str) -> Result<StockData, FetchError> {
            Err((self.0)())
        }
        async fn volatility_metrics(&self, _ticker: &str) -> Result<VolatilityMetricsData, FetchError> {
            Err((self.0)())
        }
        async fn raw_volatility_data(&self) -> Result<RawVolatilityData, FetchError> {
            Err((self.0)())
        }
    }

    #[tokio::test]
    async fn test_network_failure_substitutes_fallback() {
        let backend = FailingBackend(|| FetchError::Network("connection refused".to_string()));
        let data = stock_or_fallback(&backend, "PH").await;
        assert_eq!(data.ticker, "PH");
        assert_eq!(data.price, 221.81);
    }

    #[tokio::test]
    async fn test_decode_failure_substitutes_fallback() {
        let backend = FailingBackend(|| FetchError::Decode("expected value".to_string()));
        let data = volatility_metrics_or_fallback(&backend, "PH").await;
        assert_eq!(data.implied_volatility.len(), 4);
    }

    #[tokio::test]
    async fn test_status_failure_substitutes_fallback() {
        let backend = FailingBackend(|| FetchError::Status(500));
        let raw = raw_volatility_data_or_fallback(&backend).await;
        assert!(!raw.implied_volatility_table.is_empty());
    }

    #[tokio::test]
    async fn test_probe_reports_disconnected() {
        let backend = FailingBackend(|| FetchError::Network("refused".to_string()));
        assert_eq!(probe(&backend, "PH").await, ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_error_kinds_distinct() {
        assert_eq!(FetchError::Network("x".to_string()).kind(), "network");
        assert_eq!(FetchError::Status(404).kind(), "status");
        assert_eq!(FetchError::Decode("x".to_string()).kind(), "decode");
    }
}
