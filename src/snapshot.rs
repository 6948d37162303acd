//! Latest-wins snapshot sequencing.
//!
//! Repeated fetch triggers race: without sequencing, a slow early response
//! can land after a fast later one and overwrite it. The cell issues a
//! monotonically increasing token per request and applies a completed
//! response only if its token is the most recent issued; anything staler is
//! discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::logging::{log, obj, v_num, Domain, Level};

/// One request's claim on the cell. Not cloneable: a token is spent when
/// applied.
#[derive(Debug)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

pub struct SnapshotCell<T> {
    issued: AtomicU64,
    slot: Mutex<Option<(u64, T)>>,
}

impl<T> SnapshotCell<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            slot: Mutex::new(None),
        }
    }

    /// Issue a token for a new request. Later tokens supersede earlier ones
    /// the moment they are issued, before any response lands.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Apply a completed response. Returns true if the snapshot was
    /// replaced; false if the token was stale and the response discarded.
    pub fn apply(&self, token: RequestToken, value: T) -> bool {
        let latest = self.issued.load(Ordering::SeqCst);
        if token.0 != latest {
            log(
                Level::Debug,
                Domain::System,
                "stale_response_discarded",
                obj(&[("token", v_num(token.0 as f64)), ("latest", v_num(latest as f64))]),
            );
            return false;
        }
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some((token.0, value));
        true
    }

    /// The token of the currently applied snapshot, if any.
    pub fn applied_token(&self) -> Option<u64> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(|(t, _)| *t)
    }
}

impl<T: Clone> SnapshotCell<T> {
    /// The current snapshot, fully replacing semantics: whatever was
    /// applied last under the newest token.
    pub fn get(&self) -> Option<T> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(|(_, v)| v.clone())
    }
}

impl<T> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
