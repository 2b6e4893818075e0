use crate::{
    locate::{LocateError, Locator},
    model::WeatherPayload,
    provider::{FetchError, WeatherSource},
    store::LastCityStore,
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::warn;

/// How long a toast stays up if the user does not dismiss it.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

/// Geolocation budget; expiry is treated the same as a denial.
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

const EMPTY_QUERY_MESSAGE: &str = "Enter a location to search.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A transient, auto-expiring notification. Ids are unique and monotonic.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    created_at: Instant,
}

/// Handle for one in-flight fetch. A result is applied only while its ticket
/// is still the latest, so a slow stale response can never overwrite a newer
/// one.
#[derive(Debug)]
pub struct FetchTicket {
    id: u64,
}

/// Holds the dashboard's ephemeral state and orchestrates fetches, the
/// persistence port, geolocation, and the toast queue. The state machine is
/// exactly idle -> loading -> (success | error) -> idle.
#[derive(Debug)]
pub struct Dashboard {
    source: Arc<dyn WeatherSource>,
    store: Box<dyn LastCityStore>,
    query: String,
    payload: Option<WeatherPayload>,
    loading: bool,
    locating: bool,
    toasts: Vec<Toast>,
    next_toast_id: u64,
    fetch_seq: u64,
}

impl Dashboard {
    /// Restore the last searched city, or fall back to the configured
    /// default. No fetch happens until [`Dashboard::startup`] or
    /// [`Dashboard::search`] is called.
    pub fn new(
        source: Arc<dyn WeatherSource>,
        store: Box<dyn LastCityStore>,
        default_city: &str,
    ) -> Self {
        let query = store.load().unwrap_or_else(|| default_city.to_string());

        Self {
            source,
            store,
            query,
            payload: None,
            loading: false,
            locating: false,
            toasts: Vec::new(),
            next_toast_id: 0,
            fetch_seq: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn payload(&self) -> Option<&WeatherPayload> {
        self.payload.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_locating(&self) -> bool {
        self.locating
    }

    /// Toasts in insertion order, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Initial page-load fetch for the restored (or default) query.
    pub async fn startup(&mut self) {
        let query = self.query.clone();
        self.search(&query).await;
    }

    /// One search: trim, short-circuit empty input, fetch, classify, apply.
    pub async fn search(&mut self, raw_query: &str) {
        let query = raw_query.trim().to_string();
        if query.is_empty() {
            self.push_toast(Severity::Warning, EMPTY_QUERY_MESSAGE.to_string());
            return;
        }

        let ticket = self.begin_fetch();
        let source = Arc::clone(&self.source);
        let result = source.current(&query).await;
        self.complete_fetch(ticket, &query, result);
    }

    /// Start a fetch: the previous payload is cleared immediately so stale
    /// data is never shown next to a loading state.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.payload = None;
        self.loading = true;
        self.fetch_seq += 1;
        FetchTicket { id: self.fetch_seq }
    }

    /// Apply a fetch outcome. Results from superseded tickets are discarded.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        query: &str,
        result: Result<WeatherPayload, FetchError>,
    ) {
        if ticket.id != self.fetch_seq {
            warn!(query, "discarding stale fetch result");
            return;
        }

        self.loading = false;

        match result {
            Ok(payload) => {
                if let Err(err) = self.store.save(query) {
                    warn!(error = %err, "failed to persist last searched city");
                }
                self.query = query.to_string();
                self.payload = Some(payload);
            }
            Err(err) => {
                self.push_toast(Severity::Error, err.to_string());
            }
        }
    }

    /// Acquire a position and search for it. Denial, lack of support, and
    /// timeout all end in a warning toast.
    pub async fn locate(&mut self, locator: &dyn Locator) {
        self.locating = true;
        let outcome = tokio::time::timeout(LOCATE_TIMEOUT, locator.locate()).await;
        self.locating = false;

        match outcome {
            Ok(Ok(coords)) => self.search(&coords.as_query()).await,
            Ok(Err(err)) => {
                self.push_toast(Severity::Warning, err.to_string());
            }
            Err(_) => {
                self.push_toast(Severity::Warning, LocateError::TimedOut.to_string());
            }
        }
    }

    pub fn push_toast(&mut self, severity: Severity, message: String) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast { id, message, severity, created_at: Instant::now() });
        id
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drop toasts older than [`TOAST_TTL`] as of `now`.
    pub fn expire_toasts_at(&mut self, now: Instant) {
        self.toasts.retain(|toast| now.saturating_duration_since(toast.created_at) < TOAST_TTL);
    }

    pub fn expire_toasts(&mut self) {
        self.expire_toasts_at(Instant::now());
    }
}
