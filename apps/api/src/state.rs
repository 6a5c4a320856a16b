use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::forwarder::LyzrClient;
use crate::instrument::{ApiCallLog, UsageMetrics};
use crate::settings::SettingsStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The dispatcher holds the same `call_log` and `metrics` handles listed
/// here; handlers read the stores directly, dispatches write through the
/// dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub lyzr: LyzrClient,
    pub dispatcher: Arc<Dispatcher>,
    pub call_log: Arc<ApiCallLog>,
    pub metrics: Arc<UsageMetrics>,
    pub settings: Arc<SettingsStore>,
}
