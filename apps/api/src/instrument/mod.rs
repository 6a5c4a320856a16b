//! Dispatch instrumentation: the DevTools call log and the usage metrics
//! the analytics dashboard reads. Both stores are additive observers; a
//! store falling behind or being cleared never changes dispatch results.

pub mod call_log;
pub mod handlers;
pub mod metrics;

pub use call_log::{ApiCallLog, ApiCallRecord, CallStatus, CallUpdate, CALL_LOG_CAPACITY};
pub use metrics::UsageMetrics;
