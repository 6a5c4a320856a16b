//! Per-model usage counters for the analytics dashboard.
//!
//! Counting rules: every dispatch that reaches the wire counts as one use of
//! its model, success or not. Latency samples and success outcomes are only
//! recorded for calls that settled. Comparison wins are a separate series
//! fed by the side-by-side picker, not by dispatches.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::models::{ActionKind, ModelKind, SectionKind};

#[derive(Debug, Default, Clone)]
struct ModelStats {
    uses: u64,
    latencies_ms: Vec<u64>,
    successes: u64,
    outcomes: u64,
}

/// One side-by-side comparison resolved by the author picking a winner.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonWin {
    pub winner: ModelKind,
    pub section: SectionKind,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    per_model: [ModelStats; 3],
    comparisons: Vec<ComparisonWin>,
}

/// Shared, in-memory usage metrics. All methods take `&self`; the lock is
/// never held across an await point because nothing here is async.
#[derive(Debug, Default)]
pub struct UsageMetrics {
    inner: Mutex<MetricsInner>,
}

impl UsageMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one settled dispatch for `model`.
    pub fn record_usage(
        &self,
        model: ModelKind,
        action: ActionKind,
        section: SectionKind,
        latency_ms: u64,
        success: bool,
    ) {
        let mut inner = self.inner.lock().unwrap();
        let stats = &mut inner.per_model[model.index()];
        stats.uses += 1;
        stats.latencies_ms.push(latency_ms);
        stats.outcomes += 1;
        if success {
            stats.successes += 1;
        }
        debug!(
            "recorded {model} usage for {} on {section} ({latency_ms}ms, success: {success})",
            action.as_str()
        );
    }

    pub fn record_comparison(&self, winner: ModelKind, section: SectionKind) {
        let mut inner = self.inner.lock().unwrap();
        inner.comparisons.push(ComparisonWin { winner, section, at: Utc::now() });
        debug!("recorded comparison win for {winner} on {section}");
    }

    /// Mean latency in milliseconds, 0 when the model has no samples.
    pub fn average_latency_ms(&self, model: ModelKind) -> f64 {
        let inner = self.inner.lock().unwrap();
        let samples = &inner.per_model[model.index()].latencies_ms;
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<u64>() as f64 / samples.len() as f64
    }

    /// Success percentage (0..=100), 0 when the model has no outcomes.
    pub fn success_rate(&self, model: ModelKind) -> f64 {
        let inner = self.inner.lock().unwrap();
        let stats = &inner.per_model[model.index()];
        if stats.outcomes == 0 {
            return 0.0;
        }
        stats.successes as f64 / stats.outcomes as f64 * 100.0
    }

    /// Use counts in catalog order.
    pub fn usage_counts(&self) -> [(ModelKind, u64); 3] {
        let inner = self.inner.lock().unwrap();
        let mut counts = [(ModelKind::Claude, 0); 3];
        for model in ModelKind::ALL {
            counts[model.index()] = (model, inner.per_model[model.index()].uses);
        }
        counts
    }

    /// Share of total use per model. All zeros when nothing was dispatched,
    /// never NaN.
    pub fn usage_distribution(&self) -> [(ModelKind, f64); 3] {
        let counts = self.usage_counts();
        let total: u64 = counts.iter().map(|(_, n)| n).sum();
        let mut shares = [(ModelKind::Claude, 0.0); 3];
        for (i, (model, count)) in counts.into_iter().enumerate() {
            let share = if total == 0 { 0.0 } else { count as f64 / total as f64 };
            shares[i] = (model, share);
        }
        shares
    }

    /// The most-used model. Ties resolve to catalog order, so a fresh store
    /// reports the first catalog entry.
    pub fn most_popular_model(&self) -> ModelKind {
        let counts = self.usage_counts();
        let mut best = counts[0];
        for candidate in counts.into_iter().skip(1) {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }

    /// The model with the most comparison wins, `None` until a comparison
    /// has been resolved.
    pub fn most_preferred_model(&self) -> Option<ModelKind> {
        let inner = self.inner.lock().unwrap();
        if inner.comparisons.is_empty() {
            return None;
        }
        let mut wins = [0u64; 3];
        for comparison in &inner.comparisons {
            wins[comparison.winner.index()] += 1;
        }
        let mut best = ModelKind::Claude;
        for model in ModelKind::ALL {
            if wins[model.index()] > wins[best.index()] {
                best = model;
            }
        }
        Some(best)
    }

    pub fn comparison_total(&self) -> usize {
        self.inner.lock().unwrap().comparisons.len()
    }

    /// Latest comparison wins, newest first, capped at `limit`.
    pub fn recent_comparisons(&self, limit: usize) -> Vec<ComparisonWin> {
        let inner = self.inner.lock().unwrap();
        inner.comparisons.iter().rev().take(limit).copied().collect()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MetricsInner::default();
    }
}
