//! Telemetry for MediChain
//!
//! In-process event collection for predictions, rejected queries and empty
//! reference lookups. Cloning a collector shares its state. Aggregate stats
//! cover every event; only the newest `MAX_EVENTS` events are retained.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::errors::MediError;

/// Events kept for `recent_events` (FIFO eviction)
pub const MAX_EVENTS: usize = 1000;

/// Why a query was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoSymptoms,
    DimensionMismatch,
    Other,
}

impl From<&MediError> for RejectReason {
    fn from(err: &MediError) -> Self {
        match err {
            MediError::NoSymptomsSelected => RejectReason::NoSymptoms,
            MediError::DimensionMismatch { .. } => RejectReason::DimensionMismatch,
            _ => RejectReason::Other,
        }
    }
}

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    ModelTrained {
        model_id: String,
        accuracy: Option<f64>,
        timestamp: Instant,
    },
    PredictionMade {
        label: String,
        duration_us: u64,
        timestamp: Instant,
    },
    QueryRejected {
        reason: RejectReason,
        timestamp: Instant,
    },
    PrecautionMiss {
        label: String,
        timestamp: Instant,
    },
    DrugMiss {
        label: String,
        timestamp: Instant,
    },
}

/// Telemetry statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryStats {
    pub models_trained: usize,
    pub predictions: usize,
    pub rejected_no_symptoms: usize,
    pub rejected_dimension: usize,
    pub rejected_other: usize,
    pub precaution_misses: usize,
    pub drug_misses: usize,
}

impl TelemetryStats {
    pub fn rejected(&self) -> usize {
        self.rejected_no_symptoms + self.rejected_dimension + self.rejected_other
    }
}

/// Telemetry collector
#[derive(Debug, Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<VecDeque<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_EVENTS))),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = lock(&self.stats);
            match &event {
                TelemetryEvent::ModelTrained { .. } => stats.models_trained += 1,
                TelemetryEvent::PredictionMade { .. } => stats.predictions += 1,
                TelemetryEvent::QueryRejected { reason, .. } => match reason {
                    RejectReason::NoSymptoms => stats.rejected_no_symptoms += 1,
                    RejectReason::DimensionMismatch => stats.rejected_dimension += 1,
                    RejectReason::Other => stats.rejected_other += 1,
                },
                TelemetryEvent::PrecautionMiss { .. } => stats.precaution_misses += 1,
                TelemetryEvent::DrugMiss { .. } => stats.drug_misses += 1,
            }
        }

        let mut events = lock(&self.events);
        if events.len() == MAX_EVENTS {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        lock(&self.stats).clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Number of retained events
    pub fn event_count(&self) -> usize {
        lock(&self.events).len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let events = lock(&self.events);
        let start = events.len().saturating_sub(n);
        events.iter().skip(start).cloned().collect()
    }

    /// Share of queries that produced a prediction
    pub fn acceptance_rate(&self) -> f64 {
        let stats = lock(&self.stats);
        let total = stats.predictions + stats.rejected();
        if total == 0 {
            1.0
        } else {
            stats.predictions as f64 / total as f64
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

// a panic while holding the lock leaves plain counters, still usable
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_creation() {
        let collector = TelemetryCollector::new();
        assert_eq!(collector.event_count(), 0);
        assert_eq!(collector.get_stats(), TelemetryStats::default());
    }

    #[test]
    fn test_record_prediction() {
        let collector = TelemetryCollector::new();
        collector.record(TelemetryEvent::PredictionMade {
            label: "Covid 19".to_string(),
            duration_us: 12,
            timestamp: Instant::now(),
        });

        let stats = collector.get_stats();
        assert_eq!(stats.predictions, 1);
        assert_eq!(collector.event_count(), 1);
    }

    #[test]
    fn test_rejections_by_reason() {
        let collector = TelemetryCollector::new();
        for err in [
            MediError::NoSymptomsSelected,
            MediError::DimensionMismatch { expected: 3, actual: 1 },
            MediError::UnknownSymptom("rash".to_string()),
        ] {
            collector.record(TelemetryEvent::QueryRejected {
                reason: RejectReason::from(&err),
                timestamp: Instant::now(),
            });
        }

        let stats = collector.get_stats();
        assert_eq!(stats.rejected_no_symptoms, 1);
        assert_eq!(stats.rejected_dimension, 1);
        assert_eq!(stats.rejected_other, 1);
        assert_eq!(stats.rejected(), 3);
    }

    #[test]
    fn test_acceptance_rate() {
        let collector = TelemetryCollector::new();
        assert_eq!(collector.acceptance_rate(), 1.0);

        collector.record(TelemetryEvent::PredictionMade {
            label: "Allergies".to_string(),
            duration_us: 5,
            timestamp: Instant::now(),
        });
        collector.record(TelemetryEvent::QueryRejected {
            reason: RejectReason::NoSymptoms,
            timestamp: Instant::now(),
        });
        assert!((collector.acceptance_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_recent_events() {
        let collector = TelemetryCollector::new();
        for i in 0..10 {
            collector.record(TelemetryEvent::DrugMiss {
                label: format!("label{}", i),
                timestamp: Instant::now(),
            });
        }

        let recent = collector.recent_events(3);
        assert_eq!(recent.len(), 3);
        assert!(matches!(&recent[2], TelemetryEvent::DrugMiss { label, .. } if label == "label9"));
    }

    #[test]
    fn test_event_history_is_bounded() {
        let collector = TelemetryCollector::new();
        for i in 0..MAX_EVENTS + 250 {
            collector.record(TelemetryEvent::DrugMiss {
                label: format!("label{}", i),
                timestamp: Instant::now(),
            });
        }

        assert_eq!(collector.event_count(), MAX_EVENTS);
        assert_eq!(collector.get_stats().drug_misses, MAX_EVENTS + 250);

        let newest = format!("label{}", MAX_EVENTS + 249);
        let recent = collector.recent_events(1);
        assert!(matches!(&recent[0], TelemetryEvent::DrugMiss { label, .. } if *label == newest));

        let oldest = collector.recent_events(MAX_EVENTS);
        assert!(matches!(&oldest[0], TelemetryEvent::DrugMiss { label, .. } if label == "label250"));
    }

    #[test]
    fn test_clones_share_state() {
        let collector = TelemetryCollector::new();
        let clone = collector.clone();
        clone.record(TelemetryEvent::PrecautionMiss {
            label: "Migraine".to_string(),
            timestamp: Instant::now(),
        });
        assert_eq!(collector.get_stats().precaution_misses, 1);
    }
}
