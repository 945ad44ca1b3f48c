//! Hooks for watching inference decisions.
//!
//! The engine reports what it does to an [`InferenceObserver`] handed to it at
//! construction instead of writing to a process-wide logger. The default
//! [`TracingObserver`] turns events into `tracing` records; tests usually pass
//! a closure that collects events, or [`NoopObserver`].

use tracing::{debug, error, info};

use crate::error::InferenceError;
use crate::logging::truncate_field;
use crate::types::ColumnType;

/// Something the engine decided while classifying one column.
#[derive(Debug)]
pub enum InferenceEvent<'a> {
    /// A sample was drawn.
    Sampled {
        column: &'a str,
        sample_size: usize,
        non_null: usize,
        total_rows: usize,
    },
    /// A cascade rule matched; `position` is its 1-based place in the cascade.
    RuleMatched {
        column: &'a str,
        column_type: ColumnType,
        position: usize,
    },
    /// Classification aborted.
    Failed {
        column: &'a str,
        error: &'a InferenceError,
    },
}

impl InferenceEvent<'_> {
    /// Name of the column the event is about.
    pub fn column(&self) -> &str {
        match self {
            InferenceEvent::Sampled { column, .. }
            | InferenceEvent::RuleMatched { column, .. }
            | InferenceEvent::Failed { column, .. } => column,
        }
    }
}

/// Receives inference events. Must be shareable across threads.
pub trait InferenceObserver: Send + Sync {
    fn on_event(&self, event: &InferenceEvent<'_>);
}

impl<F> InferenceObserver for F
where
    F: Fn(&InferenceEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &InferenceEvent<'_>) {
        self(event)
    }
}

/// Emits every event as a structured `tracing` record.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    max_field_length: usize,
}

impl TracingObserver {
    /// Creates an observer that truncates column names past `max_field_length`.
    pub fn new(max_field_length: usize) -> Self {
        Self { max_field_length }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(256)
    }
}

impl InferenceObserver for TracingObserver {
    fn on_event(&self, event: &InferenceEvent<'_>) {
        let column = truncate_field(event.column(), self.max_field_length);
        match event {
            InferenceEvent::Sampled {
                sample_size,
                non_null,
                total_rows,
                ..
            } => debug!(
                column = %column,
                sample_size,
                non_null,
                total_rows,
                "Sampled column"
            ),
            InferenceEvent::RuleMatched {
                column_type,
                position,
                ..
            } => info!(
                column = %column,
                inferred_type = column_type.as_str(),
                position,
                "Inferred column type"
            ),
            InferenceEvent::Failed { error, .. } => error!(
                column = %column,
                error = %error,
                "Column type inference failed"
            ),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl InferenceObserver for NoopObserver {
    fn on_event(&self, _event: &InferenceEvent<'_>) {}
}
