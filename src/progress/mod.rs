//! Progress Aggregator - longitudinal wellbeing tracking per subject
//!
//! Folds per-interaction observations into one persisted summary record:
//! calendar-day session counts, a bounded window of recent emotional states,
//! and cumulative topic frequency counts. Each call is a single
//! load-merge-store transaction against the subject's record.

use std::sync::Arc;
use tracing::debug;

use crate::error::ProgressError;
use crate::store::SummaryStore;
use crate::types::{EmotionalStateSample, ObservationInput, ProgressSummary};

/// Maximum emotional-state samples retained per subject. When a new sample
/// pushes the window past this cap, the oldest entries are evicted first.
pub const MAX_EMOTIONAL_STATES: usize = 30;

/// Aggregates observations into per-subject [`ProgressSummary`] records.
///
/// Calls for different subjects are fully independent. For a single subject
/// the tracker performs no locking: two concurrent `record_observation` calls
/// may both load the same prior state and the second write wins, silently
/// dropping the first call's effect. Callers that can race must serialize
/// their calls per subject.
pub struct ProgressTracker {
    store: Arc<dyn SummaryStore>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn SummaryStore>) -> Self {
        Self { store }
    }

    /// Apply one observation to `subject`'s summary and persist the result.
    ///
    /// Loads the stored summary (or starts from [`ProgressSummary::default`]
    /// on first contact), advances the session count when the observation's
    /// calendar date differs from the last recorded session date, merges the
    /// sentiment payload if one is present, and writes the whole summary
    /// back. On any failure nothing durable changes and the error says which
    /// stage failed.
    pub async fn record_observation(
        &self,
        subject: &str,
        observation: &ObservationInput,
    ) -> Result<ProgressSummary, ProgressError> {
        if subject.trim().is_empty() {
            return Err(ProgressError::InvalidSubject);
        }

        let mut summary = self.load_or_default(subject).await?;

        // One session per calendar day, date-only comparison. Fires
        // unconditionally on the very first observation for a subject.
        let today = observation.observed_at.date_naive();
        if summary.last_session_date != Some(today) {
            summary.session_count += 1;
            summary.last_session_date = Some(today);
            debug!(
                subject,
                sessions = summary.session_count,
                "New session day recorded"
            );
        }

        if let Some(sentiment) = &observation.sentiment {
            summary.emotional_states.push(EmotionalStateSample {
                timestamp: observation.observed_at,
                emotion: sentiment.primary_emotion.clone(),
                intensity: sentiment.intensity.clone(),
                distress: sentiment.distress.clone(),
            });
            // Strict FIFO cap: the oldest entry always drops first.
            while summary.emotional_states.len() > MAX_EMOTIONAL_STATES {
                summary.emotional_states.remove(0);
            }

            for topic in sentiment.detected_topics.split(',') {
                let topic = topic.trim();
                if topic.is_empty() {
                    continue;
                }
                *summary
                    .topic_frequency
                    .entry(topic.to_string())
                    .or_insert(0) += 1;
            }
        }

        let encoded = summary
            .to_stored()
            .map_err(|e| ProgressError::Persistence(e.into()))?;
        self.store
            .set(subject, &encoded)
            .await
            .map_err(ProgressError::Persistence)?;

        Ok(summary)
    }

    /// Read-only load of a subject's summary, `None` if nothing is stored.
    pub async fn summary(
        &self,
        subject: &str,
    ) -> Result<Option<ProgressSummary>, ProgressError> {
        if subject.trim().is_empty() {
            return Err(ProgressError::InvalidSubject);
        }
        let raw = self
            .store
            .get(subject)
            .await
            .map_err(ProgressError::Persistence)?;
        match raw {
            Some(raw) => {
                let summary = ProgressSummary::from_stored(&raw).map_err(|source| {
                    ProgressError::Deserialization {
                        subject: subject.to_string(),
                        source,
                    }
                })?;
                Ok(Some(summary))
            }
            None => Ok(None),
        }
    }

    async fn load_or_default(&self, subject: &str) -> Result<ProgressSummary, ProgressError> {
        Ok(self.summary(subject).await?.unwrap_or_default())
    }
}
