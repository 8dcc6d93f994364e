//! Shared types used across modules
//!
//! The persisted progress summary, its emotional-state samples, and the
//! per-interaction observation input that feeds the aggregator.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One emotional-state sample retained in a subject's recent history.
///
/// `intensity` and `distress` are carried opaquely: the sentiment analyzer
/// may supply a number, a label, or nothing, and the tracker stores whatever
/// arrived without interpreting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalStateSample {
    /// When the observation was made.
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    /// Primary emotion label from the analyzer.
    pub emotion: String,
    pub intensity: serde_json::Value,
    pub distress: serde_json::Value,
}

/// The persisted progress aggregate, one per subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Number of distinct calendar days with at least one observation.
    #[serde(rename = "sessions")]
    pub session_count: u32,
    /// Date of the most recent observation that advanced `session_count`.
    #[serde(rename = "lastSessionDate")]
    pub last_session_date: Option<NaiveDate>,
    /// Recent emotional-state window, oldest first, capped at
    /// [`crate::progress::MAX_EMOTIONAL_STATES`] entries.
    #[serde(rename = "emotionalStates")]
    pub emotional_states: Vec<EmotionalStateSample>,
    /// Cumulative topic label -> occurrence count. Labels are trimmed and
    /// case-sensitive; counts are always at least 1.
    #[serde(rename = "topics")]
    pub topic_frequency: BTreeMap<String, u32>,
}

impl ProgressSummary {
    /// Serialize to the stored wire form.
    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored wire-form payload back into a summary.
    pub fn from_stored(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Externally computed sentiment classification of a single message.
///
/// This is a foreign data contract: the analyzer produces it, the tracker
/// only consumes it. All four fields must be present; a payload missing any
/// of them fails to deserialize at the boundary instead of surprising the
/// merge logic later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    pub primary_emotion: String,
    pub intensity: serde_json::Value,
    pub distress: serde_json::Value,
    /// Comma-separated topic labels, possibly empty, possibly containing
    /// entries that are empty after trimming.
    pub detected_topics: String,
}

/// One update event handed to the aggregator. Not persisted.
#[derive(Debug, Clone)]
pub struct ObservationInput {
    /// The instant the observation was made. Injected by the caller so the
    /// core stays deterministic under test.
    pub observed_at: DateTime<Utc>,
    /// Sentiment payload, when the analyzer produced one for this message.
    pub sentiment: Option<SentimentAnalysis>,
}

impl ObservationInput {
    /// An observation with no sentiment payload (session tracking only).
    pub fn at(observed_at: DateTime<Utc>) -> Self {
        Self {
            observed_at,
            sentiment: None,
        }
    }

    /// An observation carrying a sentiment payload.
    pub fn with_sentiment(observed_at: DateTime<Utc>, sentiment: SentimentAnalysis) -> Self {
        Self {
            observed_at,
            sentiment: Some(sentiment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_default_summary_is_empty() {
        let summary = ProgressSummary::default();
        assert_eq!(summary.session_count, 0);
        assert_eq!(summary.last_session_date, None);
        assert!(summary.emotional_states.is_empty());
        assert!(summary.topic_frequency.is_empty());
    }

    #[test]
    fn test_stored_field_names() {
        let summary = ProgressSummary::default();
        let value: serde_json::Value =
            serde_json::from_str(&summary.to_stored().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "sessions": 0,
                "lastSessionDate": null,
                "emotionalStates": [],
                "topics": {},
            })
        );
    }

    #[test]
    fn test_summary_round_trip() {
        let mut summary = ProgressSummary {
            session_count: 3,
            last_session_date: NaiveDate::from_ymd_opt(2026, 8, 25),
            emotional_states: vec![EmotionalStateSample {
                timestamp: Utc.with_ymd_and_hms(2026, 8, 25, 14, 30, 0).unwrap(),
                emotion: "calma".to_string(),
                intensity: json!(0.4),
                distress: json!("low"),
            }],
            topic_frequency: BTreeMap::new(),
        };
        summary.topic_frequency.insert("trabajo".to_string(), 2);

        let restored = ProgressSummary::from_stored(&summary.to_stored().unwrap()).unwrap();
        assert_eq!(restored, summary);
    }

    #[test]
    fn test_empty_summary_round_trip() {
        let summary = ProgressSummary::default();
        let restored = ProgressSummary::from_stored(&summary.to_stored().unwrap()).unwrap();
        assert_eq!(restored, summary);
    }

    #[test]
    fn test_sentiment_analysis_camel_case_contract() {
        let raw = r#"{
            "primaryEmotion": "ansiedad",
            "intensity": 0.8,
            "distress": 0.6,
            "detectedTopics": "trabajo, familia"
        }"#;
        let sentiment: SentimentAnalysis = serde_json::from_str(raw).unwrap();
        assert_eq!(sentiment.primary_emotion, "ansiedad");
        assert_eq!(sentiment.detected_topics, "trabajo, familia");
    }

    #[test]
    fn test_sentiment_analysis_missing_field_is_an_error() {
        let raw = r#"{ "primaryEmotion": "ansiedad" }"#;
        assert!(serde_json::from_str::<SentimentAnalysis>(raw).is_err());
    }
}
