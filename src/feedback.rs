//! User corrections applied on top of a finished verification.
//!
//! The ledger remembers, per content hash, what a reader reported about a
//! text and nudges later verdicts for the same text. It never touches the
//! catalog or the composer; callers own persistence through serde.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::composer::{refresh_verdict, round_to, Adjustment, VerificationResult};
use crate::config::ScoringConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// The text was fake but scored as credible.
    MissedFake,
    /// The text was credible but scored as fake.
    FalsePositive,
    Correct,
}

impl Feedback {
    fn factor(self, ledger: &FeedbackLedger) -> f64 {
        match self {
            Feedback::MissedFake => ledger.missed_fake_factor,
            Feedback::FalsePositive => ledger.false_positive_factor,
            Feedback::Correct => 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackLedger {
    pub missed_fake_factor: f64,
    pub false_positive_factor: f64,
    entries: HashMap<String, Feedback>,
}

impl Default for FeedbackLedger {
    fn default() -> Self {
        Self {
            missed_fake_factor: 0.7,
            false_positive_factor: 1.3,
            entries: HashMap::new(),
        }
    }
}

/// Hex blake3 digest of the trimmed text.
pub fn content_key(text: &str) -> String {
    blake3::hash(text.trim().as_bytes()).to_hex().to_string()
}

impl FeedbackLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest feedback for `text`, replacing any earlier one.
    pub fn record(&mut self, text: &str, feedback: Feedback) {
        let key = content_key(text);
        tracing::debug!(key = %key, ?feedback, "feedback recorded");
        self.entries.insert(key, feedback);
    }

    pub fn get(&self, text: &str) -> Option<Feedback> {
        self.entries.get(&content_key(text)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rescales the score of `result` when feedback exists for `text`.
    /// Returns whether anything changed.
    pub fn apply(&self, text: &str, result: &mut VerificationResult, config: &ScoringConfig) -> bool {
        let Some(feedback) = self.get(text) else {
            return false;
        };
        let factor = feedback.factor(self);
        if factor == 1.0 {
            return false;
        }

        let before = result.credibility_score;
        let after = round_to((before * factor).clamp(0.0, 1.0), config.precision);
        result.credibility_score = after;
        refresh_verdict(result, config);
        result.adjustments.push(Adjustment {
            reason: "user_feedback".to_string(),
            delta: after - before,
        });
        tracing::debug!(before, after, ?feedback, "feedback applied");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::{compose, Evidence, RecommendationTier};

    fn base_result() -> VerificationResult {
        compose(Evidence::default(), &ScoringConfig::default())
    }

    #[test]
    fn key_ignores_surrounding_whitespace() {
        assert_eq!(content_key("  notícia  "), content_key("notícia"));
        assert_ne!(content_key("notícia"), content_key("Notícia"));
    }

    #[test]
    fn missed_fake_pushes_score_down() {
        let config = ScoringConfig::default();
        let mut ledger = FeedbackLedger::new();
        ledger.record("texto", Feedback::MissedFake);

        let mut result = base_result();
        assert!(ledger.apply("texto", &mut result, &config));
        assert_eq!(result.credibility_score, 0.42);
        assert!(!result.is_likely_fake);
        assert_eq!(result.summary.score_percentage, "42%");
        assert_eq!(result.summary.recommendation, RecommendationTier::CheckOfficialSources);
        assert_eq!(result.summary.advice, RecommendationTier::CheckOfficialSources.advice());

        assert!(ledger.apply("texto", &mut result, &config));
        assert_eq!(result.credibility_score, 0.29);
        assert!(result.is_likely_fake);
    }

    #[test]
    fn false_positive_is_clamped() {
        let config = ScoringConfig::default();
        let mut ledger = FeedbackLedger::new();
        ledger.record("texto", Feedback::FalsePositive);
        let mut result = base_result();
        result.credibility_score = 0.9;
        ledger.apply("texto", &mut result, &config);
        assert_eq!(result.credibility_score, 1.0);
    }

    #[test]
    fn correct_and_unknown_texts_are_untouched() {
        let config = ScoringConfig::default();
        let mut ledger = FeedbackLedger::new();
        ledger.record("certo", Feedback::Correct);
        let mut result = base_result();
        assert!(!ledger.apply("certo", &mut result, &config));
        assert!(!ledger.apply("outro", &mut result, &config));
        assert_eq!(result.credibility_score, 0.6);
    }

    #[test]
    fn ledger_survives_json_round_trip() {
        let mut ledger = FeedbackLedger::new();
        ledger.record("texto", Feedback::MissedFake);
        let json = serde_json::to_string(&ledger).unwrap();
        let back: FeedbackLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("texto"), Some(Feedback::MissedFake));
        assert_eq!(back.len(), 1);
    }
}
