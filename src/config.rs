use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::domains::Tier;
use crate::error::{HoaxError, Result};

// ---------------------------------------------------------------------------
// Category limits
// ---------------------------------------------------------------------------

/// Bounds applied to one pattern category by the text analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryLimits {
    /// Upper bound of the category aggregate.
    pub ceiling: f64,
    /// Matches of a single rule counted at most this many times.
    pub per_rule_cap: usize,
}

impl CategoryLimits {
    pub const fn new(ceiling: f64, per_rule_cap: usize) -> Self {
        Self {
            ceiling,
            per_rule_cap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryLimitsTable {
    pub suspicious: CategoryLimits,
    pub medical: CategoryLimits,
    pub credibility: CategoryLimits,
    pub temporal: CategoryLimits,
    pub factual: CategoryLimits,
    pub numeric: CategoryLimits,
    pub sentiment: CategoryLimits,
}

impl Default for CategoryLimitsTable {
    fn default() -> Self {
        Self {
            suspicious: CategoryLimits::new(1.0, 3),
            medical: CategoryLimits::new(1.0, 3),
            credibility: CategoryLimits::new(0.5, 2),
            temporal: CategoryLimits::new(0.1, 2),
            factual: CategoryLimits::new(1.0, 3),
            numeric: CategoryLimits::new(0.6, 2),
            sentiment: CategoryLimits::new(0.8, 3),
        }
    }
}

impl CategoryLimitsTable {
    pub fn get(&self, category: Category) -> CategoryLimits {
        match category {
            Category::Suspicious => self.suspicious,
            Category::Medical => self.medical,
            Category::Credibility => self.credibility,
            Category::Temporal => self.temporal,
            Category::Factual => self.factual,
            Category::Numeric => self.numeric,
            Category::Sentiment => self.sentiment,
        }
    }
}

// ---------------------------------------------------------------------------
// Domain trust
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    pub highly_credible_boost: f64,
    pub credible_boost: f64,
    pub moderate_boost: f64,
    pub unknown_boost: f64,
    pub suspicious_boost: f64,
    pub https_bonus: f64,
    pub gov_bump: f64,
    pub edu_bump: f64,
    pub org_bump: f64,
    pub throwaway_tld_penalty: f64,
    pub suspicious_substring_penalty: f64,
    pub deep_subdomain_penalty: f64,
    /// Hosts with more labels than this are considered deep.
    pub max_labels: usize,
    pub throwaway_tlds: Vec<String>,
    pub suspicious_substrings: Vec<String>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            highly_credible_boost: 0.25,
            credible_boost: 0.15,
            moderate_boost: 0.08,
            unknown_boost: 0.0,
            suspicious_boost: -0.15,
            https_bonus: 0.03,
            gov_bump: 0.06,
            edu_bump: 0.05,
            org_bump: 0.02,
            throwaway_tld_penalty: 0.08,
            suspicious_substring_penalty: 0.10,
            deep_subdomain_penalty: 0.03,
            max_labels: 3,
            throwaway_tlds: ["tk", "ml", "ga", "cf", "gq"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            suspicious_substrings: ["fake", "secret", "conspiracy", "verdade-oculta"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DomainConfig {
    pub fn boost_for(&self, tier: Tier) -> f64 {
        match tier {
            Tier::HighlyCredible => self.highly_credible_boost,
            Tier::Credible => self.credible_boost,
            Tier::Moderate => self.moderate_boost,
            Tier::Unknown => self.unknown_boost,
            Tier::Suspicious => self.suspicious_boost,
        }
    }
}

// ---------------------------------------------------------------------------
// Language statistics
// ---------------------------------------------------------------------------

/// A graduated penalty: the first band whose threshold is exceeded applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub above: f64,
    pub penalty: f64,
}

impl Band {
    pub const fn new(above: f64, penalty: f64) -> Self {
        Self { above, penalty }
    }
}

/// Returns the penalty of the first band exceeded by `value`.
/// Bands must be ordered from the highest threshold down.
pub fn band_penalty(bands: &[Band], value: f64) -> Option<Band> {
    bands.iter().copied().find(|b| value > b.above)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Exclamation marks per 100 words.
    pub exclamation_bands: Vec<Band>,
    /// Uppercase letters over all letters.
    pub caps_bands: Vec<Band>,
    pub short_sentence_below: f64,
    pub short_sentence_penalty: f64,
    pub prose_sentence_min: f64,
    pub prose_sentence_max: f64,
    pub prose_sentence_bonus: f64,
    pub short_text_below: usize,
    pub short_text_penalty: f64,
    pub substantial_min: usize,
    pub substantial_max: usize,
    pub substantial_bonus: f64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            exclamation_bands: vec![Band::new(5.0, 0.15), Band::new(2.0, 0.08)],
            caps_bands: vec![
                Band::new(0.40, 0.20),
                Band::new(0.25, 0.12),
                Band::new(0.15, 0.06),
            ],
            short_sentence_below: 5.0,
            short_sentence_penalty: 0.08,
            prose_sentence_min: 8.0,
            prose_sentence_max: 25.0,
            prose_sentence_bonus: 0.05,
            short_text_below: 20,
            short_text_penalty: 0.10,
            substantial_min: 50,
            substantial_max: 500,
            substantial_bonus: 0.05,
        }
    }
}

// ---------------------------------------------------------------------------
// Confidence, severity, recommendation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub text_weight: f64,
    pub url_weight: f64,
    pub tier_weight: f64,
    pub high_min: f64,
    pub medium_min: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            text_weight: 0.4,
            url_weight: 0.3,
            tier_weight: 0.3,
            high_min: 0.8,
            medium_min: 0.5,
        }
    }
}

/// Extra penalty once a category crosses a fraction of its own ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Severity {
    pub threshold_fraction: f64,
    pub extra_penalty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub share_freely_min: f64,
    pub share_with_care_min: f64,
    pub verify_first_min: f64,
    pub check_sources_min: f64,
    pub likely_misinformation_min: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            share_freely_min: 0.85,
            share_with_care_min: 0.70,
            verify_first_min: 0.55,
            check_sources_min: 0.35,
            likely_misinformation_min: 0.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactCheckConfig {
    pub false_penalty: f64,
    pub verified_bonus: f64,
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            false_penalty: 0.3,
            verified_bonus: 0.1,
        }
    }
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// Every tunable constant of the scorer.
///
/// All sections are `#[serde(default)]`, so a TOML file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_score: f64,
    pub fake_threshold: f64,
    /// Decimal digits kept in the final score.
    pub precision: u32,
    pub categories: CategoryLimitsTable,
    pub factual_severity: Severity,
    pub numeric_severity: Severity,
    pub domains: DomainConfig,
    pub language: LanguageConfig,
    pub confidence: ConfidenceConfig,
    pub recommendation: RecommendationConfig,
    pub fact_check: FactCheckConfig,
    /// Prefix of the text sent to an external fact checker, in characters.
    pub fact_check_query_chars: usize,
    /// Matched spans kept per rule hit.
    pub max_recorded_matches: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 0.6,
            fake_threshold: 0.4,
            precision: 2,
            categories: CategoryLimitsTable::default(),
            factual_severity: Severity {
                threshold_fraction: 0.3,
                extra_penalty: 0.2,
            },
            numeric_severity: Severity {
                threshold_fraction: 0.3,
                extra_penalty: 0.1,
            },
            domains: DomainConfig::default(),
            language: LanguageConfig::default(),
            confidence: ConfidenceConfig::default(),
            recommendation: RecommendationConfig::default(),
            fact_check: FactCheckConfig::default(),
            fact_check_query_chars: 200,
            max_recorded_matches: 5,
        }
    }
}

impl ScoringConfig {
    /// Parses `s` as an overlay on the defaults. Tables merge key by key, so
    /// `[categories.sentiment]` with only `ceiling` keeps the default cap.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let overlay: toml::Table = toml::from_str(s)?;
        let mut merged = toml::Value::try_from(ScoringConfig::default())
            .map_err(|e| HoaxError::Config(e.to_string()))?;
        merge_toml(&mut merged, toml::Value::Table(overlay));
        let config: ScoringConfig = merged.try_into()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Rejects configurations that would break the ordering guarantees the
    /// composer relies on.
    pub fn validate(&self) -> Result<()> {
        let d = &self.domains;
        let ordered = d.highly_credible_boost > d.credible_boost
            && d.credible_boost > d.moderate_boost
            && d.moderate_boost > d.unknown_boost
            && d.unknown_boost > d.suspicious_boost;
        if !ordered {
            return Err(HoaxError::Config(
                "domain tier boosts must satisfy highly_credible > credible > moderate > unknown > suspicious"
                    .into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.base_score) {
            return Err(HoaxError::Config(format!(
                "base_score {} outside [0, 1]",
                self.base_score
            )));
        }
        if !(0.0..=1.0).contains(&self.fake_threshold) {
            return Err(HoaxError::Config(format!(
                "fake_threshold {} outside [0, 1]",
                self.fake_threshold
            )));
        }
        for category in Category::ALL {
            let limits = self.categories.get(category);
            if limits.ceiling < 0.0 || limits.per_rule_cap == 0 {
                return Err(HoaxError::Config(format!(
                    "invalid limits for category {}",
                    category.as_str()
                )));
            }
        }
        let r = &self.recommendation;
        let descending = r.share_freely_min >= r.share_with_care_min
            && r.share_with_care_min >= r.verify_first_min
            && r.verify_first_min >= r.check_sources_min
            && r.check_sources_min >= r.likely_misinformation_min;
        if !descending {
            return Err(HoaxError::Config(
                "recommendation thresholds must be descending".into(),
            ));
        }
        Ok(())
    }
}

fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_toml(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
