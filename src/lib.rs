//! Heuristic credibility scoring for Portuguese-language news text and URLs.
//!
//! ```no_run
//! let result = hoax_guard::verify(
//!     Some("URGENTE!!! Compartilhe antes que apaguem!"),
//!     Some("https://exemplo.blogspot.com/post"),
//! );
//! println!("{} {}", result.credibility_score, result.summary.status);
//! ```

pub mod analyzer;
pub mod catalog;
pub mod collaborators;
pub mod composer;
pub mod config;
pub mod domains;
pub mod error;
pub mod feedback;

use once_cell::sync::Lazy;

pub use analyzer::{TextAnalysis, TextReport};
pub use catalog::{default_catalog, Catalog, Category, Direction, Rule};
pub use collaborators::{
    DomainReputationSource, FactCheck, FactChecker, NoDomainSource, NoFactChecker, Rating,
};
pub use composer::{ConfidenceLevel, RecommendationTier, Summary, VerificationResult};
pub use config::ScoringConfig;
pub use domains::{default_domains, DomainEntry, DomainTable, Tier, UrlAnalysis};
pub use error::{CollaboratorError, HoaxError, Result};
pub use feedback::{Feedback, FeedbackLedger};

use composer::Evidence;

// ---------------------------------------------------------------------------
// Verifier
// ---------------------------------------------------------------------------

/// A configured scorer. Immutable once built and safe to share across threads.
pub struct Verifier<'a> {
    config: ScoringConfig,
    catalog: &'a Catalog,
    domains: &'a DomainTable,
    fact_checker: Box<dyn FactChecker + 'a>,
    domain_source: Box<dyn DomainReputationSource + 'a>,
}

impl Default for Verifier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Verifier<'static> {
    /// Built-in catalog and domain table, no collaborators.
    pub fn new() -> Self {
        Self {
            config: ScoringConfig::default(),
            catalog: default_catalog(),
            domains: default_domains(),
            fact_checker: Box::new(NoFactChecker),
            domain_source: Box::new(NoDomainSource),
        }
    }
}

impl<'a> Verifier<'a> {
    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog(self, catalog: &'a Catalog) -> Self {
        Self { catalog, ..self }
    }

    pub fn with_domains(self, domains: &'a DomainTable) -> Self {
        Self { domains, ..self }
    }

    pub fn with_fact_checker(mut self, checker: impl FactChecker + 'a) -> Self {
        self.fact_checker = Box::new(checker);
        self
    }

    pub fn with_domain_source(mut self, source: impl DomainReputationSource + 'a) -> Self {
        self.domain_source = Box::new(source);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn analyze_text(&self, text: &str) -> TextReport {
        analyzer::analyze_text_with(text, self.catalog, &self.config)
    }

    pub fn analyze_url(&self, url: &str) -> Result<UrlAnalysis> {
        domains::analyze_url_with(url, self.domains, &self.config.domains, self.domain_source.as_ref())
    }

    fn consult_fact_checker(&self, text: &str) -> Option<FactCheck> {
        let query: String = text
            .trim()
            .chars()
            .take(self.config.fact_check_query_chars)
            .collect();
        match self.fact_checker.check_claim(&query) {
            Ok(check) => Some(check),
            Err(e) => {
                tracing::warn!(error = %e, "fact checker failed, continuing without it");
                None
            }
        }
    }

    /// Scores any combination of text and URL. Never fails: an unusable URL
    /// is reported in `url_error` and the text is still scored.
    pub fn verify(&self, text: Option<&str>, url: Option<&str>) -> VerificationResult {
        let _span = tracing::debug_span!(
            "verify",
            has_text = text.is_some(),
            has_url = url.is_some()
        )
        .entered();

        let text_analysis = text.and_then(|t| self.analyze_text(t).into_analysis());

        let (url_analysis, url_error) = match url.map(str::trim).filter(|u| !u.is_empty()) {
            None => (None, None),
            Some(u) => match self.analyze_url(u) {
                Ok(analysis) => (Some(analysis), None),
                Err(e) => {
                    tracing::debug!(error = %e, "url rejected");
                    (None, Some(e.to_string()))
                }
            },
        };

        let fact_check = match (text, &text_analysis) {
            (Some(t), Some(_)) => self.consult_fact_checker(t),
            _ => None,
        };

        composer::compose(
            Evidence {
                text: text_analysis,
                url: url_analysis,
                url_error,
                fact_check,
            },
            &self.config,
        )
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

static DEFAULT_VERIFIER: Lazy<Verifier<'static>> = Lazy::new(Verifier::new);

/// Runs the built-in catalog over `text`.
pub fn analyze_text(text: &str) -> TextReport {
    DEFAULT_VERIFIER.analyze_text(text)
}

/// Classifies the host of `url` against the built-in domain table.
pub fn analyze_url(url: &str) -> Result<UrlAnalysis> {
    DEFAULT_VERIFIER.analyze_url(url)
}

/// Scores text and/or URL with default settings.
pub fn verify(text: Option<&str>, url: Option<&str>) -> VerificationResult {
    DEFAULT_VERIFIER.verify(text, url)
}
