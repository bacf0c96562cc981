//! Optional external signals.
//!
//! Nothing here performs inference or network calls. The defaults answer
//! "nothing found"; real backends implement the traits and enforce their own
//! timeouts, reporting [`CollaboratorError::Timeout`] when they give up. The
//! composer treats every error as an absent signal.

use serde::{Deserialize, Serialize};

use crate::domains::DomainEntry;
use crate::error::CollaboratorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    False,
    Misleading,
    Unverified,
    Credible,
    Verified,
}

/// Answer of an external fact-check lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheck {
    pub found: bool,
    pub rating: Rating,
    /// In [0, 1].
    pub confidence: f64,
    pub sources: Vec<String>,
}

impl FactCheck {
    pub fn not_found() -> Self {
        Self {
            found: false,
            rating: Rating::Unverified,
            confidence: 0.0,
            sources: Vec::new(),
        }
    }
}

pub trait FactChecker: Send + Sync {
    fn check_claim(&self, query: &str) -> Result<FactCheck, CollaboratorError>;
}

/// Extends the static domain table. Consulted only for hosts the table does
/// not know.
pub trait DomainReputationSource: Send + Sync {
    fn lookup(&self, host: &str) -> Result<Option<DomainEntry>, CollaboratorError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoFactChecker;

impl FactChecker for NoFactChecker {
    fn check_claim(&self, _query: &str) -> Result<FactCheck, CollaboratorError> {
        Ok(FactCheck::not_found())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDomainSource;

impl DomainReputationSource for NoDomainSource {
    fn lookup(&self, _host: &str) -> Result<Option<DomainEntry>, CollaboratorError> {
        Ok(None)
    }
}
