//! Hostname reputation: a static table of known outlets plus a heuristic
//! fallback for everything else.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::collaborators::DomainReputationSource;
use crate::config::DomainConfig;
use crate::error::{HoaxError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    HighlyCredible,
    Credible,
    Moderate,
    Suspicious,
    Unknown,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::HighlyCredible => "highly_credible",
            Tier::Credible => "credible",
            Tier::Moderate => "moderate",
            Tier::Suspicious => "suspicious",
            Tier::Unknown => "unknown",
        }
    }

    pub fn is_trusted(self) -> bool {
        matches!(self, Tier::HighlyCredible | Tier::Credible | Tier::Moderate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEntry {
    /// Lowercase, without a leading `www.`.
    pub hostname: String,
    /// Reputation in [0, 1].
    pub trust_score: f64,
    pub tier: Tier,
    pub category: String,
    pub country: Option<String>,
}

impl DomainEntry {
    pub fn new(hostname: &str, trust_score: f64, tier: Tier, category: &str, country: Option<&str>) -> Self {
        Self {
            hostname: normalize_host(hostname),
            trust_score,
            tier,
            category: category.to_string(),
            country: country.map(str::to_string),
        }
    }
}

/// How a domain's tier was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    Table,
    ParentDomain,
    External,
    Heuristic,
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlAnalysis {
    pub domain: String,
    pub tier: Tier,
    pub trust_boost: f64,
    pub https_enabled: bool,
    pub source: LookupSource,
    pub category: Option<String>,
    pub country: Option<String>,
    /// Heuristic adjustments applied to an unlisted domain.
    pub signals: Vec<String>,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct DomainTable {
    entries: HashMap<String, DomainEntry>,
}

impl DomainTable {
    pub fn new(entries: impl IntoIterator<Item = DomainEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.hostname.clone(), e))
                .collect(),
        }
    }

    pub fn get(&self, host: &str) -> Option<&DomainEntry> {
        self.entries.get(host)
    }

    /// Exact match first, then each parent domain down to two labels.
    pub fn resolve(&self, host: &str) -> Option<(&DomainEntry, LookupSource)> {
        if let Some(entry) = self.entries.get(host) {
            return Some((entry, LookupSource::Table));
        }
        let mut rest = host;
        while let Some((_, parent)) = rest.split_once('.') {
            if !parent.contains('.') {
                break;
            }
            if let Some(entry) = self.entries.get(parent) {
                return Some((entry, LookupSource::ParentDomain));
            }
            rest = parent;
        }
        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type Row = (&'static str, f64, Tier, &'static str, &'static str);

const KNOWN_DOMAINS: &[Row] = &[
    // International news
    ("bbc.com", 0.95, Tier::HighlyCredible, "news_premium", "UK"),
    ("bbc.co.uk", 0.95, Tier::HighlyCredible, "news_premium", "UK"),
    ("reuters.com", 0.94, Tier::HighlyCredible, "news_premium", "UK"),
    ("ap.org", 0.93, Tier::HighlyCredible, "news_premium", "US"),
    ("apnews.com", 0.93, Tier::HighlyCredible, "news_premium", "US"),
    ("nytimes.com", 0.90, Tier::HighlyCredible, "news_premium", "US"),
    ("cnn.com", 0.85, Tier::Credible, "news_major", "US"),
    // Brazilian news
    ("agenciabrasil.ebc.com.br", 0.90, Tier::HighlyCredible, "news_official", "BR"),
    ("folha.uol.com.br", 0.88, Tier::HighlyCredible, "news_major", "BR"),
    ("estadao.com.br", 0.87, Tier::HighlyCredible, "news_major", "BR"),
    ("g1.globo.com", 0.85, Tier::Credible, "news_major", "BR"),
    ("oglobo.globo.com", 0.84, Tier::Credible, "news_major", "BR"),
    ("valor.globo.com", 0.89, Tier::Credible, "news_business", "BR"),
    ("uol.com.br", 0.80, Tier::Credible, "news_portal", "BR"),
    ("band.uol.com.br", 0.80, Tier::Credible, "news_major", "BR"),
    ("cnn.com.br", 0.82, Tier::Credible, "news_major", "BR"),
    ("r7.com", 0.78, Tier::Credible, "news_portal", "BR"),
    ("veja.abril.com.br", 0.78, Tier::Credible, "news_magazine", "BR"),
    ("exame.com", 0.80, Tier::Credible, "news_business", "BR"),
    ("cartacapital.com.br", 0.76, Tier::Credible, "news_magazine", "BR"),
    ("istoedinheiro.com.br", 0.76, Tier::Credible, "news_business", "BR"),
    ("metropoles.com", 0.70, Tier::Moderate, "news_portal", "BR"),
    ("poder360.com.br", 0.72, Tier::Moderate, "news_politics", "BR"),
    ("conjur.com.br", 0.72, Tier::Moderate, "news_legal", "BR"),
    ("gazetadopovo.com.br", 0.70, Tier::Moderate, "news_major", "BR"),
    ("correiobraziliense.com.br", 0.72, Tier::Moderate, "news_major", "BR"),
    // Fact checkers
    ("lupa.uol.com.br", 0.97, Tier::HighlyCredible, "fact_check", "BR"),
    ("aosfatos.org", 0.96, Tier::HighlyCredible, "fact_check", "BR"),
    ("e-farsas.com", 0.94, Tier::HighlyCredible, "fact_check", "BR"),
    ("snopes.com", 0.95, Tier::HighlyCredible, "fact_check", "US"),
    ("factcheck.org", 0.94, Tier::HighlyCredible, "fact_check", "US"),
    // Science and health
    ("nature.com", 0.96, Tier::HighlyCredible, "scientific", "UK"),
    ("science.org", 0.95, Tier::HighlyCredible, "scientific", "US"),
    ("fiocruz.br", 0.93, Tier::HighlyCredible, "scientific", "BR"),
    ("butantan.gov.br", 0.92, Tier::HighlyCredible, "scientific", "BR"),
    ("who.int", 0.95, Tier::HighlyCredible, "health_official", "INT"),
    ("cdc.gov", 0.93, Tier::HighlyCredible, "health_official", "US"),
    ("gov.br", 0.90, Tier::HighlyCredible, "government", "BR"),
    // Academic
    ("usp.br", 0.89, Tier::Credible, "academic", "BR"),
    ("unicamp.br", 0.88, Tier::Credible, "academic", "BR"),
    ("mit.edu", 0.92, Tier::HighlyCredible, "academic", "US"),
    ("harvard.edu", 0.91, Tier::HighlyCredible, "academic", "US"),
    // Open platforms
    ("medium.com", 0.60, Tier::Moderate, "blog_platform", "US"),
    ("blogspot.com", 0.40, Tier::Suspicious, "blog_platform", "US"),
    ("wordpress.com", 0.45, Tier::Suspicious, "blog_platform", "US"),
    ("facebook.com", 0.40, Tier::Suspicious, "social_unverified", "US"),
    ("whatsapp.com", 0.30, Tier::Suspicious, "social_unverified", "US"),
    ("telegram.org", 0.25, Tier::Suspicious, "social_unverified", "RU"),
    ("telegram.me", 0.25, Tier::Suspicious, "social_unverified", "RU"),
    ("t.me", 0.25, Tier::Suspicious, "social_unverified", "RU"),
];

static BUILTIN: Lazy<DomainTable> = Lazy::new(|| {
    DomainTable::new(
        KNOWN_DOMAINS
            .iter()
            .map(|&(host, score, tier, category, country)| {
                DomainEntry::new(host, score, tier, category, Some(country))
            }),
    )
});

pub fn default_domains() -> &'static DomainTable {
    &BUILTIN
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Lowercases and strips a leading `www.` and a trailing dot.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub host: String,
    pub https: bool,
}

/// Parses `input` into a normalized host. Inputs without a scheme are
/// retried as `http://`.
pub fn parse_url(input: &str) -> Result<ParsedUrl> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HoaxError::invalid_url(input, "empty URL"));
    }
    let parsed = match Url::parse(trimmed) {
        Ok(u) => u,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{trimmed}"))
            .map_err(|e| HoaxError::invalid_url(input, e.to_string()))?,
        Err(e) => return Err(HoaxError::invalid_url(input, e.to_string())),
    };
    let https = match parsed.scheme() {
        "https" => true,
        "http" => false,
        other => {
            return Err(HoaxError::invalid_url(
                input,
                format!("unsupported scheme '{other}'"),
            ))
        }
    };
    let host = parsed
        .host_str()
        .map(normalize_host)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| HoaxError::invalid_url(input, "missing host"))?;
    Ok(ParsedUrl { host, https })
}

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

fn has_label(host: &str, label: &str) -> bool {
    host.split('.').skip(1).any(|l| l == label)
}

/// Trust adjustment for a domain missing from every table. Clamped so an
/// unlisted domain never outranks a listed moderate one nor falls below a
/// listed suspicious one.
pub fn heuristic_boost(host: &str, config: &DomainConfig) -> (f64, Vec<String>) {
    let mut boost = config.unknown_boost;
    let mut signals = Vec::new();

    if has_label(host, "gov") {
        boost += config.gov_bump;
        signals.push("Domínio governamental".to_string());
    }
    if has_label(host, "edu") {
        boost += config.edu_bump;
        signals.push("Domínio educacional".to_string());
    }
    if has_label(host, "org") {
        boost += config.org_bump;
        signals.push("Organização".to_string());
    }
    let tld = host.rsplit('.').next().unwrap_or_default();
    if config.throwaway_tlds.iter().any(|t| t == tld) {
        boost -= config.throwaway_tld_penalty;
        signals.push(format!("TLD descartável (.{tld})"));
    }
    if let Some(word) = config
        .suspicious_substrings
        .iter()
        .find(|w| host.contains(w.as_str()))
    {
        boost -= config.suspicious_substring_penalty;
        signals.push(format!("Palavra suspeita no domínio ({word})"));
    }
    if host.split('.').count() > config.max_labels {
        boost -= config.deep_subdomain_penalty;
        signals.push("Subdomínio complexo".to_string());
    }

    (
        boost.clamp(config.suspicious_boost, config.moderate_boost),
        signals,
    )
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze_url_with(
    input: &str,
    table: &DomainTable,
    config: &DomainConfig,
    external: &dyn DomainReputationSource,
) -> Result<UrlAnalysis> {
    let ParsedUrl { host, https } = parse_url(input)?;

    let resolved = match table.resolve(&host) {
        Some((entry, source)) => Some((entry.clone(), source)),
        None => match external.lookup(&host) {
            Ok(found) => found.map(|e| (e, LookupSource::External)),
            Err(e) => {
                tracing::warn!(domain = %host, error = %e, "domain reputation source failed");
                None
            }
        },
    };

    let analysis = match resolved {
        Some((entry, source)) => UrlAnalysis {
            trust_boost: config.boost_for(entry.tier),
            tier: entry.tier,
            https_enabled: https,
            source,
            category: Some(entry.category),
            country: entry.country,
            signals: Vec::new(),
            domain: host,
        },
        None => {
            let (trust_boost, signals) = heuristic_boost(&host, config);
            UrlAnalysis {
                domain: host,
                tier: Tier::Unknown,
                trust_boost,
                https_enabled: https,
                source: LookupSource::Heuristic,
                category: None,
                country: None,
                signals,
            }
        }
    };
    tracing::debug!(
        domain = %analysis.domain,
        tier = analysis.tier.as_str(),
        boost = analysis.trust_boost,
        "url analyzed"
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::NoDomainSource;

    fn analyze(url: &str) -> Result<UrlAnalysis> {
        analyze_url_with(url, default_domains(), &DomainConfig::default(), &NoDomainSource)
    }

    #[test]
    fn normalizes_case_and_www() {
        let a = parse_url("https://Example.COM/path").unwrap();
        let b = parse_url("https://www.example.com/path").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.host, "example.com");
    }

    #[test]
    fn scheme_less_input_is_accepted_without_https() {
        let parsed = parse_url("www.bbc.com/news").unwrap();
        assert_eq!(parsed.host, "bbc.com");
        assert!(!parsed.https);
    }

    #[test]
    fn malformed_urls_are_typed_errors() {
        for input in ["", "   ", "not a url", "ftp://files.example.com", "http://"] {
            let err = parse_url(input).unwrap_err();
            assert!(matches!(err, HoaxError::InvalidUrl { .. }), "{input}: {err}");
        }
    }

    #[test]
    fn exact_and_parent_lookup() {
        let bbc = analyze("https://www.bbc.com/news").unwrap();
        assert_eq!(bbc.tier, Tier::HighlyCredible);
        assert_eq!(bbc.source, LookupSource::Table);

        let blog = analyze("https://teoria.blogspot.com/post").unwrap();
        assert_eq!(blog.tier, Tier::Suspicious);
        assert_eq!(blog.source, LookupSource::ParentDomain);

        let gov = analyze("https://www.saude.gov.br/campanha").unwrap();
        assert_eq!(gov.tier, Tier::HighlyCredible);
    }

    #[test]
    fn tier_boosts_are_ordered() {
        let high = analyze("https://reuters.com").unwrap().trust_boost;
        let credible = analyze("https://g1.globo.com").unwrap().trust_boost;
        let moderate = analyze("https://metropoles.com").unwrap().trust_boost;
        let unknown = analyze("https://padaria-do-ze.com.br").unwrap().trust_boost;
        let suspicious = analyze("https://whatsapp.com").unwrap().trust_boost;
        assert!(high > credible && credible > moderate && moderate > unknown && unknown > suspicious);
    }

    #[test]
    fn heuristics_reward_gov_and_punish_throwaway() {
        let config = DomainConfig::default();
        let (gov, signals) = heuristic_boost("prefeitura.sp.gov", &config);
        assert!(gov > 0.0);
        assert_eq!(signals, vec!["Domínio governamental".to_string()]);

        let (bad, signals) = heuristic_boost("fake-news-secret.tk", &config);
        assert!(bad < 0.0);
        assert!(bad >= config.suspicious_boost);
        assert_eq!(signals.len(), 2);
    }

    #[test]
    fn heuristic_never_outranks_moderate_tier() {
        let config = DomainConfig::default();
        let (boost, _) = heuristic_boost("ministerio.gov.edu.org", &config);
        assert!(boost <= config.moderate_boost);
    }
}
