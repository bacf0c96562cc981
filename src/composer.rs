//! Turns text and URL evidence into one bounded credibility score, a
//! confidence value and a ranked, human-readable summary.
//!
//! Composition never fails: missing or broken evidence contributes nothing.

use serde::Serialize;

use crate::analyzer::{CategoryHits, TextAnalysis};
use crate::catalog::Category;
use crate::collaborators::{FactCheck, Rating};
use crate::config::{band_penalty, ScoringConfig, Severity};
use crate::domains::{Tier, UrlAnalysis};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    ShareFreely,
    ShareWithCare,
    VerifyFirst,
    CheckOfficialSources,
    LikelyMisinformation,
    DoNotShare,
}

impl RecommendationTier {
    pub fn advice(self) -> &'static str {
        match self {
            RecommendationTier::ShareFreely => {
                "✅ Esta notícia apresenta alta credibilidade. Ainda assim, é sempre bom verificar outras fontes."
            }
            RecommendationTier::ShareWithCare => {
                "✅ Notícia com boa credibilidade. Recomenda-se uma verificação adicional em fontes conhecidas."
            }
            RecommendationTier::VerifyFirst => {
                "⚠️ Credibilidade moderada. Verifique esta informação em múltiplas fontes antes de compartilhar."
            }
            RecommendationTier::CheckOfficialSources => {
                "⚠️ Baixa credibilidade detectada. Verifique cuidadosamente em fontes oficiais e confiáveis."
            }
            RecommendationTier::LikelyMisinformation => {
                "🚨 ATENÇÃO: Esta notícia apresenta várias características de desinformação. Não compartilhe sem verificação rigorosa."
            }
            RecommendationTier::DoNotShare => {
                "🚨 ALERTA: Alta probabilidade de notícia falsa. NÃO compartilhe."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// One signed contribution to the final score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub reason: String,
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub status: String,
    pub score_percentage: String,
    /// Most severe first.
    pub issues: Vec<String>,
    pub positives: Vec<String>,
    pub recommendation: RecommendationTier,
    pub advice: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub credibility_score: f64,
    pub is_likely_fake: bool,
    pub confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub text_analysis: Option<TextAnalysis>,
    pub url_analysis: Option<UrlAnalysis>,
    pub url_error: Option<String>,
    pub fact_check: Option<FactCheck>,
    pub adjustments: Vec<Adjustment>,
    pub summary: Summary,
}

/// Everything the composer may draw on. Any field can be absent.
#[derive(Debug, Clone, Default)]
pub struct Evidence {
    pub text: Option<TextAnalysis>,
    pub url: Option<UrlAnalysis>,
    pub url_error: Option<String>,
    pub fact_check: Option<FactCheck>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

struct Ledger {
    base: f64,
    adjustments: Vec<Adjustment>,
}

impl Ledger {
    fn new(base: f64) -> Self {
        Self {
            base,
            adjustments: Vec::new(),
        }
    }

    fn add(&mut self, reason: impl Into<String>, delta: f64) {
        if delta != 0.0 {
            self.adjustments.push(Adjustment {
                reason: reason.into(),
                delta,
            });
        }
    }

    fn total(&self) -> f64 {
        self.base + self.adjustments.iter().map(|a| a.delta).sum::<f64>()
    }
}

fn exceeds_severity(hits: f64, ceiling: f64, severity: Severity) -> bool {
    hits > severity.threshold_fraction * ceiling
}

fn exclamation_density(text: &TextAnalysis) -> f64 {
    text.language.exclamation_count as f64 * 100.0 / text.word_count.max(1) as f64
}

fn in_prose_band(avg: f64, config: &ScoringConfig) -> bool {
    avg > config.language.prose_sentence_min && avg < config.language.prose_sentence_max
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

const PENALTY_ORDER: [Category; 5] = [
    Category::Suspicious,
    Category::Medical,
    Category::Factual,
    Category::Numeric,
    Category::Sentiment,
];

const BONUS_ORDER: [Category; 2] = [Category::Credibility, Category::Temporal];

fn score_text(ledger: &mut Ledger, text: &TextAnalysis, config: &ScoringConfig) {
    for category in PENALTY_ORDER.into_iter().chain(BONUS_ORDER) {
        let score = text.score(category);
        ledger.add(category.as_str(), category.direction().sign() * score);
    }

    let factual_ceiling = config.categories.factual.ceiling;
    if exceeds_severity(text.score(Category::Factual), factual_ceiling, config.factual_severity) {
        ledger.add("factual_severity", -config.factual_severity.extra_penalty);
    }
    let numeric_ceiling = config.categories.numeric.ceiling;
    if exceeds_severity(text.score(Category::Numeric), numeric_ceiling, config.numeric_severity) {
        ledger.add("numeric_severity", -config.numeric_severity.extra_penalty);
    }

    let lang = &config.language;
    if let Some(band) = band_penalty(&lang.exclamation_bands, exclamation_density(text)) {
        ledger.add("exclamation_density", -band.penalty);
    }
    if let Some(band) = band_penalty(&lang.caps_bands, text.language.caps_ratio) {
        ledger.add("caps_ratio", -band.penalty);
    }

    let avg = text.language.avg_sentence_length;
    if avg > 0.0 {
        if avg < lang.short_sentence_below {
            ledger.add("short_sentences", -lang.short_sentence_penalty);
        } else if in_prose_band(avg, config) {
            ledger.add("prose_sentences", lang.prose_sentence_bonus);
        }
    }

    let wc = text.word_count;
    if wc < lang.short_text_below {
        ledger.add("short_text", -lang.short_text_penalty);
    } else if wc > lang.substantial_min && wc < lang.substantial_max {
        ledger.add("substantial_text", lang.substantial_bonus);
    }
}

fn score_url(ledger: &mut Ledger, url: &UrlAnalysis, config: &ScoringConfig) {
    ledger.add(format!("domain_{}", url.tier.as_str()), url.trust_boost);
    if url.https_enabled {
        ledger.add("https", config.domains.https_bonus);
    }
}

fn score_fact_check(ledger: &mut Ledger, check: &FactCheck, config: &ScoringConfig) {
    if !check.found {
        return;
    }
    let confidence = check.confidence.clamp(0.0, 1.0);
    let delta = match check.rating {
        Rating::False => -config.fact_check.false_penalty * confidence,
        Rating::Misleading => -config.fact_check.false_penalty * confidence / 2.0,
        Rating::Unverified => 0.0,
        Rating::Credible => config.fact_check.verified_bonus * confidence / 2.0,
        Rating::Verified => config.fact_check.verified_bonus * confidence,
    };
    ledger.add("fact_check", delta);
}

fn confidence_of(evidence: &Evidence, config: &ScoringConfig) -> f64 {
    let c = &config.confidence;
    let mut total = 0.0;
    if evidence.text.is_some() {
        total += c.text_weight;
    }
    if let Some(url) = &evidence.url {
        total += c.url_weight;
        if url.tier != Tier::Unknown {
            total += c.tier_weight;
        }
    }
    round_to(f64::clamp(total, 0.0, 1.0), config.precision)
}

fn confidence_level(confidence: f64, config: &ScoringConfig) -> ConfidenceLevel {
    if confidence >= config.confidence.high_min {
        ConfidenceLevel::High
    } else if confidence >= config.confidence.medium_min {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

pub fn recommendation_for(score: f64, factual_fired: bool, config: &ScoringConfig) -> RecommendationTier {
    if factual_fired {
        return RecommendationTier::DoNotShare;
    }
    let r = &config.recommendation;
    if score >= r.share_freely_min {
        RecommendationTier::ShareFreely
    } else if score >= r.share_with_care_min {
        RecommendationTier::ShareWithCare
    } else if score >= r.verify_first_min {
        RecommendationTier::VerifyFirst
    } else if score >= r.check_sources_min {
        RecommendationTier::CheckOfficialSources
    } else if score >= r.likely_misinformation_min {
        RecommendationTier::LikelyMisinformation
    } else {
        RecommendationTier::DoNotShare
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Issue groups, most severe first.
const ISSUE_ORDER: [(Category, &str); 5] = [
    (Category::Factual, "🚫 FATO IMPOSSÍVEL"),
    (Category::Medical, "⚕️ DESINFORMAÇÃO MÉDICA"),
    (Category::Numeric, "📊 NÚMEROS SUSPEITOS"),
    (Category::Sentiment, "😠 LINGUAGEM EMOCIONAL"),
    (Category::Suspicious, "🎭 MANIPULAÇÃO"),
];

const POSITIVE_ORDER: [(Category, &str); 2] = [
    (Category::Credibility, "🎓 CREDIBILIDADE"),
    (Category::Temporal, "📅 TEMPORAL"),
];

/// Rule hits of a category, strongest contribution first. Ties keep catalog order.
fn ranked(hits: &CategoryHits) -> Vec<String> {
    let mut rules: Vec<_> = hits.rules.iter().collect();
    rules.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    rules
        .into_iter()
        .map(|r| format!("{} ({}x)", r.label, r.count))
        .collect()
}

fn category_lines(text: &TextAnalysis, order: &[(Category, &str)], out: &mut Vec<String>) {
    for &(category, tag) in order {
        if let Some(hits) = text.hits(category) {
            out.extend(ranked(hits).into_iter().map(|line| format!("{tag}: {line}")));
        }
    }
}

fn language_issues(text: &TextAnalysis, config: &ScoringConfig, issues: &mut Vec<String>) {
    let lang = &config.language;
    if band_penalty(&lang.exclamation_bands, exclamation_density(text)).is_some() {
        issues.push("⚠️ Uso excessivo de pontuação (!)".to_string());
    }
    let caps = text.language.caps_ratio;
    match lang.caps_bands.iter().position(|b| caps > b.above) {
        Some(0) => issues.push("⚠️ Texto com muitas letras maiúsculas".to_string()),
        Some(_) => issues.push("⚠️ Uso moderado de maiúsculas".to_string()),
        None => {}
    }
    let avg = text.language.avg_sentence_length;
    if avg > 0.0 && avg < lang.short_sentence_below {
        issues.push("⚠️ Frases muito curtas e fragmentadas".to_string());
    }
    if text.word_count < lang.short_text_below {
        issues.push("⚠️ Texto muito curto (possível clickbait)".to_string());
    }
}

fn tier_text(tier: Tier) -> &'static str {
    match tier {
        Tier::HighlyCredible => "altamente confiável",
        Tier::Credible => "confiável",
        Tier::Moderate => "moderadamente confiável",
        Tier::Suspicious => "suspeita",
        Tier::Unknown => "desconhecida",
    }
}

fn build_summary(
    evidence: &Evidence,
    score: f64,
    is_likely_fake: bool,
    config: &ScoringConfig,
) -> Summary {
    let mut issues = Vec::new();
    let mut positives = Vec::new();

    if let Some(text) = &evidence.text {
        category_lines(text, &ISSUE_ORDER, &mut issues);
    }
    if let Some(check) = evidence.fact_check.as_ref().filter(|c| c.found) {
        if matches!(check.rating, Rating::False | Rating::Misleading) {
            issues.push(format!(
                "🔎 VERIFICAÇÃO EXTERNA: conteúdo classificado como {} por {}",
                if check.rating == Rating::False { "falso" } else { "enganoso" },
                check.sources.join(", ")
            ));
        }
    }
    if let Some(url) = &evidence.url {
        if url.tier == Tier::Suspicious {
            issues.push(format!("⚠️ Fonte {}: {}", tier_text(url.tier), url.domain));
        } else if url.trust_boost < 0.0 {
            issues.push(format!(
                "⚠️ Domínio com sinais suspeitos: {} ({})",
                url.domain,
                url.signals.join(", ")
            ));
        }
    }
    if let Some(err) = &evidence.url_error {
        issues.push(format!("⚠️ URL não pôde ser analisada: {err}"));
    }
    if let Some(text) = &evidence.text {
        language_issues(text, config, &mut issues);
    }

    if let Some(url) = &evidence.url {
        if url.tier.is_trusted() {
            positives.push(format!("✅ Fonte {}: {}", tier_text(url.tier), url.domain));
        } else if url.trust_boost > 0.0 {
            positives.push(format!(
                "✅ Domínio com sinais positivos: {} ({})",
                url.domain,
                url.signals.join(", ")
            ));
        }
        if url.https_enabled {
            positives.push("✅ Site com conexão segura (HTTPS)".to_string());
        }
    }
    if let Some(text) = &evidence.text {
        category_lines(text, &POSITIVE_ORDER, &mut positives);
    }
    if let Some(check) = evidence.fact_check.as_ref().filter(|c| c.found) {
        if matches!(check.rating, Rating::Verified | Rating::Credible) {
            positives.push(format!(
                "🔎 VERIFICAÇÃO EXTERNA: conteúdo confirmado por {}",
                check.sources.join(", ")
            ));
        }
    }
    if let Some(text) = &evidence.text {
        let tone_clean = PENALTY_ORDER.iter().all(|&c| !text.fired(c));
        if tone_clean {
            positives.push("✅ Linguagem neutra e objetiva".to_string());
        }
        if in_prose_band(text.language.avg_sentence_length, config) {
            positives.push("✅ Estrutura textual adequada".to_string());
        }
        if text.word_count > config.language.substantial_min
            && text.word_count < config.language.substantial_max
        {
            positives.push("✅ Texto com conteúdo substancial".to_string());
        }
    }

    let factual_fired = evidence
        .text
        .as_ref()
        .is_some_and(|t| t.fired(Category::Factual));
    let has_evidence = evidence.text.is_some() || evidence.url.is_some();

    let mut summary = Summary {
        status: String::new(),
        score_percentage: String::new(),
        issues,
        positives,
        recommendation: RecommendationTier::DoNotShare,
        advice: String::new(),
    };
    set_verdict(&mut summary, score, is_likely_fake, has_evidence, factual_fired, config);
    summary
}

/// Fills the score-dependent parts of a summary.
fn set_verdict(
    summary: &mut Summary,
    score: f64,
    is_likely_fake: bool,
    has_evidence: bool,
    factual_fired: bool,
    config: &ScoringConfig,
) {
    let status = if !has_evidence {
        "ℹ️ Nenhum conteúdo analisável"
    } else if is_likely_fake {
        "❌ Possivelmente FALSA"
    } else {
        "✅ Provavelmente VERDADEIRA"
    };
    let recommendation = recommendation_for(score, factual_fired, config);

    summary.status = status.to_string();
    summary.score_percentage = format!("{}%", (score * 100.0).round() as i64);
    summary.recommendation = recommendation;
    summary.advice = recommendation.advice().to_string();
}

/// Re-derives the fake flag and verdict after `credibility_score` was changed
/// outside the composer. Issues and positives are left as they are.
pub fn refresh_verdict(result: &mut VerificationResult, config: &ScoringConfig) {
    result.is_likely_fake = result.credibility_score < config.fake_threshold;
    let has_evidence = result.text_analysis.is_some() || result.url_analysis.is_some();
    let factual_fired = result
        .text_analysis
        .as_ref()
        .is_some_and(|t| t.fired(Category::Factual));
    set_verdict(
        &mut result.summary,
        result.credibility_score,
        result.is_likely_fake,
        has_evidence,
        factual_fired,
        config,
    );
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn compose(evidence: Evidence, config: &ScoringConfig) -> VerificationResult {
    let mut ledger = Ledger::new(config.base_score);
    if let Some(text) = &evidence.text {
        score_text(&mut ledger, text, config);
    }
    if let Some(url) = &evidence.url {
        score_url(&mut ledger, url, config);
    }
    if let Some(check) = &evidence.fact_check {
        score_fact_check(&mut ledger, check, config);
    }

    let raw = ledger.total();
    let score = round_to(raw.clamp(0.0, 1.0), config.precision);
    let is_likely_fake = score < config.fake_threshold;
    let confidence = confidence_of(&evidence, config);
    let summary = build_summary(&evidence, score, is_likely_fake, config);

    tracing::debug!(
        raw,
        score,
        confidence,
        adjustments = ledger.adjustments.len(),
        "score composed"
    );

    VerificationResult {
        credibility_score: score,
        is_likely_fake,
        confidence,
        confidence_level: confidence_level(confidence, config),
        text_analysis: evidence.text,
        url_analysis: evidence.url,
        url_error: evidence.url_error,
        fact_check: evidence.fact_check,
        adjustments: ledger.adjustments,
        summary,
    }
}
