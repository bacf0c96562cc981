use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::catalog::{Catalog, Category, Direction, Rule};
use crate::config::{CategoryLimitsTable, ScoringConfig};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RuleHit {
    pub label: String,
    pub weight: f64,
    /// Non-overlapping matches found, before the per-rule cap.
    pub count: usize,
    /// Weight times the capped count.
    pub contribution: f64,
    pub matches: Vec<String>,
    /// Text surrounding the first match.
    pub context: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryHits {
    pub category: Category,
    pub direction: Direction,
    /// Aggregate clamped to the category ceiling.
    pub score: f64,
    pub rules: Vec<RuleHit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageStats {
    pub exclamation_count: usize,
    pub question_count: usize,
    /// Uppercase letters over all letters.
    pub caps_ratio: f64,
    /// Mean words per sentence.
    pub avg_sentence_length: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    pub word_count: usize,
    pub categories: Vec<CategoryHits>,
    pub language: LanguageStats,
}

impl TextAnalysis {
    pub fn hits(&self, category: Category) -> Option<&CategoryHits> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Clamped aggregate of a category, zero when nothing fired.
    pub fn score(&self, category: Category) -> f64 {
        self.hits(category).map_or(0.0, |c| c.score)
    }

    pub fn fired(&self, category: Category) -> bool {
        self.hits(category).is_some_and(|c| !c.rules.is_empty())
    }
}

/// Outcome of analyzing one text. Blank input is reported explicitly so callers
/// can tell "nothing to analyze" from "analyzed, found nothing".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "analysis", rename_all = "snake_case")]
pub enum TextReport {
    Empty,
    Analyzed(TextAnalysis),
}

impl TextReport {
    pub fn analysis(&self) -> Option<&TextAnalysis> {
        match self {
            TextReport::Empty => None,
            TextReport::Analyzed(a) => Some(a),
        }
    }

    pub fn into_analysis(self) -> Option<TextAnalysis> {
        match self {
            TextReport::Empty => None,
            TextReport::Analyzed(a) => Some(a),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TextReport::Empty)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

const CONTEXT_WINDOW_CHARS: usize = 60;

fn context_around(text: &str, start: usize, end: usize, width: usize) -> String {
    let mid = (start + end) / 2;
    let half = width / 2;
    let ctx_start = snap_to_char_boundary(text, mid.saturating_sub(half), false);
    let ctx_end = snap_to_char_boundary(text, std::cmp::min(text.len(), mid + half), true);

    let snippet = text[ctx_start..ctx_end].replace('\n', " ");
    let prefix = if ctx_start > 0 { "..." } else { "" };
    let suffix = if ctx_end < text.len() { "..." } else { "" };
    format!("{prefix}{snippet}{suffix}")
}

/// Snap a byte offset to a valid char boundary.
fn snap_to_char_boundary(text: &str, pos: usize, forward: bool) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    if forward {
        while p < text.len() && !text.is_char_boundary(p) {
            p += 1;
        }
    } else {
        while p > 0 && !text.is_char_boundary(p) {
            p -= 1;
        }
    }
    p
}

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn caps_ratio(text: &str) -> f64 {
    let (upper, letters) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(u, l), c| {
            (u + usize::from(c.is_uppercase()), l + 1)
        });
    if letters == 0 {
        0.0
    } else {
        upper as f64 / letters as f64
    }
}

fn avg_sentence_length(text: &str) -> f64 {
    let lengths: Vec<usize> = SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(word_count)
        .collect();
    if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    }
}

pub fn language_stats(text: &str) -> LanguageStats {
    LanguageStats {
        exclamation_count: text.matches('!').count(),
        question_count: text.matches('?').count(),
        caps_ratio: caps_ratio(text),
        avg_sentence_length: avg_sentence_length(text),
    }
}

// ---------------------------------------------------------------------------
// Rule evaluation
// ---------------------------------------------------------------------------

fn evaluate_rule(rule: &Rule, text: &str, per_rule_cap: usize, max_recorded: usize) -> Option<RuleHit> {
    let mut count = 0;
    let mut matches = Vec::new();
    let mut context = String::new();
    for m in rule.find_matches(text) {
        if count == 0 {
            context = context_around(text, m.start(), m.end(), CONTEXT_WINDOW_CHARS);
        }
        if matches.len() < max_recorded {
            matches.push(m.as_str().trim().to_string());
        }
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(RuleHit {
        label: rule.label.clone(),
        weight: rule.weight,
        count,
        contribution: rule.weight * count.min(per_rule_cap) as f64,
        matches,
        context,
    })
}

/// Runs every rule of `catalog` over `text` and aggregates per category.
pub fn run_catalog(
    text: &str,
    catalog: &Catalog,
    limits: &CategoryLimitsTable,
    max_recorded: usize,
) -> Vec<CategoryHits> {
    let mut out = Vec::new();
    for category in Category::ALL {
        let cat_limits = limits.get(category);
        let rules: Vec<RuleHit> = catalog
            .rules_in(category)
            .filter_map(|r| evaluate_rule(r, text, cat_limits.per_rule_cap, max_recorded))
            .collect();
        if rules.is_empty() {
            continue;
        }
        let raw: f64 = rules.iter().map(|h| h.contribution).sum();
        out.push(CategoryHits {
            category,
            direction: category.direction(),
            score: raw.min(cat_limits.ceiling),
            rules,
        });
    }
    out
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze_text_with(text: &str, catalog: &Catalog, config: &ScoringConfig) -> TextReport {
    if text.trim().is_empty() {
        return TextReport::Empty;
    }

    let categories = run_catalog(
        text,
        catalog,
        &config.categories,
        config.max_recorded_matches,
    );
    tracing::trace!(
        catalog = catalog.name(),
        categories = categories.len(),
        "text analyzed"
    );

    TextReport::Analyzed(TextAnalysis {
        word_count: word_count(text),
        categories,
        language: language_stats(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    fn analyze(text: &str) -> TextAnalysis {
        analyze_text_with(text, default_catalog(), &ScoringConfig::default())
            .into_analysis()
            .expect("non-empty text")
    }

    #[test]
    fn blank_text_is_reported_as_empty() {
        let config = ScoringConfig::default();
        assert!(analyze_text_with("", default_catalog(), &config).is_empty());
        assert!(analyze_text_with("  \n\t ", default_catalog(), &config).is_empty());
    }

    #[test]
    fn neutral_text_is_analyzed_with_no_hits() {
        let a = analyze("O parque abre às oito e fecha às seis durante a semana.");
        assert!(a.categories.is_empty());
        assert_eq!(a.word_count, 12);
    }

    #[test]
    fn repeated_phrase_is_capped_per_rule() {
        let a = analyze("compartilhe compartilhe compartilhe compartilhe compartilhe");
        let hits = a.hits(Category::Suspicious).unwrap();
        let share = hits
            .rules
            .iter()
            .find(|r| r.label == "Apelo ao compartilhamento")
            .unwrap();
        assert_eq!(share.count, 5);
        assert!((share.contribution - 0.18 * 3.0).abs() < 1e-9);
    }

    #[test]
    fn category_aggregate_is_clamped_to_ceiling() {
        let text = "segundo o estudo da universidade, conforme o pesquisador e a especialista, \
                    segundo a pesquisa do ministério em 12/03/2024, de acordo com o relatório oficial \
                    do instituto, a metodologia e a amostra do ensaio clínico randomizado";
        let a = analyze(text);
        assert_eq!(a.score(Category::Credibility), 0.5);
    }

    #[test]
    fn language_stats_follow_naive_sentence_split() {
        let stats = language_stats("Um dois três. Quatro cinco!! Seis?");
        assert_eq!(stats.exclamation_count, 2);
        assert_eq!(stats.question_count, 1);
        assert!((stats.avg_sentence_length - 2.0).abs() < 1e-9);
    }

    #[test]
    fn caps_ratio_counts_letters_only() {
        let stats = language_stats("ABC def 123 !!!");
        assert!((stats.caps_ratio - 0.5).abs() < 1e-9);
        assert_eq!(language_stats("1234 !!").caps_ratio, 0.0);
    }

    #[test]
    fn context_never_splits_multibyte_chars() {
        let text = "ação ".repeat(40) + "URGENTE" + &" informação".repeat(40);
        let a = analyze(&text);
        let hit = &a.hits(Category::Suspicious).unwrap().rules[0];
        assert!(hit.context.contains("URGENTE"));
    }
}
