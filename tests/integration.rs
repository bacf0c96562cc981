use std::sync::Mutex;

use hoax_guard::{
    analyze_text, analyze_url, verify, Category, CollaboratorError, ConfidenceLevel, DomainEntry,
    DomainReputationSource, FactCheck, FactChecker, Feedback, FeedbackLedger, Rating,
    RecommendationTier, ScoringConfig, Tier, Verifier,
};

const ALARMIST: &str = "URGENTE!!! BOMBA: GLOBO ESCONDE A VERDADE! VACINA MATA E TEM CHIP! \
                        COMPARTILHE ANTES QUE APAGUEM!!!";

const OFFICIAL: &str = "Segundo o Ministério da Saúde, a campanha nacional de vacinação contra a gripe \
                        começa em 10/04/2024 em todas as unidades básicas. \
                        A Anvisa aprovou a composição da dose deste ano após análise técnica dos dados \
                        enviados pelo Instituto Butantan. \
                        De acordo com a Dra. Ana Souza, infectologista da Universidade de São Paulo, \
                        a imunização anual reduz internações entre idosos. \
                        O calendário completo está disponível no portal oficial do governo federal.";

#[test]
fn alarmist_message_is_flagged_as_fake() {
    let result = verify(Some(ALARMIST), None);
    assert!(result.is_likely_fake);
    assert!(
        result.credibility_score < 0.3,
        "alarmist text should score < 0.3, got {}",
        result.credibility_score
    );
    let issues = result.summary.issues.join("\n");
    assert!(issues.contains("Desconfiança da mídia"), "{issues}");
    assert!(issues.contains("Desinformação vacinal"), "{issues}");
    assert_eq!(result.summary.status, "❌ Possivelmente FALSA");
}

#[test]
fn official_passage_is_credible() {
    let result = verify(Some(OFFICIAL), None);
    assert!(!result.is_likely_fake);
    assert!(
        result.credibility_score > 0.6,
        "official text should score > 0.6, got {}",
        result.credibility_score
    );
    let analysis = result.text_analysis.as_ref().unwrap();
    assert!(analysis.fired(Category::Credibility));
    assert!(!analysis.fired(Category::Suspicious));
    assert!(result
        .summary
        .positives
        .iter()
        .any(|p| p.contains("Linguagem neutra")));
}

#[test]
fn dead_person_claim_forces_do_not_share() {
    let text = "Segundo especialistas da universidade, Lázaro não morreu e está vivo.";
    let result = verify(Some(text), Some("https://www.bbc.com/news"));
    let analysis = result.text_analysis.as_ref().unwrap();
    assert!(analysis.fired(Category::Factual));
    assert!(analysis.fired(Category::Credibility));
    assert_eq!(result.summary.recommendation, RecommendationTier::DoNotShare);
    assert!(result.summary.issues[0].contains("Lázaro Barbosa"));
}

#[test]
fn dead_celebrity_scores_below_neutral_variant() {
    let fake = verify(Some("Ayrton Senna está vivo e mora em uma fazenda no interior."), None);
    let neutral = verify(
        Some("Ayrton Senna foi homenageado e mora na memória dos fãs no interior."),
        None,
    );
    assert!(
        fake.credibility_score < neutral.credibility_score,
        "{} vs {}",
        fake.credibility_score,
        neutral.credibility_score
    );
    assert!(fake.summary.issues[0].contains("Pessoa morta dada como viva"));
}

#[test]
fn citing_sources_raises_the_score() {
    let plain = "A taxa de desemprego caiu no trimestre e o comércio voltou a contratar nas capitais do país.";
    let cited = format!("Segundo o IBGE, {}", plain.to_lowercase());
    let a = verify(Some(plain), None);
    let b = verify(Some(&cited), None);
    assert!(b.credibility_score > a.credibility_score);
}

#[test]
fn no_input_yields_base_score() {
    for (text, url) in [(None, None), (Some("   \n"), None), (Some(""), Some("  "))] {
        let result = verify(text, url);
        assert_eq!(result.credibility_score, 0.6);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert!(result.text_analysis.is_none());
        assert!(result.url_analysis.is_none());
    }
}

#[test]
fn blank_text_is_an_empty_report() {
    assert!(analyze_text(" \t ").is_empty());
    assert!(!analyze_text("Uma frase qualquer.").is_empty());
}

#[test]
fn domain_tiers_are_ordered() {
    let known = analyze_url("https://www.reuters.com/world").unwrap();
    let unlisted = analyze_url("https://padaria-do-bairro.com.br/promocao").unwrap();
    let suspicious = analyze_url("https://verdades.blogspot.com/2024/post").unwrap();
    assert_eq!(known.tier, Tier::HighlyCredible);
    assert_eq!(unlisted.tier, Tier::Unknown);
    assert_eq!(suspicious.tier, Tier::Suspicious);
    assert!(known.trust_boost > unlisted.trust_boost);
    assert!(unlisted.trust_boost >= suspicious.trust_boost);
}

#[test]
fn url_normalization_is_stable() {
    let a = analyze_url("https://Example.COM/path").unwrap();
    let b = analyze_url("https://www.example.com/path").unwrap();
    assert_eq!(a.domain, b.domain);
    assert_eq!(a.tier, b.tier);
    assert_eq!(a.trust_boost, b.trust_boost);
}

#[test]
fn invalid_url_does_not_abort_text_scoring() {
    let result = verify(Some(OFFICIAL), Some("not a url"));
    assert!(result.url_analysis.is_none());
    assert!(result.url_error.as_deref().unwrap().contains("not a url"));
    assert!(result.text_analysis.is_some());
    assert_eq!(result.confidence, 0.4);
    assert!(analyze_url("not a url").is_err());
}

#[test]
fn full_evidence_gives_high_confidence() {
    let result = verify(Some(OFFICIAL), Some("https://www.gov.br/saude"));
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.confidence_level, ConfidenceLevel::High);

    let unknown = verify(Some(OFFICIAL), Some("https://padaria-do-bairro.com.br"));
    assert_eq!(unknown.confidence, 0.7);
    assert_eq!(unknown.confidence_level, ConfidenceLevel::Medium);
}

#[test]
fn url_only_verification_uses_domain_signals() {
    let result = verify(None, Some("https://www.bbc.com"));
    assert_eq!(result.credibility_score, 0.88);
    assert_eq!(result.summary.recommendation, RecommendationTier::ShareFreely);
    assert!(result.summary.positives[0].contains("bbc.com"));
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

struct TimingOut;

impl FactChecker for TimingOut {
    fn check_claim(&self, _query: &str) -> Result<FactCheck, CollaboratorError> {
        Err(CollaboratorError::Timeout)
    }
}

impl DomainReputationSource for TimingOut {
    fn lookup(&self, _host: &str) -> Result<Option<DomainEntry>, CollaboratorError> {
        Err(CollaboratorError::Unavailable("offline".into()))
    }
}

#[derive(Default)]
struct RecordingChecker {
    queries: Mutex<Vec<String>>,
}

impl FactChecker for &RecordingChecker {
    fn check_claim(&self, query: &str) -> Result<FactCheck, CollaboratorError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(FactCheck {
            found: true,
            rating: Rating::False,
            confidence: 1.0,
            sources: vec!["Agência Lupa".into()],
        })
    }
}

struct LocalDirectory;

impl DomainReputationSource for LocalDirectory {
    fn lookup(&self, host: &str) -> Result<Option<DomainEntry>, CollaboratorError> {
        Ok((host == "jornal-da-cidade.com.br").then(|| {
            DomainEntry::new(host, 0.8, Tier::Credible, "news_regional", Some("BR"))
        }))
    }
}

#[test]
fn failing_collaborators_are_absorbed() {
    let url = "https://padaria-do-bairro.com.br";
    let baseline = Verifier::new().verify(Some(OFFICIAL), Some(url));
    let flaky = Verifier::new()
        .with_fact_checker(TimingOut)
        .with_domain_source(TimingOut)
        .verify(Some(OFFICIAL), Some(url));
    assert_eq!(baseline.credibility_score, flaky.credibility_score);
    assert!(flaky.fact_check.is_none());
    assert_eq!(flaky.url_analysis.unwrap().tier, Tier::Unknown);
}

#[test]
fn fact_checker_sees_truncated_query_and_lowers_score() {
    let checker = RecordingChecker::default();
    let text = "O prefeito anunciou a reforma da praça central. ".repeat(10);
    let verifier = Verifier::new().with_fact_checker(&checker);

    let checked = verifier.verify(Some(&text), None);
    let unchecked = verify(Some(&text), None);

    let queries = checker.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].chars().count(), 200);
    assert!(checked.credibility_score < unchecked.credibility_score);
    assert!(checked.summary.issues.iter().any(|i| i.contains("Agência Lupa")));
}

#[test]
fn external_domain_source_fills_table_gaps() {
    let verifier = Verifier::new().with_domain_source(LocalDirectory);
    let analysis = verifier.analyze_url("https://www.jornal-da-cidade.com.br/noticia").unwrap();
    assert_eq!(analysis.tier, Tier::Credible);
    assert_eq!(analysis.source, hoax_guard::domains::LookupSource::External);

    let listed = verifier.analyze_url("https://bbc.com").unwrap();
    assert_eq!(listed.source, hoax_guard::domains::LookupSource::Table);
}

// ---------------------------------------------------------------------------
// Configuration, feedback, output
// ---------------------------------------------------------------------------

#[test]
fn toml_overrides_reach_the_composer() {
    let config = ScoringConfig::from_toml_str("base_score = 0.5\nfake_threshold = 0.55").unwrap();
    let result = Verifier::new().with_config(config).verify(None, None);
    assert_eq!(result.credibility_score, 0.5);
    assert!(result.is_likely_fake);
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scoring.toml");
    std::fs::write(&path, "[language]\nshort_text_penalty = 0.3\n").unwrap();
    let config = ScoringConfig::from_path(&path).unwrap();
    assert_eq!(config.language.short_text_penalty, 0.3);

    let result = Verifier::new()
        .with_config(config)
        .verify(Some("Chuva forte amanhã na capital."), None);
    assert_eq!(result.credibility_score, 0.3);
}

#[test]
fn feedback_adjusts_after_verification() {
    let text = "Ayrton Senna foi homenageado e mora na memória dos fãs no interior.";
    let config = ScoringConfig::default();
    let mut ledger = FeedbackLedger::new();
    ledger.record(text, Feedback::MissedFake);

    let mut result = verify(Some(text), None);
    let before = result.credibility_score;
    assert_eq!(result.summary.status, "✅ Provavelmente VERDADEIRA");
    assert!(ledger.apply(text, &mut result, &config));
    assert!(ledger.apply(text, &mut result, &config));
    assert!(result.credibility_score < before);
    assert_eq!(result.credibility_score, 0.27);
    assert!(result.is_likely_fake);
    assert_eq!(result.summary.status, "❌ Possivelmente FALSA");
    assert_eq!(result.summary.score_percentage, "27%");
    assert_eq!(
        result.summary.recommendation,
        RecommendationTier::LikelyMisinformation
    );
    assert_eq!(
        result.summary.advice,
        RecommendationTier::LikelyMisinformation.advice()
    );
}

#[test]
fn debunking_a_myth_is_not_a_factual_impossibility() {
    for text in [
        "Cientistas confirmam mais uma vez que a Terra não é plana, segundo a universidade.",
        "A OMS alerta que a covid não é fake e que a vacinação salva vidas.",
    ] {
        let result = verify(Some(text), None);
        let analysis = result.text_analysis.as_ref().unwrap();
        assert!(!analysis.fired(Category::Factual), "{text}");
        assert_ne!(result.summary.recommendation, RecommendationTier::DoNotShare, "{text}");
        assert!(!result.is_likely_fake, "{text}: {}", result.credibility_score);
    }

    let asserted = verify(Some("A Terra é plana e a NASA mente!"), None);
    assert!(asserted.text_analysis.unwrap().fired(Category::Factual));
    assert_eq!(asserted.summary.recommendation, RecommendationTier::DoNotShare);
}

#[test]
fn output_is_valid_json() {
    let result = verify(Some(ALARMIST), Some("https://whatsapp.com"));
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["credibility_score"].is_number());
    assert_eq!(json["is_likely_fake"], true);
    assert_eq!(json["summary"]["recommendation"], "do_not_share");
    assert_eq!(json["url_analysis"]["tier"], "suspicious");
    assert_eq!(json["text_analysis"]["categories"][0]["category"], "suspicious");
}

#[test]
fn verifier_is_shareable_across_threads() {
    let verifier = Verifier::new();
    let verifier = &verifier;
    let scores: Vec<f64> = std::thread::scope(|s| {
        let handles: Vec<_> = [ALARMIST, OFFICIAL]
            .into_iter()
            .map(|t| s.spawn(move || verifier.verify(Some(t), None).credibility_score))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(scores[0], verify(Some(ALARMIST), None).credibility_score);
    assert_eq!(scores[1], verify(Some(OFFICIAL), None).credibility_score);
}
