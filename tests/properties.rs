use hoax_guard::{verify, ScoringConfig};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "URGENTE",
    "compartilhe",
    "segundo o ministério",
    "a mídia esconde",
    "vacina mata",
    "100% garantido",
    "hoje",
    "Elvis está vivo",
    "!!!",
    "pesquisa da universidade",
    "terror",
    "em 12/03/2024",
];

const URLS: &[&str] = &[
    "https://www.bbc.com/news",
    "http://exemplo.tk",
    "blogspot.com/post",
    "not a url",
    "https://fake-secret.example.org/x",
    "",
];

fn mixed_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(FRAGMENTS).prop_map(str::to_string),
            "[a-záéíóúãõç ]{0,20}",
        ],
        0..12,
    )
    .prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn score_is_bounded_for_any_input(text in any::<String>(), url in any::<String>()) {
        let result = verify(Some(&text), Some(&url));
        prop_assert!((0.0..=1.0).contains(&result.credibility_score));
        prop_assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn threshold_matches_flag(text in mixed_text(), url in prop::sample::select(URLS)) {
        let threshold = ScoringConfig::default().fake_threshold;
        let result = verify(Some(&text), Some(url));
        prop_assert_eq!(result.is_likely_fake, result.credibility_score < threshold);
    }

    #[test]
    fn verification_is_deterministic(text in mixed_text(), url in prop::sample::select(URLS)) {
        let a = serde_json::to_string(&verify(Some(&text), Some(url))).unwrap();
        let b = serde_json::to_string(&verify(Some(&text), Some(url))).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn score_has_at_most_two_decimals(text in mixed_text()) {
        let score = verify(Some(&text), None).credibility_score;
        prop_assert!((score * 100.0 - (score * 100.0).round()).abs() < 1e-9);
    }
}
