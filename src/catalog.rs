//! Weighted pattern rules, grouped by category.
//!
//! Rules store an unsigned magnitude; whether a category adds to or subtracts
//! from the credibility score is decided once, by [`Category::direction`].
//! The built-in catalog targets Portuguese-language news and is compiled once
//! per process.

use once_cell::sync::Lazy;
use regex::{Match, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{HoaxError, Result};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Manipulative or sensational language.
    Suspicious,
    /// Miracle cures, anti-vaccine claims.
    Medical,
    /// Citations, institutions, named experts.
    Credibility,
    /// Concrete time references.
    Temporal,
    /// Claims contradicting settled, verifiable facts.
    Factual,
    /// Implausible figures.
    Numeric,
    /// Emotional clusters (anger, fear, excitement, urgency, polarization).
    Sentiment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Bonus,
    Penalty,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Bonus => 1.0,
            Direction::Penalty => -1.0,
        }
    }
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Suspicious,
        Category::Medical,
        Category::Credibility,
        Category::Temporal,
        Category::Factual,
        Category::Numeric,
        Category::Sentiment,
    ];

    pub fn direction(self) -> Direction {
        match self {
            Category::Credibility | Category::Temporal => Direction::Bonus,
            Category::Suspicious
            | Category::Medical
            | Category::Factual
            | Category::Numeric
            | Category::Sentiment => Direction::Penalty,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Suspicious => "suspicious",
            Category::Medical => "medical",
            Category::Credibility => "credibility",
            Category::Temporal => "temporal",
            Category::Factual => "factual",
            Category::Numeric => "numeric",
            Category::Sentiment => "sentiment",
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Rule {
    pub category: Category,
    pub label: String,
    /// Unsigned magnitude. The sign comes from the category.
    pub weight: f64,
    matcher: Regex,
    negation_guard: bool,
}

/// A negation inside the span binding subject to claim ("a Terra não é plana").
static NEGATION_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"\b(?:não|nunca|jamais|nem)\b")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// Text right before a match that negates or debunks it ("não é", "é falso que").
static NEGATED_TAIL_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(
        r"(?:\b(?:não|nunca|jamais)(?:\s+(?:é|são|foi|era|está|estão))?|\b(?:é falso|é mentira|não é verdade|mito de|boato de|desmente|desmentem|desmentiu)(?:\s+que)?)\s*$",
    )
    .case_insensitive(true)
    .build()
    .unwrap()
});

const TAIL_CHARS: usize = 40;

fn tail_before(text: &str, end: usize) -> &str {
    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .nth(TAIL_CHARS - 1)
        .map_or(0, |(i, _)| i);
    &head[start..]
}

impl Rule {
    /// Builds a case-insensitive rule.
    pub fn new(category: Category, label: impl Into<String>, weight: f64, pattern: &str) -> Result<Self> {
        Self::build(category, label.into(), weight, pattern, true)
    }

    /// Builds a rule that matches letter case exactly (caps runs and the like).
    pub fn case_sensitive(
        category: Category,
        label: impl Into<String>,
        weight: f64,
        pattern: &str,
    ) -> Result<Self> {
        Self::build(category, label.into(), weight, pattern, false)
    }

    fn build(
        category: Category,
        label: String,
        weight: f64,
        pattern: &str,
        case_insensitive: bool,
    ) -> Result<Self> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(HoaxError::Config(format!(
                "rule '{label}' has weight {weight}; weights are unsigned magnitudes"
            )));
        }
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| HoaxError::Config(format!("rule '{label}': {e}")))?;
        Ok(Self {
            category,
            label,
            weight,
            matcher,
            negation_guard: false,
        })
    }

    /// Drops matches that are negated or debunked. A named `gap` group, when
    /// present, is the span checked for a negation; otherwise the whole match.
    pub fn with_negation_guard(mut self) -> Self {
        self.negation_guard = true;
        self
    }

    pub fn is_guarded(&self) -> bool {
        self.negation_guard
    }

    pub fn direction(&self) -> Direction {
        self.category.direction()
    }

    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Non-overlapping matches in `text`, minus negated ones for guarded rules.
    pub fn find_matches<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        if !self.negation_guard {
            return self.matcher.find_iter(text).collect();
        }
        self.matcher
            .captures_iter(text)
            .filter_map(|caps| {
                let m = caps.get(0)?;
                let span = caps.name("gap").map_or(m.as_str(), |g| g.as_str());
                let negated = NEGATION_RE.is_match(span)
                    || NEGATED_TAIL_RE.is_match(tail_before(text, m.start()));
                (!negated).then_some(m)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// An immutable, ordered set of rules.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    rules: Vec<Rule>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rules_in(&self, category: Category) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.category == category)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

static PORTUGUESE: Lazy<Catalog> = Lazy::new(build_portuguese);

/// The built-in Portuguese catalog, compiled on first use.
pub fn default_catalog() -> &'static Catalog {
    &PORTUGUESE
}

// ---------------------------------------------------------------------------
// Portuguese lexicon
// ---------------------------------------------------------------------------

struct RuleDef {
    pattern: &'static str,
    weight: f64,
    label: &'static str,
    case_sensitive: bool,
    guarded: bool,
}

const fn def(pattern: &'static str, weight: f64, label: &'static str) -> RuleDef {
    RuleDef {
        pattern,
        weight,
        label,
        case_sensitive: false,
        guarded: false,
    }
}

const fn exact(pattern: &'static str, weight: f64, label: &'static str) -> RuleDef {
    RuleDef {
        case_sensitive: true,
        ..def(pattern, weight, label)
    }
}

/// Case-insensitive, skipping negated matches.
const fn guarded(pattern: &'static str, weight: f64, label: &'static str) -> RuleDef {
    RuleDef {
        guarded: true,
        ..def(pattern, weight, label)
    }
}

const SUSPICIOUS: &[RuleDef] = &[
    def(
        r"\b(?:urgente|bomba|exclusivo)\b",
        0.15,
        "Linguagem sensacionalista",
    ),
    def(
        r"\b(?:urgente|bomba|alerta)\b.{0,20}\b(?:compartilhe|divulgue|repasse)\b",
        0.25,
        "Urgência + compartilhamento",
    ),
    def(
        r"\b(?:m[íi]dia|imprensa|globo|jornais|tv)\b.{0,30}\b(?:esconde|escondem|omite|omitem|silencia|silenciam|não mostra|não mostram)\b|\bm[íi]dia mainstream\b",
        0.20,
        "Desconfiança da mídia",
    ),
    def(
        r"\b(?:compartilhe|divulgue|espalhe|repasse)\b",
        0.18,
        "Apelo ao compartilhamento",
    ),
    def(
        r"\b(?:verdade que ninguém conta|segredo|conspiração|eles não querem que você saiba)\b",
        0.17,
        "Teoria conspiratória",
    ),
    def(
        r"\b(?:governo|sistema|elite)\b.{0,30}\b(?:esconde|mente|mentem|engana|enganam|controla|controlam)\b",
        0.18,
        "Conspiração governamental",
    ),
    def(
        r"\b(?:verdade|realidade)\b.{0,20}\b(?:oculta|escondida|proibida)\b",
        0.15,
        "Verdade oculta",
    ),
    def(
        r"\b(?:illuminati|nova ordem mundial|globalistas|reptilianos)\b",
        0.25,
        "Teoria conspiratória avançada",
    ),
    guarded(
        r"\b(?:mentira|enganação|farsa)\b|\b(?:é|são|tudo)\s+(?:fake|falso|falsa)\b",
        0.10,
        "Acusações diretas",
    ),
    def(
        r"\b(?:você não vai acreditar|médicos odeiam|dentistas odeiam)\b|\b(?:clique aqui|veja mais|saiba mais)\b.{0,20}\bpara (?:descobrir|saber)\b",
        0.20,
        "Clickbait",
    ),
    def(
        r"\b(?:recebi no (?:whatsapp|zap|grupo)|mandaram no grupo|repasse para todos|grupo da família)\b",
        0.12,
        "Corrente de mensagens",
    ),
    exact(r"[!?]{3,}", 0.05, "Pontuação excessiva"),
    exact(r"(?:\b\p{Lu}{3,}\b\W+){4,}", 0.12, "Texto em maiúsculas"),
];

const MEDICAL: &[RuleDef] = &[
    def(
        r"\b(?:cura|curar|curou|cure)\b.{0,30}\b(?:câncer|cancer|aids|hiv|diabetes|covid|autismo|alzheimer)\b",
        0.35,
        "Cura milagrosa",
    ),
    def(
        r"\bvacinas?\b.{0,30}\b(?:mata|matam|(?:causa|causam|provoca|provocam)\b.{0,20}\b(?:autismo|morte|mortes|infertilidade|câncer))\b",
        0.40,
        "Desinformação vacinal",
    ),
    def(
        r"\b(?:remédio|tratamento|receita|chá)\b.{0,20}\b(?:caseir[oa]|natural)\b.{0,30}\b(?:cura|resolve|elimina)\b",
        0.25,
        "Tratamento caseiro milagroso",
    ),
    def(
        r"\b(?:médicos|indústria farmacêutica|big pharma|farmacêuticas)\b.{0,30}\b(?:escondem|esconde|não querem)\b",
        0.30,
        "Cura escondida",
    ),
    def(
        r"\b(?:hidroxicloroquina|cloroquina|ivermectina)\b.{0,30}\b(?:cura|previne|elimina)\b",
        0.30,
        "Tratamento sem eficácia comprovada",
    ),
];

const CREDIBILITY: &[RuleDef] = &[
    def(
        r"\b(?:segundo|de acordo com|conforme|dados mostram)\b",
        0.08,
        "Citação de fontes",
    ),
    def(
        r"\b(?:pesquisas?|estudos?|relatórios?|levantamentos?)\b",
        0.06,
        "Referência a estudos",
    ),
    def(
        r"\b(?:especialistas?|professor(?:a|es|as)?|doutor(?:a|es|as)?|pesquisador(?:a|es|as)?|cientistas?)\b|\bdra?\.\s+\p{L}+",
        0.07,
        "Citação de especialistas",
    ),
    def(
        r"\b(?:\d{1,2}/\d{1,2}/\d{4}|\d{1,2} de \p{L}+ de \d{4})\b",
        0.04,
        "Data específica",
    ),
    def(
        r"\b(?:ministérios?|secretarias?|institutos?|universidades?|anvisa|fiocruz|ibge|oms|butantan|cnpq|usp|unicamp)\b",
        0.05,
        "Instituições oficiais",
    ),
    def(
        r"\b(?:metodologia|amostras?|estatisticamente significativ[oa]|peer.?review(?:ed)?|revisado por pares|meta.?análise|ensaios? clínicos?|randomizado|duplo.?cego|grupo controle)\b",
        0.08,
        "Linguagem científica",
    ),
    def(
        r"\b(?:segundo|conforme|de acordo com)\s+(?:[oa]\s+)?(?:dra?\.|professora?|pesquisadora?|especialista)\s+\p{L}+",
        0.10,
        "Fonte específica",
    ),
    def(
        r"\b(?:relatório|documento|declaração|nota)\s+(?:oficial|governamental|técnica)\b",
        0.06,
        "Documento oficial",
    ),
    def(
        r"\b(?:doi|issn|isbn):\s*\S+",
        0.06,
        "Identificador bibliográfico",
    ),
];

const TEMPORAL: &[RuleDef] = &[
    def(
        r"\b(?:hoje|atualmente|neste momento)\b",
        0.03,
        "Atualidade imediata",
    ),
    def(
        r"\b(?:ontem|anteontem|há [1-3] dias?)\b",
        0.03,
        "Referência recente",
    ),
    def(
        r"\b(?:esta semana|semana passada|este mês|mês passado|este ano|ano passado)\b",
        0.02,
        "Referência de período",
    ),
];

const NUMERIC: &[RuleDef] = &[
    def(
        r"\b(?:9[5-9]|100)\s?% d[oa]s? (?:médicos?|cientistas?|especialistas?|técnicos?|pesquisadores)\b",
        0.30,
        "Consenso impossível de profissionais",
    ),
    def(
        r"\b(?:todos os|100\s?% dos)\s+(?:médicos|cientistas)\b.{0,20}\b(?:concordam|afirmam|confirmam)\b",
        0.25,
        "Unanimidade impossível",
    ),
    def(
        r"\b(?:100\s?%|totalmente) (?:garantido|eficaz|seguro|comprovado)|\bnunca falha\b",
        0.25,
        "Eficácia impossível",
    ),
    def(
        r"\b(?:[2-9]\d{2,}|[1-9]\d{3,})\s?%.{0,20}\b(?:aumento|crescimento|eficácia|eficaz|mais eficaz|melhora)\b",
        0.25,
        "Porcentagens impossíveis",
    ),
    def(
        r"\b(?:milhões|bilhões|milhão|bilhão)\b.{0,20}\b(?:morr|mort|óbit)\p{L}*",
        0.25,
        "Números de mortes exagerados",
    ),
    def(
        r"\b(?:zero|0)\b.{0,10}\b(?:casos?|mortes?|efeitos?)\b.{0,20}\b(?:colaterais|adversos)\b",
        0.20,
        "Zero efeitos colaterais",
    ),
    def(
        r"\b(?:ganhe|ganhar|fature|faturar|lucre|lucrar)\b.{0,20}r\$\s?\d[\d.,]*.{0,30}\b(?:por dia|por semana|em \d+ dias?|sem sair de casa)\b",
        0.25,
        "Ganho financeiro impossível",
    ),
    def(
        r"\b(?:perca|perder|emagreça|emagrecer|elimine)\b.{0,10}\b\d+\s?(?:kg|quilos)\b.{0,20}\bem (?:apenas |só )?\d+ (?:dias?|horas?)\b",
        0.25,
        "Resultado em prazo impossível",
    ),
];

const SENTIMENT: &[RuleDef] = &[
    def(
        r"\b(?:ódio|raiva|revoltante|indignante|inaceitável|absurdo|vergonha|nojo)\b",
        0.08,
        "Raiva",
    ),
    def(
        r"\b(?:terror|pânico|medo|apavorante|assustador|aterrorizante|perigo mortal)\b",
        0.08,
        "Medo",
    ),
    def(
        r"\b(?:incrível|inacreditável|fantástico|milagroso|milagre|revolucionári[oa]|chocante|espetacular)\b",
        0.06,
        "Euforia",
    ),
    def(
        r"\b(?:urgente|imediatamente|agora mesmo|última chance|antes que seja tarde|antes que apaguem|não perca|só hoje|apenas hoje|por tempo limitado)\b",
        0.08,
        "Urgência",
    ),
    def(
        r"\b(?:inimigo|traidor|vendido|corrupto|bandido|fascista|nazista|comunista|esquerdista|direitista|petralhas?|coxinhas?|cidadão de bem|vagabundo|mortadela)\b",
        0.08,
        "Polarização",
    ),
];

/// Known dead people: (name alternation, "is alive" phrasing, weight, label).
/// Weight reflects how settled the death is.
const DEAD_PEOPLE: &[(&str, &str, f64, &str)] = &[
    ("ayrton senna", "vivo|não morreu|sobreviveu|está bem|foi visto", 0.45, "Ayrton Senna (morreu em 1994)"),
    ("tom jobim|antônio carlos jobim", "vivo|não morreu|novo álbum|nova música", 0.40, "Tom Jobim (morreu em 1994)"),
    ("cazuza", "vivo|não morreu|novo show|turnê", 0.40, "Cazuza (morreu em 1990)"),
    ("renato russo", "vivo|não morreu|legião urbana volta", 0.40, "Renato Russo (morreu em 1996)"),
    ("chorão|alexandre magno abrão", "vivo|não morreu", 0.35, "Chorão (morreu em 2013)"),
    ("paulo gustavo", "vivo|não morreu|se recuperou", 0.35, "Paulo Gustavo (morreu em 2021)"),
    ("marília mendonça", "viva|não morreu|novo show|acidente falso|fingiu", 0.35, "Marília Mendonça (morreu em 2021)"),
    ("gugu liberato|gugu", "vivo|não morreu|volta à tv", 0.30, "Gugu Liberato (morreu em 2019)"),
    ("lázaro barbosa|lazaro barbosa|lázaro|lazaro", "vivo|não morreu|se escondeu|continua fugindo", 0.50, "Lázaro Barbosa (morreu em 2021)"),
    ("michael jackson", "vivo|não morreu|fingiu|se escondeu", 0.40, "Michael Jackson (morreu em 2009)"),
    ("elvis presley|elvis", "vivo|não morreu|fingiu|foi visto", 0.40, "Elvis Presley (morreu em 1977)"),
    ("john lennon", "vivo|não morreu", 0.40, "John Lennon (morreu em 1980)"),
    ("freddie mercury", "vivo|não morreu|queen volta", 0.40, "Freddie Mercury (morreu em 1991)"),
    ("kurt cobain", "vivo|não morreu|nirvana volta|fingiu", 0.40, "Kurt Cobain (morreu em 1994)"),
    ("tupac|2pac", "vivo|não morreu|fingiu", 0.35, "Tupac Shakur (morreu em 1996)"),
    ("notorious big|biggie", "vivo|não morreu|fingiu", 0.35, "Notorious B.I.G. (morreu em 1997)"),
    ("paul walker", "vivo|não morreu|acidente falso", 0.30, "Paul Walker (morreu em 2013)"),
    ("robin williams", "vivo|não morreu", 0.30, "Robin Williams (morreu em 2014)"),
    ("kobe bryant", "vivo|não morreu|acidente falso", 0.35, "Kobe Bryant (morreu em 2020)"),
    ("diego maradona|maradona", "vivo|não morreu|se recuperou", 0.30, "Diego Maradona (morreu em 2020)"),
    ("adolf hitler|hitler", "vivo|não morreu|fugiu para a argentina|fugiu", 0.50, "Adolf Hitler (morreu em 1945)"),
    ("josef stalin|stalin", "vivo|não morreu", 0.45, "Josef Stalin (morreu em 1953)"),
    ("che guevara", "vivo|não morreu", 0.40, "Che Guevara (morreu em 1967)"),
    ("john kennedy|jfk", "vivo|não morreu|fingiu", 0.45, "John F. Kennedy (morreu em 1963)"),
    ("martin luther king", "vivo|não morreu|fingiu", 0.40, "Martin Luther King (morreu em 1968)"),
    ("princesa diana|lady diana", "viva|não morreu|fingiu", 0.40, "Princesa Diana (morreu em 1997)"),
    ("rainha elizabeth|elizabeth ii", "viva|não morreu|se recuperou", 0.35, "Rainha Elizabeth II (morreu em 2022)"),
    ("stephen hawking", "vivo|não morreu|se recuperou", 0.35, "Stephen Hawking (morreu em 2018)"),
    ("albert einstein|einstein", "vivo|não morreu|nova teoria", 0.45, "Albert Einstein (morreu em 1955)"),
];

/// Settled historical events: (subject alternation, denial phrasing, weight, label).
const DENIED_EVENTS: &[(&str, &str, f64, &str)] = &[
    ("getúlio vargas", "ainda presidente|não se suicidou|vivo", 0.45, "Getúlio Vargas (suicidou-se em 1954)"),
    ("tancredo neves", "assumiu a presidência|assumiu presidência|não morreu|se recuperou", 0.40, "Tancredo Neves (morreu antes da posse, 1985)"),
    ("juscelino kubitschek", "vivo|não morreu|acidente falso", 0.35, "Juscelino Kubitschek (morreu em 1976)"),
    ("segunda guerra mundial|segunda guerra|guerra mundial", "não aconteceu|não existiu|fake|mentira", 0.50, "Segunda Guerra Mundial (1939-1945)"),
    ("holocausto", "não aconteceu|não existiu|fake|mentira|exagerado|invenção", 0.50, "Holocausto (negacionismo)"),
    ("homem na lua|chegada à lua|neil armstrong", "fake|mentira|estúdio|não aconteceu|farsa", 0.40, "Chegada à Lua (1969)"),
    ("11 de setembro|torres gêmeas", "inside job|armação|governo americano|fake", 0.35, "11 de Setembro (teoria conspiratória)"),
    ("titanic", "não afundou|fake|proposital", 0.30, "Naufrágio do Titanic (1912)"),
    ("covid|covid-19|pandemia|coronavírus", "não existiu|não existe|fake|planejada|inventad[oa]", 0.35, "Pandemia de COVID-19 (negacionismo)"),
    ("evolução|darwin", "fake|mentira|não existe|teoria falsa", 0.35, "Teoria da Evolução (negacionismo científico)"),
    ("aquecimento global|mudança climática|mudanças climáticas", "fake|mentira|não existe|farsa", 0.30, "Mudanças climáticas (negacionismo)"),
    ("terra", "é plana", 0.45, "Terra plana (teoria conspiratória)"),
    ("terra plana|flat earth", "verdade|comprovado|comprovada|nasa mente", 0.45, "Terra plana (teoria conspiratória)"),
    ("diretas já", "não aconteceu|fake", 0.30, "Movimento Diretas Já (1984)"),
    ("impeachment d[eo] collor|impeachment collor", "não aconteceu|fake", 0.25, "Impeachment de Collor (1992)"),
    ("morte do senna|morte de ayrton senna", "assassinato|sabotagem|não foi acidente", 0.35, "Morte de Ayrton Senna (teoria conspiratória)"),
];

const IMPOSSIBLE_CLAIMS: &[RuleDef] = &[
    def(
        r"\b(?:cura|curou|curar|curad[oa]s?)\b.{0,40}\bem (?:apenas |só )?\d+ (?:horas?|dias?|minutos?)\b",
        0.35,
        "Cura medicamente impossível",
    ),
    def(
        r"\b(?:cura|curou|curar)\b.{0,20}\b(?:todas as doenças|qualquer doença|tudo)\b",
        0.35,
        "Cura universal",
    ),
    def(
        r"\bvacinas?\b.{0,40}\b(?:chips?|microchips?|rastreador|bill gates|5g|controle mental)\b",
        0.40,
        "Vacina com chip (teoria conspiratória)",
    ),
    def(
        r"\b5g\b.{0,30}\b(?:mata|matam|causa|espalha|transmite|provoca)\b|\b(?:covid|coronavírus)\b.{0,30}\b5g\b",
        0.40,
        "5G causa doenças (teoria conspiratória)",
    ),
];

fn rules_from(category: Category, defs: &[RuleDef]) -> impl Iterator<Item = Rule> + '_ {
    defs.iter().map(move |d| {
        let rule = if d.case_sensitive {
            Rule::case_sensitive(category, d.label, d.weight, d.pattern).unwrap()
        } else {
            Rule::new(category, d.label, d.weight, d.pattern).unwrap()
        };
        if d.guarded || category == Category::Factual {
            rule.with_negation_guard()
        } else {
            rule
        }
    })
}

/// Subject and claim joined by a short lazy `gap`, so the negation guard
/// only inspects the words between them.
fn fact_rule(prefix: &str, subject: &str, claim: &str, weight: f64, label: &str) -> Rule {
    let pattern = format!(r"\b(?:{subject})\b(?P<gap>.{{0,30}}?)\b(?:{claim})\b");
    Rule::new(Category::Factual, format!("{prefix}: {label}"), weight, &pattern)
        .unwrap()
        .with_negation_guard()
}

fn build_portuguese() -> Catalog {
    let mut rules = Vec::new();
    rules.extend(rules_from(Category::Suspicious, SUSPICIOUS));
    rules.extend(rules_from(Category::Medical, MEDICAL));
    rules.extend(rules_from(Category::Credibility, CREDIBILITY));
    rules.extend(rules_from(Category::Temporal, TEMPORAL));
    for &(subject, claim, weight, label) in DEAD_PEOPLE {
        rules.push(fact_rule("Pessoa morta dada como viva", subject, claim, weight, label));
    }
    for &(subject, claim, weight, label) in DENIED_EVENTS {
        rules.push(fact_rule("Fato histórico negado", subject, claim, weight, label));
    }
    rules.extend(rules_from(Category::Factual, IMPOSSIBLE_CLAIMS));
    rules.extend(rules_from(Category::Numeric, NUMERIC));
    rules.extend(rules_from(Category::Sentiment, SENTIMENT));
    Catalog::new("pt-BR", rules)
}
