//! Rule-based compound sentiment scorer for news headlines.
//!
//! Word valences sit on a `-4.0..=4.0` scale. The summed valence is
//! normalised into `[-1.0, 1.0]` with `s / sqrt(s² + ALPHA)`.

use std::collections::HashMap;

use headlinedb_core::{ModelError, SentimentClassifier};

/// Normalisation constant; approximates the maximum expected valence sum.
const ALPHA: f64 = 15.0;

/// Added to a valence when preceded by an intensifier.
const B_INCR: f64 = 0.293;
/// Added to a valence when preceded by a dampener.
const B_DECR: f64 = -0.293;
/// Added to an ALL-CAPS lexicon word when the rest of the text is mixed case.
const C_INCR: f64 = 0.733;
/// Multiplier applied to a negated valence.
const N_SCALAR: f64 = -0.74;
/// Emphasis added per exclamation mark, up to [`MAX_EXCLAMATIONS`].
const EXCLAMATION_INCR: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

/// How many preceding tokens are inspected for negations and boosters.
const LOOKBACK: usize = 3;
/// Booster strength decays with distance from the word it modifies.
const BOOSTER_DECAY: [f64; LOOKBACK] = [1.0, 0.95, 0.9];

/// Word valences. Keys are lowercase single tokens.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("great", 3.1),
    ("good", 1.9),
    ("excellent", 2.7),
    ("best", 3.2),
    ("better", 1.9),
    ("happy", 2.7),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("beautiful", 2.9),
    ("nice", 1.8),
    ("win", 2.8),
    ("wins", 2.7),
    ("won", 2.7),
    ("winning", 2.4),
    ("victory", 2.8),
    ("success", 2.7),
    ("successful", 2.8),
    ("gain", 2.4),
    ("gains", 1.4),
    ("growth", 1.6),
    ("boost", 1.7),
    ("boosts", 1.3),
    ("surge", 1.2),
    ("surges", 1.2),
    ("record", 0.6),
    ("hope", 1.9),
    ("hopes", 1.8),
    ("optimistic", 1.3),
    ("strong", 2.3),
    ("celebrate", 2.7),
    ("celebrates", 2.7),
    ("praise", 2.6),
    ("praised", 2.2),
    ("safe", 1.9),
    ("rescue", 2.3),
    ("rescued", 1.8),
    ("support", 1.7),
    ("peace", 2.5),
    ("free", 2.3),
    ("help", 1.7),
    ("helps", 1.6),
    ("recovery", 1.4),
    ("benefit", 2.0),
    ("improve", 1.9),
    ("improves", 1.8),
    ("improved", 2.1),
    ("breakthrough", 2.2),
    ("thrive", 2.2),
    ("thriving", 2.4),
    ("welcome", 2.0),
    ("agree", 1.5),
    ("deal", 0.5),
    // Negative
    ("hate", -2.7),
    ("hated", -3.2),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("bad", -2.5),
    ("worst", -3.1),
    ("worse", -2.1),
    ("horrible", -2.5),
    ("kill", -3.7),
    ("killed", -3.5),
    ("kills", -2.5),
    ("death", -2.9),
    ("dead", -3.3),
    ("die", -2.9),
    ("dies", -2.9),
    ("war", -2.9),
    ("attack", -2.1),
    ("attacks", -1.9),
    ("crisis", -3.1),
    ("crash", -1.7),
    ("fear", -2.2),
    ("fears", -1.8),
    ("fail", -2.5),
    ("fails", -1.8),
    ("failed", -2.3),
    ("failure", -2.3),
    ("loss", -1.3),
    ("losses", -1.7),
    ("lose", -1.7),
    ("lost", -1.3),
    ("sad", -2.1),
    ("angry", -2.3),
    ("problem", -1.7),
    ("problems", -1.7),
    ("risk", -1.1),
    ("threat", -2.4),
    ("threatens", -1.6),
    ("violence", -3.1),
    ("scandal", -1.9),
    ("fraud", -2.8),
    ("lawsuit", -1.4),
    ("arrest", -1.4),
    ("arrested", -2.1),
    ("ban", -2.6),
    ("banned", -2.0),
    ("protest", -1.0),
    ("protests", -0.9),
    ("injured", -1.7),
    ("hurt", -2.4),
    ("destroy", -2.7),
    ("destroyed", -2.6),
    ("disaster", -3.1),
    ("poor", -2.1),
    ("slump", -1.5),
    ("recession", -2.0),
    ("layoffs", -1.8),
    ("cuts", -1.2),
    ("warning", -1.4),
    ("guilty", -1.8),
    ("dangerous", -2.1),
    ("toxic", -2.2),
    ("corruption", -1.9),
    ("bomb", -2.2),
    ("terror", -2.9),
    ("recall", -1.2),
    ("collapse", -2.4),
    ("plunge", -1.9),
    ("plunges", -1.9),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere", "cannot",
    "without", "isnt", "dont", "doesnt", "didnt", "wont", "cant", "aint", "wasnt", "arent",
];

const INTENSIFIERS: &[&str] = &[
    "very",
    "extremely",
    "really",
    "so",
    "incredibly",
    "absolutely",
    "highly",
    "hugely",
    "totally",
    "deeply",
    "most",
];

const DAMPENERS: &[&str] = &[
    "slightly",
    "somewhat",
    "barely",
    "hardly",
    "marginally",
    "partly",
    "kinda",
    "less",
];

/// Lexicon-driven [`SentimentClassifier`].
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    valences: HashMap<&'static str, f64>,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self {
            valences: LEXICON.iter().copied().collect(),
        }
    }
}

impl LexiconClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compound score of `text` in `[-1.0, 1.0]`. Text with no lexicon words
    /// scores `0.0`.
    #[must_use]
    pub fn score(&self, text: &str) -> f64 {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .map(|w| w.trim_matches('\''))
            .filter(|w| !w.is_empty())
            .collect();
        if tokens.is_empty() {
            return 0.0;
        }
        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let caps_differ = caps_differential(&tokens);

        let mut valences = vec![0.0_f64; tokens.len()];
        for (i, word) in lower.iter().enumerate() {
            let Some(&base) = self.valences.get(word.as_str()) else {
                continue;
            };
            let mut valence = base;

            if caps_differ && is_all_caps(tokens[i]) {
                valence += C_INCR.copysign(valence);
            }

            for (dist, decay) in (1..=LOOKBACK).zip(BOOSTER_DECAY) {
                let Some(prev) = i.checked_sub(dist).map(|j| lower[j].as_str()) else {
                    break;
                };
                if let Some(shift) = booster_shift(prev) {
                    // Boosters push away from zero, dampeners toward it.
                    let shift = if valence < 0.0 { -shift } else { shift };
                    valence += shift * decay;
                }
            }

            let negated = (1..=LOOKBACK)
                .filter_map(|dist| i.checked_sub(dist))
                .any(|j| is_negation(&lower[j]));
            if negated {
                valence *= N_SCALAR;
            }

            valences[i] = valence;
        }

        if let Some(pivot) = lower.iter().position(|w| w == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *v *= 0.5;
                } else if i > pivot {
                    *v *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();

        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        #[allow(clippy::cast_precision_loss)]
        let emphasis = exclamations as f64 * EXCLAMATION_INCR;
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        normalize(sum)
    }
}

impl SentimentClassifier for LexiconClassifier {
    async fn compound_score(&self, text: &str) -> Result<f64, ModelError> {
        Ok(self.score(text))
    }
}

fn normalize(sum: f64) -> f64 {
    if sum == 0.0 {
        return 0.0;
    }
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Signed shift contributed by an intensifier or dampener, if `word` is one.
fn booster_shift(word: &str) -> Option<f64> {
    if INTENSIFIERS.contains(&word) {
        Some(B_INCR)
    } else if DAMPENERS.contains(&word) {
        Some(B_DECR)
    } else {
        None
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// True when some but not all tokens are ALL CAPS.
fn caps_differential(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}
