//! General-purpose word-polarity scorer.
//!
//! The first of the two independent sentiment signals: a plain lexicon sum
//! with no social-text tuning, complementing the VADER compound score.

/// Word weights for general sentiment.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("good", 0.3),
    ("great", 0.4),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("strong", 0.3),
    ("love", 0.5),
    ("like", 0.2),
    ("best", 0.5),
    ("win", 0.4),
    ("winning", 0.4),
    ("profit", 0.4),
    ("profits", 0.4),
    ("gain", 0.3),
    ("gains", 0.3),
    ("up", 0.2),
    ("higher", 0.3),
    ("growth", 0.3),
    ("beat", 0.3),
    ("buy", 0.2),
    ("buying", 0.2),
    ("positive", 0.4),
    ("happy", 0.4),
    ("confident", 0.3),
    ("opportunity", 0.2),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("weak", -0.3),
    ("hate", -0.5),
    ("worst", -0.6),
    ("lose", -0.4),
    ("losing", -0.4),
    ("loss", -0.4),
    ("losses", -0.4),
    ("down", -0.2),
    ("lower", -0.3),
    ("drop", -0.3),
    ("crash", -0.6),
    ("miss", -0.3),
    ("sell", -0.2),
    ("selling", -0.2),
    ("negative", -0.4),
    ("scared", -0.4),
    ("worried", -0.3),
    ("fear", -0.4),
    ("overvalued", -0.4),
    ("bankrupt", -0.7),
    ("fraud", -0.6),
];

/// Score a text string using the general lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f64 {
    let mut score = 0.0_f64;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}
