//! Lexicon-based polarity scoring. Deliberately crude: two small fixed
//! word lists, not a trained model.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static POSITIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(good|great|best|love|excellent|amazing|happy|success)\b").unwrap()
});

static NEGATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(bad|worst|hate|poor|terrible|awful|sad|fail)\b").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Net polarity in [-1, 1].
    pub score: f64,
    pub label: SentimentLabel,
}

impl Sentiment {
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Neutral,
        }
    }
}

/// Score text polarity by whole-word lexicon matches.
///
/// `score = clamp((pos - neg) / 10, -1, 1)`; the label flips only past
/// the +-0.1 boundary (exclusive), so a single net match stays neutral.
pub fn analyze_sentiment(text: &str) -> Sentiment {
    if text.is_empty() {
        return Sentiment::neutral();
    }

    let pos = POSITIVE.find_iter(text).count() as f64;
    let neg = NEGATIVE.find_iter(text).count() as f64;
    let score = ((pos - neg) / 10.0).clamp(-1.0, 1.0);

    let label = if score > 0.1 {
        SentimentLabel::Positive
    } else if score < -0.1 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    Sentiment { score, label }
}
