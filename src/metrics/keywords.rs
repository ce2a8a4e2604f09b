//! Stopword-filtered keyword frequency analysis.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
        "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can", "this",
        "that", "these", "those", "it", "its",
    ]
    .into_iter()
    .collect()
});

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word.to_lowercase().as_str())
}

/// A keyword's share of all whitespace-split tokens, as a 2-decimal percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordDensity {
    pub keyword: String,
    pub density: f64,
}

/// Lowercase the text, strip everything outside `[a-z0-9\s]`, and split.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

/// Frequencies of qualifying tokens (length >= 2, not a stopword), in
/// first-seen order.
fn frequencies(tokens: &[String]) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokens {
        if token.chars().count() < 2 || STOPWORDS.contains(token.as_str()) {
            continue;
        }
        match index.get(token) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token.clone(), order.len());
                order.push((token.clone(), 1));
            }
        }
    }
    order
}

fn ranked(text: &str) -> (Vec<(String, usize)>, usize) {
    let tokens = tokenize(text);
    let total = tokens.len();
    let mut freq = frequencies(&tokens);
    // Stable sort keeps first-seen order among equal counts
    freq.sort_by(|a, b| b.1.cmp(&a.1));
    (freq, total)
}

/// The `limit` most frequent qualifying tokens, by descending frequency.
pub fn top_keywords(text: &str, limit: usize) -> Vec<String> {
    let (freq, _) = ranked(text);
    freq.into_iter()
        .take(limit)
        .map(|(word, _)| word)
        .collect()
}

/// Density of the `top_n` keywords.
///
/// The denominator is the raw token count before stopword/length
/// filtering; the original system measured density against all words and
/// the asymmetry is kept to preserve output numerics.
pub fn keyword_density(text: &str, top_n: usize) -> Vec<KeywordDensity> {
    let (freq, total) = ranked(text);
    if total < 1 {
        return Vec::new();
    }
    freq.into_iter()
        .take(top_n)
        .map(|(keyword, count)| KeywordDensity {
            keyword,
            density: (count as f64 / total as f64 * 10_000.0).round() / 100.0,
        })
        .collect()
}

/// Most frequent qualifying token, if any.
pub fn primary_keyword(text: &str) -> Option<String> {
    top_keywords(text, 1).into_iter().next()
}
