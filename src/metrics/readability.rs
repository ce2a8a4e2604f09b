//! Flesch Reading Ease estimation from raw text statistics.

use crate::metrics::text::count_words;

/// Compute a Flesch-style readability score, clamped to 0..=100.
///
/// Sentences are counted as runs of terminal punctuation, defaulting to 1
/// when the text has none so the ratio stays defined. Syllables use the
/// vowel-group heuristic with a minimum of one per word. Zero-word input
/// scores 0.
pub fn readability_score(text: &str) -> u8 {
    let words = count_words(text);
    if words < 1 {
        return 0;
    }
    let sentences = count_sentence_runs(text).max(1);
    let syllables = estimate_syllables(text);

    let asl = words as f64 / sentences as f64;
    let asw = syllables as f64 / words as f64;
    let score = 206.835 - 1.015 * asl - 84.6 * asw;
    score.clamp(0.0, 100.0).round() as u8
}

fn count_sentence_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if !in_run {
                runs += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }
    runs
}

fn estimate_syllables(text: &str) -> usize {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut groups = 0;
            let mut in_group = false;
            for c in word.chars() {
                if matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y') {
                    if !in_group {
                        groups += 1;
                        in_group = true;
                    }
                } else {
                    in_group = false;
                }
            }
            groups.max(1)
        })
        .sum()
}
