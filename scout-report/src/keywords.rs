//! Keyword fallback for the report's keyword table.
//!
//! When the upstream payload carries no keyword weights, a deterministic
//! frequency count over the narrative text stands in: CJK and Latin words
//! are extracted, stopwords dropped, and counts normalized to the most
//! frequent word.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::Keyword;

/// Runs of two or more CJK characters.
static CJK_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{4e00}-\x{9fa5}]{2,}").unwrap());

/// Latin words of three or more letters.
static LATIN_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Za-z]{3,}\b").unwrap());

/// Words too generic to be useful in the keyword table.
const STOP_WORDS: &[&str] = &[
    // CJK
    "公司", "我们", "以及", "一个", "可以", "通过", "进行", "对于", "其中", "这些",
    // Latin (compared lowercase)
    "the", "and", "for", "with", "that", "this", "from", "are", "was", "has", "have", "its",
];

fn is_stop_word(word: &str) -> bool {
    let lowered = word.to_lowercase();
    STOP_WORDS.iter().any(|s| *s == lowered || *s == word)
}

/// Extract up to `top_k` weighted keywords from free text.
///
/// Output is fully deterministic: ties in weight break on the word itself.
pub fn extract_keywords(text: &str, top_k: usize) -> Vec<Keyword> {
    let mut freq: HashMap<&str, usize> = HashMap::new();

    for m in CJK_WORD.find_iter(text).chain(LATIN_WORD.find_iter(text)) {
        let word = m.as_str();
        if is_stop_word(word) {
            continue;
        }
        *freq.entry(word).or_insert(0) += 1;
    }

    let Some(max_freq) = freq.values().copied().max() else {
        return Vec::new();
    };

    let mut keywords: Vec<Keyword> = freq
        .into_iter()
        .map(|(word, count)| Keyword {
            word: word.to_string(),
            weight: count as f64 / max_freq as f64,
        })
        .collect();

    keywords.sort_by(|a, b| b.weight.total_cmp(&a.weight).then(a.word.cmp(&b.word)));
    keywords.truncate(top_k);
    keywords
}
