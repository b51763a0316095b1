//! Token-overlap similarity between use cases
//!
//! Text is lowercased, split on anything that is not alphanumeric, stripped
//! of stop words and lightly stemmed. Two use cases are compared by Jaccard
//! overlap of their title tokens and of their title+description tokens; the
//! higher of the two is the similarity.

use generator::UseCaseRef;
use shared::{UseCase, UseCaseId};
use std::collections::BTreeSet;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "into", "is", "it", "its", "of", "on", "or",
    "the", "their", "this", "to", "using", "via", "with",
];

/// Porter-style plural and tense stripping, conservative on short words
fn stem(token: &str) -> String {
    if token.len() <= 3 || token.chars().all(|c| c.is_ascii_digit()) {
        return token.to_string();
    }
    if let Some(base) = token.strip_suffix("sses") {
        return format!("{base}ss");
    }
    if let Some(base) = token.strip_suffix("ies") {
        return format!("{base}y");
    }
    for suffix in ["ing", "ed"] {
        if let Some(base) = token.strip_suffix(suffix) {
            if base.len() >= 4 {
                return base.to_string();
            }
        }
    }
    if token.ends_with('s') && !token.ends_with("ss") && !token.ends_with("us") {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}

pub fn normalize_tokens(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !STOP_WORDS.contains(t))
        .map(stem)
        .collect()
}

/// |A ∩ B| / |A ∪ B|; zero when either side has no tokens
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Precomputed token sets for one use case
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fingerprint {
    title: BTreeSet<String>,
    full: BTreeSet<String>,
}

impl Fingerprint {
    pub fn new(title: &str, description: &str) -> Self {
        let title_tokens = normalize_tokens(title);
        let mut full = title_tokens.clone();
        full.extend(normalize_tokens(description));
        Self {
            title: title_tokens,
            full,
        }
    }

    pub fn similarity(&self, other: &Fingerprint) -> f64 {
        jaccard(&self.title, &other.title).max(jaccard(&self.full, &other.full))
    }
}

/// Resolve a generated reference by identifier first, then by title
pub fn find_referenced<'a>(reference: &UseCaseRef, use_cases: &'a [UseCase]) -> Option<&'a UseCase> {
    let by_id = reference
        .use_case_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<UseCaseId>().ok())
        .and_then(|id| use_cases.iter().find(|u| u.id == id));
    if by_id.is_some() {
        return by_id;
    }

    let title = reference.use_case_title.as_deref()?.trim().to_lowercase();
    use_cases.iter().find(|u| u.title.trim().to_lowercase() == title)
}
