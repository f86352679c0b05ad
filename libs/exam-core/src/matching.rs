//! Answer token matching used by grading.

use crate::types::MatchingMode;

/// Whether a stored token counts as the expected answer.
///
/// `Exact` compares the raw tokens. The other modes collapse whitespace first
/// so that typed gap-fill answers are not penalised for spacing.
pub fn answers_match(given: &str, expected: &str, mode: MatchingMode, fuzzy_threshold: f64) -> bool {
    match mode {
        MatchingMode::Exact => given == expected,
        MatchingMode::CaseInsensitive => {
            normalize_whitespace(given).to_lowercase() == normalize_whitespace(expected).to_lowercase()
        }
        MatchingMode::Fuzzy => {
            let given = normalize_whitespace(given).to_lowercase();
            let expected = normalize_whitespace(expected).to_lowercase();
            normalized_similarity(&given, &expected) >= fuzzy_threshold
        }
    }
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit distance between two strings, counted in characters.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single row; `diagonal` carries the value of row[j - 1] from the previous pass.
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }

    row[b.len()]
}

/// Similarity in 0.0..=1.0 derived from the edit distance.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / longest as f64
}
