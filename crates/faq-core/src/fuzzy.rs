use std::collections::BTreeSet;

/// Lowercases, turns every non-alphanumeric character into a space, collapses
/// runs of whitespace and trims.
///
/// Queries and stored questions must both pass through this before scoring.
pub fn normalize(s: &str) -> String {
    let mapped: String = s
        .chars()
        .flat_map(|c| {
            let keep = c.is_alphanumeric();
            c.to_lowercase().map(move |l| if keep { l } else { ' ' })
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Indel similarity: `100 * 2 * LCS / (|a| + |b|)`. Two empty strings score 100.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against any equal-length window of the
/// longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let mut best = 0.0_f64;
    for window in long.windows(short.len()) {
        let score = ratio_chars(short, window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

/// Token-set similarity: insensitive to word order and to one query being a
/// subset of the other.
///
/// Returns 100 when the token sets intersect and one contains the other.
/// Otherwise keeps the best of: shared tokens plus each side's leftovers
/// compared against each other, and the shared tokens alone against either
/// side.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let sect: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = sect.join(" ");
    let ab = diff_ab.join(" ");
    let ba = diff_ba.join(" ");

    if sect.is_empty() {
        return ratio(&ab, &ba);
    }

    let sect_ab = format!("{sect} {ab}");
    let sect_ba = format!("{sect} {ba}");
    ratio(&sect_ab, &sect_ba)
        .max(ratio(&sect, &sect_ab))
        .max(ratio(&sect, &sect_ba))
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let lcs = lcs_len(a, b);
    100.0 * (2 * lcs) as f64 / total as f64
}

// Two-row DP, O(|a|·|b|) time, O(|b|) space.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ac in a {
        for (j, &bc) in b.iter().enumerate() {
            curr[j + 1] = if ac == bc {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// A similarity metric over normalized strings.
pub trait Similarity {
    fn score(&self, query: &str, candidate: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64,
{
    fn score(&self, query: &str, candidate: &str) -> f64 {
        self(query, candidate)
    }
}

/// Runtime-selectable scorer. Every variant returns a value in `0.0..=100.0`
/// and expects inputs that already went through [`normalize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scorer {
    #[default]
    TokenSet,
    Partial,
    Ratio,
}

impl Scorer {
    /// Accepts `token_set`, `partial` or `ratio` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "token_set" | "token-set" => Some(Self::TokenSet),
            "partial" => Some(Self::Partial),
            "ratio" => Some(Self::Ratio),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TokenSet => "token_set",
            Self::Partial => "partial",
            Self::Ratio => "ratio",
        }
    }
}

impl Similarity for Scorer {
    fn score(&self, query: &str, candidate: &str) -> f64 {
        match self {
            Self::TokenSet => token_set_ratio(query, candidate),
            Self::Partial => partial_ratio(query, candidate),
            Self::Ratio => ratio(query, candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  How do I RESET my password?  "), "how do i reset my password");
        assert_eq!(normalize("C:\\ProgramData\\MyApp"), "c programdata myapp");
        assert_eq!(normalize("???"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn ratio_basics() {
        assert!(approx(ratio("", ""), 100.0));
        assert!(approx(ratio("abc", ""), 0.0));
        assert!(approx(ratio("password", "password"), 100.0));
        // lcs("kitten", "sitting") = 4 => 2*4/13
        assert!(approx(ratio("kitten", "sitting"), 800.0 / 13.0));
    }

    #[test]
    fn partial_ratio_finds_substring() {
        assert!(approx(partial_ratio("logs", "where are logs stored"), 100.0));
        assert!(approx(partial_ratio("", "anything"), 0.0));
        assert!(partial_ratio("lgos", "where are logs stored") < 100.0);
    }

    #[test]
    fn token_set_ratio_ignores_order_and_subsets() {
        assert!(approx(token_set_ratio("password", "how do i reset my password"), 100.0));
        assert!(approx(token_set_ratio("stored logs where", "where are logs stored"), 100.0));
        assert!(approx(token_set_ratio("", "where are logs stored"), 0.0));
        let nonsense = token_set_ratio("qlll", "where are logs stored");
        assert!(nonsense < 40.0, "got {nonsense}");
    }

    #[test]
    fn token_set_ratio_partial_overlap() {
        // "logs location of" vs "logs are stored where": lcs = 9 over 37 chars
        let score = token_set_ratio("location of logs", "where are logs stored");
        assert!(approx(score, 1800.0 / 37.0), "got {score}");
        assert!(approx(token_set_ratio("where are logs stored", "location of logs"), score));
    }

    #[test]
    fn token_set_ratio_disjoint_sets_compare_sorted_tokens() {
        // no shared tokens: ratio("a b", "c d") has lcs 1 (the space)
        assert!(approx(token_set_ratio("b a", "d c"), 2.0 * 100.0 / 6.0));
    }

    #[test]
    fn scorer_names_round_trip() {
        for scorer in [Scorer::TokenSet, Scorer::Partial, Scorer::Ratio] {
            assert_eq!(Scorer::from_name(scorer.name()), Some(scorer));
        }
        assert_eq!(Scorer::from_name("TOKEN-SET"), Some(Scorer::TokenSet));
        assert_eq!(Scorer::from_name("levenshtein"), None);
    }

    #[test]
    fn closures_are_scorers() {
        let fixed = |_: &str, _: &str| 42.0;
        assert!(approx(fixed.score("a", "b"), 42.0));
    }
}
