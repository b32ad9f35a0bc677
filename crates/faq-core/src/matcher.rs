use serde::{Deserialize, Serialize};

use crate::fuzzy::{normalize, Scorer, Similarity};
use crate::model::{FaqTable, MatchResult};

/// How query length is measured for the threshold policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Unicode scalar values of the normalized query.
    #[default]
    Chars,
    /// Whitespace-separated tokens of the normalized query.
    Words,
}

impl LengthUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chars" | "characters" => Some(Self::Chars),
            "words" => Some(Self::Words),
            _ => None,
        }
    }

    pub fn measure(&self, normalized: &str) -> usize {
        match self {
            Self::Chars => normalized.chars().count(),
            Self::Words => normalized.split_whitespace().count(),
        }
    }
}

/// Length-dependent acceptance threshold.
///
/// Queries no longer than `short_query_max_len` need `short_query_threshold`,
/// longer ones need `long_query_threshold`. Neither tier may drop below
/// `score_floor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub short_query_max_len: usize,
    pub short_query_threshold: f64,
    pub long_query_threshold: f64,
    pub score_floor: f64,
    pub length_unit: LengthUnit,
}

impl MatchConfig {
    pub const DEFAULT_SHORT_QUERY_MAX_LEN: usize = 4;
    pub const DEFAULT_SHORT_QUERY_THRESHOLD: f64 = 80.0;
    pub const DEFAULT_LONG_QUERY_THRESHOLD: f64 = 60.0;

    /// Checks that every score lies in `0..=100` and that the short-query
    /// threshold is not below the long-query one.
    pub fn validate(&self) -> Result<(), String> {
        let scores = [
            ("short_query_threshold", self.short_query_threshold),
            ("long_query_threshold", self.long_query_threshold),
            ("score_floor", self.score_floor),
        ];
        for (name, value) in scores {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("{name} must be between 0 and 100, got {value}"));
            }
        }
        if self.short_query_threshold < self.long_query_threshold {
            return Err(format!(
                "short_query_threshold ({}) must not be lower than long_query_threshold ({})",
                self.short_query_threshold, self.long_query_threshold
            ));
        }
        Ok(())
    }

    /// Minimum score a query of `len` units must reach.
    pub fn threshold_for(&self, len: usize) -> f64 {
        let tier = if len <= self.short_query_max_len {
            self.short_query_threshold
        } else {
            self.long_query_threshold
        };
        tier.max(self.score_floor)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            short_query_max_len: Self::DEFAULT_SHORT_QUERY_MAX_LEN,
            short_query_threshold: Self::DEFAULT_SHORT_QUERY_THRESHOLD,
            long_query_threshold: Self::DEFAULT_LONG_QUERY_THRESHOLD,
            score_floor: 0.0,
            length_unit: LengthUnit::Chars,
        }
    }
}

/// Best-scoring question for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'t> {
    pub question: &'t str,
    pub answer: &'t str,
    pub score: f64,
}

/// Everything the matcher worked out for one query, before the threshold
/// decision is collapsed into a [`MatchResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'t> {
    pub normalized_query: String,
    pub query_len: usize,
    pub threshold: f64,
    pub best: Option<Candidate<'t>>,
}

impl Evaluation<'_> {
    pub fn accepted(&self) -> bool {
        !self.normalized_query.is_empty()
            && self
                .best
                .as_ref()
                .is_some_and(|c| c.score >= self.threshold)
    }

    pub fn into_result(self) -> MatchResult {
        if !self.accepted() {
            return MatchResult::NoMatch;
        }
        match self.best {
            Some(c) => MatchResult::Matched {
                question: c.question.to_string(),
                answer: c.answer.to_string(),
                score: c.score,
            },
            None => MatchResult::NoMatch,
        }
    }
}

/// A scorer bound to a threshold policy.
#[derive(Debug, Clone, Default)]
pub struct Matcher<S = Scorer> {
    config: MatchConfig,
    scorer: S,
}

impl Matcher<Scorer> {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            scorer: Scorer::default(),
        }
    }
}

impl<S: Similarity> Matcher<S> {
    pub fn with_scorer(config: MatchConfig, scorer: S) -> Self {
        Self { config, scorer }
    }

    /// Scores every question in table order. A later question replaces the
    /// current best only with a strictly higher score, so ties go to the
    /// question that sorts first, unless a tied question is the query itself
    /// (ignoring case and surrounding whitespace). That keeps questions which
    /// differ only in punctuation, like "C#?" and "C++?", reachable.
    pub fn evaluate<'t>(&self, table: &'t FaqTable, query: &str) -> Evaluation<'t> {
        let normalized_query = normalize(query);
        let query_len = self.config.length_unit.measure(&normalized_query);
        let threshold = self.config.threshold_for(query_len);

        let mut best: Option<Candidate<'t>> = None;
        if !normalized_query.is_empty() {
            let query_key = query.trim().to_lowercase();
            let mut best_is_exact = false;
            for (question, normalized, answer) in table.candidates() {
                let score = self.scorer.score(&normalized_query, normalized);
                let is_exact = question.trim().to_lowercase() == query_key;
                let replace = match &best {
                    None => true,
                    Some(current) => {
                        score > current.score
                            || (score == current.score && is_exact && !best_is_exact)
                    }
                };
                if replace {
                    best_is_exact = is_exact;
                    best = Some(Candidate {
                        question,
                        answer,
                        score,
                    });
                }
            }
        }

        Evaluation {
            normalized_query,
            query_len,
            threshold,
            best,
        }
    }

    pub fn match_query(&self, table: &FaqTable, query: &str) -> MatchResult {
        self.evaluate(table, query).into_result()
    }
}

/// Matches `query` against `table` with the default token-set scorer.
pub fn match_query(table: &FaqTable, query: &str, config: &MatchConfig) -> MatchResult {
    Matcher::new(config.clone()).match_query(table, query)
}
