//! Optimal parse selection.
//!
//! Dynamic programming over end positions: `best[k]` is the cheapest way, in
//! log10 guesses, to explain the first `k` characters with candidate matches
//! and brute-force spans.

use crate::guesses::{brute_force_log10, floor_guesses, CharClass};
use crate::matching::token;
use crate::types::{Match, ParseResult, Pattern};

/// Tolerance when comparing cumulative log10 guesses.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
enum Choice {
    Candidate(usize),
    BruteForce { start: usize, log10: f64 },
}

#[derive(Debug, Clone, Copy)]
struct Step {
    log10: f64,
    count: usize,
    start: usize,
    choice: Choice,
}

impl Step {
    /// Lower guesses, then fewer matches, then the earliest last start.
    fn beats(&self, other: &Step) -> bool {
        if self.log10 < other.log10 - EPSILON {
            return true;
        }
        if (self.log10 - other.log10).abs() <= EPSILON {
            return (self.count, self.start) < (other.count, other.start);
        }
        false
    }
}

/// Prefix counts of each brute-force character class.
struct ClassCounts {
    prefix: Vec<[usize; 5]>,
}

impl ClassCounts {
    fn new(password: &[char]) -> Self {
        let mut prefix = vec![[0; 5]; password.len() + 1];
        for (k, c) in password.iter().enumerate() {
            prefix[k + 1] = prefix[k];
            prefix[k + 1][CharClass::of(*c).index()] += 1;
        }
        ClassCounts { prefix }
    }

    /// Sum of the class sizes present in `password[j..k]`.
    fn cardinality(&self, j: usize, k: usize) -> u32 {
        CharClass::ALL
            .iter()
            .filter(|class| self.prefix[k][class.index()] > self.prefix[j][class.index()])
            .map(|class| class.cardinality())
            .sum()
    }
}

/// Selects the minimum-guesses parse of `password` from `candidates`.
///
/// Candidates may overlap. Positions no candidate explains cheaply are
/// covered by brute-force matches.
pub fn most_guessable_match_sequence(password: &[char], candidates: Vec<Match>) -> ParseResult {
    let n = password.len();
    if n == 0 {
        return ParseResult {
            matches: Vec::new(),
            guesses: 1.0,
            guesses_log10: 0.0,
        };
    }

    let mut candidates = candidates;
    for m in &mut candidates {
        m.guesses = floor_guesses(m.guesses, m.len(), n);
    }

    let mut by_end: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (index, m) in candidates.iter().enumerate() {
        if m.i <= m.j && m.j < n {
            by_end[m.j].push(index);
        }
    }

    let classes = ClassCounts::new(password);
    let mut best: Vec<Option<Step>> = vec![None; n + 1];
    best[0] = Some(Step {
        log10: 0.0,
        count: 0,
        start: 0,
        choice: Choice::BruteForce { start: 0, log10: 0.0 },
    });

    for k in 1..=n {
        let mut current: Option<Step> = None;
        let mut consider = |step: Step| {
            if current.as_ref().is_none_or(|c| step.beats(c)) {
                current = Some(step);
            }
        };

        for &index in &by_end[k - 1] {
            let m = &candidates[index];
            if let Some(prev) = best[m.i] {
                consider(Step {
                    log10: prev.log10 + m.guesses.log10(),
                    count: prev.count + 1,
                    start: m.i,
                    choice: Choice::Candidate(index),
                });
            }
        }

        for j in 0..k {
            if let Some(prev) = best[j] {
                let len = k - j;
                let raw = brute_force_log10(classes.cardinality(j, k), len);
                let log10 = raw.max(floor_guesses(1.0, len, n).log10());
                consider(Step {
                    log10: prev.log10 + log10,
                    count: prev.count + 1,
                    start: j,
                    choice: Choice::BruteForce { start: j, log10 },
                });
            }
        }

        best[k] = current;
    }

    let mut matches = Vec::new();
    let mut k = n;
    while k > 0 {
        let Some(step) = best[k] else { break };
        match step.choice {
            Choice::Candidate(index) => matches.push(candidates[index].clone()),
            Choice::BruteForce { start, log10 } => matches.push(Match {
                pattern: Pattern::BruteForce,
                i: start,
                j: k - 1,
                token: token(password, start, k - 1),
                guesses: 10f64.powf(log10),
            }),
        }
        k = step.start;
    }
    matches.reverse();

    let guesses_log10 = best[n].map_or(0.0, |s| s.log10);
    ParseResult {
        matches,
        guesses: 10f64.powf(guesses_log10),
        guesses_log10,
    }
}
