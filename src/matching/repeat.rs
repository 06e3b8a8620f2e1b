//! Repeat matching - substrings made of a unit repeated a whole number of times.

use super::{omnimatch_with, token, MatchContext};
use crate::guesses::repeat_guesses;
use crate::scoring::most_guessable_match_sequence;
use crate::types::{Match, Pattern};

const MIN_REPEAT_LEN: usize = 3;

/// True if `unit` is not itself a repetition of a shorter unit.
fn is_primitive(unit: &[char]) -> bool {
    let n = unit.len();
    (1..n)
        .filter(|d| n % d == 0)
        .all(|d| unit.chunks(d).any(|chunk| chunk != &unit[..d]))
}

pub(crate) fn repeat_matches(password: &[char], ctx: &mut MatchContext<'_>) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();

    for i in 0..n {
        for unit_len in 1..=(n - i) / 2 {
            let unit = &password[i..i + unit_len];

            // only the start of a run, so each run is reported once
            if i >= unit_len && &password[i - unit_len..i] == unit {
                continue;
            }
            if !is_primitive(unit) {
                continue;
            }

            let mut count = 1;
            while i + (count + 1) * unit_len <= n
                && &password[i + count * unit_len..i + (count + 1) * unit_len] == unit
            {
                count += 1;
            }

            let total = count * unit_len;
            if count < 2 || total < MIN_REPEAT_LEN {
                continue;
            }

            let base_token: String = unit.iter().collect();
            let base_guesses = base_guesses(unit, &base_token, ctx);
            let j = i + total - 1;

            matches.push(Match {
                guesses: repeat_guesses(base_guesses, count),
                pattern: Pattern::Repeat {
                    base_token,
                    base_guesses,
                    repeat_count: count,
                },
                i,
                j,
                token: token(password, i, j),
            });
        }
    }

    matches
}

/// Guesses for the unit on its own, memoised per estimation.
fn base_guesses(unit: &[char], base_token: &str, ctx: &mut MatchContext<'_>) -> f64 {
    if let Some(guesses) = ctx.base_guesses_cache.get(base_token) {
        return *guesses;
    }
    let candidates = omnimatch_with(unit, ctx);
    let guesses = most_guessable_match_sequence(unit, candidates).guesses;
    ctx.base_guesses_cache.insert(base_token.to_string(), guesses);
    guesses
}
