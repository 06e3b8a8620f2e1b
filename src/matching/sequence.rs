//! Sequence matching - runs like "abcd", "9753" or "XYZ".

use super::token;
use crate::guesses::sequence_guesses;
use crate::types::{Match, Pattern, SequenceSpace};

const MIN_SEQUENCE_LEN: usize = 3;
const MAX_DELTA: i64 = 5;

fn space_of(c: char) -> Option<SequenceSpace> {
    if c.is_ascii_lowercase() {
        Some(SequenceSpace::Lower)
    } else if c.is_ascii_uppercase() {
        Some(SequenceSpace::Upper)
    } else if c.is_ascii_digit() {
        Some(SequenceSpace::Digits)
    } else {
        None
    }
}

pub fn sequence_matches(password: &[char]) -> Vec<Match> {
    let n = password.len();
    let mut matches = Vec::new();
    if n < MIN_SEQUENCE_LEN {
        return matches;
    }

    let delta = |k: usize| password[k] as i64 - password[k - 1] as i64;

    let mut i = 0;
    let mut last_delta = delta(1);
    for k in 2..n {
        let d = delta(k);
        if d == last_delta {
            continue;
        }
        push_run(password, i, k - 1, last_delta, &mut matches);
        i = k - 1;
        last_delta = d;
    }
    push_run(password, i, n - 1, last_delta, &mut matches);

    matches
}

fn push_run(password: &[char], i: usize, j: usize, delta: i64, matches: &mut Vec<Match>) {
    if j - i + 1 < MIN_SEQUENCE_LEN || delta == 0 || delta.abs() > MAX_DELTA {
        return;
    }

    // a run may cross class boundaries; keep each same-class segment
    let mut start = i;
    while start <= j {
        let space = space_of(password[start]);
        let mut end = start;
        while end < j && space_of(password[end + 1]) == space {
            end += 1;
        }
        if let Some(space) = space {
            if end - start + 1 >= MIN_SEQUENCE_LEN {
                push_segment(password, start, end, space, delta > 0, matches);
            }
        }
        start = end + 1;
    }
}

fn push_segment(
    password: &[char],
    i: usize,
    j: usize,
    space: SequenceSpace,
    ascending: bool,
    matches: &mut Vec<Match>,
) {
    let token = token(password, i, j);
    matches.push(Match {
        guesses: sequence_guesses(&token, ascending),
        pattern: Pattern::Sequence { space, ascending },
        i,
        j,
        token,
    });
}
