//! Guess estimation formulas shared by the matchers.
//!
//! Every formula returns at least 1 guess. Calibration constants are gathered
//! at the top of the module.

use crate::matching::l33t::alternatives;

/// Floor for a single-character match that does not span the whole password.
pub const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
/// Floor for a multi-character match that does not span the whole password.
pub const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;

/// Year dates are measured against; fixed so results are reproducible.
pub const REFERENCE_YEAR: i32 = 2020;
pub const MIN_YEAR_SPACE: i32 = 20;
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Multiplier for dates written in a common format (`/`, `-` or `.`).
pub const COMMON_SEPARATOR_FACTOR: f64 = 0.5;
/// Multiplier for dates written with an uncommon separator.
pub const UNCOMMON_SEPARATOR_FACTOR: f64 = 4.0;

pub const DIGIT_CARDINALITY: u32 = 10;
pub const LOWER_CARDINALITY: u32 = 26;
pub const UPPER_CARDINALITY: u32 = 26;
pub const SYMBOL_CARDINALITY: u32 = 33;
pub const OTHER_CARDINALITY: u32 = 100;

pub fn n_choose_k(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut r = 1.0;
    for d in 1..=k {
        r *= (n - k + d) as f64;
        r /= d as f64;
    }
    r
}

/// Applies the sub-match floor used during parsing.
pub fn floor_guesses(guesses: f64, token_len: usize, password_len: usize) -> f64 {
    let min = if token_len < password_len {
        if token_len == 1 {
            MIN_SUBMATCH_GUESSES_SINGLE_CHAR
        } else {
            MIN_SUBMATCH_GUESSES_MULTI_CHAR
        }
    } else {
        1.0
    };
    guesses.max(min).max(1.0)
}

/// Brute-force character class used for cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Lower,
    Upper,
    Symbol,
    Other,
}

impl CharClass {
    pub const ALL: [CharClass; 5] = [
        CharClass::Digit,
        CharClass::Lower,
        CharClass::Upper,
        CharClass::Symbol,
        CharClass::Other,
    ];

    pub fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            CharClass::Digit
        } else if c.is_ascii_lowercase() {
            CharClass::Lower
        } else if c.is_ascii_uppercase() {
            CharClass::Upper
        } else if c.is_ascii_punctuation() || c == ' ' {
            CharClass::Symbol
        } else {
            CharClass::Other
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn cardinality(self) -> u32 {
        match self {
            CharClass::Digit => DIGIT_CARDINALITY,
            CharClass::Lower => LOWER_CARDINALITY,
            CharClass::Upper => UPPER_CARDINALITY,
            CharClass::Symbol => SYMBOL_CARDINALITY,
            CharClass::Other => OTHER_CARDINALITY,
        }
    }
}

/// `log10(cardinality ^ len)`, kept in log space so long spans stay finite.
pub fn brute_force_log10(cardinality: u32, len: usize) -> f64 {
    len as f64 * (cardinality.max(1) as f64).log10()
}

/// Extra guesses for capitalization inside a dictionary-class token.
pub fn uppercase_variations(token: &str) -> f64 {
    let chars: Vec<char> = token.chars().collect();
    let upper = chars.iter().filter(|c| c.is_uppercase()).count();
    let lower = chars.iter().filter(|c| c.is_lowercase()).count();

    if upper == 0 {
        return 1.0;
    }

    let n = chars.len();
    let first_only = chars[0].is_uppercase() && upper == 1 && n > 1;
    let last_only = chars[n - 1].is_uppercase() && upper == 1 && n > 1;
    if first_only || last_only || lower == 0 {
        return 2.0;
    }

    (1..=upper.min(lower))
        .map(|i| n_choose_k(upper + lower, i))
        .sum::<f64>()
        .max(1.0)
}

/// Extra guesses for l33t substitutions.
///
/// The attacker enumerates variants by increasing number of substituted
/// positions among the letters that have l33t forms, and for each substituted
/// position picks among its forms or the plain letter.
pub fn l33t_variations(token: &str, matched_word: &str) -> f64 {
    let mut subbable = 0;
    let mut substituted = 0;
    let mut alt_factor = 1.0;

    for (t, w) in token.chars().zip(matched_word.chars()) {
        let alts = alternatives(w).len();
        if alts > 0 {
            subbable += 1;
        }
        if t.to_lowercase().ne(std::iter::once(w)) && alts > 0 {
            substituted += 1;
            alt_factor *= (alts + 1) as f64;
        }
    }

    if substituted == 0 {
        return 1.0;
    }

    let combos: f64 = (1..=substituted).map(|i| n_choose_k(subbable, i)).sum();
    (combos * alt_factor).max(1.0)
}

pub fn dictionary_guesses(rank: usize, token: &str) -> f64 {
    (rank as f64 * uppercase_variations(token)).max(1.0)
}

pub fn reversed_dictionary_guesses(rank: usize, token: &str) -> f64 {
    dictionary_guesses(rank, token) * 2.0
}

pub fn l33t_dictionary_guesses(rank: usize, token: &str, matched_word: &str) -> f64 {
    dictionary_guesses(rank, token) * l33t_variations(token, matched_word)
}

pub fn repeat_guesses(base_guesses: f64, repeat_count: usize) -> f64 {
    (base_guesses * repeat_count as f64).max(1.0)
}

/// `alphabet factor × run length`, with a reduced factor for obvious starts.
pub fn sequence_guesses(token: &str, ascending: bool) -> f64 {
    let first = token.chars().next().unwrap_or('a');
    let mut base = if matches!(first, 'a' | 'A' | 'z' | 'Z' | '0' | '1' | '9') {
        4.0
    } else if first.is_ascii_digit() {
        10.0
    } else {
        26.0
    };
    if !ascending {
        base *= 2.0;
    }
    base * token.chars().count() as f64
}

/// Guesses for a keyboard run over a graph with `starting_positions` keys and
/// `average_degree` neighbours per key.
pub fn spatial_guesses(
    len: usize,
    turns: usize,
    shifted_count: usize,
    starting_positions: f64,
    average_degree: f64,
) -> f64 {
    let mut guesses = 0.0;
    for i in 2..=len {
        let possible_turns = turns.min(i - 1);
        for j in 1..=possible_turns {
            guesses += n_choose_k(i - 1, j - 1) * starting_positions * average_degree.powi(j as i32);
        }
    }

    if shifted_count > 0 {
        let unshifted = len.saturating_sub(shifted_count);
        if unshifted == 0 {
            guesses *= 2.0;
        } else {
            let variations: f64 = (1..=shifted_count.min(unshifted))
                .map(|i| n_choose_k(shifted_count + unshifted, i))
                .sum();
            guesses *= variations;
        }
    }

    guesses.max(1.0)
}

pub fn date_guesses(year: i32, separator: Option<char>) -> f64 {
    let year_space = (year - REFERENCE_YEAR).abs().max(MIN_YEAR_SPACE);
    let mut guesses = year_space as f64 * DAYS_PER_YEAR;
    match separator {
        Some('/' | '-' | '.') => guesses *= COMMON_SEPARATOR_FACTOR,
        Some(_) => guesses *= UNCOMMON_SEPARATOR_FACTOR,
        None => {}
    }
    guesses.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_n_choose_k() {
        assert_eq!(n_choose_k(5, 0), 1.0);
        assert_eq!(n_choose_k(5, 2), 10.0);
        assert_eq!(n_choose_k(3, 5), 0.0);
    }

    #[test]
    fn test_uppercase_variations() {
        assert_eq!(uppercase_variations("password"), 1.0);
        assert_eq!(uppercase_variations("Password"), 2.0);
        assert_eq!(uppercase_variations("passworD"), 2.0);
        assert_eq!(uppercase_variations("PASSWORD"), 2.0);
        // 2 upper, 6 lower: C(8,1) + C(8,2)
        assert_eq!(uppercase_variations("PaSsword"), 8.0 + 28.0);
        assert_eq!(uppercase_variations("1234"), 1.0);
    }

    #[test]
    fn test_l33t_variations_grow_with_substitutions() {
        assert_eq!(l33t_variations("password", "password"), 1.0);
        let one = l33t_variations("p4ssword", "password");
        let two = l33t_variations("p4ssw0rd", "password");
        let three = l33t_variations("p4$$w0rd", "password");
        assert!(one > 1.0);
        assert!(two > one);
        assert!(three > two);
    }

    #[test]
    fn test_l33t_variations_troubador() {
        // subbable t,o,b,a,o: C(5,1)+C(5,2)=15; o has 1 form, a has 2: 2*3
        assert_eq!(l33t_variations("tr0ub4dor", "troubador"), 90.0);
    }

    #[test]
    fn test_sequence_guesses() {
        assert_eq!(sequence_guesses("abc", true), 12.0);
        assert_eq!(sequence_guesses("cba", false), 26.0 * 2.0 * 3.0);
        assert_eq!(sequence_guesses("456", true), 30.0);
    }

    #[test]
    fn test_spatial_turns_increase_guesses() {
        let straight = spatial_guesses(6, 1, 0, 94.0, 4.6);
        let turning = spatial_guesses(6, 3, 0, 94.0, 4.6);
        assert!(turning > straight);
        assert!(spatial_guesses(6, 1, 1, 94.0, 4.6) > straight);
    }

    #[test]
    fn test_date_guesses() {
        assert_eq!(date_guesses(2019, None), 20.0 * 365.0);
        assert_eq!(date_guesses(1950, None), 70.0 * 365.0);
        assert_eq!(date_guesses(1950, Some('/')), 0.5 * 70.0 * 365.0);
        assert!(date_guesses(1950, Some('-')) < date_guesses(1950, None));
        assert_eq!(date_guesses(1950, Some('_')), 4.0 * 70.0 * 365.0);
    }

    #[test]
    fn test_floor_guesses() {
        assert_eq!(floor_guesses(2.0, 8, 8), 2.0);
        assert_eq!(floor_guesses(2.0, 1, 8), 10.0);
        assert_eq!(floor_guesses(2.0, 3, 8), 50.0);
        assert_eq!(floor_guesses(0.5, 3, 3), 1.0);
    }
}
